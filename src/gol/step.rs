use anyhow::Result;
use rayon::prelude::*;

use super::{Board, Cell, Point};

/// B3/S23: born on exactly 3, survives on 2 or 3.
fn next_state(current: Cell, live_neighbors: usize) -> Cell {
    match live_neighbors {
        3 => Cell::Alive,
        2 => current,
        _ => Cell::Empty,
    }
}

fn mk_pool(threads: usize) -> Result<rayon::ThreadPool> {
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("gol-step-{}", i))
        .build()?)
}

/// Advances a board one generation at a time.
///
/// The stepper owns the staging grid the next generation is written into.
/// After each step the staging grid and the caller's board are swapped, so
/// the previous generation's storage is reused by the following step. The
/// staging grid is reallocated whenever its dimensions differ from the board
/// being stepped.
pub struct Stepper {
    pool: rayon::ThreadPool,
    stage: Option<Board>,
}

impl Stepper {
    pub fn new(threads: usize) -> Result<Self> {
        Ok(Self {
            pool: mk_pool(threads.max(1))?,
            stage: None,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Replaces `board` with its next generation. The whole generation is
    /// computed before `board` is touched.
    pub fn step(&mut self, board: &mut Board) {
        let mut stage = match self.stage.take() {
            Some(s) if s.width() == board.width() && s.height() == board.height() => s,
            _ => board.clone(),
        };
        let width = board.width() as usize;
        let current: &Board = board;
        self.pool.install(|| {
            stage
                .buf
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, cell) in row.iter_mut().enumerate() {
                        let pt = Point::from((x as u32, y as u32));
                        let n = current.live_neighbors(&pt);
                        *cell = next_state(current[pt], n);
                    }
                });
        });
        std::mem::swap(board, &mut stage);
        self.stage = Some(stage);
    }
}
