use anyhow::{ensure, Result};
use rand::Rng;
use std::{
    fmt::Display,
    ops::{Add, Index, IndexMut},
};

pub mod step;

pub use step::Stepper;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            Cell::Alive => Cell::Empty,
            Cell::Empty => Cell::Alive,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Empty
        }
    }
}

/// Fixed-size grid of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    buf: Vec<Cell>,
    width: u32,
}

#[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}
impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
impl Add for Point {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.x += rhs.x;
        self.y += rhs.y;
        self
    }
}
impl<I1, I2> From<(I1, I2)> for Point
where
    I1: Into<i64>,
    I2: Into<i64>,
{
    fn from((l, r): (I1, I2)) -> Self {
        Self {
            x: l.into(),
            y: r.into(),
        }
    }
}

/// Moore neighbourhood offsets as `(dx, dy)`.
const NEIGHBORHOOD: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Board {
    pub fn new(width: u32, height: u32, fill: Cell) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "board dimensions must be non-zero, got {}x{}",
            width,
            height
        );
        Ok(Board {
            buf: vec![fill; width as usize * height as usize],
            width,
        })
    }

    /// Builds a board from row-major cells. The buffer length must be a
    /// non-zero multiple of `width`.
    #[cfg(test)]
    pub fn from_cells(width: u32, buf: Vec<Cell>) -> Result<Self> {
        ensure!(width > 0, "board width must be non-zero");
        ensure!(
            !buf.is_empty() && buf.len() % width as usize == 0,
            "{} cells cannot form rows of width {}",
            buf.len(),
            width
        );
        Ok(Board { buf, width })
    }

    /// Every cell is independently alive with probability 1/2.
    pub fn random<R: Rng>(width: u32, height: u32, rng: &mut R) -> Result<Self> {
        let mut board = Self::new(width, height, Cell::Empty)?;
        for cell in board.buf.iter_mut() {
            *cell = rng.random_bool(0.5).into();
        }
        Ok(board)
    }

    fn pt_to_index(&self, pt: &Point) -> Option<usize> {
        if pt.x < 0 || pt.y < 0 || pt.x >= self.width() as i64 || pt.y >= self.height() as i64 {
            return None;
        }
        Some((pt.y * self.width as i64 + pt.x) as usize)
    }

    fn checked_index(&self, pt: &Point) -> usize {
        match self.pt_to_index(pt) {
            Some(idx) => idx,
            None => panic!(
                "pt {} outside board bounds {}x{}",
                pt,
                self.width(),
                self.height()
            ),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        (self.buf.len() / (self.width as usize)) as u32
    }

    /// `None` when `pt` lies outside the board.
    pub fn get(&self, pt: &Point) -> Option<Cell> {
        self.pt_to_index(pt).map(|i| self.buf[i])
    }

    pub fn set(&mut self, pt: &Point, cell: Cell) {
        let idx = self.checked_index(pt);
        self.buf[idx] = cell;
    }

    /// Number of live cells in the Moore neighbourhood of `pt`. Positions
    /// past the edge count as empty; the grid does not wrap.
    pub fn live_neighbors(&self, pt: &Point) -> usize {
        NEIGHBORHOOD
            .iter()
            .filter_map(|&(dx, dy)| self.get(&(pt.clone() + Point::from((dx, dy)))))
            .filter(|c| c.is_alive())
            .count()
    }

    pub fn alive(&self) -> usize {
        self.buf.iter().filter(|c| c.is_alive()).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.buf.chunks(self.width as usize)
    }
}

impl Index<Point> for Board {
    type Output = Cell;
    fn index(&self, index: Point) -> &Self::Output {
        &self.buf[self.checked_index(&index)]
    }
}
impl IndexMut<Point> for Board {
    fn index_mut(&mut self, index: Point) -> &mut Self::Output {
        let idx = self.checked_index(&index);
        &mut self.buf[idx]
    }
}
