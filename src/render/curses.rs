use anyhow::{Context, Result};
use pancurses::{Input, Window};
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    SigId,
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use tracing::{debug, warn};

use crate::editor::Key;
use crate::gol::{Board, Point};

use super::{frame::Frame, Interrupted, Screen};

/// Granularity at which blocking waits notice a termination signal.
const POLL: Duration = Duration::from_millis(50);

/// Curses-backed terminal session.
///
/// Opening it puts the terminal into curses mode (no echo, no line
/// buffering, hidden cursor) and arms SIGINT/SIGTERM. Dropping it restores
/// the terminal, so every exit path out of `main`, including the unwind
/// triggered by a signal, leaves the terminal usable.
pub struct Curses {
    win: Window,
    term: Arc<AtomicBool>,
    sig_ids: Vec<SigId>,
}

impl Curses {
    pub fn open() -> Result<Self> {
        let term = Arc::new(AtomicBool::new(false));
        // registered before initscr so curses leaves these signals to us
        let sig_ids = [SIGINT, SIGTERM]
            .into_iter()
            .map(|sig| {
                signal_hook::flag::register(sig, Arc::clone(&term))
                    .with_context(|| format!("failed to register handler for signal {}", sig))
            })
            .collect::<Result<Vec<_>>>()?;

        let win = pancurses::initscr();
        pancurses::noecho();
        pancurses::cbreak();
        pancurses::curs_set(0);
        win.keypad(true);
        win.timeout(POLL.as_millis() as i32);
        debug!("curses session opened");
        Ok(Self { win, term, sig_ids })
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.term.load(Ordering::Relaxed) {
            warn!("termination signal received");
            return Err(Interrupted.into());
        }
        Ok(())
    }
}

impl Drop for Curses {
    fn drop(&mut self) {
        pancurses::curs_set(1);
        pancurses::endwin();
        for id in self.sig_ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
        debug!("curses session closed");
    }
}

fn map_input(input: Input) -> Key {
    match input {
        Input::Character(c) => Key::Char(c),
        Input::KeyUp => Key::Up,
        Input::KeyDown => Key::Down,
        Input::KeyLeft => Key::Left,
        Input::KeyRight => Key::Right,
        _ => Key::Other,
    }
}

impl Screen for Curses {
    fn size(&self) -> (u32, u32) {
        let (h, w) = self.win.get_max_yx();
        (w.max(0) as u32, h.max(0) as u32)
    }

    fn draw(&mut self, b: &Board) -> Result<()> {
        let (w, h) = self.size();
        for (y, line) in Frame::new(b).render().iter().take(h as usize).enumerate() {
            let clipped: String = line.chars().take(w as usize).collect();
            // the bottom-right cell reports an error after wrapping the
            // cursor; the glyph is still drawn
            self.win.mvaddstr(y as i32, 0, &clipped);
        }
        self.win.refresh();
        Ok(())
    }

    fn show_cursor(&mut self, at: Option<&Point>) -> Result<()> {
        match at {
            Some(pt) => {
                pancurses::curs_set(2);
                self.win.mv(pt.y as i32, pt.x as i32);
            }
            None => {
                pancurses::curs_set(0);
            }
        }
        self.win.refresh();
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            self.check_interrupt()?;
            if let Some(input) = self.win.getch() {
                if input == Input::KeyResize {
                    continue;
                }
                return Ok(map_input(input));
            }
        }
    }

    fn pause(&mut self, d: Duration) -> Result<()> {
        let deadline = Instant::now() + d;
        loop {
            self.check_interrupt()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(POLL.min(deadline - now));
        }
    }
}
