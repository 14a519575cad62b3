use anyhow::Result;
use std::{fmt::Display, time::Duration};

use crate::editor::Key;
use crate::gol::{Board, Point};

pub mod curses;
pub mod frame;

/// Raised by a [`Screen`] once a termination signal has been received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

impl Display for Interrupted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "interrupted by termination signal")
    }
}
impl std::error::Error for Interrupted {}

/// Character surface the simulation draws on and reads keys from.
pub trait Screen {
    /// Reported `(width, height)` in cells. Either may be zero.
    fn size(&self) -> (u32, u32);
    fn draw(&mut self, b: &Board) -> Result<()>;
    /// Shows the cursor at `at`, or hides it for `None`.
    fn show_cursor(&mut self, at: Option<&Point>) -> Result<()>;
    /// Blocks until a key is pressed.
    fn read_key(&mut self) -> Result<Key>;
    fn pause(&mut self, d: Duration) -> Result<()>;
}
