use anyhow::Result;
use std::{collections::VecDeque, time::Duration};

use crate::editor::Key;
use crate::gol::{Board, Point};
use crate::render::{Interrupted, Screen};

/// In-memory screen. Records what is drawn and replays scripted keys; once
/// the script runs out, reading a key behaves like a termination signal.
pub struct FakeScreen {
    pub width: u32,
    pub height: u32,
    pub keys: VecDeque<Key>,
    pub frames: Vec<Board>,
    pub cursor: Option<Point>,
    pub cursor_moves: Vec<Point>,
    pub pauses: Vec<Duration>,
}

impl FakeScreen {
    pub fn new<I: IntoIterator<Item = Key>>(width: u32, height: u32, keys: I) -> Self {
        Self {
            width,
            height,
            keys: keys.into_iter().collect(),
            frames: Vec::new(),
            cursor: None,
            cursor_moves: Vec::new(),
            pauses: Vec::new(),
        }
    }
}

impl Screen for FakeScreen {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, b: &Board) -> Result<()> {
        self.frames.push(b.clone());
        Ok(())
    }

    fn show_cursor(&mut self, at: Option<&Point>) -> Result<()> {
        self.cursor = at.cloned();
        if let Some(pt) = at {
            self.cursor_moves.push(pt.clone());
        }
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        self.keys.pop_front().ok_or_else(|| Interrupted.into())
    }

    fn pause(&mut self, d: Duration) -> Result<()> {
        self.pauses.push(d);
        Ok(())
    }
}
