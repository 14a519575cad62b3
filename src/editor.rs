use anyhow::Result;
use scopeguard::guard;
use tracing::{debug, info};

use crate::gol::{Board, Cell, Point};
use crate::render::Screen;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Toggle,
    Commit,
}

impl Command {
    pub fn from_key(k: Key) -> Option<Self> {
        match k {
            Key::Char('w') | Key::Up => Some(Command::Up),
            Key::Char('s') | Key::Down => Some(Command::Down),
            Key::Char('a') | Key::Left => Some(Command::Left),
            Key::Char('d') | Key::Right => Some(Command::Right),
            Key::Char(' ') => Some(Command::Toggle),
            Key::Char('z') => Some(Command::Commit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

/// Cursor-driven authoring of an initial board.
///
/// The cursor is clamped to the board on both axes, at `0` below and
/// `width - 1` / `height - 1` above, so toggling always hits a real cell.
pub struct Editor {
    board: Board,
    cursor: Point,
}

impl Editor {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            board: Board::new(width, height, Cell::Empty)?,
            cursor: Point { x: 0, y: 0 },
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> &Point {
        &self.cursor
    }

    pub fn apply(&mut self, cmd: Command) -> Flow {
        let max_x = self.board.width() as i64 - 1;
        let max_y = self.board.height() as i64 - 1;
        match cmd {
            Command::Up => self.cursor.y = (self.cursor.y - 1).max(0),
            Command::Down => self.cursor.y = (self.cursor.y + 1).min(max_y),
            Command::Left => self.cursor.x = (self.cursor.x - 1).max(0),
            Command::Right => self.cursor.x = (self.cursor.x + 1).min(max_x),
            Command::Toggle => {
                let cell = self.board[self.cursor.clone()];
                self.board.set(&self.cursor, cell.toggled());
            }
            Command::Commit => return Flow::Done,
        }
        Flow::Continue
    }

    /// Reads keys until the commit key, redrawing after each one, and
    /// returns the authored board.
    pub fn run<S: Screen>(mut self, screen: &mut S) -> Result<Board> {
        info!(
            width = self.board.width(),
            height = self.board.height(),
            "interactive editing started"
        );
        let mut screen = guard(screen, |s| {
            let _ = s.show_cursor(None);
        });
        screen.draw(self.board())?;
        screen.show_cursor(Some(self.cursor()))?;
        loop {
            let key = screen.read_key()?;
            let flow = match Command::from_key(key) {
                Some(cmd) => {
                    debug!(?cmd, cursor = %self.cursor, "edit");
                    self.apply(cmd)
                }
                None => Flow::Continue,
            };
            screen.draw(self.board())?;
            screen.show_cursor(Some(self.cursor()))?;
            if flow == Flow::Done {
                break;
            }
        }
        info!(alive = self.board.alive(), "interactive editing committed");
        Ok(self.board)
    }
}
