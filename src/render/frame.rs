use crate::gol::{Board, Cell};

pub const EMPTY: char = ' ';
pub const ALIVE: char = 'X';

pub fn glyph(c: Cell) -> char {
    match c {
        Cell::Alive => ALIVE,
        Cell::Empty => EMPTY,
    }
}

/// Text rendering of a board, one string per row.
pub struct Frame<'a> {
    pts: &'a Board,
}

impl<'a> Frame<'a> {
    pub fn new(pts: &'a Board) -> Self {
        Self { pts }
    }

    pub fn render(&self) -> Vec<String> {
        self.pts
            .rows()
            .map(|row| row.iter().copied().map(glyph).collect())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gol::Point;

    #[test]
    fn test_individual() {
        let mut b = Board::new(3, 2, Cell::Empty).unwrap();
        b[Point { x: 0, y: 0 }] = Cell::Alive;
        b[Point { x: 2, y: 1 }] = Cell::Alive;
        let f = Frame::new(&b);
        assert_eq!(f.render(), vec!["X  ".to_string(), "  X".to_string()]);
        assert_eq!(f.render().len(), b.height() as usize);
    }

    #[test]
    fn test_only_two_glyphs() {
        let b = Board::new(4, 4, Cell::Alive).unwrap();
        let lines = Frame::new(&b).render();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().all(|c| c == ALIVE)));
        assert_eq!(glyph(Cell::Empty), ' ');
    }
}
