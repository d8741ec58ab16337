use std::fmt;

use crate::types::{BOARD_SIZE, Color, NUM_SQUARES, Position, Stone};

/// 8x8 grid of cells. Copying a board yields a fully independent board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Color; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (stone, color) in Self::opening_stones() {
            board.set(stone, color);
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [Color::Empty; NUM_SQUARES],
        }
    }

    /// The four center stones of a new game.
    pub fn opening_stones() -> [(Position, Color); 4] {
        [
            (Position::new(3, 3), Color::White),
            (Position::new(4, 3), Color::Black),
            (Position::new(3, 4), Color::Black),
            (Position::new(4, 4), Color::White),
        ]
    }

    /// Parses eight rows of `B`, `W` and `.` (or `-`). Whitespace is ignored.
    /// Panics on malformed input; intended for fixtures.
    pub fn from_diagram(rows: &[&str; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(cells.len(), BOARD_SIZE, "row {y} must have {BOARD_SIZE} cells");
            for (x, cell) in cells.into_iter().enumerate() {
                let color = match cell {
                    'B' | 'b' | 'X' | 'x' => Color::Black,
                    'W' | 'w' | 'O' | 'o' => Color::White,
                    '.' | '-' => Color::Empty,
                    other => panic!("unexpected cell {other:?} at ({x}, {y})"),
                };
                board.set(Position::new(x as u8, y as u8), color);
            }
        }
        board
    }

    pub fn get(&self, pos: Position) -> Color {
        self.cells[pos.index()]
    }

    /// Unconditional overwrite. Legality is the resolver's concern.
    pub fn set(&mut self, pos: Position, color: Color) {
        self.cells[pos.index()] = color;
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Color::Empty
    }

    /// Every cell as a stone, in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = Stone> + '_ {
        Position::all().map(|position| Stone {
            position,
            color: self.get(position),
        })
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Color::Black => (black + 1, white),
                Color::White => (black, white + 1),
                Color::Empty => (black, white),
            })
    }

    pub fn count_of(&self, color: Color) -> u8 {
        self.cells.iter().filter(|&&cell| cell == color).count() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.count_of(Color::Empty)
    }

    pub fn cells(&self) -> &[Color; NUM_SQUARES] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for y in 0..BOARD_SIZE {
            write!(f, "{}", y + 1)?;
            for x in 0..BOARD_SIZE {
                let symbol = match self.get(Position::new(x as u8, y as u8)) {
                    Color::Black => 'B',
                    Color::White => 'W',
                    Color::Empty => '.',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_has_standard_center_pattern() {
        let board = Board::new();

        assert_eq!(board.get(Position::new(3, 3)), Color::White);
        assert_eq!(board.get(Position::new(4, 4)), Color::White);
        assert_eq!(board.get(Position::new(4, 3)), Color::Black);
        assert_eq!(board.get(Position::new(3, 4)), Color::Black);
        assert_eq!(board.count(), (2, 2));
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn copy_is_independent_of_original() {
        let original = Board::new();
        let mut copy = original;

        copy.set(Position::new(0, 0), Color::Black);
        copy.set(Position::new(3, 3), Color::Black);

        assert_eq!(original.get(Position::new(0, 0)), Color::Empty);
        assert_eq!(original.get(Position::new(3, 3)), Color::White);
        assert_ne!(original, copy);
    }

    #[test]
    fn stones_cover_every_coordinate_exactly_once() {
        let board = Board::new();
        let positions: Vec<Position> = board.stones().map(|s| s.position).collect();

        assert_eq!(positions.len(), NUM_SQUARES);
        for (index, pos) in positions.iter().enumerate() {
            assert_eq!(pos.index(), index);
        }
    }

    #[test]
    fn diagram_matches_initial_board() {
        let board = Board::from_diagram(&[
            "........",
            "........",
            "........",
            "...WB...",
            "...BW...",
            "........",
            "........",
            "........",
        ]);

        assert_eq!(board, Board::new());
    }

    #[test]
    fn display_renders_rows_top_down() {
        let rendered = Board::new().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[4], "4 . . . W B . . .");
        assert_eq!(lines[5], "5 . . . B W . . .");
    }
}
