use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Contents of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
    #[default]
    Empty,
}

impl Color {
    /// Returns the other stone color. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            Color::Empty => Color::Empty,
        }
    }

    pub fn is_stone(self) -> bool {
        self != Color::Empty
    }
}

/// A board coordinate. `x` is the column, `y` the row, both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Panics when the coordinate is off the board.
    pub fn new(x: u8, y: u8) -> Self {
        assert!(
            (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE,
            "position ({x}, {y}) is off the board"
        );
        Self { x, y }
    }

    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Row-major index, `y * 8 + x`.
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    pub fn from_index(index: usize) -> Self {
        assert!(index < NUM_SQUARES, "square index {index} is off the board");
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }

    /// Every coordinate in row-major scan order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_SQUARES).map(Position::from_index)
    }

    /// The neighbouring coordinate one step along `(dx, dy)`, or `None` at the edge.
    pub fn step(self, dx: i8, dy: i8) -> Option<Self> {
        Self::try_new(self.x as i32 + dx as i32, self.y as i32 + dy as i32)
    }

    pub fn is_corner(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        (self.x == 0 || self.x == last) && (self.y == 0 || self.y == last)
    }
}

impl fmt::Display for Position {
    /// Algebraic notation, e.g. `d3` for `(3, 2)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
    }
}

/// A position together with the color currently occupying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stone {
    pub position: Position,
    pub color: Color,
}

/// The two participants of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Human,
    Computer,
}

/// Turn controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnState {
    AwaitingHuman,
    ComputerThinking,
    GameOver,
}

/// Status messages the UI renders as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum StatusKind {
    YourTurn,
    NotYourTurn,
    InvalidMove,
    ComputerThinking,
    ComputerPassed,
    YouMustPass,
    #[serde(rename_all = "camelCase")]
    GameOver {
        winner: Option<Color>,
        black_count: u8,
        white_count: u8,
    },
}

/// Outbound notifications, drained by the UI after every call into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    StoneChanged { x: u8, y: u8, color: Color },
    StatusChanged { status: StatusKind },
    TurnStateChanged { state: TurnState },
}

/// How the game ended from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// `None` on a tie.
    pub winner: Option<Color>,
    pub black_count: u8,
    pub white_count: u8,
}

impl GameResult {
    pub fn from_counts(black_count: u8, white_count: u8) -> Self {
        let winner = match black_count.cmp(&white_count) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        };
        Self {
            winner,
            black_count,
            white_count,
        }
    }

    pub fn human_outcome(&self, human: Color) -> Outcome {
        match self.winner {
            None => Outcome::Draw,
            Some(color) if color == human => Outcome::Win,
            Some(_) => Outcome::Loss,
        }
    }

    pub fn status(&self) -> StatusKind {
        StatusKind::GameOver {
            winner: self.winner,
            black_count: self.black_count,
            white_count: self.white_count,
        }
    }
}

/// Snapshot of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// 64 cells in row-major order.
    pub board: Vec<Color>,
    pub human_color: Color,
    pub turn_state: TurnState,
    pub black_count: u8,
    pub white_count: u8,
    /// Cells the human may play right now. Empty unless awaiting the human.
    pub legal_moves: Vec<Position>,
    pub result: Option<GameResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_in_row_major_order() {
        let pos = Position::new(3, 2);
        assert_eq!(pos.index(), 19);
        assert_eq!(Position::from_index(19), pos);
        assert_eq!(Position::all().nth(9), Some(Position::new(1, 1)));
    }

    #[test]
    fn step_stops_at_the_edge() {
        assert_eq!(Position::new(0, 0).step(-1, 0), None);
        assert_eq!(Position::new(7, 7).step(1, 1), None);
        assert_eq!(Position::new(3, 3).step(1, -1), Some(Position::new(4, 2)));
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn new_rejects_off_board_coordinates() {
        Position::new(8, 0);
    }

    #[test]
    fn only_four_squares_are_corners() {
        let corners: Vec<_> = Position::all().filter(|p| p.is_corner()).collect();
        assert_eq!(
            corners,
            vec![
                Position::new(0, 0),
                Position::new(7, 0),
                Position::new(0, 7),
                Position::new(7, 7),
            ]
        );
    }

    #[test]
    fn result_picks_majority_color_and_ties_have_no_winner() {
        let black_wins = GameResult::from_counts(40, 24);
        assert_eq!(black_wins.winner, Some(Color::Black));
        assert_eq!(black_wins.human_outcome(Color::Black), Outcome::Win);
        assert_eq!(black_wins.human_outcome(Color::White), Outcome::Loss);

        let tie = GameResult::from_counts(32, 32);
        assert_eq!(tie.winner, None);
        assert_eq!(tie.human_outcome(Color::White), Outcome::Draw);
    }

    #[test]
    fn display_uses_algebraic_notation() {
        assert_eq!(Position::new(3, 2).to_string(), "d3");
        assert_eq!(Position::new(7, 7).to_string(), "h8");
    }
}
