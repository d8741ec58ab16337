//! Capture computation and legality.
//!
//! Nothing here mutates a board except [`play`], which is the single path
//! through which a resolved placement reaches the board.

use crate::board::Board;
use crate::error::Rejection;
use crate::types::{Color, Position};

/// Opponent stones flipped by one placement.
pub type CaptureSet = Vec<Position>;

pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Stones captured along one direction by placing `color` at `origin`.
///
/// The run of opponent stones counts only when it is closed by a stone of
/// `color`; running into the edge or an empty cell captures nothing.
pub fn captures_in_direction(
    board: &Board,
    origin: Position,
    color: Color,
    (dx, dy): (i8, i8),
) -> CaptureSet {
    let opponent = color.opponent();
    let mut line = Vec::new();
    let mut cursor = origin.step(dx, dy);

    while let Some(pos) = cursor {
        let cell = board.get(pos);
        if cell == opponent {
            line.push(pos);
        } else if cell == color {
            return line;
        } else {
            break;
        }
        cursor = pos.step(dx, dy);
    }

    Vec::new()
}

/// All stones captured by placing `color` at `pos`. Occupied cells capture nothing.
pub fn captures(board: &Board, pos: Position, color: Color) -> CaptureSet {
    if !board.is_empty_at(pos) || !color.is_stone() {
        return Vec::new();
    }

    DIRECTIONS
        .iter()
        .flat_map(|&dir| captures_in_direction(board, pos, color, dir))
        .collect()
}

pub fn is_legal(board: &Board, pos: Position, color: Color) -> bool {
    !captures(board, pos, color).is_empty()
}

/// Legal moves for `color` in row-major scan order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Position> {
    Position::all()
        .filter(|&pos| is_legal(board, pos, color))
        .collect()
}

pub fn has_legal_move(board: &Board, color: Color) -> bool {
    Position::all().any(|pos| is_legal(board, pos, color))
}

/// Resolves a placement without touching the board.
pub fn attempt_move(board: &Board, color: Color, pos: Position) -> Result<CaptureSet, Rejection> {
    let flips = captures(board, pos, color);
    if flips.is_empty() {
        Err(Rejection::InvalidMove(pos))
    } else {
        Ok(flips)
    }
}

/// Places one stone and flips captured stones.
/// Returns the flipped positions; the board is unchanged when the move is illegal.
pub fn play(board: &mut Board, color: Color, pos: Position) -> Result<CaptureSet, Rejection> {
    let flips = attempt_move(board, color, pos)?;
    board.set(pos, color);
    for &flipped in &flips {
        board.set(flipped, color);
    }
    Ok(flips)
}
