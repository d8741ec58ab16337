use serde::Serialize;
use thiserror::Error;

use crate::types::Position;

/// Why a session refused an action. None of these are fatal; the refused
/// call leaves the board and the event queue as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum Rejection {
    #[error("it is not the player's turn")]
    NotYourTurn,
    #[error("illegal move at {0}")]
    InvalidMove(Position),
    #[error("game is already over")]
    GameOver,
    #[error("the computer is not thinking")]
    ComputerNotThinking,
    #[error("move selector chose illegal move at {0}")]
    IllegalComputerMove(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("human color must be black or white")]
    EmptyHumanColor,
}
