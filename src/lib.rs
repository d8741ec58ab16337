use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod resolver;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use error::{ConfigError, Rejection};
pub use game::{ComputerTurn, GameSession, MoveSelector, Placement};
pub use types::{
    Color, GameEvent, GameResult, GameState, Outcome, Position, Side, StatusKind, TurnState,
};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
