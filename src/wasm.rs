//! Browser-facing handle around [`GameSession`].
//!
//! Every call returns plain JS values produced by `serde-wasm-bindgen`; the
//! UI drains `takeEvents()` after each call and renders from those. Field
//! names are camelCase in both directions.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::Rejection;
use crate::game::GameSession;
use crate::types::Position;

/// Reply to a clicked cell. Exactly one of the fields is meaningful.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CellReply {
    captures: Vec<Position>,
    rejected: Option<Rejection>,
}

#[wasm_bindgen]
pub struct OthelloGame {
    session: GameSession,
}

#[wasm_bindgen]
impl OthelloGame {
    /// `config` is a partial `GameConfig` object, or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<OthelloGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let session = GameSession::new(config)?;
        Ok(Self { session })
    }

    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, x: i32, y: i32) -> Result<JsValue, JsError> {
        let pos = Position::try_new(x, y)
            .ok_or_else(|| JsError::new(&format!("cell ({x}, {y}) is off the board")))?;

        let reply = match self.session.select_cell(pos) {
            Ok(captures) => CellReply {
                captures,
                rejected: None,
            },
            Err(rejection) => CellReply {
                captures: Vec::new(),
                rejected: Some(rejection),
            },
        };
        Ok(serde_wasm_bindgen::to_value(&reply)?)
    }

    #[wasm_bindgen(js_name = runComputerTurn)]
    pub fn run_computer_turn(&mut self) -> Result<JsValue, JsError> {
        let turn = self.session.run_computer_turn()?;
        Ok(serde_wasm_bindgen::to_value(&turn)?)
    }

    /// `undefined` until the thinking delay has passed.
    #[wasm_bindgen(js_name = pollComputerTurn)]
    pub fn poll_computer_turn(&mut self) -> Result<JsValue, JsError> {
        match self.session.poll_computer_turn() {
            Some(turn) => Ok(serde_wasm_bindgen::to_value(&turn?)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = takeEvents)]
    pub fn take_events(&mut self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.take_events())?)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.to_game_state())?)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = thinkDelayMs)]
    pub fn think_delay_ms(&self) -> u32 {
        u32::try_from(self.session.config().think_delay_ms).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }
}
