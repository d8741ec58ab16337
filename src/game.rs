use serde::Serialize;
use tracing::{debug, info, warn};
use web_time::Instant;

use crate::ai::CornerSafeSelector;
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{ConfigError, Rejection};
use crate::resolver::{self, CaptureSet, has_legal_move, legal_moves};
use crate::types::{
    Color, GameEvent, GameResult, GameState, Position, Side, StatusKind, TurnState,
};

/// Picks the computer's move. `None` means the computer passes.
pub trait MoveSelector: Send {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Position>;
}

/// Always plays the first legal move in scan order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Position> {
        legal_moves(board, color).first().copied()
    }
}

/// One stone placed on the real board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub position: Position,
    pub color: Color,
    pub captures: CaptureSet,
}

/// What the computer did in one thinking cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerTurn {
    /// `None` when the computer passed.
    pub placement: Option<Placement>,
    pub passed: bool,
    /// The human had no reply, so the computer is thinking again.
    pub human_passed: bool,
}

/// One game between a human and the computer.
pub struct GameSession {
    board: Board,
    config: GameConfig,
    state: TurnState,
    result: Option<GameResult>,
    thinking_since: Option<Instant>,
    events: Vec<GameEvent>,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let selector = match config.seed {
            Some(seed) => CornerSafeSelector::with_seed(seed),
            None => CornerSafeSelector::new(),
        };
        Self::with_selector(config, Box::new(selector))
    }

    pub fn with_selector(
        config: GameConfig,
        selector: Box<dyn MoveSelector>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self::blank(config, selector);
        session.reset();
        Ok(session)
    }

    /// Starts from an arbitrary position with `to_move` playing next.
    pub fn with_board(
        config: GameConfig,
        board: Board,
        to_move: Side,
        selector: Box<dyn MoveSelector>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self::blank(config, selector);
        session.start(board, to_move);
        Ok(session)
    }

    fn blank(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::empty(),
            config,
            state: TurnState::AwaitingHuman,
            result: None,
            thinking_since: None,
            events: Vec::new(),
            selector,
        }
    }

    /// Clears the board, places the four center stones and hands the first
    /// move to whoever plays black.
    pub fn reset(&mut self) {
        let to_move = if self.human_color() == Color::Black {
            Side::Human
        } else {
            Side::Computer
        };
        self.start(Board::new(), to_move);
    }

    fn start(&mut self, board: Board, to_move: Side) {
        self.events.clear();
        self.result = None;
        self.thinking_since = None;

        self.board = Board::empty();
        for stone in board.stones() {
            self.set_stone(stone.position, stone.color);
        }

        let (black, white) = self.board.count();
        info!(human = ?self.human_color(), ?to_move, black, white, "game started");

        let human_can_move = has_legal_move(&self.board, self.human_color());
        let computer_can_move = has_legal_move(&self.board, self.computer_color());

        if !human_can_move && !computer_can_move {
            self.finish();
        } else if to_move == Side::Computer {
            self.enter_computer_thinking(StatusKind::ComputerThinking);
        } else if human_can_move {
            self.set_state(TurnState::AwaitingHuman);
            self.set_status(StatusKind::YourTurn);
        } else {
            debug!("human has no opening move");
            self.enter_computer_thinking(StatusKind::YouMustPass);
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn_state(&self) -> TurnState {
        self.state
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn human_color(&self) -> Color {
        self.config.human_color
    }

    pub fn computer_color(&self) -> Color {
        self.config.computer_color()
    }

    pub fn is_game_over(&self) -> bool {
        self.state == TurnState::GameOver
    }

    /// Cells the human may play now; empty unless it is the human's turn.
    pub fn human_legal_moves(&self) -> Vec<Position> {
        if self.state == TurnState::AwaitingHuman {
            legal_moves(&self.board, self.human_color())
        } else {
            Vec::new()
        }
    }

    /// Drains queued notifications in the order they were emitted.
    ///
    /// The queue is only emptied here and by [`reset`](Self::reset); a UI is
    /// expected to drain it after every call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.cells().to_vec(),
            human_color: self.human_color(),
            turn_state: self.state,
            black_count,
            white_count,
            legal_moves: self.human_legal_moves(),
            result: self.result,
        }
    }

    /// Handles a click on `pos` by the human.
    pub fn select_cell(&mut self, pos: Position) -> Result<CaptureSet, Rejection> {
        match self.state {
            TurnState::GameOver => return Err(Rejection::GameOver),
            TurnState::ComputerThinking => {
                self.set_status(StatusKind::NotYourTurn);
                return Err(Rejection::NotYourTurn);
            }
            TurnState::AwaitingHuman => {}
        }

        let human = self.human_color();
        let captures = match resolver::attempt_move(&self.board, human, pos) {
            Ok(captures) => captures,
            Err(rejection) => {
                debug!(%pos, "rejected human move");
                self.set_status(StatusKind::InvalidMove);
                return Err(rejection);
            }
        };

        self.apply_placement(pos, human, &captures);
        self.enter_computer_thinking(StatusKind::ComputerThinking);
        Ok(captures)
    }

    /// Whether the thinking delay has elapsed.
    pub fn computer_turn_due(&self) -> bool {
        match self.thinking_since {
            Some(since) => since.elapsed() >= self.config.think_delay(),
            None => false,
        }
    }

    /// Runs the computer turn once the thinking delay has elapsed.
    /// Returns `None` while there is nothing to do yet.
    pub fn poll_computer_turn(&mut self) -> Option<Result<ComputerTurn, Rejection>> {
        if self.computer_turn_due() {
            Some(self.run_computer_turn())
        } else {
            None
        }
    }

    /// Plays one computer move, or passes.
    ///
    /// When the human then has no reply, the session stays in
    /// `ComputerThinking` with a fresh thinking delay and the next call plays
    /// again. A rejected selector choice leaves the board and the queue as
    /// they were.
    pub fn run_computer_turn(&mut self) -> Result<ComputerTurn, Rejection> {
        match self.state {
            TurnState::GameOver => return Err(Rejection::GameOver),
            TurnState::AwaitingHuman => return Err(Rejection::ComputerNotThinking),
            TurnState::ComputerThinking => {}
        }

        let computer = self.computer_color();
        let human = self.human_color();

        let placement = match self.selector.select_move(&self.board, computer) {
            Some(pos) => {
                let captures = resolver::attempt_move(&self.board, computer, pos).map_err(|_| {
                    warn!(%pos, "move selector chose an illegal move");
                    Rejection::IllegalComputerMove(pos)
                })?;
                self.apply_placement(pos, computer, &captures);
                Some(Placement {
                    position: pos,
                    color: computer,
                    captures,
                })
            }
            None => {
                debug!(?computer, "computer passes");
                None
            }
        };
        let mut turn = ComputerTurn {
            passed: placement.is_none(),
            placement,
            human_passed: false,
        };

        if has_legal_move(&self.board, human) {
            self.thinking_since = None;
            self.set_state(TurnState::AwaitingHuman);
            self.set_status(if turn.passed {
                StatusKind::ComputerPassed
            } else {
                StatusKind::YourTurn
            });
        } else if turn.passed {
            self.finish();
        } else {
            debug!(?human, "human passes");
            turn.human_passed = true;
            self.thinking_since = Some(Instant::now());
            self.set_status(StatusKind::YouMustPass);
        }

        Ok(turn)
    }

    fn apply_placement(&mut self, pos: Position, color: Color, captures: &[Position]) {
        debug!(%pos, ?color, flips = captures.len(), "placing stone");
        self.set_stone(pos, color);
        for &flipped in captures {
            self.set_stone(flipped, color);
        }
    }

    fn finish(&mut self) {
        let (black, white) = self.board.count();
        let result = GameResult::from_counts(black, white);
        info!(black, white, winner = ?result.winner, "game over");

        self.thinking_since = None;
        self.result = Some(result);
        self.set_state(TurnState::GameOver);
        self.set_status(result.status());
    }

    fn enter_computer_thinking(&mut self, status: StatusKind) {
        self.thinking_since = Some(Instant::now());
        self.set_state(TurnState::ComputerThinking);
        self.set_status(status);
    }

    fn set_stone(&mut self, pos: Position, color: Color) {
        self.board.set(pos, color);
        self.events.push(GameEvent::StoneChanged {
            x: pos.x,
            y: pos.y,
            color,
        });
    }

    fn set_state(&mut self, state: TurnState) {
        self.state = state;
        self.events.push(GameEvent::TurnStateChanged { state });
    }

    /// Repeating the status already at the back of the queue is a no-op, so
    /// an undrained queue only grows with moves and state changes.
    fn set_status(&mut self, status: StatusKind) {
        let event = GameEvent::StatusChanged { status };
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }
}
