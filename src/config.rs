use serde::Deserialize;
use web_time::Duration;

use crate::error::ConfigError;
use crate::types::Color;

const DEFAULT_THINK_DELAY_MS: u64 = 1000;

/// Per-session settings. Missing fields fall back to their defaults when
/// deserialized, so a UI may pass a partial object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub human_color: Color,
    /// Pause before the computer moves. Presentation only; zero is fine headless.
    pub think_delay_ms: u64,
    /// Seeds the opponent's random fallback. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_color: Color::Black,
            think_delay_ms: DEFAULT_THINK_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// No delay and a fixed seed.
    pub fn headless(seed: u64) -> Self {
        Self {
            think_delay_ms: 0,
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_human_color(mut self, color: Color) -> Self {
        self.human_color = color;
        self
    }

    /// Delays longer than `u64::MAX` milliseconds saturate.
    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    pub fn computer_color(&self) -> Color {
        self.human_color.opponent()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.human_color.is_stone() {
            return Err(ConfigError::EmptyHumanColor);
        }
        Ok(())
    }
}
