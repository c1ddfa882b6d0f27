//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::game::{constants::DEFAULT_EQUITY_TRIALS, entities::Usd};

/// Largest table the seat assigner will fill.
pub const MAX_SEATS_LIMIT: usize = 23;

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Name identifying the hero in the setup player list
    pub hero_name: String,

    /// Chips for players listed without a stack
    pub default_chips: Usd,

    /// Trials used when the caller doesn't pick a count
    pub equity_trials: u32,

    /// Seats available for assignment
    pub max_seats: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hero_name: "hero".to_string(),
            default_chips: 1000,
            equity_trials: DEFAULT_EQUITY_TRIALS,
            max_seats: 10,
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.hero_name.trim().is_empty() {
            return Err("Hero name must not be empty".to_string());
        }

        if self.equity_trials == 0 {
            return Err("Equity trials must be positive".to_string());
        }

        if self.max_seats < 2 || self.max_seats > MAX_SEATS_LIMIT {
            return Err(format!("Max seats must be between 2 and {MAX_SEATS_LIMIT}"));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_hero(&self, name: &str) -> bool {
        self.hero_name.eq_ignore_ascii_case(name)
    }
}
