//! Per-decision response windows.

use std::env;
use std::time::Duration;

use crate::error::EngineError;

/// How long each kind of decision stays open before the engine applies the
/// documented default. Defaults follow the reference chat transport's
/// button lifetimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTimeouts {
    /// Choosing the turn action.
    pub action: Duration,
    /// Choosing a target for a targeted action.
    pub target: Duration,
    /// Challenge windows, both against actions and against blocks.
    pub challenge: Duration,
    /// Foreign Aid block window, open to the whole table.
    pub open_block: Duration,
    /// Steal and assassination block windows, target only.
    pub targeted_block: Duration,
    /// Choosing which card to give up.
    pub card_loss: Duration,
    /// Picking cards to keep in an exchange.
    pub exchange: Duration,
}

impl Default for DecisionTimeouts {
    fn default() -> Self {
        Self {
            action: Duration::from_secs(180),
            target: Duration::from_secs(120),
            challenge: Duration::from_secs(60),
            open_block: Duration::from_secs(60),
            targeted_block: Duration::from_secs(120),
            card_loss: Duration::from_secs(60),
            exchange: Duration::from_secs(300),
        }
    }
}

impl DecisionTimeouts {
    /// Defaults with per-field overrides from the environment, in whole
    /// seconds: `COUP_TIMEOUT_ACTION`, `COUP_TIMEOUT_TARGET`,
    /// `COUP_TIMEOUT_CHALLENGE`, `COUP_TIMEOUT_OPEN_BLOCK`,
    /// `COUP_TIMEOUT_TARGETED_BLOCK`, `COUP_TIMEOUT_CARD_LOSS`,
    /// `COUP_TIMEOUT_EXCHANGE`.
    pub fn from_env() -> Result<Self, EngineError> {
        let defaults = Self::default();
        Ok(Self {
            action: env_secs("COUP_TIMEOUT_ACTION", defaults.action)?,
            target: env_secs("COUP_TIMEOUT_TARGET", defaults.target)?,
            challenge: env_secs("COUP_TIMEOUT_CHALLENGE", defaults.challenge)?,
            open_block: env_secs("COUP_TIMEOUT_OPEN_BLOCK", defaults.open_block)?,
            targeted_block: env_secs("COUP_TIMEOUT_TARGETED_BLOCK", defaults.targeted_block)?,
            card_loss: env_secs("COUP_TIMEOUT_CARD_LOSS", defaults.card_loss)?,
            exchange: env_secs("COUP_TIMEOUT_EXCHANGE", defaults.exchange)?,
        })
    }

    /// The same window for every decision kind. Handy for simulations and
    /// tests where nobody is reading prompts.
    pub fn uniform(window: Duration) -> Self {
        Self {
            action: window,
            target: window,
            challenge: window,
            open_block: window,
            targeted_block: window,
            card_loss: window,
            exchange: window,
        }
    }
}

fn env_secs(var: &str, default: Duration) -> Result<Duration, EngineError> {
    match env::var(var) {
        Ok(raw) => {
            let secs: u64 = raw.parse().map_err(|_| {
                EngineError::config(format!("{var} must be a whole number of seconds, got '{raw}'"))
            })?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(default),
    }
}
