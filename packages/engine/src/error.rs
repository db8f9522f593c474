//! Top-level error type for engine and session operations.

use thiserror::Error;

use crate::domain::DomainError;

/// Errors surfaced to hosts embedding the engine.
///
/// [`DomainError`]s escaping a running game are engine defects by
/// definition: the turn loop validates every choice before applying it.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("rules violation: {0}")]
    Domain(#[from] DomainError),

    #[error("a game is already running in this context")]
    SessionExists,

    #[error("no running game in this context")]
    SessionNotFound,

    #[error("configuration error: {detail}")]
    Config { detail: String },

    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl EngineError {
    pub fn config(detail: impl Into<String>) -> Self {
        EngineError::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        EngineError::Internal {
            detail: detail.into(),
        }
    }
}
