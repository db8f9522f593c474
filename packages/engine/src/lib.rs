#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod decision;
pub mod domain;
pub mod error;
pub mod notify;
pub mod services;

// Re-exports for public API
pub use config::timeouts::DecisionTimeouts;
pub use decision::{
    ChannelDecisionProvider, DecisionProvider, Prompt, RandomDecider, Submission, SubmissionHandle,
    SubmitAck, SubmitError,
};
pub use domain::{
    Action, GameSnapshot, GameState, HandSlot, PlayerId, PlayerSetup, Role, TurnPhase,
};
pub use error::EngineError;
pub use notify::{GameEvent, NotificationSink, NullSink, TracingSink};
pub use services::game_flow::{GameFlow, GameOutcome};
pub use services::session::{ContextId, SessionConfig, SessionManager};

// Prelude for test convenience
pub mod prelude {
    pub use super::config::timeouts::*;
    pub use super::decision::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::notify::*;
    pub use super::services::game_flow::*;
    pub use super::services::session::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
