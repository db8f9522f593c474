//! Engine orchestration and session lifecycle.

pub mod game_flow;
pub mod session;
