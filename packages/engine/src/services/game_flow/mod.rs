//! Turn loop orchestration: owns one game's state, suspends on external
//! decisions, applies transitions and emits events.

mod challenges;
mod effects;
mod orchestration;

use std::sync::Arc;

use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::config::timeouts::DecisionTimeouts;
use crate::decision::DecisionProvider;
use crate::domain::{DomainError, GameState, PlayerId, PlayerSetup};
use crate::error::EngineError;
use crate::notify::NotificationSink;

/// How a finished game task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// One player outlived everyone else.
    Completed { winner: PlayerId },
    /// Torn down by an external stop before a winner emerged.
    Stopped,
}

/// Unwinds the turn loop from arbitrary resolution depth.
///
/// `Ended` fires the moment a victory is detected, abandoning whatever
/// sub-effects were still queued behind the current step.
pub(crate) enum Interrupt {
    Ended,
    Stopped,
    Fatal(EngineError),
}

impl From<EngineError> for Interrupt {
    fn from(err: EngineError) -> Self {
        Interrupt::Fatal(err)
    }
}

impl From<DomainError> for Interrupt {
    fn from(err: DomainError) -> Self {
        Interrupt::Fatal(EngineError::from(err))
    }
}

/// One game's driver. Exclusive owner of its [`GameState`].
///
/// Constructed by a host or a session manager, then driven to completion
/// with [`GameFlow::run`], usually inside a spawned task. All suspension
/// happens inside `run`; between suspensions the state is only touched
/// from here, which is what keeps card accounting honest at every
/// quiescent point.
pub struct GameFlow {
    game_id: Uuid,
    state: GameState,
    provider: Arc<dyn DecisionProvider>,
    sink: Arc<dyn NotificationSink>,
    timeouts: DecisionTimeouts,
    cancel: CancellationToken,
    opportunity_counter: u64,
}

impl GameFlow {
    /// New undealt game from a closed roster. Call [`GameFlow::deal`]
    /// before [`GameFlow::run`].
    pub fn new(
        roster: Vec<(PlayerId, String)>,
        seed: Option<u64>,
        timeouts: DecisionTimeouts,
        provider: Arc<dyn DecisionProvider>,
        sink: Arc<dyn NotificationSink>,
        cancel: CancellationToken,
    ) -> Result<Self, EngineError> {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let state = GameState::new(roster, seed)?;
        Ok(Self::from_state(state, timeouts, provider, sink, cancel))
    }

    /// Already-dealt game from fixed hands and treasuries, see
    /// [`GameState::with_setup`].
    pub fn with_setup(
        setups: Vec<PlayerSetup>,
        seed: u64,
        timeouts: DecisionTimeouts,
        provider: Arc<dyn DecisionProvider>,
        sink: Arc<dyn NotificationSink>,
        cancel: CancellationToken,
    ) -> Result<Self, EngineError> {
        let state = GameState::with_setup(setups, seed)?;
        Ok(Self::from_state(state, timeouts, provider, sink, cancel))
    }

    /// Game from a prepared position.
    pub fn from_state(
        state: GameState,
        timeouts: DecisionTimeouts,
        provider: Arc<dyn DecisionProvider>,
        sink: Arc<dyn NotificationSink>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            state,
            provider,
            sink,
            timeouts,
            cancel,
            opportunity_counter: 0,
        }
    }

    /// Shuffle and deal the opening hands.
    pub fn deal(&mut self) -> Result<(), EngineError> {
        self.state.deal()?;
        info!(
            game_id = %self.game_id,
            seed = self.state.seed(),
            players = self.state.players().len(),
            "hands dealt"
        );
        Ok(())
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    /// Read access to the authoritative state, for snapshots between or
    /// after runs.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Token that tears this game down at its next suspension point.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}
