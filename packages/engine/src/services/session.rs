//! Session lifecycle: at most one running game per hosting context.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::timeouts::DecisionTimeouts;
use crate::decision::DecisionProvider;
use crate::domain::PlayerId;
use crate::error::EngineError;
use crate::notify::NotificationSink;
use crate::services::game_flow::GameFlow;

/// Where a game is hosted: a chat, a channel, a lobby.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ContextId(pub u64);

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-session knobs.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Deck seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub timeouts: DecisionTimeouts,
}

struct Session {
    cancel: CancellationToken,
}

/// Registry of live games, one per context.
///
/// Cloning is cheap and every clone sees the same sessions.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<DashMap<ContextId, Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal a game for `ctx` and launch it on the current runtime.
    ///
    /// The game runs as a detached task and unregisters itself when it
    /// finishes. Must be called from within a tokio runtime.
    pub fn start(
        &self,
        ctx: ContextId,
        roster: Vec<(PlayerId, String)>,
        provider: Arc<dyn DecisionProvider>,
        sink: Arc<dyn NotificationSink>,
        config: SessionConfig,
    ) -> Result<(), EngineError> {
        let entry = match self.sessions.entry(ctx) {
            Entry::Occupied(_) => return Err(EngineError::SessionExists),
            Entry::Vacant(vacant) => vacant,
        };
        let cancel = CancellationToken::new();
        let mut flow = GameFlow::new(
            roster,
            config.seed,
            config.timeouts,
            provider,
            sink,
            cancel.clone(),
        )?;
        flow.deal()?;
        let game_id = flow.game_id();
        // Register before spawning so the task's own unregister always
        // finds the entry.
        entry.insert(Session { cancel });
        info!(context = %ctx, game_id = %game_id, "session started");

        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            match flow.run().await {
                Ok(outcome) => {
                    info!(
                        context = %ctx,
                        game_id = %game_id,
                        outcome = ?outcome,
                        "session finished"
                    );
                }
                Err(err) => {
                    warn!(context = %ctx, game_id = %game_id, error = %err, "session failed");
                }
            }
            sessions.remove(&ctx);
        });
        Ok(())
    }

    /// Stop the context's game at its next suspension point.
    pub fn stop(&self, ctx: ContextId) -> Result<(), EngineError> {
        match self.sessions.get(&ctx) {
            Some(session) => {
                session.cancel.cancel();
                Ok(())
            }
            None => Err(EngineError::SessionNotFound),
        }
    }

    pub fn is_active(&self, ctx: ContextId) -> bool {
        self.sessions.contains_key(&ctx)
    }
}
