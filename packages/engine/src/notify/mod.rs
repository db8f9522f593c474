//! Event delivery from a running game to its host.

pub mod events;

use async_trait::async_trait;
use tracing::info;

pub use events::GameEvent;

/// Consumes the game's event stream.
///
/// The engine awaits each delivery so the stream stays ordered, but the
/// outcome is fire-and-forget: a sink that fails must deal with that
/// itself and must never let it surface into the game.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, event: GameEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

#[async_trait]
impl NotificationSink for NullSink {
    async fn publish(&self, _event: GameEvent) {}
}

/// Logs every event as a structured line.
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn publish(&self, event: GameEvent) {
        info!(event = ?event, "game event");
    }
}
