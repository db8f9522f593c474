//! Domain layer: pure game rules, hands, deck and transitions.

pub mod actions;
pub mod challenge;
pub mod deck;
pub mod errors;
pub mod player;
pub mod roles;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod tests_challenge;
#[cfg(test)]
mod tests_player;
#[cfg(test)]
mod tests_state;

// Re-exports for ergonomics
pub use actions::{Action, ActionProfile, BlockScope, STEAL_MAX};
pub use challenge::{resolve_claim, ChallengeVerdict};
pub use deck::{derive_deck_seed, Deck};
pub use errors::DomainError;
pub use player::{
    PlayerId, PlayerState, ASSASSINATE_MIN_COINS, COUP_MIN_COINS, MANDATORY_COUP_COINS,
    STARTING_COINS,
};
pub use roles::{HandSlot, Role, COPIES_PER_ROLE, DECK_SIZE};
pub use snapshot::{GameSnapshot, HandView, PlayerPublic};
pub use state::{GameState, PlayerSetup, TurnPhase, MAX_PLAYERS, MIN_PLAYERS};
