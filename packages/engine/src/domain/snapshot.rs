//! Read views over a game: the public table and one player's private hand.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::player::{PlayerId, PlayerState};
use crate::domain::roles::{HandSlot, Role};
use crate::domain::state::{GameState, TurnPhase};

/// What everyone at the table may know about one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub coins: u8,
    /// Face-down cards still held. Identity stays hidden.
    pub influence: usize,
    pub alive: bool,
}

/// Public snapshot of a whole game, safe to broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: TurnPhase,
    /// Seat whose turn it is, absent before the deal and after the end.
    pub current_player: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub deck_size: usize,
    /// Face-up lost cards, in the order they were lost.
    pub discards: Vec<Role>,
    /// Seating order, dead seats included.
    pub players: Vec<PlayerPublic>,
}

/// One player's own cards. Deliver only to that player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    /// Slot contents in label order, `None` for lost cards.
    pub slots: [Option<Role>; 2],
}

impl GameState {
    /// Public view of the table with all hidden information stripped.
    pub fn snapshot(&self) -> GameSnapshot {
        let current_player = match self.phase() {
            TurnPhase::Setup | TurnPhase::GameOver => None,
            _ => Some(self.current_player()),
        };
        GameSnapshot {
            phase: self.phase(),
            current_player,
            winner: self.winner(),
            deck_size: self.deck().len(),
            discards: self.discards().to_vec(),
            players: self.players().iter().map(public_view).collect(),
        }
    }

    /// Private view of one hand.
    pub fn hand_view(&self, player: PlayerId) -> Result<HandView, DomainError> {
        let seat = self.player(player)?;
        Ok(HandView {
            slots: [seat.slot(HandSlot::A), seat.slot(HandSlot::B)],
        })
    }
}

fn public_view(player: &PlayerState) -> PlayerPublic {
    PlayerPublic {
        id: player.id,
        name: player.name.clone(),
        coins: player.coins,
        influence: player.num_cards(),
        alive: player.is_alive(),
    }
}
