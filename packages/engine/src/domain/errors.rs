//! Domain error type shared by all transition functions.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::actions::Action;
use crate::domain::player::PlayerId;
use crate::domain::roles::Role;

/// Rule and invariant violations raised by the pure game logic.
///
/// A transition that returns one of these has not mutated state. Most
/// variants are unreachable when callers only offer legal choices; reaching
/// one from the turn loop means the engine itself is broken, not the player.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DomainError {
    /// Selected action is outside the offered set for this player.
    ActionNotLegal { player: PlayerId, action: Action },
    /// Action needs a target and none was supplied.
    TargetRequired { action: Action },
    /// Supplied target is not in the eligible set.
    TargetInvalid { action: Action, target: PlayerId },
    /// Draw from an empty pile. Card accounting makes this unreachable in
    /// a well-formed game.
    DeckExhausted,
    /// Card loss requested from a player with no living cards.
    NoCardsToLose { player: PlayerId },
    /// Player was expected to hold a role they do not hold.
    RoleNotHeld { player: PlayerId, role: Role },
    /// More copies of a role assigned than exist in the deck.
    RoleExhausted { role: Role },
    InsufficientCoins {
        player: PlayerId,
        needed: u8,
        available: u8,
    },
    UnknownPlayer { player: PlayerId },
    DuplicatePlayer { player: PlayerId },
    /// Roster size outside the supported 3..=6 range.
    PlayerCount { count: usize },
    /// Hand slot index outside 0..=1.
    SlotOutOfRange { index: usize },
    /// Starting hand must hold one or two cards.
    HandSize { player: PlayerId, cards: usize },
    /// Hands have already been dealt for this game.
    AlreadyDealt,
    /// Game has not been dealt yet.
    NotDealt,
    /// No living player remains to act.
    NoLivingPlayers,
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::ActionNotLegal { player, action } => {
                write!(f, "action {action} is not legal for player {player}")
            }
            DomainError::TargetRequired { action } => {
                write!(f, "action {action} requires a target")
            }
            DomainError::TargetInvalid { action, target } => {
                write!(f, "player {target} is not a valid target for {action}")
            }
            DomainError::DeckExhausted => write!(f, "deck is exhausted"),
            DomainError::NoCardsToLose { player } => {
                write!(f, "player {player} has no cards left to lose")
            }
            DomainError::RoleNotHeld { player, role } => {
                write!(f, "player {player} does not hold {role}")
            }
            DomainError::RoleExhausted { role } => {
                write!(f, "more than three copies of {role} assigned")
            }
            DomainError::InsufficientCoins {
                player,
                needed,
                available,
            } => write!(
                f,
                "player {player} needs {needed} coins but has {available}"
            ),
            DomainError::UnknownPlayer { player } => {
                write!(f, "player {player} is not in this game")
            }
            DomainError::DuplicatePlayer { player } => {
                write!(f, "player {player} appears more than once in the roster")
            }
            DomainError::PlayerCount { count } => {
                write!(f, "player count {count} is outside the supported 3..=6 range")
            }
            DomainError::SlotOutOfRange { index } => {
                write!(f, "hand slot index {index} is out of range")
            }
            DomainError::HandSize { player, cards } => {
                write!(f, "player {player} assigned {cards} cards, expected 1 or 2")
            }
            DomainError::AlreadyDealt => write!(f, "hands have already been dealt"),
            DomainError::NotDealt => write!(f, "hands have not been dealt yet"),
            DomainError::NoLivingPlayers => write!(f, "no living player remains"),
        }
    }
}

impl Error for DomainError {}
