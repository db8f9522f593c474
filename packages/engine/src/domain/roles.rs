//! Court roles and hand slot addressing.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Number of copies of each role in the deck.
pub const COPIES_PER_ROLE: usize = 3;

/// Total cards in play across deck, hands and discards.
pub const DECK_SIZE: usize = 15;

/// One of the five court roles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Duke,
    Assassin,
    Ambassador,
    Captain,
    Contessa,
}

impl Role {
    /// All roles in canonical order.
    pub const ALL: [Role; 5] = [
        Role::Duke,
        Role::Assassin,
        Role::Ambassador,
        Role::Captain,
        Role::Contessa,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Duke => "Duke",
            Role::Assassin => "Assassin",
            Role::Ambassador => "Ambassador",
            Role::Captain => "Captain",
            Role::Contessa => "Contessa",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Address of one of the two hand positions.
///
/// Prompts that ask a player to give up a card carry only these labels;
/// the role behind a slot is never disclosed until the card is lost.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandSlot {
    A,
    B,
}

impl HandSlot {
    pub const ALL: [HandSlot; 2] = [HandSlot::A, HandSlot::B];

    pub fn index(self) -> usize {
        match self {
            HandSlot::A => 0,
            HandSlot::B => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandSlot::A => "Card A",
            HandSlot::B => "Card B",
        }
    }
}

impl TryFrom<usize> for HandSlot {
    type Error = DomainError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(HandSlot::A),
            1 => Ok(HandSlot::B),
            _ => Err(DomainError::SlotOutOfRange { index }),
        }
    }
}

impl std::fmt::Display for HandSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
