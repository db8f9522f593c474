//! Per-player state: identity, coins and the hidden hand.

use serde::{Deserialize, Serialize};

use crate::domain::actions::Action;
use crate::domain::errors::DomainError;
use crate::domain::roles::{HandSlot, Role};

/// Coins every player starts with.
pub const STARTING_COINS: u8 = 2;

/// Minimum coins to announce an assassination.
pub const ASSASSINATE_MIN_COINS: u8 = 3;

/// Minimum coins to announce a coup.
pub const COUP_MIN_COINS: u8 = 7;

/// At this treasury the coup becomes mandatory.
pub const MANDATORY_COUP_COINS: u8 = 10;

/// Stable external identity for a player. Hosts map their own user ids
/// onto this.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One seat at the table.
///
/// The hand is held in two fixed slots so that "Card A" and "Card B" remain
/// stable labels for a player across the whole game. A slot is emptied when
/// its card is lost and refilled only by an exchange or a post-challenge
/// replacement draw.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub coins: u8,
    slots: [Option<Role>; 2],
}

impl PlayerState {
    /// Seat with no cards yet. Hands arrive at the deal.
    pub(crate) fn undealt(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            coins: STARTING_COINS,
            slots: [None, None],
        }
    }

    /// Seat with a fixed starting hand, for scripted setups.
    pub(crate) fn with_hand(id: PlayerId, name: String, hand: &[Role], coins: u8) -> Self {
        Self {
            id,
            name,
            coins,
            slots: [hand.first().copied(), hand.get(1).copied()],
        }
    }

    pub(crate) fn deal_hand(&mut self, first: Role, second: Role) {
        self.slots = [Some(first), Some(second)];
    }

    /// Living cards in hand. Zero means eliminated.
    pub fn num_cards(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_alive(&self) -> bool {
        self.num_cards() > 0
    }

    /// Role in a slot, `None` once the slot's card has been lost.
    pub fn slot(&self, slot: HandSlot) -> Option<Role> {
        self.slots[slot.index()]
    }

    /// Slots that still hold a card, `A` before `B`.
    pub fn living_slots(&self) -> Vec<HandSlot> {
        HandSlot::ALL
            .into_iter()
            .filter(|slot| self.slots[slot.index()].is_some())
            .collect()
    }

    /// Roles still in hand, in slot order.
    pub fn living_roles(&self) -> Vec<Role> {
        self.slots.iter().flatten().copied().collect()
    }

    pub fn holds(&self, role: Role) -> bool {
        self.slots.contains(&Some(role))
    }

    /// Actions this player may announce given their treasury.
    ///
    /// At [`MANDATORY_COUP_COINS`] or more the coup is forced and nothing
    /// else is offered. Target availability (a steal with nobody worth
    /// stealing from) is filtered at the game level, not here.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.coins >= MANDATORY_COUP_COINS {
            return vec![Action::Coup];
        }
        let mut actions = vec![
            Action::Income,
            Action::ForeignAid,
            Action::Tax,
            Action::Exchange,
            Action::Steal,
        ];
        if self.coins >= ASSASSINATE_MIN_COINS {
            actions.push(Action::Assassinate);
        }
        if self.coins >= COUP_MIN_COINS {
            actions.push(Action::Coup);
        }
        actions
    }

    /// Empty the requested slot and hand back the lost role.
    ///
    /// Falls back to the lowest living slot when the requested one is
    /// already empty, so a stale selection still costs exactly one card.
    pub(crate) fn lose_card(&mut self, requested: HandSlot) -> Result<Role, DomainError> {
        if let Some(role) = self.slots[requested.index()].take() {
            return Ok(role);
        }
        for slot in HandSlot::ALL {
            if let Some(role) = self.slots[slot.index()].take() {
                return Ok(role);
            }
        }
        Err(DomainError::NoCardsToLose { player: self.id })
    }

    pub(crate) fn gain_coins(&mut self, amount: u8) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub(crate) fn spend_coins(&mut self, amount: u8) -> Result<(), DomainError> {
        if self.coins < amount {
            return Err(DomainError::InsufficientCoins {
                player: self.id,
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Replace the hand wholesale, used by the exchange and by scripted
    /// setups. `kept` must not exceed two cards.
    pub(crate) fn set_hand(&mut self, kept: &[Role]) {
        debug_assert!(kept.len() <= 2);
        self.slots = [kept.first().copied(), kept.get(1).copied()];
    }

    /// Empty the slot holding `role` and report which slot it was.
    pub(crate) fn take_role(&mut self, role: Role) -> Result<HandSlot, DomainError> {
        for slot in HandSlot::ALL {
            if self.slots[slot.index()] == Some(role) {
                self.slots[slot.index()] = None;
                return Ok(slot);
            }
        }
        Err(DomainError::RoleNotHeld {
            player: self.id,
            role,
        })
    }

    /// Fill an empty slot. The slot label survives the swap.
    pub(crate) fn put_role(&mut self, slot: HandSlot, role: Role) {
        debug_assert!(self.slots[slot.index()].is_none());
        self.slots[slot.index()] = Some(role);
    }
}
