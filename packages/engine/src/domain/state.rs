//! Game container and the transition functions that mutate it.

use serde::{Deserialize, Serialize};

use crate::domain::actions::{Action, BlockScope, STEAL_MAX};
use crate::domain::deck::{derive_deck_seed, Deck};
use crate::domain::errors::DomainError;
use crate::domain::player::{PlayerId, PlayerState};
use crate::domain::roles::{HandSlot, Role, COPIES_PER_ROLE};

/// Minimum players in a game.
pub const MIN_PLAYERS: usize = 3;

/// Maximum players in a game.
pub const MAX_PLAYERS: usize = 6;

/// Where the turn machine currently sits.
///
/// Phases whose name starts with `Await` are suspension points: the engine
/// is waiting on an external decision while in them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Roster assembled, hands not yet dealt.
    Setup,
    AwaitAction,
    AwaitTarget,
    AwaitActionChallenge,
    AwaitBlock,
    AwaitBlockChallenge,
    ChallengeResolve,
    AwaitCardLoss,
    AwaitExchange,
    ApplyEffect,
    GameOver,
}

/// Fixed starting position for one seat, used by scripted and simulated
/// games instead of a random deal.
#[derive(Debug, Clone)]
pub struct PlayerSetup {
    pub id: PlayerId,
    pub name: String,
    /// One or two cards. A single card models a seat that already lost one.
    pub hand: Vec<Role>,
    pub coins: u8,
}

/// Full authoritative state of one game.
///
/// Owned by exactly one task at runtime; every mutation goes through the
/// transition methods so card accounting and phase discipline hold at each
/// quiescent point.
#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<PlayerState>,
    deck: Deck,
    discards: Vec<Role>,
    phase: TurnPhase,
    current: PlayerId,
    winner: Option<PlayerId>,
    seed: u64,
}

impl GameState {
    /// New undealt game in seating order. Call [`GameState::deal`] to shuffle
    /// hands out once the roster is closed.
    pub fn new(roster: Vec<(PlayerId, String)>, seed: u64) -> Result<Self, DomainError> {
        validate_ids(roster.iter().map(|(id, _)| *id))?;
        let players: Vec<PlayerState> = roster
            .into_iter()
            .map(|(id, name)| PlayerState::undealt(id, name))
            .collect();
        let current = players[0].id;
        Ok(Self {
            players,
            deck: Deck::shuffled(derive_deck_seed(seed)),
            discards: Vec::new(),
            phase: TurnPhase::Setup,
            current,
            winner: None,
            seed,
        })
    }

    /// Already-dealt game with fixed hands and treasuries.
    ///
    /// The deck is built from whatever copies the hands leave over, so card
    /// accounting holds from the start. Intended for simulations, tutorials
    /// and tests that need a known position.
    pub fn with_setup(setups: Vec<PlayerSetup>, seed: u64) -> Result<Self, DomainError> {
        validate_ids(setups.iter().map(|s| s.id))?;
        let mut used = [0usize; Role::ALL.len()];
        for setup in &setups {
            if setup.hand.is_empty() || setup.hand.len() > 2 {
                return Err(DomainError::HandSize {
                    player: setup.id,
                    cards: setup.hand.len(),
                });
            }
            for role in &setup.hand {
                let index = Role::ALL
                    .iter()
                    .position(|r| r == role)
                    .ok_or(DomainError::RoleExhausted { role: *role })?;
                used[index] += 1;
                if used[index] > COPIES_PER_ROLE {
                    return Err(DomainError::RoleExhausted { role: *role });
                }
            }
        }
        let mut remaining = Vec::new();
        for (index, role) in Role::ALL.into_iter().enumerate() {
            for _ in 0..COPIES_PER_ROLE - used[index] {
                remaining.push(role);
            }
        }
        let players: Vec<PlayerState> = setups
            .into_iter()
            .map(|s| PlayerState::with_hand(s.id, s.name, &s.hand, s.coins))
            .collect();
        let current = players[0].id;
        Ok(Self {
            players,
            deck: Deck::from_cards(remaining, derive_deck_seed(seed)),
            discards: Vec::new(),
            phase: TurnPhase::AwaitAction,
            current,
            winner: None,
            seed,
        })
    }

    /// Deal two cards to every seat and open the first turn.
    pub fn deal(&mut self) -> Result<(), DomainError> {
        if self.phase != TurnPhase::Setup {
            return Err(DomainError::AlreadyDealt);
        }
        for i in 0..self.players.len() {
            let first = self.deck.draw()?;
            let second = self.deck.draw()?;
            self.players[i].deal_hand(first, second);
        }
        self.current = self.players[0].id;
        self.phase = TurnPhase::AwaitAction;
        debug_assert!(self.card_accounting_holds());
        Ok(())
    }

    // ---- queries ----

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discards(&self) -> &[Role] {
        &self.discards
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerState, DomainError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(DomainError::UnknownPlayer { player: id })
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerState, DomainError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::UnknownPlayer { player: id })
    }

    /// All seats in seating order, dead ones included.
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn living_ids(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.id)
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Actions the player may actually announce right now: treasury
    /// thresholds plus the no-stealable-target exclusion.
    pub fn offered_actions(&self, actor: PlayerId) -> Result<Vec<Action>, DomainError> {
        let mut actions = self.player(actor)?.legal_actions();
        if self.eligible_targets(actor, Action::Steal).is_empty() {
            actions.retain(|&a| a != Action::Steal);
        }
        Ok(actions)
    }

    /// Living players the action may be aimed at.
    pub fn eligible_targets(&self, actor: PlayerId, action: Action) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_alive() && p.id != actor)
            .filter(|p| action != Action::Steal || p.coins > 0)
            .map(|p| p.id)
            .collect()
    }

    /// Living players who may challenge a claim by `claimant`.
    pub fn eligible_challengers(&self, claimant: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_alive() && p.id != claimant)
            .map(|p| p.id)
            .collect()
    }

    /// Living players who may block the action, honouring its block scope.
    pub fn eligible_blockers(
        &self,
        actor: PlayerId,
        action: Action,
        target: Option<PlayerId>,
    ) -> Vec<PlayerId> {
        match action.block_scope() {
            BlockScope::None => Vec::new(),
            BlockScope::TargetOnly => target
                .into_iter()
                .filter(|&t| self.player(t).map(|p| p.is_alive()).unwrap_or(false))
                .collect(),
            BlockScope::AnyOther => self
                .players
                .iter()
                .filter(|p| p.is_alive() && p.id != actor)
                .map(|p| p.id)
                .collect(),
        }
    }

    /// Full legality check for an announced action, targets included.
    ///
    /// The turn loop offers only legal choices, so a failure here after
    /// defaults have been applied means the engine itself misbehaved.
    pub fn validate_action(
        &self,
        actor: PlayerId,
        action: Action,
        target: Option<PlayerId>,
    ) -> Result<(), DomainError> {
        if !self.offered_actions(actor)?.contains(&action) {
            return Err(DomainError::ActionNotLegal {
                player: actor,
                action,
            });
        }
        match (action.requires_target(), target) {
            (true, None) => Err(DomainError::TargetRequired { action }),
            (true, Some(t)) => {
                if self.eligible_targets(actor, action).contains(&t) {
                    Ok(())
                } else {
                    Err(DomainError::TargetInvalid { action, target: t })
                }
            }
            (false, Some(t)) => Err(DomainError::TargetInvalid { action, target: t }),
            (false, None) => Ok(()),
        }
    }

    /// Per-role conservation: deck plus hands plus discards must hold
    /// exactly [`COPIES_PER_ROLE`] copies of every role.
    pub fn card_accounting_holds(&self) -> bool {
        Role::ALL.into_iter().all(|role| {
            let in_hands: usize = self
                .players
                .iter()
                .map(|p| p.living_roles().iter().filter(|&&r| r == role).count())
                .sum();
            let in_discards = self.discards.iter().filter(|&&r| r == role).count();
            self.deck.count(role) + in_hands + in_discards == COPIES_PER_ROLE
        })
    }

    // ---- transitions ----

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub(crate) fn grant_coins(&mut self, player: PlayerId, amount: u8) -> Result<(), DomainError> {
        self.player_mut(player)?.gain_coins(amount);
        Ok(())
    }

    /// Pay an action's announcement cost. Coins leave the treasury here and
    /// never come back, whatever happens to the action afterwards.
    pub(crate) fn pay_cost(&mut self, player: PlayerId, action: Action) -> Result<(), DomainError> {
        let cost = action.cost();
        if cost > 0 {
            self.player_mut(player)?.spend_coins(cost)?;
        }
        Ok(())
    }

    /// Move up to [`STEAL_MAX`] coins from target to actor. Works on a dead
    /// target too: a steal that survived its windows still collects.
    pub(crate) fn steal_transfer(
        &mut self,
        actor: PlayerId,
        target: PlayerId,
    ) -> Result<u8, DomainError> {
        let amount = self.player(target)?.coins.min(STEAL_MAX);
        self.player_mut(target)?.spend_coins(amount)?;
        self.player_mut(actor)?.gain_coins(amount);
        Ok(amount)
    }

    /// Take one card from the player and put it face up on the discard pile.
    pub(crate) fn lose_card(
        &mut self,
        player: PlayerId,
        requested: HandSlot,
    ) -> Result<Role, DomainError> {
        let role = self.player_mut(player)?.lose_card(requested)?;
        self.discards.push(role);
        debug_assert!(self.card_accounting_holds());
        Ok(role)
    }

    /// After an upheld challenge: the revealed card goes back to the deck,
    /// the deck reshuffles, and the claimant draws a replacement into the
    /// same slot. The claimant keeps the same number of cards throughout.
    pub(crate) fn swap_revealed(
        &mut self,
        claimant: PlayerId,
        revealed: Role,
    ) -> Result<(), DomainError> {
        let slot = self.player_mut(claimant)?.take_role(revealed)?;
        self.deck.return_cards([revealed]);
        let replacement = self.deck.draw()?;
        self.player_mut(claimant)?.put_role(slot, replacement);
        debug_assert!(self.card_accounting_holds());
        Ok(())
    }

    /// Draw the two extra cards offered by an exchange.
    pub(crate) fn draw_exchange_cards(&mut self) -> Result<[Role; 2], DomainError> {
        let first = self.deck.draw()?;
        let second = match self.deck.draw() {
            Ok(role) => role,
            Err(err) => {
                self.deck.return_cards([first]);
                return Err(err);
            }
        };
        Ok([first, second])
    }

    /// Settle an exchange: the kept cards become the hand, the rest go back
    /// into the deck.
    pub(crate) fn apply_exchange(
        &mut self,
        player: PlayerId,
        kept: &[Role],
        returned: Vec<Role>,
    ) -> Result<(), DomainError> {
        let seat = self.player_mut(player)?;
        debug_assert_eq!(kept.len(), seat.num_cards());
        seat.set_hand(kept);
        self.deck.return_cards(returned);
        debug_assert!(self.card_accounting_holds());
        Ok(())
    }

    /// Mark a single survivor as the winner. Returns the winner if the game
    /// just ended.
    pub(crate) fn check_victory(&mut self) -> Option<PlayerId> {
        let living = self.living_ids();
        if living.len() == 1 {
            self.winner = Some(living[0]);
            self.phase = TurnPhase::GameOver;
            self.winner
        } else {
            None
        }
    }

    /// Hand the turn to the next living seat clockwise from `from`.
    pub(crate) fn advance_turn(&mut self, from: PlayerId) -> Result<PlayerId, DomainError> {
        let start = self
            .players
            .iter()
            .position(|p| p.id == from)
            .ok_or(DomainError::UnknownPlayer { player: from })?;
        let n = self.players.len();
        for step in 1..=n {
            let seat = (start + step) % n;
            if self.players[seat].is_alive() {
                self.current = self.players[seat].id;
                self.phase = TurnPhase::AwaitAction;
                return Ok(self.current);
            }
        }
        Err(DomainError::NoLivingPlayers)
    }
}

fn validate_ids<I>(ids: I) -> Result<(), DomainError>
where
    I: Iterator<Item = PlayerId>,
{
    let mut seen: Vec<PlayerId> = Vec::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(DomainError::DuplicatePlayer { player: id });
        }
        seen.push(id);
    }
    if seen.len() < MIN_PLAYERS || seen.len() > MAX_PLAYERS {
        return Err(DomainError::PlayerCount { count: seen.len() });
    }
    Ok(())
}
