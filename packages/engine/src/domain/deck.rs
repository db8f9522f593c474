//! The shared court deck: seeded shuffling, draws and returns.

use crate::domain::errors::DomainError;
use crate::domain::roles::{Role, COPIES_PER_ROLE, DECK_SIZE};

/// Simple deterministic RNG used for shuffling.
///
/// SplitMix64-style mixing: small, fast and reproducible across platforms,
/// which keeps replays stable for a given game seed.
#[derive(Debug, Clone)]
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `0..max` via rejection sampling to avoid modulo bias.
    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        if m == 0 {
            return 0;
        }
        let limit = u64::MAX - (u64::MAX % m);
        loop {
            let value = self.next();
            if value < limit {
                return (value % m) as usize;
            }
        }
    }
}

/// Derive the deck's shuffle seed from the game seed.
///
/// Keeps the shuffle stream distinct from any other stream derived from the
/// same game seed.
pub fn derive_deck_seed(game_seed: u64) -> u64 {
    game_seed.wrapping_mul(1_000_003).wrapping_add(17)
}

/// The face-down draw pile.
///
/// Starts at [`DECK_SIZE`] cards minus whatever was dealt. Cards returned to
/// the deck are reshuffled immediately; a return is never left pending.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Role>,
    rng: SimpleRng,
}

impl Deck {
    /// Full pile with [`COPIES_PER_ROLE`] copies of each role, shuffled once.
    pub fn shuffled(seed: u64) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for role in Role::ALL {
            for _ in 0..COPIES_PER_ROLE {
                cards.push(role);
            }
        }
        Self::from_cards(cards, seed)
    }

    /// Pile with exactly the given cards, shuffled once.
    pub(crate) fn from_cards(cards: Vec<Role>, seed: u64) -> Self {
        let mut deck = Self {
            cards,
            rng: SimpleRng::new(seed),
        };
        deck.shuffle();
        deck
    }

    /// Fisher-Yates shuffle driven by the deck's own stream.
    pub fn shuffle(&mut self) {
        for i in (1..self.cards.len()).rev() {
            let j = self.rng.next_range(i + 1);
            self.cards.swap(i, j);
        }
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Result<Role, DomainError> {
        self.cards.pop().ok_or(DomainError::DeckExhausted)
    }

    /// Return cards to the pile and reshuffle.
    pub fn return_cards<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Role>,
    {
        self.cards.extend(cards);
        self.shuffle();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Copies of `role` currently in the pile.
    pub fn count(&self, role: Role) -> usize {
        self.cards.iter().filter(|&&r| r == role).count()
    }
}
