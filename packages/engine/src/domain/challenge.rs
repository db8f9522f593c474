//! Claim adjudication.

use crate::domain::player::PlayerState;
use crate::domain::roles::Role;

/// Outcome of inspecting a claimant's hand for a claimed role.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChallengeVerdict {
    /// The claimant holds the role. The challenger pays with a card and the
    /// claim stands.
    Upheld,
    /// The claimant was bluffing. The claimant pays with a card and the
    /// claimed action or block is cancelled.
    Refuted,
}

impl ChallengeVerdict {
    pub fn upheld(self) -> bool {
        matches!(self, ChallengeVerdict::Upheld)
    }
}

/// Check a claim against the claimant's living hand.
pub fn resolve_claim(claimant: &PlayerState, claimed: Role) -> ChallengeVerdict {
    if claimant.holds(claimed) {
        ChallengeVerdict::Upheld
    } else {
        ChallengeVerdict::Refuted
    }
}
