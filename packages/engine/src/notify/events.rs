//! The per-game event stream.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, PlayerId, Role};

/// Observable game progress, emitted in order by the turn loop.
///
/// Events carry only public information, with one deliberate exception:
/// [`GameEvent::CardLost`] names the lost role, since lost cards are face
/// up. Hosts that want a redacted spectator feed can blank the role before
/// forwarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStarted {
        player: PlayerId,
    },
    ActionAnnounced {
        actor: PlayerId,
        action: Action,
        target: Option<PlayerId>,
    },
    ChallengeIssued {
        challenger: PlayerId,
        claimant: PlayerId,
        claim: Role,
    },
    ChallengeResolved {
        challenger: PlayerId,
        claimant: PlayerId,
        claim: Role,
        upheld: bool,
    },
    BlockIssued {
        blocker: PlayerId,
        actor: PlayerId,
        action: Action,
        claim: Role,
    },
    CardLost {
        player: PlayerId,
        role: Option<Role>,
    },
    PlayerEliminated {
        player: PlayerId,
    },
    GameOver {
        winner: PlayerId,
    },
}
