//! Actions and the static rule table behind them.

use serde::{Deserialize, Serialize};

use crate::domain::roles::Role;

/// Maximum number of coins a steal can transfer.
pub const STEAL_MAX: u8 = 2;

/// A turn action as announced by the current player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Income,
    ForeignAid,
    Tax,
    Exchange,
    Steal,
    Assassinate,
    Coup,
}

/// Who may announce a block against an action.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlockScope {
    /// Action cannot be blocked.
    None,
    /// Only the action's target may block.
    TargetOnly,
    /// Any living player other than the actor may block.
    AnyOther,
}

/// Static facts about one action. Everything the turn loop needs to know
/// about legality, claims, blocks and coin movement lives here.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ActionProfile {
    /// Role the actor implicitly claims by announcing, `None` for
    /// unclaimed actions.
    pub claim: Option<Role>,
    pub requires_target: bool,
    pub challengeable: bool,
    /// Roles a blocker may claim. Empty when the action is unblockable.
    pub block_claims: &'static [Role],
    pub block_scope: BlockScope,
    /// Coins paid when the action is announced. Paid up front and never
    /// refunded, even if the action is later challenged or blocked.
    pub cost: u8,
    /// Flat coin gain applied when the effect resolves. Steal transfers
    /// up to [`STEAL_MAX`] instead and keeps this at zero.
    pub gain: u8,
}

impl Action {
    /// All actions in announcement-menu order.
    pub const ALL: [Action; 7] = [
        Action::Income,
        Action::ForeignAid,
        Action::Tax,
        Action::Exchange,
        Action::Steal,
        Action::Assassinate,
        Action::Coup,
    ];

    pub const fn profile(self) -> &'static ActionProfile {
        match self {
            Action::Income => &ActionProfile {
                claim: None,
                requires_target: false,
                challengeable: false,
                block_claims: &[],
                block_scope: BlockScope::None,
                cost: 0,
                gain: 1,
            },
            Action::ForeignAid => &ActionProfile {
                claim: None,
                requires_target: false,
                challengeable: false,
                block_claims: &[Role::Duke],
                block_scope: BlockScope::AnyOther,
                cost: 0,
                gain: 2,
            },
            Action::Tax => &ActionProfile {
                claim: Some(Role::Duke),
                requires_target: false,
                challengeable: true,
                block_claims: &[],
                block_scope: BlockScope::None,
                cost: 0,
                gain: 3,
            },
            Action::Exchange => &ActionProfile {
                claim: Some(Role::Ambassador),
                requires_target: false,
                challengeable: true,
                block_claims: &[],
                block_scope: BlockScope::None,
                cost: 0,
                gain: 0,
            },
            Action::Steal => &ActionProfile {
                claim: Some(Role::Captain),
                requires_target: true,
                challengeable: true,
                block_claims: &[Role::Captain, Role::Ambassador],
                block_scope: BlockScope::TargetOnly,
                cost: 0,
                gain: 0,
            },
            Action::Assassinate => &ActionProfile {
                claim: Some(Role::Assassin),
                requires_target: true,
                challengeable: true,
                block_claims: &[Role::Contessa],
                block_scope: BlockScope::TargetOnly,
                cost: 3,
                gain: 0,
            },
            Action::Coup => &ActionProfile {
                claim: None,
                requires_target: true,
                challengeable: false,
                block_claims: &[],
                block_scope: BlockScope::None,
                cost: 7,
                gain: 0,
            },
        }
    }

    pub fn claim(self) -> Option<Role> {
        self.profile().claim
    }

    pub fn requires_target(self) -> bool {
        self.profile().requires_target
    }

    pub fn challengeable(self) -> bool {
        self.profile().challengeable
    }

    pub fn blockable(self) -> bool {
        !self.profile().block_claims.is_empty()
    }

    pub fn block_claims(self) -> &'static [Role] {
        self.profile().block_claims
    }

    pub fn block_scope(self) -> BlockScope {
        self.profile().block_scope
    }

    pub fn cost(self) -> u8 {
        self.profile().cost
    }

    pub fn gain(self) -> u8 {
        self.profile().gain
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Action::Income => "Income",
            Action::ForeignAid => "Foreign Aid",
            Action::Tax => "Tax",
            Action::Exchange => "Exchange",
            Action::Steal => "Steal",
            Action::Assassinate => "Assassinate",
            Action::Coup => "Coup",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
