//! The decision provider trait: how a suspended game asks the outside
//! world what to do next.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Action, HandSlot, PlayerId, Role};

/// Identifies one group decision window.
///
/// Challenge and block windows are raced by several players; the id lets a
/// transport tell a late response apart from a response to the next window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct OpportunityId(pub u64);

impl std::fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ask the current player for their turn action.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub player: PlayerId,
    /// Offered set, already filtered for treasury thresholds and the
    /// no-stealable-target exclusion.
    pub actions: Vec<Action>,
    pub timeout: Duration,
}

/// Ask the current player to aim an announced action.
#[derive(Debug, Clone)]
pub struct TargetRequest {
    pub player: PlayerId,
    pub action: Action,
    pub targets: Vec<PlayerId>,
    pub timeout: Duration,
}

/// Offer a challenge window against a claim.
#[derive(Debug, Clone)]
pub struct ChallengeRequest {
    pub opportunity: OpportunityId,
    pub claimant: PlayerId,
    pub claim: Role,
    /// Every living player other than the claimant.
    pub eligible: Vec<PlayerId>,
    pub timeout: Duration,
}

/// Offer a block window against an announced action.
#[derive(Debug, Clone)]
pub struct BlockRequest {
    pub opportunity: OpportunityId,
    pub actor: PlayerId,
    pub action: Action,
    pub target: Option<PlayerId>,
    /// Who may block: the target alone, or the whole table minus the actor.
    pub eligible: Vec<PlayerId>,
    /// Roles a blocker may claim.
    pub claims: Vec<Role>,
    pub timeout: Duration,
}

/// A block as announced by one eligible player.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlockResponse {
    pub blocker: PlayerId,
    pub claim: Role,
}

/// Ask a player which card they give up.
#[derive(Debug, Clone)]
pub struct CardLossRequest {
    pub player: PlayerId,
    /// Living slot labels only; the roles behind them are never included.
    pub slots: Vec<HandSlot>,
    pub timeout: Duration,
}

/// Show the exchange offer to the acting player, privately.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub player: PlayerId,
    /// Current hand first, then the two drawn cards.
    pub offer: Vec<Role>,
    /// How many offer indices to keep: the player's living card count.
    pub keep_count: usize,
    pub timeout: Duration,
}

/// Why a provider could not produce an answer.
///
/// Any error is treated as a non-response: the engine logs it and applies
/// the decision's documented default.
#[derive(Debug)]
pub enum DecisionError {
    /// The transport is gone: channel closed, view dismissed, peer hung up.
    Unavailable,
    /// Provider-internal failure.
    Internal(String),
}

impl std::fmt::Display for DecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionError::Unavailable => write!(f, "decision provider unavailable"),
            DecisionError::Internal(detail) => write!(f, "decision provider error: {detail}"),
        }
    }
}

impl std::error::Error for DecisionError {}

/// Source of player decisions for one game.
///
/// The engine calls at most one method at a time and bounds every call with
/// the request's timeout. Implementations may take as long as they like;
/// a late answer is simply never observed. Group windows (challenge, block)
/// must resolve to the first valid response and treat the rest as too late.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Default on timeout: Income if offered, otherwise the sole offer.
    async fn choose_action(&self, request: ActionRequest) -> Result<Action, DecisionError>;

    /// Default on timeout: the first eligible target.
    async fn choose_target(&self, request: TargetRequest) -> Result<PlayerId, DecisionError>;

    /// `None` means nobody challenges. Default on timeout: no challenge.
    async fn challenge_or_pass(
        &self,
        request: ChallengeRequest,
    ) -> Result<Option<PlayerId>, DecisionError>;

    /// `None` means nobody blocks. Default on timeout: no block.
    async fn block_or_pass(
        &self,
        request: BlockRequest,
    ) -> Result<Option<BlockResponse>, DecisionError>;

    /// Default on timeout: the lowest living slot.
    async fn choose_card_loss(&self, request: CardLossRequest)
        -> Result<HandSlot, DecisionError>;

    /// Indices into the offer to keep, `keep_count` of them, distinct.
    /// Default on timeout: the first `keep_count` indices, which keeps the
    /// pre-exchange hand.
    async fn choose_exchange_keep(
        &self,
        request: ExchangeRequest,
    ) -> Result<Vec<usize>, DecisionError>;
}
