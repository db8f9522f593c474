//! Submission-driven decision provider for button-style transports.
//!
//! The engine side awaits the trait methods as usual. The transport side
//! receives a [`Prompt`] when a window opens, renders it however it likes,
//! and forwards user input through a [`SubmissionHandle`]. Submissions are
//! judged under one lock, so exactly one racer wins each group window and
//! everybody else gets [`SubmitError::AlreadyResolved`].

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::decision::slot::DecisionSlot;
use crate::decision::trait_def::{
    ActionRequest, BlockRequest, BlockResponse, CardLossRequest, ChallengeRequest, DecisionError,
    DecisionProvider, ExchangeRequest, TargetRequest,
};
use crate::domain::{Action, HandSlot, PlayerId, Role};

/// A decision window as announced to the transport.
#[derive(Debug, Clone)]
pub enum Prompt {
    Action(ActionRequest),
    Target(TargetRequest),
    Challenge(ChallengeRequest),
    Block(BlockRequest),
    CardLoss(CardLossRequest),
    Exchange(ExchangeRequest),
}

/// What a transport forwards when a user presses something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Action { player: PlayerId, action: Action },
    Target { player: PlayerId, target: PlayerId },
    Challenge { player: PlayerId },
    /// Decline the open challenge or block window.
    Pass { player: PlayerId },
    Block { player: PlayerId, claim: Role },
    CardLossSelect { player: PlayerId, slot: HandSlot },
    CardLossConfirm { player: PlayerId },
    CardLossCancel { player: PlayerId },
    ExchangePick { player: PlayerId, index: usize },
}

/// Immediate verdict handed back to the transport for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAck {
    Accepted,
    /// Card-loss selection recorded; a confirm or cancel must follow.
    NeedsConfirm { slot: HandSlot },
    /// Exchange pick recorded; this many picks are still missing.
    PickRecorded { remaining: usize },
    /// Pass recorded; the window stays open for the others.
    PassRecorded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// No decision window is open right now.
    NoOpenRequest,
    /// The open window asks a different kind of question.
    WrongKind,
    /// Submitter is not among the players this window is for.
    NotEligible { player: PlayerId },
    /// Payload is outside the offered set.
    InvalidChoice,
    /// Someone else already resolved this window.
    AlreadyResolved,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::NoOpenRequest => write!(f, "no decision is currently open"),
            SubmitError::WrongKind => write!(f, "submission does not match the open decision"),
            SubmitError::NotEligible { player } => {
                write!(f, "player {player} may not answer this decision")
            }
            SubmitError::InvalidChoice => write!(f, "choice is outside the offered set"),
            SubmitError::AlreadyResolved => write!(f, "someone already resolved this decision"),
        }
    }
}

impl std::error::Error for SubmitError {}

enum OpenRequest {
    Action {
        player: PlayerId,
        actions: Vec<Action>,
        slot: Arc<DecisionSlot<Action>>,
    },
    Target {
        player: PlayerId,
        targets: Vec<PlayerId>,
        slot: Arc<DecisionSlot<PlayerId>>,
    },
    Challenge {
        eligible: Vec<PlayerId>,
        passed: Vec<PlayerId>,
        slot: Arc<DecisionSlot<Option<PlayerId>>>,
    },
    Block {
        eligible: Vec<PlayerId>,
        claims: Vec<Role>,
        passed: Vec<PlayerId>,
        slot: Arc<DecisionSlot<Option<BlockResponse>>>,
    },
    CardLoss {
        player: PlayerId,
        slots: Vec<HandSlot>,
        pending: Option<HandSlot>,
        slot: Arc<DecisionSlot<HandSlot>>,
    },
    Exchange {
        player: PlayerId,
        offer_len: usize,
        keep_count: usize,
        picks: Vec<usize>,
        slot: Arc<DecisionSlot<Vec<usize>>>,
    },
}

impl OpenRequest {
    fn close(&self) {
        match self {
            OpenRequest::Action { slot, .. } => slot.close(),
            OpenRequest::Target { slot, .. } => slot.close(),
            OpenRequest::Challenge { slot, .. } => slot.close(),
            OpenRequest::Block { slot, .. } => slot.close(),
            OpenRequest::CardLoss { slot, .. } => slot.close(),
            OpenRequest::Exchange { slot, .. } => slot.close(),
        }
    }
}

#[derive(Default)]
struct Shared {
    open: Mutex<Option<OpenRequest>>,
}

/// Clears the open window when the engine stops waiting, timeout included.
struct OpenGuard {
    shared: Arc<Shared>,
}

impl Drop for OpenGuard {
    fn drop(&mut self) {
        if let Some(request) = self.shared.open.lock().take() {
            request.close();
        }
    }
}

/// Transport-facing half: forward user input, get an immediate verdict.
#[derive(Clone)]
pub struct SubmissionHandle {
    shared: Arc<Shared>,
}

impl SubmissionHandle {
    /// Judge one submission against the open window.
    ///
    /// Eligibility, membership in the offered set and the first-responder
    /// race are all decided here, under one lock.
    pub fn submit(&self, submission: Submission) -> Result<SubmitAck, SubmitError> {
        let mut open = self.shared.open.lock();
        let request = open.as_mut().ok_or(SubmitError::NoOpenRequest)?;
        match (request, submission) {
            (
                OpenRequest::Action {
                    player,
                    actions,
                    slot,
                },
                Submission::Action {
                    player: from,
                    action,
                },
            ) => {
                if from != *player {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !actions.contains(&action) {
                    return Err(SubmitError::InvalidChoice);
                }
                commit(slot, action)
            }
            (
                OpenRequest::Target {
                    player,
                    targets,
                    slot,
                },
                Submission::Target {
                    player: from,
                    target,
                },
            ) => {
                if from != *player {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !targets.contains(&target) {
                    return Err(SubmitError::InvalidChoice);
                }
                commit(slot, target)
            }
            (
                OpenRequest::Challenge {
                    eligible, slot, ..
                },
                Submission::Challenge { player: from },
            ) => {
                if !eligible.contains(&from) {
                    return Err(SubmitError::NotEligible { player: from });
                }
                commit(slot, Some(from))
            }
            (
                OpenRequest::Challenge {
                    eligible,
                    passed,
                    slot,
                },
                Submission::Pass { player: from },
            ) => {
                if !eligible.contains(&from) {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !slot.is_open() {
                    return Err(SubmitError::AlreadyResolved);
                }
                if !passed.contains(&from) {
                    passed.push(from);
                }
                if passed.len() == eligible.len() {
                    slot.try_commit(None);
                }
                Ok(SubmitAck::PassRecorded)
            }
            (
                OpenRequest::Block {
                    eligible,
                    claims,
                    slot,
                    ..
                },
                Submission::Block {
                    player: from,
                    claim,
                },
            ) => {
                if !eligible.contains(&from) {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !claims.contains(&claim) {
                    return Err(SubmitError::InvalidChoice);
                }
                commit(
                    slot,
                    Some(BlockResponse {
                        blocker: from,
                        claim,
                    }),
                )
            }
            (
                OpenRequest::Block {
                    eligible,
                    passed,
                    slot,
                    ..
                },
                Submission::Pass { player: from },
            ) => {
                if !eligible.contains(&from) {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !slot.is_open() {
                    return Err(SubmitError::AlreadyResolved);
                }
                if !passed.contains(&from) {
                    passed.push(from);
                }
                if passed.len() == eligible.len() {
                    slot.try_commit(None);
                }
                Ok(SubmitAck::PassRecorded)
            }
            (
                OpenRequest::CardLoss {
                    player,
                    slots,
                    pending,
                    slot,
                },
                Submission::CardLossSelect {
                    player: from,
                    slot: chosen,
                },
            ) => {
                if from != *player {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !slot.is_open() {
                    return Err(SubmitError::AlreadyResolved);
                }
                if !slots.contains(&chosen) {
                    return Err(SubmitError::InvalidChoice);
                }
                *pending = Some(chosen);
                Ok(SubmitAck::NeedsConfirm { slot: chosen })
            }
            (
                OpenRequest::CardLoss {
                    player,
                    pending,
                    slot,
                    ..
                },
                Submission::CardLossConfirm { player: from },
            ) => {
                if from != *player {
                    return Err(SubmitError::NotEligible { player: from });
                }
                let Some(chosen) = *pending else {
                    return Err(SubmitError::WrongKind);
                };
                commit(slot, chosen)
            }
            (
                OpenRequest::CardLoss {
                    player,
                    pending,
                    slot,
                    ..
                },
                Submission::CardLossCancel { player: from },
            ) => {
                if from != *player {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !slot.is_open() {
                    return Err(SubmitError::AlreadyResolved);
                }
                *pending = None;
                Ok(SubmitAck::Accepted)
            }
            (
                OpenRequest::Exchange {
                    player,
                    offer_len,
                    keep_count,
                    picks,
                    slot,
                },
                Submission::ExchangePick {
                    player: from,
                    index,
                },
            ) => {
                if from != *player {
                    return Err(SubmitError::NotEligible { player: from });
                }
                if !slot.is_open() {
                    return Err(SubmitError::AlreadyResolved);
                }
                if index >= *offer_len || picks.contains(&index) {
                    return Err(SubmitError::InvalidChoice);
                }
                picks.push(index);
                if picks.len() == *keep_count {
                    slot.try_commit(picks.clone());
                    Ok(SubmitAck::Accepted)
                } else {
                    Ok(SubmitAck::PickRecorded {
                        remaining: *keep_count - picks.len(),
                    })
                }
            }
            _ => Err(SubmitError::WrongKind),
        }
    }
}

fn commit<T>(slot: &DecisionSlot<T>, value: T) -> Result<SubmitAck, SubmitError> {
    if slot.try_commit(value) {
        Ok(SubmitAck::Accepted)
    } else {
        Err(SubmitError::AlreadyResolved)
    }
}

/// Engine-facing half. Awaits one window at a time; publishes each window
/// to the transport as a [`Prompt`].
pub struct ChannelDecisionProvider {
    shared: Arc<Shared>,
    prompts: mpsc::UnboundedSender<Prompt>,
}

impl ChannelDecisionProvider {
    /// Build the provider and the prompt stream the transport listens on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Prompt>) {
        let (prompts, receiver) = mpsc::unbounded_channel();
        (
            Self {
                shared: Arc::new(Shared::default()),
                prompts,
            },
            receiver,
        )
    }

    pub fn handle(&self) -> SubmissionHandle {
        SubmissionHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    fn register(&self, request: OpenRequest) -> Result<OpenGuard, DecisionError> {
        let mut open = self.shared.open.lock();
        if open.is_some() {
            return Err(DecisionError::Internal(
                "a decision is already pending".to_string(),
            ));
        }
        *open = Some(request);
        drop(open);
        Ok(OpenGuard {
            shared: Arc::clone(&self.shared),
        })
    }

    fn send_prompt(&self, prompt: Prompt) -> Result<(), DecisionError> {
        // A dropped receiver means nobody is left to answer.
        self.prompts
            .send(prompt)
            .map_err(|_| DecisionError::Unavailable)
    }
}

#[async_trait]
impl DecisionProvider for ChannelDecisionProvider {
    async fn choose_action(&self, request: ActionRequest) -> Result<Action, DecisionError> {
        let slot = Arc::new(DecisionSlot::new());
        let _guard = self.register(OpenRequest::Action {
            player: request.player,
            actions: request.actions.clone(),
            slot: Arc::clone(&slot),
        })?;
        self.send_prompt(Prompt::Action(request))?;
        slot.wait().await.ok_or(DecisionError::Unavailable)
    }

    async fn choose_target(&self, request: TargetRequest) -> Result<PlayerId, DecisionError> {
        let slot = Arc::new(DecisionSlot::new());
        let _guard = self.register(OpenRequest::Target {
            player: request.player,
            targets: request.targets.clone(),
            slot: Arc::clone(&slot),
        })?;
        self.send_prompt(Prompt::Target(request))?;
        slot.wait().await.ok_or(DecisionError::Unavailable)
    }

    async fn challenge_or_pass(
        &self,
        request: ChallengeRequest,
    ) -> Result<Option<PlayerId>, DecisionError> {
        let slot = Arc::new(DecisionSlot::new());
        let _guard = self.register(OpenRequest::Challenge {
            eligible: request.eligible.clone(),
            passed: Vec::new(),
            slot: Arc::clone(&slot),
        })?;
        self.send_prompt(Prompt::Challenge(request))?;
        slot.wait().await.ok_or(DecisionError::Unavailable)
    }

    async fn block_or_pass(
        &self,
        request: BlockRequest,
    ) -> Result<Option<BlockResponse>, DecisionError> {
        let slot = Arc::new(DecisionSlot::new());
        let _guard = self.register(OpenRequest::Block {
            eligible: request.eligible.clone(),
            claims: request.claims.clone(),
            passed: Vec::new(),
            slot: Arc::clone(&slot),
        })?;
        self.send_prompt(Prompt::Block(request))?;
        slot.wait().await.ok_or(DecisionError::Unavailable)
    }

    async fn choose_card_loss(
        &self,
        request: CardLossRequest,
    ) -> Result<HandSlot, DecisionError> {
        let slot = Arc::new(DecisionSlot::new());
        let _guard = self.register(OpenRequest::CardLoss {
            player: request.player,
            slots: request.slots.clone(),
            pending: None,
            slot: Arc::clone(&slot),
        })?;
        self.send_prompt(Prompt::CardLoss(request))?;
        slot.wait().await.ok_or(DecisionError::Unavailable)
    }

    async fn choose_exchange_keep(
        &self,
        request: ExchangeRequest,
    ) -> Result<Vec<usize>, DecisionError> {
        let slot = Arc::new(DecisionSlot::new());
        let _guard = self.register(OpenRequest::Exchange {
            player: request.player,
            offer_len: request.offer.len(),
            keep_count: request.keep_count,
            picks: Vec::new(),
            slot: Arc::clone(&slot),
        })?;
        self.send_prompt(Prompt::Exchange(request))?;
        slot.wait().await.ok_or(DecisionError::Unavailable)
    }
}
