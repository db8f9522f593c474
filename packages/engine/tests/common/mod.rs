#![allow(dead_code)]

// tests/common/mod.rs
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use coup_engine::decision::{
    ActionRequest, BlockRequest, BlockResponse, CardLossRequest, ChallengeRequest, DecisionError,
    DecisionProvider, ExchangeRequest, TargetRequest,
};
use coup_engine::domain::{Action, HandSlot, PlayerId, PlayerSetup, Role};
use coup_engine::notify::{GameEvent, NotificationSink};

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

/// Roster of `n` players with ids `1..=n`.
pub fn roster(n: u64) -> Vec<(PlayerId, String)> {
    (1..=n)
        .map(|i| (PlayerId(i), format!("Player {i}")))
        .collect()
}

/// Seat with a fully known hand, for deterministic scenarios.
pub fn setup_player(id: PlayerId, hand: &[Role], coins: u8) -> PlayerSetup {
    PlayerSetup {
        id,
        name: format!("Player {id}"),
        hand: hand.to_vec(),
        coins,
    }
}

/// Plays back queued decisions, one per request, in queue order.
///
/// An exhausted queue answers `Unavailable`, which the engine treats as an
/// immediate non-response and resolves with the decision's default. Built
/// with [`ScriptedProvider::hanging`] an exhausted queue never answers at
/// all, leaving the engine to its timeout.
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<Action>>,
    targets: Mutex<VecDeque<PlayerId>>,
    challenges: Mutex<VecDeque<Option<PlayerId>>>,
    blocks: Mutex<VecDeque<Option<BlockResponse>>>,
    card_losses: Mutex<VecDeque<HandSlot>>,
    exchanges: Mutex<VecDeque<Vec<usize>>>,
    hang_when_empty: bool,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            actions: Mutex::new(VecDeque::new()),
            targets: Mutex::new(VecDeque::new()),
            challenges: Mutex::new(VecDeque::new()),
            blocks: Mutex::new(VecDeque::new()),
            card_losses: Mutex::new(VecDeque::new()),
            exchanges: Mutex::new(VecDeque::new()),
            hang_when_empty: false,
        }
    }

    /// Exhausted queues block forever instead of erroring, so the engine's
    /// own window timeout is what resolves the request.
    pub fn hanging() -> Self {
        Self {
            hang_when_empty: true,
            ..Self::new()
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.get_mut().expect("queue lock").push_back(action);
        self
    }

    pub fn with_actions<I: IntoIterator<Item = Action>>(mut self, actions: I) -> Self {
        self.actions.get_mut().expect("queue lock").extend(actions);
        self
    }

    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.targets.get_mut().expect("queue lock").push_back(target);
        self
    }

    pub fn with_challenge(mut self, challenger: Option<PlayerId>) -> Self {
        self.challenges
            .get_mut()
            .expect("queue lock")
            .push_back(challenger);
        self
    }

    pub fn with_challenges<I: IntoIterator<Item = Option<PlayerId>>>(
        mut self,
        challengers: I,
    ) -> Self {
        self.challenges
            .get_mut()
            .expect("queue lock")
            .extend(challengers);
        self
    }

    pub fn with_block(mut self, block: Option<BlockResponse>) -> Self {
        self.blocks.get_mut().expect("queue lock").push_back(block);
        self
    }

    pub fn with_card_loss(mut self, slot: HandSlot) -> Self {
        self.card_losses.get_mut().expect("queue lock").push_back(slot);
        self
    }

    pub fn with_card_losses<I: IntoIterator<Item = HandSlot>>(mut self, slots: I) -> Self {
        self.card_losses.get_mut().expect("queue lock").extend(slots);
        self
    }

    pub fn with_exchange(mut self, picks: Vec<usize>) -> Self {
        self.exchanges.get_mut().expect("queue lock").push_back(picks);
        self
    }

    fn pop<T>(&self, queue: &Mutex<VecDeque<T>>) -> Option<T> {
        queue.lock().expect("queue lock").pop_front()
    }

    async fn next<T>(&self, queue: &Mutex<VecDeque<T>>) -> Result<T, DecisionError> {
        match self.pop(queue) {
            Some(value) => Ok(value),
            None if self.hang_when_empty => std::future::pending().await,
            None => Err(DecisionError::Unavailable),
        }
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    async fn choose_action(&self, _request: ActionRequest) -> Result<Action, DecisionError> {
        self.next(&self.actions).await
    }

    async fn choose_target(&self, _request: TargetRequest) -> Result<PlayerId, DecisionError> {
        self.next(&self.targets).await
    }

    async fn challenge_or_pass(
        &self,
        _request: ChallengeRequest,
    ) -> Result<Option<PlayerId>, DecisionError> {
        self.next(&self.challenges).await
    }

    async fn block_or_pass(
        &self,
        _request: BlockRequest,
    ) -> Result<Option<BlockResponse>, DecisionError> {
        self.next(&self.blocks).await
    }

    async fn choose_card_loss(&self, _request: CardLossRequest) -> Result<HandSlot, DecisionError> {
        self.next(&self.card_losses).await
    }

    async fn choose_exchange_keep(
        &self,
        _request: ExchangeRequest,
    ) -> Result<Vec<usize>, DecisionError> {
        self.next(&self.exchanges).await
    }
}

/// Captures the event stream and lets a test wait for a milestone.
pub struct RecordingSink {
    events: Mutex<Vec<GameEvent>>,
    notify: tokio::sync::Notify,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            notify: tokio::sync::Notify::new(),
        }
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().expect("events lock").clone()
    }

    /// True once an event matching `pred` has been recorded, false if
    /// `timeout` passes first.
    pub async fn wait_for<F>(&self, pred: F, timeout: Duration) -> bool
    where
        F: Fn(&GameEvent) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking, so a publish in between still wakes us.
            notified.as_mut().enable();
            if self.events.lock().expect("events lock").iter().any(&pred) {
                return true;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return false;
            }
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn publish(&self, event: GameEvent) {
        self.events.lock().expect("events lock").push(event);
        self.notify.notify_waiters();
    }
}
