//! Random decision provider - uniformly random legal choices.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use crate::decision::trait_def::{
    ActionRequest, BlockRequest, BlockResponse, CardLossRequest, ChallengeRequest, DecisionError,
    DecisionProvider, ExchangeRequest, TargetRequest,
};
use crate::domain::{Action, HandSlot, PlayerId};

/// A decision provider that answers instantly with uniformly random legal
/// choices.
///
/// Useful as a fill-in for absent players and as the driver for
/// simulation-style tests. With a fixed seed the whole game becomes
/// reproducible. Group windows are answered aggressively: passing is just
/// one more option next to challenging or blocking.
pub struct RandomDecider {
    rng: Mutex<StdRng>,
}

impl RandomDecider {
    /// Create a new random decider.
    ///
    /// If `seed` is provided, decisions are deterministic and reproducible.
    /// Otherwise the generator is seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn pick<T: Copy>(&self, options: &[T], what: &str) -> Result<T, DecisionError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| DecisionError::Internal(format!("rng lock poisoned: {e}")))?;
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| DecisionError::Internal(format!("no {what} offered")))
    }
}

#[async_trait]
impl DecisionProvider for RandomDecider {
    async fn choose_action(&self, request: ActionRequest) -> Result<Action, DecisionError> {
        self.pick(&request.actions, "actions")
    }

    async fn choose_target(&self, request: TargetRequest) -> Result<PlayerId, DecisionError> {
        self.pick(&request.targets, "targets")
    }

    async fn challenge_or_pass(
        &self,
        request: ChallengeRequest,
    ) -> Result<Option<PlayerId>, DecisionError> {
        let mut options: Vec<Option<PlayerId>> = vec![None];
        options.extend(request.eligible.iter().copied().map(Some));
        self.pick(&options, "challenge options")
    }

    async fn block_or_pass(
        &self,
        request: BlockRequest,
    ) -> Result<Option<BlockResponse>, DecisionError> {
        let mut options: Vec<Option<BlockResponse>> = vec![None];
        for &blocker in &request.eligible {
            for &claim in &request.claims {
                options.push(Some(BlockResponse { blocker, claim }));
            }
        }
        self.pick(&options, "block options")
    }

    async fn choose_card_loss(
        &self,
        request: CardLossRequest,
    ) -> Result<HandSlot, DecisionError> {
        self.pick(&request.slots, "slots")
    }

    async fn choose_exchange_keep(
        &self,
        request: ExchangeRequest,
    ) -> Result<Vec<usize>, DecisionError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| DecisionError::Internal(format!("rng lock poisoned: {e}")))?;
        let mut indices: Vec<usize> = (0..request.offer.len()).collect();
        indices.shuffle(&mut *rng);
        indices.truncate(request.keep_count);
        Ok(indices)
    }
}
