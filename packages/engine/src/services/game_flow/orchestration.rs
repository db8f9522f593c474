//! The turn loop itself.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{GameFlow, GameOutcome, Interrupt};
use crate::decision::{ActionRequest, DecisionError, OpportunityId, TargetRequest};
use crate::domain::{Action, DomainError, PlayerId, TurnPhase};
use crate::error::EngineError;
use crate::notify::GameEvent;

/// Hard ceiling on turns per game. A healthy game ends orders of magnitude
/// earlier; hitting this means the loop is wedged.
const MAX_TURNS: u32 = 10_000;

impl GameFlow {
    /// Drive the game until a winner emerges or the game is stopped.
    ///
    /// Cancellation is honoured at every suspension point: the loop never
    /// tears down in the middle of applying a transition.
    pub async fn run(&mut self) -> Result<GameOutcome, EngineError> {
        if self.state.phase() == TurnPhase::Setup {
            return Err(DomainError::NotDealt.into());
        }
        info!(
            game_id = %self.game_id,
            players = self.state.players().len(),
            "game loop started"
        );
        match self.run_inner().await {
            Err(Interrupt::Ended) => {
                let winner = self
                    .state
                    .winner()
                    .ok_or_else(|| EngineError::internal("game ended without a winner"))?;
                self.sink.publish(GameEvent::GameOver { winner }).await;
                info!(game_id = %self.game_id, winner = %winner, "game over");
                Ok(GameOutcome::Completed { winner })
            }
            Err(Interrupt::Stopped) => {
                info!(game_id = %self.game_id, "game stopped");
                Ok(GameOutcome::Stopped)
            }
            Err(Interrupt::Fatal(err)) => {
                warn!(game_id = %self.game_id, error = %err, "game failed");
                Err(err)
            }
            Ok(()) => Err(EngineError::internal("turn loop exited without a result")),
        }
    }

    async fn run_inner(&mut self) -> Result<(), Interrupt> {
        let mut turns: u32 = 0;
        loop {
            turns += 1;
            if turns > MAX_TURNS {
                return Err(EngineError::internal("turn limit exceeded").into());
            }
            self.play_turn().await?;
        }
    }

    /// One full turn for the current player, from action prompt to turn
    /// advancement.
    async fn play_turn(&mut self) -> Result<(), Interrupt> {
        let actor = self.state.current_player();
        self.sink.publish(GameEvent::TurnStarted { player: actor }).await;
        debug!(game_id = %self.game_id, player = %actor, "turn started");

        let action = self.request_action(actor).await?;
        let target = if action.requires_target() {
            Some(self.request_target(actor, action).await?)
        } else {
            None
        };

        // The offered sets came from the engine itself, so this can only
        // fail if the loop is broken.
        self.state.validate_action(actor, action, target)?;
        self.state.pay_cost(actor, action)?;
        self.sink
            .publish(GameEvent::ActionAnnounced {
                actor,
                action,
                target,
            })
            .await;
        info!(
            game_id = %self.game_id,
            player = %actor,
            action = %action,
            target = ?target,
            "action announced"
        );

        if self.resolve_claims(actor, action, target).await? {
            self.apply_effect(actor, action, target).await?;
        }

        self.state.advance_turn(actor)?;
        Ok(())
    }

    /// Challenge and block windows for an announced action. `Ok(true)`
    /// means the effect should be applied.
    async fn resolve_claims(
        &mut self,
        actor: PlayerId,
        action: Action,
        target: Option<PlayerId>,
    ) -> Result<bool, Interrupt> {
        if let Some(claim) = action.claim() {
            self.state.set_phase(TurnPhase::AwaitActionChallenge);
            if self.challenge_window(actor, claim).await?.cancelled() {
                return Ok(false);
            }
        }

        // An assassination target who fell defending the challenge is
        // beyond blocking and beyond assassinating.
        if action == Action::Assassinate {
            if let Some(t) = target {
                if !self.state.player(t)?.is_alive() {
                    debug!(
                        game_id = %self.game_id,
                        target = %t,
                        "assassination target already eliminated; skipping"
                    );
                    return Ok(false);
                }
            }
        }

        if action.blockable() {
            self.state.set_phase(TurnPhase::AwaitBlock);
            if self.block_window(actor, action, target).await?.blocked() {
                return Ok(false);
            }
        }

        Ok(true)
    }

    async fn request_action(&mut self, actor: PlayerId) -> Result<Action, Interrupt> {
        self.state.set_phase(TurnPhase::AwaitAction);
        let offered = self.state.offered_actions(actor)?;
        let default = default_action(&offered)
            .ok_or_else(|| EngineError::internal("no actions offered"))?;
        let request = ActionRequest {
            player: actor,
            actions: offered.clone(),
            timeout: self.timeouts.action,
        };
        let window = self.timeouts.action;
        let response = self
            .bounded(window, self.provider.choose_action(request))
            .await?;
        match response {
            Some(action) if offered.contains(&action) => Ok(action),
            Some(action) => {
                warn!(
                    game_id = %self.game_id,
                    player = %actor,
                    action = %action,
                    "unoffered action from provider; applying default"
                );
                Ok(default)
            }
            None => Ok(default),
        }
    }

    async fn request_target(
        &mut self,
        actor: PlayerId,
        action: Action,
    ) -> Result<PlayerId, Interrupt> {
        self.state.set_phase(TurnPhase::AwaitTarget);
        let targets = self.state.eligible_targets(actor, action);
        let default = targets
            .first()
            .copied()
            .ok_or_else(|| EngineError::internal("no eligible targets"))?;
        let request = TargetRequest {
            player: actor,
            action,
            targets: targets.clone(),
            timeout: self.timeouts.target,
        };
        let window = self.timeouts.target;
        let response = self
            .bounded(window, self.provider.choose_target(request))
            .await?;
        match response {
            Some(target) if targets.contains(&target) => Ok(target),
            Some(target) => {
                warn!(
                    game_id = %self.game_id,
                    player = %actor,
                    target = %target,
                    "ineligible target from provider; applying default"
                );
                Ok(default)
            }
            None => Ok(default),
        }
    }

    /// Await one provider decision, bounded by its timeout and by
    /// cancellation.
    ///
    /// `Ok(None)` is a non-response: the window elapsed or the provider
    /// failed, and the caller applies the decision's default. Provider
    /// errors are never fatal to the game.
    pub(super) async fn bounded<T, F>(
        &self,
        window: Duration,
        decision: F,
    ) -> Result<Option<T>, Interrupt>
    where
        F: Future<Output = Result<T, DecisionError>>,
    {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(Interrupt::Stopped),
            outcome = tokio::time::timeout(window, decision) => match outcome {
                Ok(Ok(value)) => Ok(Some(value)),
                Ok(Err(err)) => {
                    warn!(
                        game_id = %self.game_id,
                        error = %err,
                        "decision provider failed; applying default"
                    );
                    Ok(None)
                }
                Err(_) => {
                    debug!(game_id = %self.game_id, "decision window elapsed; applying default");
                    Ok(None)
                }
            },
        }
    }

    pub(super) fn next_opportunity(&mut self) -> OpportunityId {
        self.opportunity_counter += 1;
        OpportunityId(self.opportunity_counter)
    }
}

/// Income when offered, otherwise the sole remaining offer (the mandatory
/// coup at ten coins).
fn default_action(offered: &[Action]) -> Option<Action> {
    if offered.contains(&Action::Income) {
        Some(Action::Income)
    } else {
        offered.first().copied()
    }
}
