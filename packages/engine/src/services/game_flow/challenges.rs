//! Challenge and block windows, and the card losses they settle into.

use tracing::{info, warn};

use super::{GameFlow, Interrupt};
use crate::decision::{BlockRequest, CardLossRequest, ChallengeRequest};
use crate::domain::{resolve_claim, Action, BlockScope, DomainError, PlayerId, Role, TurnPhase};
use crate::notify::GameEvent;

/// How a claim's challenge window closed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum ChallengeOutcome {
    NoChallenge,
    /// The claimant held the role; the challenger paid a card.
    Upheld,
    /// The claim was a bluff; the claimant paid a card.
    Refuted,
}

impl ChallengeOutcome {
    /// A refuted claim cancels whatever the claim was backing.
    pub(super) fn cancelled(self) -> bool {
        self == ChallengeOutcome::Refuted
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum BlockOutcome {
    NotBlocked,
    Blocked,
}

impl BlockOutcome {
    pub(super) fn blocked(self) -> bool {
        self == BlockOutcome::Blocked
    }
}

impl GameFlow {
    /// One challenge window against `claimant`'s claim of `claim`.
    ///
    /// The first eligible challenger wins the window; everyone passing, or
    /// the window elapsing, lets the claim stand unexamined. A challenge is
    /// judged on the spot: upheld costs the challenger a card and refreshes
    /// the revealed role from the deck, refuted costs the claimant a card.
    pub(super) async fn challenge_window(
        &mut self,
        claimant: PlayerId,
        claim: Role,
    ) -> Result<ChallengeOutcome, Interrupt> {
        let eligible = self.state.eligible_challengers(claimant);
        if eligible.is_empty() {
            return Ok(ChallengeOutcome::NoChallenge);
        }
        let request = ChallengeRequest {
            opportunity: self.next_opportunity(),
            claimant,
            claim,
            eligible: eligible.clone(),
            timeout: self.timeouts.challenge,
        };
        let window = self.timeouts.challenge;
        let response = self
            .bounded(window, self.provider.challenge_or_pass(request))
            .await?;
        let challenger = match response {
            Some(Some(player)) if eligible.contains(&player) => player,
            Some(Some(player)) => {
                warn!(
                    game_id = %self.game_id,
                    player = %player,
                    "ineligible challenger from provider; treating as a pass"
                );
                return Ok(ChallengeOutcome::NoChallenge);
            }
            Some(None) | None => return Ok(ChallengeOutcome::NoChallenge),
        };

        self.sink
            .publish(GameEvent::ChallengeIssued {
                challenger,
                claimant,
                claim,
            })
            .await;
        self.state.set_phase(TurnPhase::ChallengeResolve);
        let verdict = resolve_claim(self.state.player(claimant)?, claim);
        self.sink
            .publish(GameEvent::ChallengeResolved {
                challenger,
                claimant,
                claim,
                upheld: verdict.upheld(),
            })
            .await;
        info!(
            game_id = %self.game_id,
            challenger = %challenger,
            claimant = %claimant,
            claim = %claim,
            upheld = verdict.upheld(),
            "challenge resolved"
        );

        if verdict.upheld() {
            self.card_loss(challenger).await?;
            self.state.swap_revealed(claimant, claim)?;
            Ok(ChallengeOutcome::Upheld)
        } else {
            self.card_loss(claimant).await?;
            Ok(ChallengeOutcome::Refuted)
        }
    }

    /// One block window for an announced action. A block that survives its
    /// own challenge window cancels the action.
    pub(super) async fn block_window(
        &mut self,
        actor: PlayerId,
        action: Action,
        target: Option<PlayerId>,
    ) -> Result<BlockOutcome, Interrupt> {
        let eligible = self.state.eligible_blockers(actor, action, target);
        if eligible.is_empty() {
            return Ok(BlockOutcome::NotBlocked);
        }
        let claims = action.block_claims().to_vec();
        // Open blocks race the whole table; a targeted block leaves the
        // victim alone with the clock.
        let window = if action.block_scope() == BlockScope::TargetOnly {
            self.timeouts.targeted_block
        } else {
            self.timeouts.open_block
        };
        let request = BlockRequest {
            opportunity: self.next_opportunity(),
            actor,
            action,
            target,
            eligible: eligible.clone(),
            claims: claims.clone(),
            timeout: window,
        };
        let response = self
            .bounded(window, self.provider.block_or_pass(request))
            .await?;
        let block = match response {
            Some(Some(block)) if eligible.contains(&block.blocker) && claims.contains(&block.claim) => {
                block
            }
            Some(Some(block)) => {
                warn!(
                    game_id = %self.game_id,
                    blocker = %block.blocker,
                    claim = %block.claim,
                    "invalid block from provider; treating as a pass"
                );
                return Ok(BlockOutcome::NotBlocked);
            }
            Some(None) | None => return Ok(BlockOutcome::NotBlocked),
        };

        self.sink
            .publish(GameEvent::BlockIssued {
                blocker: block.blocker,
                actor,
                action,
                claim: block.claim,
            })
            .await;
        info!(
            game_id = %self.game_id,
            blocker = %block.blocker,
            claim = %block.claim,
            action = %action,
            "block announced"
        );

        self.state.set_phase(TurnPhase::AwaitBlockChallenge);
        if self
            .challenge_window(block.blocker, block.claim)
            .await?
            .cancelled()
        {
            Ok(BlockOutcome::NotBlocked)
        } else {
            Ok(BlockOutcome::Blocked)
        }
    }

    /// Make `player` give up one influence, prompting them for the slot.
    pub(super) async fn card_loss(&mut self, player: PlayerId) -> Result<(), Interrupt> {
        self.state.set_phase(TurnPhase::AwaitCardLoss);
        let slots = self.state.player(player)?.living_slots();
        let default = slots
            .first()
            .copied()
            .ok_or(DomainError::NoCardsToLose { player })?;
        let request = CardLossRequest {
            player,
            slots: slots.clone(),
            timeout: self.timeouts.card_loss,
        };
        let window = self.timeouts.card_loss;
        let response = self
            .bounded(window, self.provider.choose_card_loss(request))
            .await?;
        let chosen = match response {
            Some(slot) if slots.contains(&slot) => slot,
            Some(slot) => {
                warn!(
                    game_id = %self.game_id,
                    player = %player,
                    slot = %slot,
                    "dead or unknown slot from provider; applying default"
                );
                default
            }
            None => default,
        };
        let lost = self.state.lose_card(player, chosen)?;
        self.sink
            .publish(GameEvent::CardLost {
                player,
                role: Some(lost),
            })
            .await;
        info!(game_id = %self.game_id, player = %player, role = %lost, "card lost");
        self.settle_elimination(player).await
    }

    /// Announce an elimination if the loss was the player's last card, and
    /// end the game the moment one player remains.
    async fn settle_elimination(&mut self, player: PlayerId) -> Result<(), Interrupt> {
        if self.state.player(player)?.is_alive() {
            return Ok(());
        }
        self.sink
            .publish(GameEvent::PlayerEliminated { player })
            .await;
        info!(game_id = %self.game_id, player = %player, "player eliminated");
        if self.state.check_victory().is_some() {
            return Err(Interrupt::Ended);
        }
        Ok(())
    }
}
