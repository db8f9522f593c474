//! Applying the effect of an action that survived its windows.

use tracing::{debug, info, warn};

use super::{GameFlow, Interrupt};
use crate::decision::ExchangeRequest;
use crate::domain::{Action, DomainError, PlayerId, Role, TurnPhase};

impl GameFlow {
    /// Apply `action`'s effect. Callers have already settled challenges and
    /// blocks; the only legality left to check is whether an assassination
    /// target is still standing.
    pub(super) async fn apply_effect(
        &mut self,
        actor: PlayerId,
        action: Action,
        target: Option<PlayerId>,
    ) -> Result<(), Interrupt> {
        self.state.set_phase(TurnPhase::ApplyEffect);
        match action {
            Action::Income | Action::ForeignAid | Action::Tax => {
                self.state.grant_coins(actor, action.gain())?;
            }
            Action::Steal => {
                let target = target.ok_or(DomainError::TargetRequired { action })?;
                let amount = self.state.steal_transfer(actor, target)?;
                info!(
                    game_id = %self.game_id,
                    actor = %actor,
                    target = %target,
                    amount,
                    "steal collected"
                );
            }
            Action::Assassinate => {
                let target = target.ok_or(DomainError::TargetRequired { action })?;
                // The target may have fallen refuting a block of this very
                // assassination. The contract is paid either way.
                if self.state.player(target)?.is_alive() {
                    self.card_loss(target).await?;
                } else {
                    debug!(
                        game_id = %self.game_id,
                        target = %target,
                        "assassination target already eliminated; effect skipped"
                    );
                }
            }
            Action::Coup => {
                let target = target.ok_or(DomainError::TargetRequired { action })?;
                self.card_loss(target).await?;
            }
            Action::Exchange => self.exchange_flow(actor).await?,
        }
        Ok(())
    }

    /// Draw two, show the combined offer privately, keep the hand's size
    /// worth of picks, return the rest to the deck.
    async fn exchange_flow(&mut self, actor: PlayerId) -> Result<(), Interrupt> {
        self.state.set_phase(TurnPhase::AwaitExchange);
        let hand = self.state.player(actor)?.living_roles();
        let keep_count = hand.len();
        let drawn = self.state.draw_exchange_cards()?;
        let mut offer = hand;
        offer.extend(drawn);

        let request = ExchangeRequest {
            player: actor,
            offer: offer.clone(),
            keep_count,
            timeout: self.timeouts.exchange,
        };
        let window = self.timeouts.exchange;
        let response = self
            .bounded(window, self.provider.choose_exchange_keep(request))
            .await?;
        let picks = match response {
            Some(picks) if valid_picks(&picks, offer.len(), keep_count) => picks,
            Some(_) => {
                warn!(
                    game_id = %self.game_id,
                    player = %actor,
                    "invalid exchange selection; keeping original hand"
                );
                (0..keep_count).collect()
            }
            None => (0..keep_count).collect(),
        };

        let kept: Vec<Role> = picks.iter().filter_map(|&i| offer.get(i).copied()).collect();
        let returned: Vec<Role> = offer
            .iter()
            .enumerate()
            .filter(|(i, _)| !picks.contains(i))
            .map(|(_, &role)| role)
            .collect();
        self.state.apply_exchange(actor, &kept, returned)?;
        debug!(game_id = %self.game_id, player = %actor, "exchange settled");
        Ok(())
    }
}

/// Exactly `keep_count` picks, all inside the offer, no index twice.
fn valid_picks(picks: &[usize], offer_len: usize, keep_count: usize) -> bool {
    picks.len() == keep_count
        && picks.iter().all(|&i| i < offer_len)
        && picks
            .iter()
            .enumerate()
            .all(|(seen, pick)| !picks[..seen].contains(pick))
}
