use crate::domain::challenge::{resolve_claim, ChallengeVerdict};
use crate::domain::player::{PlayerId, PlayerState};
use crate::domain::roles::{HandSlot, Role};

fn claimant(hand: &[Role]) -> PlayerState {
    PlayerState::with_hand(PlayerId(7), "Claimant".to_string(), hand, 2)
}

#[test]
fn claim_upheld_when_role_is_held() {
    let player = claimant(&[Role::Duke, Role::Assassin]);
    assert_eq!(resolve_claim(&player, Role::Duke), ChallengeVerdict::Upheld);
    assert!(resolve_claim(&player, Role::Duke).upheld());
}

#[test]
fn claim_refuted_when_role_is_absent() {
    let player = claimant(&[Role::Duke, Role::Assassin]);
    assert_eq!(
        resolve_claim(&player, Role::Contessa),
        ChallengeVerdict::Refuted
    );
    assert!(!resolve_claim(&player, Role::Contessa).upheld());
}

#[test]
fn only_living_cards_back_a_claim() {
    let mut player = claimant(&[Role::Duke, Role::Assassin]);
    player.lose_card(HandSlot::A).expect("lose duke");
    assert_eq!(
        resolve_claim(&player, Role::Duke),
        ChallengeVerdict::Refuted
    );
    assert_eq!(
        resolve_claim(&player, Role::Assassin),
        ChallengeVerdict::Upheld
    );
}
