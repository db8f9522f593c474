use crate::domain::actions::Action;
use crate::domain::errors::DomainError;
use crate::domain::player::{PlayerId, PlayerState};
use crate::domain::roles::{HandSlot, Role};

fn seat(coins: u8) -> PlayerState {
    PlayerState::with_hand(
        PlayerId(1),
        "Alice".to_string(),
        &[Role::Duke, Role::Contessa],
        coins,
    )
}

#[test]
fn legal_actions_below_three_coins() {
    for coins in 0..3 {
        let actions = seat(coins).legal_actions();
        assert_eq!(
            actions,
            vec![
                Action::Income,
                Action::ForeignAid,
                Action::Tax,
                Action::Exchange,
                Action::Steal,
            ],
            "coins = {coins}"
        );
    }
}

#[test]
fn assassinate_unlocks_at_three_coins() {
    for coins in 3..7 {
        let actions = seat(coins).legal_actions();
        assert!(actions.contains(&Action::Assassinate), "coins = {coins}");
        assert!(!actions.contains(&Action::Coup), "coins = {coins}");
    }
}

#[test]
fn coup_unlocks_at_seven_coins() {
    for coins in 7..10 {
        let actions = seat(coins).legal_actions();
        assert!(actions.contains(&Action::Assassinate), "coins = {coins}");
        assert!(actions.contains(&Action::Coup), "coins = {coins}");
        assert!(actions.contains(&Action::Income), "coins = {coins}");
    }
}

#[test]
fn coup_is_mandatory_at_ten_coins() {
    for coins in [10, 11, 12] {
        assert_eq!(seat(coins).legal_actions(), vec![Action::Coup], "coins = {coins}");
    }
}

#[test]
fn lose_card_takes_the_requested_slot() {
    let mut player = seat(2);
    let lost = player.lose_card(HandSlot::B).expect("lose");
    assert_eq!(lost, Role::Contessa);
    assert_eq!(player.slot(HandSlot::A), Some(Role::Duke));
    assert_eq!(player.slot(HandSlot::B), None);
    assert_eq!(player.num_cards(), 1);
    assert!(player.is_alive());
}

#[test]
fn lose_card_falls_back_to_lowest_living_slot() {
    let mut player = seat(2);
    player.lose_card(HandSlot::A).expect("first loss");
    // Slot A is empty now; asking for it again must cost slot B instead.
    let lost = player.lose_card(HandSlot::A).expect("second loss");
    assert_eq!(lost, Role::Contessa);
    assert_eq!(player.num_cards(), 0);
    assert!(!player.is_alive());
}

#[test]
fn lose_card_with_empty_hand_errors() {
    let mut player = seat(2);
    player.lose_card(HandSlot::A).expect("first");
    player.lose_card(HandSlot::B).expect("second");
    assert_eq!(
        player.lose_card(HandSlot::A),
        Err(DomainError::NoCardsToLose { player: PlayerId(1) })
    );
}

#[test]
fn living_slots_keep_label_order() {
    let mut player = seat(2);
    assert_eq!(player.living_slots(), vec![HandSlot::A, HandSlot::B]);
    player.lose_card(HandSlot::A).expect("lose");
    assert_eq!(player.living_slots(), vec![HandSlot::B]);
    assert_eq!(player.living_roles(), vec![Role::Contessa]);
}

#[test]
fn holds_sees_both_slots() {
    let player = seat(2);
    assert!(player.holds(Role::Duke));
    assert!(player.holds(Role::Contessa));
    assert!(!player.holds(Role::Captain));
}

#[test]
fn spend_coins_rejects_overdraw() {
    let mut player = seat(2);
    assert_eq!(
        player.spend_coins(3),
        Err(DomainError::InsufficientCoins {
            player: PlayerId(1),
            needed: 3,
            available: 2,
        })
    );
    assert_eq!(player.coins, 2);
    player.spend_coins(2).expect("spend");
    assert_eq!(player.coins, 0);
}

#[test]
fn take_role_empties_the_matching_slot() {
    let mut player = seat(2);
    let slot = player.take_role(Role::Contessa).expect("take");
    assert_eq!(slot, HandSlot::B);
    assert_eq!(player.num_cards(), 1);
    player.put_role(slot, Role::Captain);
    assert_eq!(player.slot(HandSlot::B), Some(Role::Captain));
    assert_eq!(
        player.take_role(Role::Ambassador),
        Err(DomainError::RoleNotHeld {
            player: PlayerId(1),
            role: Role::Ambassador,
        })
    );
}
