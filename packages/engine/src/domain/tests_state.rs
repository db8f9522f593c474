use crate::domain::actions::Action;
use crate::domain::errors::DomainError;
use crate::domain::player::PlayerId;
use crate::domain::roles::{HandSlot, Role, DECK_SIZE};
use crate::domain::state::{GameState, PlayerSetup, TurnPhase};

const A: PlayerId = PlayerId(1);
const B: PlayerId = PlayerId(2);
const C: PlayerId = PlayerId(3);

fn roster(n: u64) -> Vec<(PlayerId, String)> {
    (1..=n).map(|i| (PlayerId(i), format!("Player {i}"))).collect()
}

fn setup_player(id: PlayerId, hand: &[Role], coins: u8) -> PlayerSetup {
    PlayerSetup {
        id,
        name: format!("Player {id}"),
        hand: hand.to_vec(),
        coins,
    }
}

/// Three seats with fully known hands; nine known cards stay in the deck.
fn known_state() -> GameState {
    GameState::with_setup(
        vec![
            setup_player(A, &[Role::Duke, Role::Assassin], 2),
            setup_player(B, &[Role::Captain, Role::Captain], 2),
            setup_player(C, &[Role::Contessa, Role::Ambassador], 2),
        ],
        99,
    )
    .expect("setup")
}

#[test]
fn deal_gives_everyone_two_cards() {
    let mut state = GameState::new(roster(4), 5).expect("new");
    assert_eq!(state.phase(), TurnPhase::Setup);
    state.deal().expect("deal");
    assert_eq!(state.phase(), TurnPhase::AwaitAction);
    assert_eq!(state.current_player(), A);
    assert_eq!(state.deck().len(), DECK_SIZE - 8);
    for seat in state.players() {
        assert_eq!(seat.num_cards(), 2);
        assert_eq!(seat.coins, 2);
    }
    assert!(state.card_accounting_holds());
}

#[test]
fn deal_twice_is_rejected() {
    let mut state = GameState::new(roster(3), 5).expect("new");
    state.deal().expect("deal");
    assert_eq!(state.deal(), Err(DomainError::AlreadyDealt));
}

#[test]
fn roster_size_is_validated() {
    assert_eq!(
        GameState::new(roster(2), 0).err(),
        Some(DomainError::PlayerCount { count: 2 })
    );
    assert_eq!(
        GameState::new(roster(7), 0).err(),
        Some(DomainError::PlayerCount { count: 7 })
    );
    assert!(GameState::new(roster(3), 0).is_ok());
    assert!(GameState::new(roster(6), 0).is_ok());
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut dup = roster(3);
    dup[2].0 = A;
    assert_eq!(
        GameState::new(dup, 0).err(),
        Some(DomainError::DuplicatePlayer { player: A })
    );
}

#[test]
fn setup_deck_is_the_multiset_remainder() {
    let state = known_state();
    assert_eq!(state.phase(), TurnPhase::AwaitAction);
    assert_eq!(state.deck().len(), 9);
    assert_eq!(state.deck().count(Role::Duke), 2);
    assert_eq!(state.deck().count(Role::Assassin), 2);
    assert_eq!(state.deck().count(Role::Captain), 1);
    assert_eq!(state.deck().count(Role::Contessa), 2);
    assert_eq!(state.deck().count(Role::Ambassador), 2);
    assert!(state.card_accounting_holds());
}

#[test]
fn setup_rejects_overused_roles() {
    let result = GameState::with_setup(
        vec![
            setup_player(A, &[Role::Duke, Role::Duke], 2),
            setup_player(B, &[Role::Duke, Role::Duke], 2),
            setup_player(C, &[Role::Contessa], 2),
        ],
        0,
    );
    assert_eq!(result.err(), Some(DomainError::RoleExhausted { role: Role::Duke }));
}

#[test]
fn setup_rejects_empty_hands() {
    let result = GameState::with_setup(
        vec![
            setup_player(A, &[], 2),
            setup_player(B, &[Role::Duke], 2),
            setup_player(C, &[Role::Contessa], 2),
        ],
        0,
    );
    assert_eq!(
        result.err(),
        Some(DomainError::HandSize { player: A, cards: 0 })
    );
}

#[test]
fn steal_is_withheld_when_no_target_has_coins() {
    let mut state = GameState::with_setup(
        vec![
            setup_player(A, &[Role::Duke, Role::Assassin], 2),
            setup_player(B, &[Role::Captain], 0),
            setup_player(C, &[Role::Contessa], 0),
        ],
        1,
    )
    .expect("setup");
    let offered = state.offered_actions(A).expect("offered");
    assert!(!offered.contains(&Action::Steal));
    assert!(offered.contains(&Action::Income));

    state.grant_coins(B, 1).expect("grant");
    let offered = state.offered_actions(A).expect("offered");
    assert!(offered.contains(&Action::Steal));
}

#[test]
fn mandatory_coup_is_the_only_offer_at_ten_coins() {
    let mut state = known_state();
    state.grant_coins(A, 8).expect("grant");
    assert_eq!(state.offered_actions(A).expect("offered"), vec![Action::Coup]);
}

#[test]
fn steal_targets_exclude_self_broke_and_dead() {
    let mut state = known_state();
    assert_eq!(state.eligible_targets(A, Action::Steal), vec![B, C]);

    // C is broke: no longer worth stealing from, still coup-able.
    state.steal_transfer(A, C).expect("steal");
    assert_eq!(state.eligible_targets(A, Action::Steal), vec![B]);
    assert_eq!(state.eligible_targets(A, Action::Coup), vec![B, C]);

    // B is dead: out of every target list.
    state.lose_card(B, HandSlot::A).expect("lose");
    state.lose_card(B, HandSlot::B).expect("lose");
    assert_eq!(state.eligible_targets(A, Action::Steal), vec![]);
    assert_eq!(state.eligible_targets(A, Action::Coup), vec![C]);
}

#[test]
fn blocker_eligibility_follows_scope() {
    let mut state = known_state();
    assert_eq!(state.eligible_blockers(A, Action::ForeignAid, None), vec![B, C]);
    assert_eq!(
        state.eligible_blockers(A, Action::Steal, Some(B)),
        vec![B]
    );
    assert_eq!(state.eligible_blockers(A, Action::Income, None), vec![]);

    state.lose_card(B, HandSlot::A).expect("lose");
    state.lose_card(B, HandSlot::B).expect("lose");
    assert_eq!(state.eligible_blockers(A, Action::Steal, Some(B)), vec![]);
    assert_eq!(state.eligible_blockers(A, Action::ForeignAid, None), vec![C]);
}

#[test]
fn validate_action_covers_the_error_table() {
    let mut state = known_state();
    assert_eq!(
        state.validate_action(A, Action::Assassinate, Some(B)),
        Err(DomainError::ActionNotLegal {
            player: A,
            action: Action::Assassinate,
        })
    );
    state.grant_coins(A, 5).expect("grant");
    assert_eq!(
        state.validate_action(A, Action::Coup, None),
        Err(DomainError::TargetRequired { action: Action::Coup })
    );
    assert_eq!(
        state.validate_action(A, Action::Coup, Some(A)),
        Err(DomainError::TargetInvalid {
            action: Action::Coup,
            target: A,
        })
    );
    assert_eq!(
        state.validate_action(A, Action::Income, Some(B)),
        Err(DomainError::TargetInvalid {
            action: Action::Income,
            target: B,
        })
    );
    assert!(state.validate_action(A, Action::Coup, Some(B)).is_ok());
    assert!(state.validate_action(A, Action::Income, None).is_ok());
}

#[test]
fn lost_cards_land_face_up_on_the_discard_pile() {
    let mut state = known_state();
    let lost = state.lose_card(B, HandSlot::A).expect("lose");
    assert_eq!(lost, Role::Captain);
    assert_eq!(state.discards(), &[Role::Captain]);
    assert!(state.card_accounting_holds());
}

#[test]
fn swap_revealed_keeps_hand_size_and_accounting() {
    let mut state = known_state();
    let deck_before = state.deck().len();
    state.swap_revealed(A, Role::Duke).expect("swap");
    assert_eq!(state.deck().len(), deck_before);
    assert_eq!(state.player(A).expect("player").num_cards(), 2);
    assert!(state.card_accounting_holds());
}

#[test]
fn swap_revealed_requires_the_role() {
    let mut state = known_state();
    assert_eq!(
        state.swap_revealed(A, Role::Contessa),
        Err(DomainError::RoleNotHeld {
            player: A,
            role: Role::Contessa,
        })
    );
}

#[test]
fn steal_transfer_caps_at_two() {
    let mut state = known_state();
    let amount = state.steal_transfer(A, B).expect("steal");
    assert_eq!(amount, 2);
    assert_eq!(state.player(A).expect("player").coins, 4);
    assert_eq!(state.player(B).expect("player").coins, 0);
}

#[test]
fn steal_transfer_takes_what_is_there() {
    let mut state = known_state();
    state.steal_transfer(A, B).expect("drain");
    state.grant_coins(B, 1).expect("grant");
    let amount = state.steal_transfer(C, B).expect("steal");
    assert_eq!(amount, 1);
    assert_eq!(state.player(B).expect("player").coins, 0);
    assert_eq!(state.player(C).expect("player").coins, 3);

    let amount = state.steal_transfer(C, B).expect("steal from broke");
    assert_eq!(amount, 0);
    assert_eq!(state.player(C).expect("player").coins, 3);
}

#[test]
fn advance_turn_skips_dead_seats_and_wraps() {
    let mut state = known_state();
    assert_eq!(state.advance_turn(A).expect("advance"), B);

    state.lose_card(B, HandSlot::A).expect("lose");
    state.lose_card(B, HandSlot::B).expect("lose");
    assert_eq!(state.advance_turn(A).expect("advance"), C);
    assert_eq!(state.advance_turn(C).expect("advance"), A);
    assert_eq!(state.phase(), TurnPhase::AwaitAction);
}

#[test]
fn victory_is_declared_for_a_single_survivor() {
    let mut state = known_state();
    assert_eq!(state.check_victory(), None);

    state.lose_card(B, HandSlot::A).expect("lose");
    state.lose_card(B, HandSlot::B).expect("lose");
    assert_eq!(state.check_victory(), None);

    state.lose_card(C, HandSlot::A).expect("lose");
    state.lose_card(C, HandSlot::B).expect("lose");
    assert_eq!(state.check_victory(), Some(A));
    assert_eq!(state.winner(), Some(A));
    assert_eq!(state.phase(), TurnPhase::GameOver);
}

#[test]
fn exchange_draw_and_apply_preserve_accounting() {
    let mut state = known_state();
    let hand = state.player(A).expect("player").living_roles();
    let drawn = state.draw_exchange_cards().expect("draw");
    assert_eq!(state.deck().len(), 7);

    // Keep the two drawn cards, return the original hand.
    state.apply_exchange(A, &drawn, hand).expect("apply");
    assert_eq!(state.deck().len(), 9);
    assert_eq!(state.player(A).expect("player").living_roles(), drawn.to_vec());
    assert!(state.card_accounting_holds());
}

#[test]
fn announcement_costs_are_charged_up_front() {
    let mut state = known_state();
    state.grant_coins(A, 1).expect("grant");
    state.pay_cost(A, Action::Assassinate).expect("pay");
    assert_eq!(state.player(A).expect("player").coins, 0);
    assert_eq!(
        state.pay_cost(A, Action::Coup),
        Err(DomainError::InsufficientCoins {
            player: A,
            needed: 7,
            available: 0,
        })
    );
    // Free actions charge nothing.
    state.pay_cost(A, Action::Income).expect("pay");
    assert_eq!(state.player(A).expect("player").coins, 0);
}

#[test]
fn snapshot_hides_hands_and_shows_the_table() {
    let mut state = known_state();
    state.lose_card(C, HandSlot::A).expect("lose");
    let snapshot = state.snapshot();
    assert_eq!(snapshot.phase, TurnPhase::AwaitAction);
    assert_eq!(snapshot.current_player, Some(A));
    assert_eq!(snapshot.deck_size, 9);
    assert_eq!(snapshot.discards, vec![Role::Contessa]);
    assert_eq!(snapshot.players.len(), 3);
    assert_eq!(snapshot.players[2].influence, 1);
    assert!(snapshot.players[2].alive);

    let hand = state.hand_view(A).expect("hand");
    assert_eq!(hand.slots, [Some(Role::Duke), Some(Role::Assassin)]);
    let hand = state.hand_view(C).expect("hand");
    assert_eq!(hand.slots, [None, Some(Role::Ambassador)]);
}
