use axiomind_holdem_core::action::{compute_legal_actions, validate_action, Action};
use axiomind_holdem_core::chip::Chip;
use axiomind_holdem_core::error::EngineError;

#[test]
fn a_bet_of_exactly_zero_is_rejected_outside_the_legal_range() {
    let legal = compute_legal_actions(Chip::new(100), Chip::new(0), Chip::new(0), Chip::new(2), false);
    let err = validate_action(&legal, Action::Bet(Chip::ZERO)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));
}

#[test]
fn checking_while_facing_a_live_bet_is_rejected() {
    let legal = compute_legal_actions(Chip::new(100), Chip::new(0), Chip::new(10), Chip::new(2), true);
    let err = validate_action(&legal, Action::Check).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));
}

#[test]
fn calling_with_nothing_to_call_is_rejected_in_favor_of_check() {
    let legal = compute_legal_actions(Chip::new(100), Chip::new(10), Chip::new(10), Chip::new(2), true);
    assert!(legal.call_amount.is_none());
    let err = validate_action(&legal, Action::Call).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));
}

#[test]
fn a_raise_below_the_minimum_increment_is_rejected() {
    let legal = compute_legal_actions(Chip::new(100), Chip::new(2), Chip::new(2), Chip::new(2), true);
    assert_eq!(legal.min_raise, Some(Chip::new(4)));
    let err = validate_action(&legal, Action::Raise(Chip::new(3))).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));
    assert!(validate_action(&legal, Action::Raise(Chip::new(4))).is_ok());
}

#[test]
fn all_in_is_unavailable_once_a_player_has_no_chips() {
    let legal = compute_legal_actions(Chip::ZERO, Chip::new(10), Chip::new(10), Chip::new(2), true);
    assert!(!legal.can_all_in);
    let err = validate_action(&legal, Action::AllIn).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));
}

#[test]
fn fold_is_always_legal_whenever_a_player_holds_any_chips() {
    let legal = compute_legal_actions(Chip::new(1), Chip::new(0), Chip::new(50), Chip::new(10), false);
    assert!(legal.can_fold);
    assert!(validate_action(&legal, Action::Fold).is_ok());
}
