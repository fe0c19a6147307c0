//! The `Action` sum type, the `LegalActions` descriptor, and the validator
//! that maps an intended action to either itself or a typed error.

use serde::{Deserialize, Serialize};

use crate::chip::Chip;
use crate::error::EngineError;

/// A player's chosen action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    /// An opening bet of the given (absolute) amount.
    Bet(Chip),
    /// A raise to the given absolute total.
    Raise(Chip),
    AllIn,
}

/// Everything a player may legally do right now, computed from their
/// stack/current bet and the round's biggest bet / min-raise increment.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LegalActions {
    pub can_fold: bool,
    pub can_check: bool,
    pub call_amount: Option<Chip>,
    pub min_bet: Option<Chip>,
    pub max_bet: Option<Chip>,
    pub min_raise: Option<Chip>,
    pub max_raise: Option<Chip>,
    pub can_all_in: bool,
    pub all_in_amount: Chip,
}

impl LegalActions {
    /// True when at least one action is available — invariant 6 from the
    /// spec: whenever a player is on the clock, some action is legal.
    pub fn is_non_empty(&self) -> bool {
        self.can_fold
            || self.can_check
            || self.call_amount.is_some()
            || self.min_bet.is_some()
            || self.min_raise.is_some()
            || self.can_all_in
    }
}

/// Computes the legal-actions descriptor per spec §4.1.
pub fn compute_legal_actions(
    chips: Chip,
    current_bet: Chip,
    biggest_bet: Chip,
    min_raise_increment: Chip,
    has_bet_this_round: bool,
) -> LegalActions {
    let can_check = current_bet >= biggest_bet;

    let call_gap = biggest_bet.checked_sub(current_bet).unwrap_or(Chip::ZERO);
    let call_amount = if call_gap.value() > 0 && chips >= call_gap {
        Some(call_gap)
    } else {
        None
    };

    let (min_bet, max_bet) = if !has_bet_this_round && chips >= min_raise_increment {
        (Some(min_raise_increment), Some(chips))
    } else {
        (None, None)
    };

    let (min_raise, max_raise) = if has_bet_this_round
        && (chips + current_bet) >= (biggest_bet + min_raise_increment)
    {
        (
            Some(biggest_bet + min_raise_increment),
            Some(chips + current_bet),
        )
    } else {
        (None, None)
    };

    LegalActions {
        can_fold: true,
        can_check,
        call_amount,
        min_bet,
        max_bet,
        min_raise,
        max_raise,
        can_all_in: chips.value() > 0,
        all_in_amount: chips,
    }
}

/// Validates an intended action against the legal-actions descriptor,
/// returning the same action back or a typed `InvalidAction` error.
pub fn validate_action(legal: &LegalActions, action: Action) -> Result<Action, EngineError> {
    match action {
        Action::Fold => {
            if legal.can_fold {
                Ok(action)
            } else {
                Err(EngineError::InvalidAction {
                    action,
                    reason: "fold is not available".to_string(),
                })
            }
        }
        Action::Check => {
            if legal.can_check {
                Ok(action)
            } else {
                Err(EngineError::InvalidAction {
                    action,
                    reason: "cannot check while facing a bet".to_string(),
                })
            }
        }
        Action::Call => {
            if legal.call_amount.is_some() {
                Ok(action)
            } else {
                Err(EngineError::InvalidAction {
                    action,
                    reason: "no call is available (use AllIn for an under-stack call)"
                        .to_string(),
                })
            }
        }
        Action::Bet(amount) => match (legal.min_bet, legal.max_bet) {
            (Some(min), Some(max)) if amount >= min && amount <= max => Ok(action),
            _ => Err(EngineError::InvalidAction {
                action,
                reason: "bet amount is outside the legal range".to_string(),
            }),
        },
        Action::Raise(amount) => match (legal.min_raise, legal.max_raise) {
            (Some(min), Some(max)) if amount >= min && amount <= max => Ok(action),
            _ => Err(EngineError::InvalidAction {
                action,
                reason: "raise amount is outside the legal range".to_string(),
            }),
        },
        Action::AllIn => {
            if legal.can_all_in {
                Ok(action)
            } else {
                Err(EngineError::InvalidAction {
                    action,
                    reason: "no chips left to push all-in".to_string(),
                })
            }
        }
    }
}
