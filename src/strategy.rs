//! The decision-agent interface consumed by the game loop, plus a couple of
//! built-in strategies useful for smoke tests and simulations.

use crate::action::{Action, LegalActions};
use crate::cards::Card;
use crate::chip::{Chip, SeatIndex};
use crate::event::GameEvent;
use crate::hand::Phase;

/// Everything a strategy needs to decide its next action: its own view of
/// the hand plus the events that occurred since it last acted.
///
/// Owns its data rather than borrowing, so a context can be handed to a
/// spawned thread by [`crate::game_loop`] when an action timeout is
/// configured.
#[derive(Debug, Clone)]
pub struct StrategyContext {
    pub seat: SeatIndex,
    pub chips: Chip,
    pub hole_cards: Option<[Card; 2]>,
    pub is_button: bool,
    pub phase: Phase,
    pub community: Vec<Card>,
    pub pot_total: Chip,
    pub legal_actions: LegalActions,
    pub events_since_last_turn: Vec<GameEvent>,
}

/// A pluggable decision agent. Implementors choose an `Action` given a
/// [`StrategyContext`]; the game loop is responsible for validating it and
/// falling back to `default_action` if it turns out to be illegal.
pub trait Strategy: Send {
    fn decide(&mut self, context: &StrategyContext) -> Action;

    fn name(&self) -> &str {
        "Strategy"
    }
}

/// Always folds when possible to, otherwise checks. Useful as a cheap
/// opponent for timing and termination tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysFold;

impl Strategy for AlwaysFold {
    fn decide(&mut self, context: &StrategyContext) -> Action {
        if context.legal_actions.can_fold {
            Action::Fold
        } else if context.legal_actions.can_check {
            Action::Check
        } else {
            Action::AllIn
        }
    }

    fn name(&self) -> &str {
        "AlwaysFold"
    }
}

/// Never bets or raises: checks when free, calls when facing a bet it can
/// afford, folds otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passive;

impl Strategy for Passive {
    fn decide(&mut self, context: &StrategyContext) -> Action {
        let legal = &context.legal_actions;
        if legal.can_check {
            Action::Check
        } else if legal.call_amount.is_some() {
            Action::Call
        } else {
            Action::Fold
        }
    }

    fn name(&self) -> &str {
        "Passive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal_with(can_fold: bool, can_check: bool, call_amount: Option<Chip>) -> LegalActions {
        LegalActions {
            can_fold,
            can_check,
            call_amount,
            min_bet: None,
            max_bet: None,
            min_raise: None,
            max_raise: None,
            can_all_in: true,
            all_in_amount: Chip::new(100),
        }
    }

    fn context(legal: LegalActions) -> StrategyContext {
        StrategyContext {
            seat: SeatIndex::new(0).unwrap(),
            chips: Chip::new(100),
            hole_cards: None,
            is_button: false,
            phase: Phase::Preflop,
            community: Vec::new(),
            pot_total: Chip::ZERO,
            legal_actions: legal,
            events_since_last_turn: Vec::new(),
        }
    }

    #[test]
    fn always_fold_folds_whenever_it_can() {
        let mut strategy = AlwaysFold;
        let ctx = context(legal_with(true, false, Some(Chip::new(10))));
        assert_eq!(strategy.decide(&ctx), Action::Fold);
    }

    #[test]
    fn passive_checks_before_calling_and_never_raises() {
        let mut strategy = Passive;
        let ctx = context(legal_with(true, true, None));
        assert_eq!(strategy.decide(&ctx), Action::Check);

        let ctx = context(legal_with(true, false, Some(Chip::new(10))));
        assert_eq!(strategy.decide(&ctx), Action::Call);

        let ctx = context(legal_with(true, false, None));
        assert_eq!(strategy.decide(&ctx), Action::Fold);
    }
}
