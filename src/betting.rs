//! The betting-round state machine: turn order, action application, and
//! completion detection for a single street.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::action::{compute_legal_actions, validate_action, Action, LegalActions};
use crate::chip::{rotate_from, Chip, SeatIndex};
use crate::error::EngineError;
use crate::hand::Phase;
use crate::player::Player;

/// One betting round for a single street. Owns a working copy of the
/// players involved; the orchestrator writes the updated players back into
/// the hand's canonical map after each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    pub name: Phase,
    pub players: HashMap<SeatIndex, Player>,
    pub active_queue: Vec<SeatIndex>,
    pub active_index: usize,
    pub biggest_bet: Chip,
    pub min_raise: Chip,
    pub last_aggressor: Option<SeatIndex>,
    pub has_bet_this_round: bool,
    pub acted: HashSet<SeatIndex>,
    pub is_complete: bool,
}

impl BettingRound {
    /// Builds a round from the given players, starting action at the first
    /// seat at or after `first_to_act` among those who can still act.
    pub fn new(
        name: Phase,
        players: HashMap<SeatIndex, Player>,
        first_to_act: SeatIndex,
        biggest_bet: Chip,
        min_raise: Chip,
    ) -> Self {
        let mut actionable: Vec<SeatIndex> = players
            .values()
            .filter(|p| p.can_act())
            .map(|p| p.seat)
            .collect();
        actionable.sort();
        let active_queue = rotate_from(&actionable, first_to_act);

        let non_folded = players.values().filter(|p| !p.is_folded).count();
        let is_complete = non_folded <= 1 || active_queue.len() <= 1;

        BettingRound {
            name,
            players,
            active_queue,
            active_index: 0,
            biggest_bet,
            min_raise,
            last_aggressor: None,
            has_bet_this_round: biggest_bet.value() > 0,
            acted: HashSet::new(),
            is_complete,
        }
    }

    /// The seat on the clock, if the round isn't finished.
    pub fn active_player(&self) -> Option<SeatIndex> {
        if self.is_complete || self.active_queue.is_empty() {
            return None;
        }
        self.active_queue.get(self.active_index).copied()
    }

    /// Legal actions for the seat currently on the clock.
    pub fn legal_actions_for(&self, seat: SeatIndex) -> Option<LegalActions> {
        let player = self.players.get(&seat)?;
        Some(compute_legal_actions(
            player.chips,
            player.current_bet,
            self.biggest_bet,
            self.min_raise,
            self.has_bet_this_round,
        ))
    }

    fn remove_from_queue(&mut self, seat: SeatIndex) {
        if let Some(pos) = self.active_queue.iter().position(|s| *s == seat) {
            self.active_queue.remove(pos);
            if pos < self.active_index {
                self.active_index -= 1;
            } else if self.active_index >= self.active_queue.len() && !self.active_queue.is_empty()
            {
                self.active_index = 0;
            }
        }
    }

    fn advance_turn(&mut self) {
        if self.active_queue.is_empty() {
            return;
        }
        self.active_index = (self.active_index + 1) % self.active_queue.len();
    }

    /// Applies `action` from `seat`, returning the action actually taken
    /// (identical to the input on success). Fails without modifying `self`
    /// if it isn't `seat`'s turn or the action is illegal.
    pub fn apply_action(&mut self, seat: SeatIndex, action: Action) -> Result<Action, EngineError> {
        let expected = self.active_player().ok_or_else(|| EngineError::InvalidGameState {
            state: "betting_round".to_string(),
            reason: "no active player; round is already complete".to_string(),
        })?;
        if seat != expected {
            return Err(EngineError::NotPlayersTurn {
                seat,
                expected_seat: expected,
            });
        }
        let legal = self.legal_actions_for(seat).ok_or_else(|| EngineError::InvalidGameState {
            state: "betting_round".to_string(),
            reason: format!("seat {seat} has no player record"),
        })?;
        let action = validate_action(&legal, action)?;

        // `remove_from_queue` is only ever called for `seat == active_player`,
        // so removing it already shifts the next seat into `active_index`
        // (or wraps to 0). Track that here so we don't also run
        // `advance_turn` afterwards and skip straight past the next player.
        let mut removed_from_queue = false;

        match action {
            Action::Fold => {
                if let Some(p) = self.players.get_mut(&seat) {
                    p.fold();
                }
                self.remove_from_queue(seat);
                removed_from_queue = true;
            }
            Action::Check => {}
            Action::Call => {
                let current_bet = self.players[&seat].current_bet;
                let gap = self.biggest_bet.checked_sub(current_bet)?;
                let p = self.players.get_mut(&seat).expect("seat validated above");
                p.place_bet(gap)?;
                if p.is_all_in {
                    self.remove_from_queue(seat);
                    removed_from_queue = true;
                }
            }
            Action::Bet(amount) => {
                let p = self.players.get_mut(&seat).expect("seat validated above");
                let current_bet_before = p.current_bet;
                p.place_bet(amount)?;
                self.biggest_bet = current_bet_before + amount;
                self.min_raise = amount;
                self.last_aggressor = Some(seat);
                self.has_bet_this_round = true;
                self.acted.clear();
            }
            Action::Raise(amount) => {
                let current_bet_before = self.players[&seat].current_bet;
                let old_biggest_bet = self.biggest_bet;
                let p = self.players.get_mut(&seat).expect("seat validated above");
                let to_commit = amount.checked_sub(current_bet_before)?;
                p.place_bet(to_commit)?;
                self.biggest_bet = amount;
                self.min_raise = amount.checked_sub(old_biggest_bet)?;
                self.last_aggressor = Some(seat);
                self.acted.clear();
            }
            Action::AllIn => {
                let current_bet_before = self.players[&seat].current_bet;
                let biggest_bet_before = self.biggest_bet;
                let p = self.players.get_mut(&seat).expect("seat validated above");
                let chips_before = p.chips;
                p.place_bet(chips_before)?;
                let total = current_bet_before + chips_before;
                if total > self.biggest_bet {
                    self.biggest_bet = total;
                }
                let increment = total.checked_sub(biggest_bet_before).unwrap_or(Chip::ZERO);
                if increment.value() > 0 && increment >= self.min_raise {
                    self.min_raise = increment;
                }
                self.remove_from_queue(seat);
                removed_from_queue = true;
            }
        }

        self.acted.insert(seat);
        if !removed_from_queue {
            self.advance_turn();
        }

        let non_folded = self.players.values().filter(|p| !p.is_folded).count();
        self.is_complete = non_folded <= 1
            || self.active_queue.is_empty()
            || (!self.active_queue.is_empty()
                && self.active_queue.iter().all(|s| self.acted.contains(s)));

        Ok(action)
    }
}
