//! Per-hand player snapshot and the small set of transitions allowed on it
//! (`place_bet`, `fold`, `collect_bet`, `win_chips`, `clear_hand`).

use crate::cards::Card;
use crate::chip::{Chip, SeatIndex};
use crate::error::EngineError;

/// A player's state for the duration of one hand.
///
/// Invariants: `current_bet >= 0` (guaranteed by the `Chip` newtype);
/// `is_all_in` holds iff `chips == 0` and the player has committed chips
/// this hand; a folded player is never eligible for a subsequent pot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    pub seat: SeatIndex,
    pub chips: Chip,
    pub current_bet: Chip,
    pub is_all_in: bool,
    pub is_folded: bool,
    pub hole_cards: Option<[Card; 2]>,
    committed_this_hand: Chip,
}

impl Player {
    pub fn new(seat: SeatIndex, chips: Chip) -> Self {
        Player {
            seat,
            chips,
            current_bet: Chip::ZERO,
            is_all_in: false,
            is_folded: false,
            hole_cards: None,
            committed_this_hand: Chip::ZERO,
        }
    }

    /// Whether this player can still act: not folded, not all-in, and
    /// holding chips.
    pub fn can_act(&self) -> bool {
        !self.is_folded && !self.is_all_in && self.chips.value() > 0
    }

    pub fn give_hole_cards(&mut self, cards: [Card; 2]) {
        self.hole_cards = Some(cards);
    }

    /// Commits `amount` from the stack into `current_bet`. Updates
    /// `is_all_in` if the stack reaches zero.
    pub fn place_bet(&mut self, amount: Chip) -> Result<(), EngineError> {
        self.chips = self.chips.checked_sub(amount)?;
        self.current_bet = self.current_bet + amount;
        self.committed_this_hand = self.committed_this_hand + amount;
        if self.chips.is_zero() && self.committed_this_hand.value() > 0 {
            self.is_all_in = true;
        }
        Ok(())
    }

    pub fn fold(&mut self) {
        self.is_folded = true;
    }

    /// Removes up to `amount` from `current_bet`, returning how much was
    /// actually collected. Used by the pot engine's min-bet sweep.
    pub fn collect_bet(&mut self, amount: Chip) -> Result<Chip, EngineError> {
        let collected = self.current_bet.min(amount);
        self.current_bet = self.current_bet.checked_sub(collected)?;
        Ok(collected)
    }

    pub fn win_chips(&mut self, amount: Chip) {
        self.chips = self.chips + amount;
    }

    /// Resets everything that doesn't survive between hands (bets, folded
    /// flag, all-in flag, hole cards), keeping seat and chip stack.
    pub fn clear_hand(&mut self) {
        self.current_bet = Chip::ZERO;
        self.is_all_in = false;
        self.is_folded = false;
        self.hole_cards = None;
        self.committed_this_hand = Chip::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(n: u8) -> SeatIndex {
        SeatIndex::new(n).unwrap()
    }

    #[test]
    fn place_bet_marks_all_in_when_stack_hits_zero() {
        let mut p = Player::new(seat(0), Chip::new(50));
        p.place_bet(Chip::new(50)).unwrap();
        assert!(p.is_all_in);
        assert_eq!(p.chips, Chip::ZERO);
        assert_eq!(p.current_bet, Chip::new(50));
    }

    #[test]
    fn place_bet_rejects_overcommit() {
        let mut p = Player::new(seat(0), Chip::new(10));
        assert!(p.place_bet(Chip::new(20)).is_err());
    }

    #[test]
    fn clear_hand_resets_but_keeps_chips() {
        let mut p = Player::new(seat(1), Chip::new(100));
        p.place_bet(Chip::new(10)).unwrap();
        p.fold();
        p.clear_hand();
        assert_eq!(p.chips, Chip::new(90));
        assert_eq!(p.current_bet, Chip::ZERO);
        assert!(!p.is_folded);
        assert!(!p.is_all_in);
        assert!(p.hole_cards.is_none());
    }

    #[test]
    fn collect_bet_takes_at_most_current_bet() {
        let mut p = Player::new(seat(2), Chip::new(100));
        p.place_bet(Chip::new(30)).unwrap();
        let collected = p.collect_bet(Chip::new(1000)).unwrap();
        assert_eq!(collected, Chip::new(30));
        assert_eq!(p.current_bet, Chip::ZERO);
    }
}
