//! Table session: seating, button rotation, and the hand-to-hand bookkeeping
//! that wraps the single-hand lifecycle in [`crate::hand`].

use std::collections::HashMap;

use tracing::{debug, info};

use crate::action::{Action, LegalActions};
use crate::chip::{Chip, SeatIndex};
use crate::error::EngineError;
use crate::event::GameEvent;
use crate::hand::{ForcedBets, HandState, Phase};
use crate::player::Player;
use crate::pot::Pot;
use crate::rank::HandRanker;

/// Table-wide configuration: seat capacity and the forced bets posted at
/// the start of every hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TableConfig {
    pub max_seats: u8,
    pub small_blind: Chip,
    pub big_blind: Chip,
}

/// A seated, multi-hand poker table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub config: TableConfig,
    pub seats: HashMap<SeatIndex, Player>,
    pub button: Option<SeatIndex>,
    pub current_hand: Option<HandState>,
    pub hand_count: u64,
    pub events: Vec<GameEvent>,
}

impl TableState {
    /// Creates an empty table. Fails if `max_seats` is outside `[2, 10]`.
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        if !(2..=10).contains(&config.max_seats) {
            return Err(EngineError::InvalidConfig {
                reason: format!("max_seats must be in [2, 10], got {}", config.max_seats),
            });
        }
        Ok(TableState {
            config,
            seats: HashMap::new(),
            button: None,
            current_hand: None,
            hand_count: 0,
            events: Vec::new(),
        })
    }

    /// Seats a fresh player with `chips` at `seat`.
    pub fn sit_down(&self, seat: SeatIndex, chips: Chip) -> Result<Self, EngineError> {
        if self.seats.contains_key(&seat) {
            return Err(EngineError::SeatOccupied { seat });
        }
        if self.seats.len() >= self.config.max_seats as usize {
            return Err(EngineError::TableFull);
        }
        let mut next = self.clone();
        next.seats.insert(seat, Player::new(seat, chips));
        next.events.push(GameEvent::PlayerSatDown { seat, chips });
        info!(seat = seat.value(), chips = chips.value(), "player sat down");
        Ok(next)
    }

    /// Removes the player at `seat`. Fails while a hand is in progress.
    pub fn stand_up(&self, seat: SeatIndex) -> Result<Self, EngineError> {
        if !self.seats.contains_key(&seat) {
            return Err(EngineError::SeatEmpty { seat });
        }
        if self.current_hand.is_some() {
            return Err(EngineError::HandInProgress);
        }
        let mut next = self.clone();
        next.seats.remove(&seat);
        next.events.push(GameEvent::PlayerStoodUp { seat });
        info!(seat = seat.value(), "player stood up");
        Ok(next)
    }

    /// Starts the next hand: advances the button, clears every eligible
    /// player's per-hand state, and delegates to [`HandState::start`] with a
    /// freshly derived `HandId`, unique within this table's lifetime.
    pub fn start_next_hand(&self, shuffler: &mut dyn crate::deck::Shuffler) -> Result<Self, EngineError> {
        if self.current_hand.is_some() {
            return Err(EngineError::HandInProgress);
        }
        let eligible_count = self.seats.values().filter(|p| p.chips.value() > 0).count();
        if eligible_count < 2 {
            return Err(EngineError::NotEnoughPlayers {
                count: eligible_count,
                min: 2,
            });
        }

        let mut next = self.clone();
        let button = next_button(&next.seats, next.button);
        next.button = button;
        let button = button.expect("eligible_count >= 2 guarantees an occupied seat");

        for player in next.seats.values_mut() {
            player.clear_hand();
        }

        let roster: HashMap<SeatIndex, Player> = next
            .seats
            .iter()
            .filter(|(_, p)| p.chips.value() > 0)
            .map(|(&s, p)| (s, p.clone()))
            .collect();

        let forced_bets = ForcedBets {
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
        };
        let hand_id = format!("hand-{}", next.hand_count + 1);
        let hand = HandState::start(hand_id, roster, button, forced_bets, shuffler)?;
        debug!(button = button.value(), "starting next hand");
        next.hand_count += 1;
        next.current_hand = Some(hand);
        Ok(next)
    }

    /// Applies an action to the in-progress hand, finalizing it (updating
    /// seat chip stacks, pruning busted players) if it completes.
    pub fn act(&self, seat: SeatIndex, action: Action, ranker: &dyn HandRanker) -> Result<Self, EngineError> {
        let hand = self.current_hand.as_ref().ok_or(EngineError::NoHandInProgress)?;
        let updated_hand = hand.apply_action(seat, action, ranker)?;

        let mut next = self.clone();
        if updated_hand.phase == Phase::Complete {
            for (&seat, player) in &updated_hand.players {
                if let Some(table_seat) = next.seats.get_mut(&seat) {
                    table_seat.chips = player.chips;
                }
            }
            next.seats.retain(|_, p| p.chips.value() > 0);
            next.events.extend(updated_hand.events.clone());
            next.current_hand = None;
            info!(hand_id = %updated_hand.hand_id, "hand complete");
        } else {
            next.current_hand = Some(updated_hand);
        }
        Ok(next)
    }

    /// The seat on the clock in the current hand, if any.
    pub fn active_player(&self) -> Option<SeatIndex> {
        self.current_hand.as_ref().and_then(|h| h.active_player())
    }

    /// Legal actions for whichever seat is currently on the clock.
    pub fn legal_actions(&self) -> Option<LegalActions> {
        let hand = self.current_hand.as_ref()?;
        let seat = hand.active_player()?;
        hand.betting_round.as_ref()?.legal_actions_for(seat)
    }

    /// Total chips currently on the table, whether in stacks, in the
    /// current hand's bets, or already swept into pots.
    pub fn total_chips(&self) -> Chip {
        let seated: Chip = self.seats.values().map(|p| p.chips).sum();
        match &self.current_hand {
            Some(hand) => {
                let in_hand: Chip = hand.players.values().map(|p| p.chips).sum();
                let bets: Chip = hand.players.values().map(|p| p.current_bet).sum();
                let pots: Chip = hand.pots.iter().map(|p: &Pot| p.amount).sum();
                seated + in_hand + bets + pots
            }
            None => seated,
        }
    }
}

/// First hand: the smallest occupied seat. Afterwards: the smallest
/// occupied seat strictly greater than `previous`, wrapping to the
/// smallest occupied seat if none exists.
fn next_button(seats: &HashMap<SeatIndex, Player>, previous: Option<SeatIndex>) -> Option<SeatIndex> {
    let mut occupied: Vec<SeatIndex> = seats.keys().copied().collect();
    occupied.sort();
    match previous {
        None => occupied.into_iter().next(),
        Some(prev) => occupied
            .iter()
            .find(|s| **s > prev)
            .or_else(|| occupied.first())
            .copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::ChaChaShuffler;

    fn seat(n: u8) -> SeatIndex {
        SeatIndex::new(n).unwrap()
    }

    fn config() -> TableConfig {
        TableConfig {
            max_seats: 6,
            small_blind: Chip::new(1),
            big_blind: Chip::new(2),
        }
    }

    #[test]
    fn rejects_out_of_range_seat_counts() {
        let bad = TableConfig { max_seats: 1, ..config() };
        assert!(TableState::new(bad).is_err());
        let bad = TableConfig { max_seats: 11, ..config() };
        assert!(TableState::new(bad).is_err());
    }

    #[test]
    fn sit_down_rejects_occupied_seats_and_full_tables() {
        let table = TableState::new(TableConfig { max_seats: 2, ..config() }).unwrap();
        let table = table.sit_down(seat(0), Chip::new(100)).unwrap();
        assert!(matches!(table.sit_down(seat(0), Chip::new(100)), Err(EngineError::SeatOccupied { .. })));
        let table = table.sit_down(seat(1), Chip::new(100)).unwrap();
        assert!(matches!(table.sit_down(seat(2), Chip::new(100)), Err(EngineError::TableFull)));
    }

    #[test]
    fn button_starts_at_the_smallest_seat_then_advances() {
        assert_eq!(next_button(&HashMap::new(), None), None);

        let mut seats = HashMap::new();
        seats.insert(seat(2), Player::new(seat(2), Chip::new(100)));
        seats.insert(seat(5), Player::new(seat(5), Chip::new(100)));
        assert_eq!(next_button(&seats, None), Some(seat(2)));
        assert_eq!(next_button(&seats, Some(seat(2))), Some(seat(5)));
        assert_eq!(next_button(&seats, Some(seat(5))), Some(seat(2)));
    }

    #[test]
    fn start_next_hand_fails_with_too_few_players() {
        let table = TableState::new(config()).unwrap();
        let table = table.sit_down(seat(0), Chip::new(100)).unwrap();
        let mut shuffler = ChaChaShuffler::new(1);
        let err = table.start_next_hand(&mut shuffler).unwrap_err();
        assert!(matches!(err, EngineError::NotEnoughPlayers { .. }));
    }

    #[test]
    fn heads_up_session_conserves_chips_across_a_fold() {
        use crate::rank::SevenCardEvaluator;

        let table = TableState::new(TableConfig { max_seats: 2, ..config() }).unwrap();
        let table = table.sit_down(seat(0), Chip::new(100)).unwrap();
        let table = table.sit_down(seat(1), Chip::new(100)).unwrap();

        let mut shuffler = ChaChaShuffler::new(9);
        let table = table.start_next_hand(&mut shuffler).unwrap();
        assert_eq!(table.button, Some(seat(0)));

        let ranker = SevenCardEvaluator;
        let active = table.active_player().unwrap();
        let table = table.act(active, Action::Fold, &ranker).unwrap();

        assert!(table.current_hand.is_none());
        assert_eq!(table.hand_count, 1);
        let total: u32 = table.seats.values().map(|p| p.chips.value()).sum();
        assert_eq!(total, 200);
    }
}
