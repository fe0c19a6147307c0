use std::collections::HashSet;

use axiomind_holdem_core::cards::{full_deck, Card};
use axiomind_holdem_core::chip::{Chip, SeatIndex};
use axiomind_holdem_core::deck::{ChaChaShuffler, Shuffler};
use axiomind_holdem_core::table::{TableConfig, TableState};

fn seat(n: u8) -> SeatIndex {
    SeatIndex::new(n).unwrap()
}

fn config() -> TableConfig {
    TableConfig {
        max_seats: 4,
        small_blind: Chip::new(1),
        big_blind: Chip::new(2),
    }
}

#[test]
fn every_card_dealt_in_a_hand_is_drawn_from_the_52_card_universe_without_repeats() {
    let table = TableState::new(config()).unwrap();
    let table = table.sit_down(seat(0), Chip::new(100)).unwrap();
    let table = table.sit_down(seat(1), Chip::new(100)).unwrap();
    let table = table.sit_down(seat(2), Chip::new(100)).unwrap();

    let mut shuffler = ChaChaShuffler::new(55);
    let table = table.start_next_hand(&mut shuffler).unwrap();
    let hand = table.current_hand.as_ref().unwrap();

    let mut seen: HashSet<Card> = HashSet::new();
    for player in hand.players.values() {
        for card in player.hole_cards.expect("every dealt player has hole cards") {
            assert!(seen.insert(card), "duplicate card dealt: {card}");
        }
    }
    let universe: HashSet<Card> = full_deck().into_iter().collect();
    assert!(seen.iter().all(|c| universe.contains(c)));
}

#[test]
fn identical_seeds_reproduce_an_identical_hand() {
    let build = |seed: u64| {
        let table = TableState::new(config()).unwrap();
        let table = table.sit_down(seat(0), Chip::new(100)).unwrap();
        let table = table.sit_down(seat(1), Chip::new(100)).unwrap();
        let mut shuffler = ChaChaShuffler::new(seed);
        table.start_next_hand(&mut shuffler).unwrap()
    };

    let a = build(777);
    let b = build(777);
    let hand_a = a.current_hand.as_ref().unwrap();
    let hand_b = b.current_hand.as_ref().unwrap();
    assert_eq!(hand_a.players[&seat(0)].hole_cards, hand_b.players[&seat(0)].hole_cards);
    assert_eq!(hand_a.players[&seat(1)].hole_cards, hand_b.players[&seat(1)].hole_cards);
}

#[test]
fn different_seeds_produce_different_shuffles_with_overwhelming_probability() {
    let mut a = ChaChaShuffler::new(1);
    let mut b = ChaChaShuffler::new(2);
    assert_ne!(a.shuffle(), b.shuffle());
}
