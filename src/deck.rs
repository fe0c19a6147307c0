//! Deterministic shuffling and a pure, immutable deck.
//!
//! The [`Shuffler`] trait is the single source of randomness in the crate;
//! everything downstream of it (drawing, dealing) is a pure function from
//! one [`Deck`] value to the next.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::cards::{full_deck, Card};
use crate::chip::SeatIndex;
use crate::error::EngineError;

/// Produces a uniformly random permutation of the 52-card universe.
/// The only nondeterministic operation in the crate.
pub trait Shuffler {
    fn shuffle(&mut self) -> Vec<Card>;
}

/// A `ChaCha8`-seeded shuffler. Seeding it deterministically makes hands
/// fully reproducible, which is what the end-to-end scenario tests rely on.
#[derive(Debug)]
pub struct ChaChaShuffler {
    rng: ChaCha8Rng,
}

impl ChaChaShuffler {
    pub fn new(seed: u64) -> Self {
        ChaChaShuffler {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for ChaChaShuffler {
    fn shuffle(&mut self) -> Vec<Card> {
        let mut cards = full_deck();
        cards.shuffle(&mut self.rng);
        cards
    }
}

/// An immutable, ordered sequence of the cards remaining to be dealt.
/// Every operation consumes a `Deck` by reference and returns a new one;
/// there is no in-place mutation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn from_shuffle(shuffler: &mut dyn Shuffler) -> Self {
        Deck::new(shuffler.shuffle())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draws the first `n` cards, returning them along with the rest of the
    /// deck. Fails with `DeckExhausted` rather than silently truncating.
    pub fn draw(&self, n: usize) -> Result<(Vec<Card>, Deck), EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let drawn = self.cards[..n].to_vec();
        let rest = Deck::new(self.cards[n..].to_vec());
        Ok((drawn, rest))
    }
}

/// Deals two hole cards to each seat in `seat_order`, sequentially: the
/// first seat gets `deck[0..2]`, the second gets `deck[2..4]`, and so on.
pub fn deal_hole_cards(
    seat_order: &[SeatIndex],
    deck: &Deck,
) -> Result<(HashMap<SeatIndex, [Card; 2]>, Deck), EngineError> {
    let (drawn, rest) = deck.draw(seat_order.len() * 2)?;
    let mut hands = HashMap::with_capacity(seat_order.len());
    for (i, &seat) in seat_order.iter().enumerate() {
        hands.insert(seat, [drawn[i * 2], drawn[i * 2 + 1]]);
    }
    Ok((hands, rest))
}

/// Burns one card, then deals the flop (3 cards).
pub fn deal_flop(deck: &Deck) -> Result<(Card, [Card; 3], Deck), EngineError> {
    let (burned, deck) = deck.draw(1)?;
    let (dealt, rest) = deck.draw(3)?;
    Ok((burned[0], [dealt[0], dealt[1], dealt[2]], rest))
}

/// Burns one card, then deals a single card. Used for the turn and river.
pub fn deal_one(deck: &Deck) -> Result<(Card, Card, Deck), EngineError> {
    let (burned, deck) = deck.draw(1)?;
    let (dealt, rest) = deck.draw(1)?;
    Ok((burned[0], dealt[0], rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(n: u8) -> Vec<SeatIndex> {
        (0..n).map(|s| SeatIndex::new(s).unwrap()).collect()
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_full_deck() {
        let mut shuffler = ChaChaShuffler::new(42);
        let shuffled = shuffler.shuffle();
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, full_deck());
    }

    #[test]
    fn same_seed_produces_same_shuffle() {
        let mut a = ChaChaShuffler::new(7);
        let mut b = ChaChaShuffler::new(7);
        assert_eq!(a.shuffle(), b.shuffle());
    }

    #[test]
    fn deal_hole_cards_assigns_sequential_pairs() {
        let deck = Deck::new(full_deck());
        let order = seats(3);
        let (hands, rest) = deal_hole_cards(&order, &deck).unwrap();
        assert_eq!(hands[&order[0]], [deck.cards()[0], deck.cards()[1]]);
        assert_eq!(hands[&order[1]], [deck.cards()[2], deck.cards()[3]]);
        assert_eq!(hands[&order[2]], [deck.cards()[4], deck.cards()[5]]);
        assert_eq!(rest.len(), 52 - 6);
    }

    #[test]
    fn deal_flop_burns_one_and_deals_three() {
        let deck = Deck::new(full_deck());
        let (burned, flop, rest) = deal_flop(&deck).unwrap();
        assert_eq!(burned, deck.cards()[0]);
        assert_eq!(flop, [deck.cards()[1], deck.cards()[2], deck.cards()[3]]);
        assert_eq!(rest.len(), 52 - 4);
    }

    #[test]
    fn deal_one_burns_one_and_deals_one() {
        let deck = Deck::new(full_deck());
        let (burned, card, rest) = deal_one(&deck).unwrap();
        assert_eq!(burned, deck.cards()[0]);
        assert_eq!(card, deck.cards()[1]);
        assert_eq!(rest.len(), 52 - 2);
    }

    #[test]
    fn draw_past_the_end_is_deck_exhausted() {
        let deck = Deck::new(vec![full_deck()[0]]);
        let err = deck.draw(2).unwrap_err();
        assert!(matches!(err, EngineError::DeckExhausted { requested: 2, remaining: 1 }));
    }
}
