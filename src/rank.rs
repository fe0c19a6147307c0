//! The hand-ranking oracle. The betting and pot engines only need a total
//! order over `HandRank`; this module supplies one concrete implementation
//! (`SevenCardEvaluator`) behind the `HandRanker` trait so it can be swapped
//! or mocked without touching the showdown code in [`crate::hand`].

use std::cmp::Ordering;

use crate::cards::{Card, Rank, Suit};
use crate::error::EngineError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// The totally ordered result of ranking a hand. Higher `rank` beats lower;
/// ties occur iff `rank` values are equal.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandRank {
    pub rank: u32,
    pub name: String,
    pub description: String,
    pub best_five: [Card; 5],
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks a set of 5 to 7 cards, returning the best 5-card hand among them.
pub trait HandRanker {
    fn rank(&self, cards: &[Card]) -> Result<HandRank, EngineError>;
}

/// Evaluates the best 5-card hand from 5 to 7 cards by brute-force
/// combination search, which is cheap enough at these sizes (at most 21
/// combinations for 7 cards).
#[derive(Debug, Default, Clone, Copy)]
pub struct SevenCardEvaluator;

impl HandRanker for SevenCardEvaluator {
    fn rank(&self, cards: &[Card]) -> Result<HandRank, EngineError> {
        if !(5..=7).contains(&cards.len()) {
            return Err(EngineError::InvalidGameState {
                state: "hand_rank".to_string(),
                reason: format!("expected 5 to 7 cards, got {}", cards.len()),
            });
        }
        let mut best: Option<(Category, [u8; 5], [Card; 5])> = None;
        for combo in five_card_combinations(cards) {
            let (category, kickers) = evaluate_five(&combo);
            let better = match &best {
                None => true,
                Some((bc, bk, _)) => (category, kickers) > (*bc, *bk),
            };
            if better {
                best = Some((category, kickers, combo));
            }
        }
        let (category, kickers, best_five) = best.expect("cards.len() >= 5 guarantees one combination");
        let rank = (category as u32) << 20
            | (kickers[0] as u32) << 16
            | (kickers[1] as u32) << 12
            | (kickers[2] as u32) << 8
            | (kickers[3] as u32) << 4
            | (kickers[4] as u32);
        Ok(HandRank {
            rank,
            name: category.name().to_string(),
            description: describe(category, &kickers),
            best_five,
        })
    }
}

fn describe(category: Category, kickers: &[u8; 5]) -> String {
    let rank_name = |v: u8| Rank::from_u8(v).map(|r| r.to_string()).unwrap_or_default();
    match category {
        Category::HighCard => format!("{} high", rank_name(kickers[0])),
        Category::OnePair => format!("pair of {}s", rank_name(kickers[0])),
        Category::TwoPair => format!("{}s and {}s", rank_name(kickers[0]), rank_name(kickers[1])),
        Category::ThreeOfAKind => format!("three of a kind, {}s", rank_name(kickers[0])),
        Category::Straight => format!("straight, {} high", rank_name(kickers[0])),
        Category::Flush => format!("flush, {} high", rank_name(kickers[0])),
        Category::FullHouse => format!("full house, {}s full of {}s", rank_name(kickers[0]), rank_name(kickers[1])),
        Category::FourOfAKind => format!("four of a kind, {}s", rank_name(kickers[0])),
        Category::StraightFlush => format!("straight flush, {} high", rank_name(kickers[0])),
    }
}

fn five_card_combinations(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut combos = Vec::new();
    let mut idx = [0usize; 5];
    fn choose(n: usize, k: usize, start: usize, idx: &mut [usize; 5], depth: usize, out: &mut Vec<[usize; 5]>) {
        if depth == k {
            out.push(*idx);
            return;
        }
        for i in start..n {
            idx[depth] = i;
            choose(n, k, i + 1, idx, depth + 1, out);
        }
    }
    let mut index_sets = Vec::new();
    choose(n, 5, 0, &mut idx, 0, &mut index_sets);
    for set in index_sets {
        combos.push([cards[set[0]], cards[set[1]], cards[set[2]], cards[set[3]], cards[set[4]]]);
    }
    combos
}

fn evaluate_five(cards: &[Card; 5]) -> (Category, [u8; 5]) {
    let mut rank_counts = [0u8; 15];
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s].push(r);
    }

    let flush_suit = suit_counts.iter().position(|&count| count == 5);

    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable();
        if let Some(high) = straight_high(&ranks) {
            return (Category::StraightFlush, [high, 0, 0, 0, 0]);
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return (Category::FourOfAKind, [quad, kicker, 0, 0, 0]);
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return (Category::FullHouse, [trip, pair, 0, 0, 0]);
    }

    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return (Category::Flush, k);
    }

    let mut uniq: Vec<u8> = (2..=14).filter(|&r| rank_counts[r as usize] > 0).collect();
    uniq.sort_unstable();
    if let Some(high) = straight_high(&uniq) {
        return (Category::Straight, [high, 0, 0, 0, 0]);
    }

    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        let mut remain: Vec<u8> = pairs.iter().chain(singles.iter()).copied().collect();
        remain.sort_unstable_by(|a, b| b.cmp(a));
        return (
            Category::ThreeOfAKind,
            [t, *remain.first().unwrap_or(&0), *remain.get(1).unwrap_or(&0), 0, 0],
        );
    }
    if pairs.len() >= 2 {
        let high = pairs[0];
        let low = pairs[1];
        let kicker = *singles.first().unwrap_or(&0);
        return (Category::TwoPair, [high, low, kicker, 0, 0]);
    }
    if let Some(&p) = pairs.first() {
        let mut rest = singles.clone();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [p, 0, 0, 0, 0];
        for i in 0..3 {
            k[i + 1] = *rest.get(i).unwrap_or(&0);
        }
        return (Category::OnePair, k);
    }

    let mut highs = singles.clone();
    highs.sort_unstable_by(|a, b| b.cmp(a));
    let mut k = [0u8; 5];
    for (i, slot) in k.iter_mut().enumerate() {
        *slot = *highs.get(i).unwrap_or(&0);
    }
    (Category::HighCard, k)
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Ranks are already sorted ascending and deduplicated-by-construction
/// (five distinct cards of one suit can't repeat a rank). Treats the wheel
/// (A-2-3-4-5) as a straight with high card 5.
fn straight_high(sorted_ranks: &[u8]) -> Option<u8> {
    if sorted_ranks.len() != 5 {
        return None;
    }
    if sorted_ranks == [2, 3, 4, 5, 14] {
        return Some(5);
    }
    for window in sorted_ranks.windows(2) {
        if window[1] != window[0] + 1 {
            return None;
        }
    }
    Some(sorted_ranks[4])
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14).rev().find(|&r| r != quad && rank_counts[r as usize] > 0)?;
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips = vec![];
    let mut pairs = vec![];
    for r in (2..=14).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r as u8),
            2 => pairs.push(r as u8),
            _ => {}
        }
    }
    if trips.is_empty() {
        return None;
    }
    if trips.len() >= 2 {
        return Some((trips[0], trips[1]));
    }
    pairs.first().map(|&p| (trips[0], p))
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r as u8),
            2 => pairs.push(r as u8),
            1 => singles.push(r as u8),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(notation: &str) -> Card {
        Card::from_str_notation(notation).unwrap()
    }

    #[test]
    fn recognizes_straight_flush() {
        let cards = [c("9h"), c("8h"), c("7h"), c("6h"), c("5h"), c("2c"), c("3d")];
        let hr = SevenCardEvaluator.rank(&cards).unwrap();
        assert_eq!(hr.name, "Straight Flush");
    }

    #[test]
    fn wheel_straight_ranks_as_five_high() {
        let cards = [c("Ah"), c("2d"), c("3c"), c("4s"), c("5h"), c("9c"), c("Kd")];
        let hr = SevenCardEvaluator.rank(&cards).unwrap();
        assert_eq!(hr.name, "Straight");
        assert_eq!(hr.best_five.iter().map(|c| c.rank.value()).max(), Some(14));
    }

    #[test]
    fn quads_beats_full_house() {
        let quads = [c("Ac"), c("Ad"), c("Ah"), c("As"), c("Kc"), c("Qd"), c("2h")];
        let full_house = [c("Kc"), c("Kd"), c("Kh"), c("Qc"), c("Qd"), c("2h"), c("3s")];
        let a = SevenCardEvaluator.rank(&quads).unwrap();
        let b = SevenCardEvaluator.rank(&full_house).unwrap();
        assert!(a > b);
    }

    #[test]
    fn pair_of_aces_kickers_are_in_descending_order() {
        let cards = [c("Ah"), c("As"), c("Kc"), c("Qd"), c("Jh"), c("9c"), c("2d")];
        let hr = SevenCardEvaluator.rank(&cards).unwrap();
        assert_eq!(hr.name, "One Pair");
    }

    #[test]
    fn rejects_wrong_card_counts() {
        let cards = [c("Ah"), c("Ks"), c("Qc"), c("Jd")];
        assert!(SevenCardEvaluator.rank(&cards).is_err());
    }
}
