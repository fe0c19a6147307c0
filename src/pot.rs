//! The side-pot engine: the min-bet collection sweep that turns per-player
//! `current_bet`s into a main pot plus side pots, and the award algorithm
//! that distributes each pot to its winner(s) at showdown.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::chip::{rotate_from, seat_after, Chip, SeatIndex};
use crate::error::EngineError;
use crate::player::Player;
use crate::rank::HandRank;

/// A layer of chips that only the players in `eligible` can win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: Chip,
    pub eligible: HashSet<SeatIndex>,
}

/// One seat's share of a single pot's award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub seat: SeatIndex,
    pub amount: Chip,
    pub pot_index: usize,
}

/// Runs the standard min-bet sweep over `players`' current bets, merges the
/// result into `existing_pots`, and returns the new pot list alongside a
/// copy of `players` with every `current_bet` zeroed.
///
/// Consecutive freshly-swept pots with identical `eligible` sets are
/// coalesced (this happens when a folded player's own contribution sits
/// below a live bet level, which would otherwise split one pot into two
/// with nothing distinguishing their winners). The result is then merged
/// with `existing_pots` by one further rule: if the last existing pot's
/// `eligible` set equals the first newly-created pot's, their amounts
/// combine; every other new pot is appended in sweep order.
pub fn collect_bets(
    players: &HashMap<SeatIndex, Player>,
    existing_pots: &[Pot],
) -> Result<(Vec<Pot>, HashMap<SeatIndex, Player>), EngineError> {
    let mut working: HashMap<SeatIndex, Player> = players.clone();
    let mut new_pots: Vec<Pot> = Vec::new();

    loop {
        let min_positive = working
            .values()
            .filter(|p| p.current_bet.value() > 0)
            .map(|p| p.current_bet)
            .min();
        let Some(m) = min_positive else { break };

        let eligible: HashSet<SeatIndex> = working
            .values()
            .filter(|p| p.current_bet >= m && !p.is_folded)
            .map(|p| p.seat)
            .collect();

        let mut amount = Chip::ZERO;
        for p in working.values_mut() {
            if p.current_bet.value() > 0 {
                let c = p.current_bet.min(m);
                amount = amount + c;
                let collected = p.collect_bet(c)?;
                debug_assert_eq!(collected, c);
            }
        }

        new_pots.push(Pot { amount, eligible });
    }

    // A folded player's own (smaller) contribution can introduce a bet
    // level with nobody left to contest it once non-folded contributors
    // are excluded from `eligible`; coalesce any run of freshly-swept pots
    // that ended up with the same eligible set rather than surfacing them
    // as separate pots.
    let new_pots = {
        let mut coalesced: Vec<Pot> = Vec::with_capacity(new_pots.len());
        for pot in new_pots {
            match coalesced.last_mut() {
                Some(prev) if prev.eligible == pot.eligible => prev.amount = prev.amount + pot.amount,
                _ => coalesced.push(pot),
            }
        }
        coalesced
    };

    let mut pots: Vec<Pot> = existing_pots.to_vec();
    let mut new_iter = new_pots.into_iter().peekable();
    let merges_with_last = match (pots.last(), new_iter.peek()) {
        (Some(last), Some(first)) => last.eligible == first.eligible,
        _ => false,
    };
    if merges_with_last {
        let first = new_iter.next().expect("peeked Some above");
        let last_index = pots.len() - 1;
        pots[last_index].amount = pots[last_index].amount + first.amount;
    }
    pots.extend(new_iter);

    Ok((pots, working))
}

/// Distributes each pot among its eligible contenders, using
/// `hand_ranks` to decide winners. Pots whose eligible set has no ranked
/// contender (dead money) are skipped, emitting no award.
///
/// Odd chips go to the first seat in the clockwise rotation from `button`
/// through `seat_order` that belongs to the winning set.
pub fn award_pots(
    pots: &[Pot],
    hand_ranks: &HashMap<SeatIndex, HandRank>,
    button: SeatIndex,
    seat_order: &[SeatIndex],
) -> Vec<Award> {
    let clockwise = rotate_from(seat_order, seat_after(seat_order, button));
    let mut awards = Vec::new();

    for (pot_index, pot) in pots.iter().enumerate() {
        let contenders: Vec<SeatIndex> = pot
            .eligible
            .iter()
            .copied()
            .filter(|s| hand_ranks.contains_key(s))
            .collect();
        if contenders.is_empty() {
            continue;
        }
        if contenders.len() == 1 {
            awards.push(Award {
                seat: contenders[0],
                amount: pot.amount,
                pot_index,
            });
            continue;
        }

        let best = contenders
            .iter()
            .map(|s| &hand_ranks[s])
            .max()
            .expect("contenders is non-empty");
        let winners: Vec<SeatIndex> = contenders
            .iter()
            .copied()
            .filter(|s| &hand_ranks[s] == best)
            .collect();

        let share = Chip::new(pot.amount.value() / winners.len() as u32);
        let remainder = pot
            .amount
            .checked_sub(Chip::new(share.value() * winners.len() as u32))
            .unwrap_or(Chip::ZERO);

        let odd_chip_seat = clockwise.iter().find(|s| winners.contains(s)).copied();

        for &seat in &winners {
            let amount = if Some(seat) == odd_chip_seat {
                share + remainder
            } else {
                share
            };
            awards.push(Award {
                seat,
                amount,
                pot_index,
            });
        }
    }

    awards
}
