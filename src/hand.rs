//! The hand lifecycle orchestrator: deals community cards, opens and closes
//! betting rounds per street, triggers showdown, and applies pot awards.
//! This is the component that ties the betting round, side-pot engine, and
//! hand-ranking oracle together into one coherent state machine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::betting::BettingRound;
use crate::cards::Card;
use crate::chip::{rotate_from, seat_after, Chip, SeatIndex};
use crate::deck::{deal_flop, deal_hole_cards, deal_one, Deck, Shuffler};
use crate::error::EngineError;
use crate::event::GameEvent;
use crate::player::Player;
use crate::pot::{award_pots, collect_bets, Pot};
use crate::rank::HandRanker;

/// A street of a hand. Ordering matters: derived `Ord` gives the
/// monotonicity the orchestrator relies on (phases never go backwards).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

/// The small and big blind amounts posted at the start of every hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ForcedBets {
    pub small_blind: Chip,
    pub big_blind: Chip,
}

/// The full state of one hand in progress, from deal through completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandState {
    pub hand_id: String,
    pub phase: Phase,
    pub players: HashMap<SeatIndex, Player>,
    pub community: Vec<Card>,
    pub deck: Deck,
    pub pots: Vec<Pot>,
    pub betting_round: Option<BettingRound>,
    pub button: SeatIndex,
    pub forced_bets: ForcedBets,
    pub seat_order: Vec<SeatIndex>,
    pub events: Vec<GameEvent>,
}

impl HandState {
    /// Starts a new hand from a roster of non-folded, chip-holding players.
    /// Shuffles, deals hole cards, posts blinds, and opens the preflop
    /// betting round.
    pub fn start(
        hand_id: String,
        players: HashMap<SeatIndex, Player>,
        button: SeatIndex,
        forced_bets: ForcedBets,
        shuffler: &mut dyn Shuffler,
    ) -> Result<HandState, EngineError> {
        let mut seats: Vec<SeatIndex> = players
            .values()
            .filter(|p| !p.is_folded)
            .map(|p| p.seat)
            .collect();
        seats.sort();
        if seats.len() < 2 {
            return Err(EngineError::NotEnoughPlayers {
                count: seats.len(),
                min: 2,
            });
        }
        let seat_order = rotate_from(&seats, button);

        let deck = Deck::from_shuffle(shuffler);
        let (hole_cards, deck) = deal_hole_cards(&seat_order, &deck)?;

        let mut players = players;
        for (&seat, &hole) in &hole_cards {
            players.get_mut(&seat).expect("dealt seat is in roster").give_hole_cards(hole);
        }

        let mut events = vec![GameEvent::HandStarted {
            hand_id: hand_id.clone(),
            button,
            seat_order: seat_order.clone(),
        }];

        let (sb_seat, bb_seat) = if seat_order.len() == 2 {
            (seat_order[0], seat_order[1])
        } else {
            (seat_order[1], seat_order[2])
        };
        post_blind(&mut players, sb_seat, forced_bets.small_blind)?;
        post_blind(&mut players, bb_seat, forced_bets.big_blind)?;
        events.push(GameEvent::BlindsPosted {
            small_blind_seat: sb_seat,
            small_blind: forced_bets.small_blind,
            big_blind_seat: bb_seat,
            big_blind: forced_bets.big_blind,
        });

        for &seat in &seat_order {
            events.push(GameEvent::HoleCardsDealt { seat });
        }

        let first_to_act = if seat_order.len() == 2 {
            seat_order[0]
        } else {
            seat_after(&seat_order, bb_seat)
        };

        let betting_round = BettingRound::new(
            Phase::Preflop,
            players.clone(),
            first_to_act,
            forced_bets.big_blind,
            forced_bets.big_blind,
        );

        Ok(HandState {
            hand_id,
            phase: Phase::Preflop,
            players,
            community: Vec::new(),
            deck,
            pots: Vec::new(),
            betting_round: Some(betting_round),
            button,
            forced_bets,
            seat_order,
            events,
        })
    }

    /// The seat currently on the clock, if any.
    pub fn active_player(&self) -> Option<SeatIndex> {
        self.betting_round.as_ref().and_then(|r| r.active_player())
    }

    /// Applies one player action, auto-advancing through street deals,
    /// showdown, and pot awards whenever the betting round completes.
    pub fn apply_action(
        &self,
        seat: SeatIndex,
        action: Action,
        ranker: &dyn HandRanker,
    ) -> Result<HandState, EngineError> {
        if matches!(self.phase, Phase::Showdown | Phase::Complete) {
            return Err(EngineError::InvalidGameState {
                state: format!("{:?}", self.phase),
                reason: "hand has already reached showdown or completion".to_string(),
            });
        }
        let mut round = self.betting_round.clone().ok_or_else(|| EngineError::InvalidGameState {
            state: format!("{:?}", self.phase),
            reason: "no betting round is in progress".to_string(),
        })?;

        let action_taken = round.apply_action(seat, action)?;

        let mut next = self.clone();
        next.players = round.players.clone();
        next.events.push(GameEvent::PlayerActed {
            seat,
            action: action_taken,
        });

        if round.is_complete {
            next.betting_round = None;
            next.advance_after_round(ranker)
        } else {
            next.betting_round = Some(round);
            Ok(next)
        }
    }

    /// Runs the auto-advance logic (spec §4.3) once a betting round closes:
    /// sweeps bets into pots, then either awards to the last player
    /// standing, deals the next street, or opens showdown.
    fn advance_after_round(mut self, ranker: &dyn HandRanker) -> Result<HandState, EngineError> {
        let (pots, players_after_collect) = collect_bets(&self.players, &self.pots)?;
        self.players = players_after_collect;
        self.pots = pots;
        self.events.push(GameEvent::BettingRoundEnded { phase: self.phase });

        let non_folded: Vec<SeatIndex> = self
            .seat_order
            .iter()
            .copied()
            .filter(|s| !self.players[s].is_folded)
            .collect();

        if non_folded.len() <= 1 {
            let winner = *non_folded.first().ok_or_else(|| EngineError::InvalidGameState {
                state: "hand".to_string(),
                reason: "no players remain to award pots to".to_string(),
            })?;
            for (pot_index, pot) in self.pots.clone().iter().enumerate() {
                self.players.get_mut(&winner).expect("winner is seated").win_chips(pot.amount);
                self.events.push(GameEvent::PotAwarded {
                    seat: winner,
                    amount: pot.amount,
                    pot_index,
                });
            }
            self.events.push(GameEvent::HandEnded);
            self.phase = Phase::Complete;
            return Ok(self);
        }

        loop {
            let next_phase = match self.phase {
                Phase::Preflop => Phase::Flop,
                Phase::Flop => Phase::Turn,
                Phase::Turn => Phase::River,
                Phase::River => Phase::Showdown,
                Phase::Showdown | Phase::Complete => {
                    return Err(EngineError::InvalidGameState {
                        state: format!("{:?}", self.phase),
                        reason: "cannot advance past showdown".to_string(),
                    })
                }
            };

            if next_phase == Phase::Showdown {
                self.phase = Phase::Showdown;
                self.events.push(GameEvent::ShowdownStarted);
                return self.run_showdown(ranker);
            }

            let dealt = match next_phase {
                Phase::Flop => {
                    let (_, flop, rest) = deal_flop(&self.deck)?;
                    self.deck = rest;
                    self.community.extend_from_slice(&flop);
                    flop.to_vec()
                }
                Phase::Turn | Phase::River => {
                    let (_, card, rest) = deal_one(&self.deck)?;
                    self.deck = rest;
                    self.community.push(card);
                    vec![card]
                }
                _ => unreachable!("handled above"),
            };
            self.phase = next_phase;
            self.events.push(GameEvent::CommunityCardsDealt {
                phase: next_phase,
                cards: dealt,
            });

            let clockwise = rotate_from(&self.seat_order, seat_after(&self.seat_order, self.button));
            let first_to_act = clockwise.into_iter().find(|s| self.players[s].can_act());

            match first_to_act {
                Some(seat) => {
                    let round = BettingRound::new(
                        next_phase,
                        self.players.clone(),
                        seat,
                        Chip::ZERO,
                        self.forced_bets.big_blind,
                    );
                    // Fewer than two players can still act this street (the
                    // rest are all-in) — there's nothing to decide, so skip
                    // straight to the next street instead of leaving a
                    // pre-completed round nobody will ever submit an action
                    // against.
                    if round.is_complete {
                        self.events.push(GameEvent::BettingRoundEnded { phase: next_phase });
                        continue;
                    }
                    self.betting_round = Some(round);
                    return Ok(self);
                }
                None => continue,
            }
        }
    }

    fn run_showdown(mut self, ranker: &dyn HandRanker) -> Result<HandState, EngineError> {
        let mut hand_ranks = HashMap::new();
        for &seat in &self.seat_order {
            let player = &self.players[&seat];
            if player.is_folded {
                continue;
            }
            if let Some(hole) = player.hole_cards {
                let mut cards = hole.to_vec();
                cards.extend_from_slice(&self.community);
                hand_ranks.insert(seat, ranker.rank(&cards)?);
            }
        }

        let awards = award_pots(&self.pots, &hand_ranks, self.button, &self.seat_order);
        for award in awards {
            self.players.get_mut(&award.seat).expect("award seat is seated").win_chips(award.amount);
            self.events.push(GameEvent::PotAwarded {
                seat: award.seat,
                amount: award.amount,
                pot_index: award.pot_index,
            });
        }
        self.events.push(GameEvent::HandEnded);
        self.phase = Phase::Complete;
        Ok(self)
    }
}

fn post_blind(players: &mut HashMap<SeatIndex, Player>, seat: SeatIndex, amount: Chip) -> Result<(), EngineError> {
    let player = players.get_mut(&seat).ok_or(EngineError::InvalidGameState {
        state: "post_blind".to_string(),
        reason: format!("seat {seat} is not in the hand"),
    })?;
    let actual = amount.min(player.chips);
    player.place_bet(actual)
}
