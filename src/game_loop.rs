//! The pull-model game loop (spec §4.6): repeatedly queries the active seat,
//! consults a pluggable [`Strategy`] for its decision, applies the result,
//! and stops once a caller-supplied predicate is satisfied.
//!
//! The loop is the only piece of this crate that may suspend: applying an
//! action is a plain synchronous call, but waiting on a `Strategy` is given
//! an optional time budget. On timeout — or when the strategy's choice
//! turns out to be illegal — the loop consults `default_action`, and if
//! that also fails, cascades through `Check`, `Call`, `Fold` in that order.

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::action::{Action, LegalActions};
use crate::chip::SeatIndex;
use crate::deck::Shuffler;
use crate::error::EngineError;
use crate::event::GameEvent;
use crate::rank::HandRanker;
use crate::strategy::{Strategy, StrategyContext};
use crate::table::TableState;

/// Caps and timing knobs for [`GameLoop::run`].
#[derive(Debug, Clone, Copy)]
pub struct GameLoopConfig {
    /// How long to wait for a single `Strategy::decide` call before falling
    /// back to `default_action`. `None` means wait indefinitely.
    pub action_timeout: Option<Duration>,
    /// Safety valve against a runaway hand (e.g. a buggy strategy that
    /// never lets a round close). Spec default: 500.
    pub max_actions_per_hand: u32,
    /// Safety valve against an unbounded session. Spec default: 10,000.
    pub max_hands: u64,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        GameLoopConfig {
            action_timeout: None,
            max_actions_per_hand: 500,
            max_hands: 10_000,
        }
    }
}

/// Stops after `n` hands have been played (`hands_played >= n`).
pub fn after_n_hands(n: u64) -> impl Fn(&TableState, u64) -> bool {
    move |_table, hands_played| hands_played >= n
}

/// Stops once fewer than `min_players` seats hold chips.
pub fn fewer_than(min_players: usize) -> impl Fn(&TableState, u64) -> bool {
    move |table, _hands_played| {
        table.seats.values().filter(|p| p.chips.value() > 0).count() < min_players
    }
}

/// Runs hands against a [`TableState`] until `stop_when` returns true or a
/// safety cap is hit. Holds everything the loop needs between turns: the
/// strategy under test, the fallback it degrades to, the hand ranker, the
/// shuffler, caps/timeouts, and an optional event sink.
pub struct GameLoop<'a> {
    config: GameLoopConfig,
    strategy: Arc<Mutex<Box<dyn Strategy>>>,
    default_action: Box<dyn FnMut(&StrategyContext) -> Action>,
    ranker: &'a dyn HandRanker,
    shuffler: &'a mut dyn Shuffler,
    on_event: Option<Box<dyn FnMut(&GameEvent) + 'a>>,
}

impl<'a> GameLoop<'a> {
    pub fn new(
        config: GameLoopConfig,
        strategy: Box<dyn Strategy>,
        default_action: Box<dyn FnMut(&StrategyContext) -> Action>,
        ranker: &'a dyn HandRanker,
        shuffler: &'a mut dyn Shuffler,
    ) -> Self {
        GameLoop {
            config,
            strategy: Arc::new(Mutex::new(strategy)),
            default_action,
            ranker,
            shuffler,
            on_event: None,
        }
    }

    /// Registers a callback invoked with every event newly appended to the
    /// table's log, in order, as the loop progresses.
    pub fn on_event(&mut self, callback: impl FnMut(&GameEvent) + 'a) {
        self.on_event = Some(Box::new(callback));
    }

    /// Drives `table` forward, hand by hand and action by action, until
    /// `stop_when(&table, hands_played)` is true or a cap is hit. Returns
    /// the final table state; propagates any error other than the ones the
    /// loop itself knows how to recover from.
    pub fn run(
        &mut self,
        mut table: TableState,
        stop_when: impl Fn(&TableState, u64) -> bool,
    ) -> Result<TableState, EngineError> {
        let mut hands_played = 0u64;
        let mut events_emitted = 0usize;

        while !stop_when(&table, hands_played) && hands_played < self.config.max_hands {
            table = match table.start_next_hand(self.shuffler) {
                Ok(next) => next,
                Err(EngineError::NotEnoughPlayers { .. }) => break,
                Err(e) => return Err(e),
            };
            self.emit_new_events(&table, &mut events_emitted);

            let mut seat_last_seen: HashMap<SeatIndex, usize> = HashMap::new();
            let mut actions_taken = 0u32;
            while table.current_hand.is_some() {
                if actions_taken >= self.config.max_actions_per_hand {
                    warn!(actions_taken, "hand exceeded max_actions_per_hand; aborting loop");
                    return Ok(table);
                }
                let Some(seat) = table.active_player() else {
                    break;
                };
                let legal = table
                    .legal_actions()
                    .expect("active_player being Some implies legal_actions is too");

                let hand_events = &table.current_hand.as_ref().expect("checked above").events;
                let since = seat_last_seen.get(&seat).copied().unwrap_or(0);
                let new_since_last_turn = hand_events[since.min(hand_events.len())..].to_vec();
                seat_last_seen.insert(seat, hand_events.len());

                let context = build_context(&table, seat, legal, new_since_last_turn);
                let action = self.decide(&context);
                table = table.act(seat, action, self.ranker)?;
                self.emit_new_events(&table, &mut events_emitted);
                actions_taken += 1;
            }

            hands_played += 1;
        }

        Ok(table)
    }

    /// Events live in `current_hand.events` while a hand is in progress and
    /// move to `table.events` once it completes; this walks the
    /// concatenation of the two so the callback sees every event exactly
    /// once, in order, regardless of which side of that move it's on.
    fn emit_new_events(&mut self, table: &TableState, emitted: &mut usize) {
        let Some(sink) = self.on_event.as_mut() else {
            return;
        };
        let in_hand = table.current_hand.as_ref().map(|h| h.events.as_slice()).unwrap_or(&[]);
        let total = table.events.len() + in_hand.len();
        while *emitted < total {
            let event = if *emitted < table.events.len() {
                &table.events[*emitted]
            } else {
                &in_hand[*emitted - table.events.len()]
            };
            sink(event);
            *emitted += 1;
        }
    }

    /// Consults the strategy (within the configured timeout), then cascades
    /// through `default_action`, `Check`, `Call`, `Fold` until one of them
    /// is legal. `Fold` is always legal per invariant 6, so this terminates.
    fn decide(&mut self, context: &StrategyContext) -> Action {
        let legal = &context.legal_actions;

        if let Some(action) = self.ask_strategy(context) {
            if is_legal(legal, action) {
                return action;
            }
        }

        let fallback = (self.default_action)(context);
        if is_legal(legal, fallback) {
            return fallback;
        }

        if legal.can_check {
            Action::Check
        } else if legal.call_amount.is_some() {
            Action::Call
        } else {
            Action::Fold
        }
    }

    fn ask_strategy(&mut self, context: &StrategyContext) -> Option<Action> {
        match self.config.action_timeout {
            None => {
                let mut guard = self.strategy.lock().unwrap_or_else(|e| e.into_inner());
                Some(guard.decide(context))
            }
            Some(budget) => {
                // The strategy lives behind an `Arc<Mutex<_>>` rather than
                // being borrowed directly: a strategy that blows through its
                // timeout keeps running in a detached thread (we don't join
                // it), so ownership has to survive independently of this
                // call returning. The next turn simply contends for the same
                // lock; it degrades to `default_action` again if the prior
                // call is still holding it, rather than blocking the loop.
                let strategy = Arc::clone(&self.strategy);
                let context = context.clone();
                let (tx, rx) = mpsc::channel();
                thread::spawn(move || {
                    let mut guard = strategy.lock().unwrap_or_else(|e| e.into_inner());
                    let action = guard.decide(&context);
                    let _ = tx.send(action);
                });
                match rx.recv_timeout(budget) {
                    Ok(action) => Some(action),
                    Err(_) => {
                        warn!(seat = context.seat.value(), "strategy exceeded action_timeout");
                        None
                    }
                }
            }
        }
    }
}

fn is_legal(legal: &LegalActions, action: Action) -> bool {
    crate::action::validate_action(legal, action).is_ok()
}

fn build_context(
    table: &TableState,
    seat: SeatIndex,
    legal: LegalActions,
    events_since_last_turn: Vec<GameEvent>,
) -> StrategyContext {
    let hand = table.current_hand.as_ref().expect("caller checked current_hand is Some");
    let player = &hand.players[&seat];
    StrategyContext {
        seat,
        chips: player.chips,
        hole_cards: player.hole_cards,
        is_button: seat == hand.button,
        phase: hand.phase,
        community: hand.community.clone(),
        pot_total: hand.pots.iter().map(|p| p.amount).sum(),
        legal_actions: legal,
        events_since_last_turn,
    }
}
