//! # axiomind-holdem-core
//!
//! A deterministic, pure, event-sourced Texas Hold'em hand engine. The
//! crate shuffles a deck, posts blinds, deals hole and community cards,
//! sequences betting rounds, computes side pots on all-in, evaluates hands
//! at showdown, and distributes chip awards — all as a sequence of value
//! transitions with no mutable global state, composed under a multi-hand
//! [`table`] session and driven, optionally, by the pull-model [`game_loop`].
//!
//! ## Core modules
//!
//! - [`chip`] — `Chip`/`SeatIndex` newtypes and seat-rotation helpers.
//! - [`cards`] — `Card`, `Rank`, `Suit`, and the 52-card universe.
//! - [`deck`] — the `Shuffler` trait, a `ChaCha8`-seeded implementation, and
//!   the pure deal/burn operations.
//! - [`player`] — the per-hand `Player` snapshot and its transitions.
//! - [`action`] — the `Action` sum type, `LegalActions`, and validation.
//! - [`pot`] — the side-pot collection sweep and the award algorithm.
//! - [`betting`] — the `BettingRound` turn-order state machine.
//! - [`hand`] — `HandState`, the lifecycle orchestrator tying the above
//!   together from deal through showdown.
//! - [`rank`] — the `HandRanker` trait and a concrete 7-card evaluator.
//! - [`table`] — `TableState`: seating, button rotation, multi-hand bookkeeping.
//! - [`strategy`] — the `Strategy` decision-agent interface plus two
//!   built-in strategies.
//! - [`game_loop`] — the pull-model driver that runs a `Strategy` against a
//!   table until a stop condition is met.
//! - [`event`] — the append-only `GameEvent` log.
//! - [`error`] — the closed `EngineError` sum every fallible operation returns.
//!
//! ## Quick start
//!
//! ```rust
//! use axiomind_holdem_core::action::Action;
//! use axiomind_holdem_core::chip::{Chip, SeatIndex};
//! use axiomind_holdem_core::deck::ChaChaShuffler;
//! use axiomind_holdem_core::rank::SevenCardEvaluator;
//! use axiomind_holdem_core::table::{TableConfig, TableState};
//!
//! let table = TableState::new(TableConfig {
//!     max_seats: 6,
//!     small_blind: Chip::new(1),
//!     big_blind: Chip::new(2),
//! })
//! .unwrap();
//! let table = table.sit_down(SeatIndex::new(0).unwrap(), Chip::new(100)).unwrap();
//! let table = table.sit_down(SeatIndex::new(1).unwrap(), Chip::new(100)).unwrap();
//!
//! let mut shuffler = ChaChaShuffler::new(42);
//! let table = table.start_next_hand(&mut shuffler).unwrap();
//!
//! let ranker = SevenCardEvaluator;
//! let active = table.active_player().unwrap();
//! let table = table.act(active, Action::Fold, &ranker).unwrap();
//! assert!(table.current_hand.is_none());
//! ```
//!
//! ## Determinism
//!
//! The only nondeterministic operation in the crate is [`deck::Shuffler`].
//! Seeding it deterministically (see [`deck::ChaChaShuffler::new`]) makes
//! every downstream transition, and therefore every full hand, reproducible.

pub mod action;
pub mod betting;
pub mod cards;
pub mod chip;
pub mod deck;
pub mod error;
pub mod event;
pub mod game_loop;
pub mod hand;
pub mod player;
pub mod pot;
pub mod rank;
pub mod strategy;
pub mod table;
