//! # Hold'em Engine
//!
//! A Texas Hold'em betting and settlement engine.
//!
//! The engine evaluates hand strength, drives the four betting streets among
//! any number of seats with fold, call, raise and all-in, and settles the
//! pot at showdown, including side pots built by all-in players with unequal
//! stacks. Everything runs synchronously on one thread; the only outside
//! calls are to a [`DecisionPolicy`](bot::DecisionPolicy) for each action
//! and to a [`CardSource`](game::entities::CardSource) for each card.
//!
//! ## Core Modules
//!
//! - [`game`]: entities, hand evaluator, pot ledger, betting state machine
//!   and settlement
//! - [`bot`]: the decision-policy trait and built-in bots
//!
//! ## Chip Conservation
//!
//! Chips only ever move between stacks and the pot ledger. A hand that
//! fails part way is voided and every committed chip goes back to its
//! owner, so the table total is the same before and after every call to
//! [`play_hand`].
//!
//! ## Example
//!
//! ```
//! use holdem_engine::{
//!     HandSettings, play_hand,
//!     bot::{DefaultStrategy, Strategy},
//!     entities::{Deck, Player},
//! };
//!
//! let mut players = vec![Player::new("alice", 2000), Player::new("bob", 2000)];
//! let mut policies: Vec<Strategy> = vec![
//!     DefaultStrategy::default().into(),
//!     DefaultStrategy::default().into(),
//! ];
//! let mut deck = Deck::default();
//! deck.shuffle();
//!
//! let summary = play_hand(&mut players, &mut policies, 0, &mut deck, &HandSettings::default())?;
//! assert_eq!(summary.stacks.iter().sum::<u32>(), 4000);
//! # Ok::<(), holdem_engine::HandError>(())
//! ```

/// Decision policies and built-in bots.
pub mod bot;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    HandError, HandSummary,
    constants::{self, DEFAULT_BLIND, DEFAULT_RAISE_CAP, MAX_PLAYERS},
    entities::{self, HandSettings, OddChip},
    functional, is_hand_over, play_hand,
};
