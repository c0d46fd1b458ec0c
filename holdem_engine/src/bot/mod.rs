//! Decision policies.
//!
//! The engine only ever sees a policy through [`DecisionPolicy::decide`]:
//! the acting player's own view, the board and the bet to match go in, one
//! [`Action`](crate::game::entities::Action) comes out. The bots here are
//! what the match runner seats:
//!
//! - [`DefaultStrategy`]: raise with a made hand better than a straight,
//!   otherwise call
//! - [`RandomStrategy`]: uniform over fold, call, raise and all-in
//! - [`ScriptedStrategy`]: replays a fixed list, then calls
//!
//! ## Example
//!
//! ```
//! use holdem_engine::bot::{DecisionPolicy, ScriptedStrategy, Strategy};
//! use holdem_engine::game::entities::{Action, Player};
//!
//! let mut bot: Strategy = ScriptedStrategy::new([Action::Fold]).into();
//! let view = Player::new("alice", 1000).view();
//! assert_eq!(bot.decide(&view, &[], 20), Action::Fold);
//! ```

pub mod decision;

pub use decision::{DecisionPolicy, DefaultStrategy, RandomStrategy, ScriptedStrategy, Strategy};
