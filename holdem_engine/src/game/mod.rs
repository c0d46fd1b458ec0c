//! Hold'em engine: cards, hand evaluation, betting and settlement.
//!
//! - [`entities`]: cards, deck, players, actions, per-hand settings
//! - [`functional`]: hand evaluator
//! - [`pot`]: pot ledger and side-pot resolver
//! - [`state_machine`]: one betting street
//! - [`showdown`]: pot settlement
//! - [`hand`]: a whole hand, blinds to payouts

pub mod constants;
pub mod entities;
pub mod errors;
pub mod functional;
pub mod hand;
pub mod pot;
pub mod showdown;
pub mod state_machine;

pub use errors::HandError;
pub use hand::{HandSummary, is_hand_over, play_hand};
pub use pot::{Pot, PotLedger};
pub use showdown::{Payout, settle};
pub use state_machine::{BettingRound, RoundEnd, RoundState};
