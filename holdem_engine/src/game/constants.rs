//! Engine-wide defaults and card counts.

use super::entities::Chips;

/// Big blind used when no per-hand settings are supplied.
pub const DEFAULT_BLIND: Chips = 20;

/// Raises allowed per street before further raise requests become calls.
pub const DEFAULT_RAISE_CAP: u8 = 3;

/// Stack each seat starts a match with.
pub const DEFAULT_STARTING_CHIPS: Chips = 2000;

/// Two hole cards per seat plus five community cards must fit in one deck.
pub const MAX_PLAYERS: usize = 23;

pub const HOLE_CARDS: usize = 2;
pub const FLOP_CARDS: usize = 3;
pub const BOARD_CARDS: usize = 5;
