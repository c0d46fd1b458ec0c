//! Built-in decision policies.

use enum_dispatch::enum_dispatch;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

use crate::game::entities::{Action, Card, Chips, PlayerView};
use crate::game::functional::{Category, eval, preflop_rank};

/// Chooses an action for the player described by `view`.
///
/// The engine calls this synchronously once per action request and applies
/// the result as-is. A raise past the street's raise cap is turned into a
/// call by the engine, not the policy.
#[enum_dispatch]
pub trait DecisionPolicy {
    fn decide(&mut self, view: &PlayerView, board: &[Card], min_bet: Chips) -> Action;
}

/// The closed set of bots the match runner can seat.
#[enum_dispatch(DecisionPolicy)]
#[derive(Clone, Debug)]
pub enum Strategy {
    DefaultStrategy,
    RandomStrategy,
    ScriptedStrategy,
}

/// Raises with a made hand better than `raise_above`, otherwise calls.
///
/// Before the flop it only has [`preflop_rank`] to go on, which never
/// clears a made-hand threshold, so it calls every preflop decision.
#[derive(Clone, Debug)]
pub struct DefaultStrategy {
    pub raise_above: Category,
}

impl Default for DefaultStrategy {
    fn default() -> Self {
        Self {
            raise_above: Category::Straight,
        }
    }
}

impl DecisionPolicy for DefaultStrategy {
    fn decide(&mut self, view: &PlayerView, board: &[Card], _min_bet: Chips) -> Action {
        let score = if board.is_empty() {
            preflop_rank(&view.cards).category
        } else {
            let cards: Vec<Card> = view.cards.iter().chain(board).copied().collect();
            eval(&cards).map_or(0, |hand| hand.category.score())
        };
        if score > self.raise_above.score() {
            Action::Raise
        } else {
            Action::Call
        }
    }
}

/// Picks uniformly among the four actions.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Seeded, so a match can be replayed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl DecisionPolicy for RandomStrategy {
    fn decide(&mut self, _view: &PlayerView, _board: &[Card], _min_bet: Chips) -> Action {
        match self.rng.random_range(0..4) {
            0 => Action::Fold,
            1 => Action::Call,
            2 => Action::Raise,
            _ => Action::AllIn,
        }
    }
}

/// Replays a fixed list of actions, then calls forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStrategy {
    actions: VecDeque<Action>,
}

impl ScriptedStrategy {
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl DecisionPolicy for ScriptedStrategy {
    fn decide(&mut self, _view: &PlayerView, _board: &[Card], _min_bet: Chips) -> Action {
        self.actions.pop_front().unwrap_or(Action::Call)
    }
}
