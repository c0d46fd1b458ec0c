//! Match loop: rotates the button, escalates blinds and plays hands until one
//! player holds every chip or the hand limit is reached.

use holdem_engine::{
    HandSummary, is_hand_over,
    bot::{DefaultStrategy, RandomStrategy, Strategy},
    entities::{Chips, Deck, Player, SeatIndex},
    play_hand,
};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::config::{MatchConfig, StrategyMix};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub name: String,
    pub chips: Chips,
}

/// Final result of a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchReport {
    pub hands_played: usize,
    pub hands_voided: usize,
    pub final_blind: Chips,
    /// Set once a single player holds every chip.
    pub winner: Option<String>,
    pub standings: Vec<Standing>,
}

pub struct MatchRunner {
    config: MatchConfig,
    players: Vec<Player>,
    policies: Vec<Strategy>,
    rng: StdRng,
    dealer: SeatIndex,
    blind: Chips,
    hands_played: usize,
    hands_voided: usize,
}

impl MatchRunner {
    /// Seats `config.players` bots with `config.starting_chips` each. The
    /// deck, the random bots and the first button all draw from one RNG, so
    /// a seeded match replays exactly.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let players = (0..config.players)
            .map(|i| Player::new(format!("bot{i}"), config.starting_chips))
            .collect();
        let policies = (0..config.players)
            .map(|i| seat_policy(config.strategy, i, &mut rng))
            .collect();
        let dealer = rng.random_range(0..config.players);

        Self {
            blind: config.blind,
            config,
            players,
            policies,
            rng,
            dealer,
            hands_played: 0,
            hands_voided: 0,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        is_hand_over(&self.players) || self.hands_played + self.hands_voided >= self.config.hands
    }

    /// Plays one hand with a freshly shuffled deck. Returns `None` if the
    /// hand was voided; the stacks are then unchanged and the button still
    /// moves on.
    pub fn play_next(&mut self) -> Option<HandSummary> {
        let hand_number = self.hands_played + self.hands_voided;
        let every = self.config.blind_increase_every;
        if every > 0 && hand_number > 0 && hand_number % every == 0 {
            self.blind = self.blind.saturating_mul(2);
            info!("Blind raised to {} after {hand_number} hands", self.blind);
        }

        let mut deck = Deck::default();
        deck.shuffle_with(&mut self.rng);
        let settings = self.config.hand_settings(self.blind);
        debug!(
            "Hand {} with {} on the button",
            hand_number + 1,
            self.players[self.dealer].name
        );

        let summary = match play_hand(
            &mut self.players,
            &mut self.policies,
            self.dealer,
            &mut deck,
            &settings,
        ) {
            Ok(summary) => {
                self.hands_played += 1;
                Some(summary)
            }
            Err(err) => {
                warn!("Hand {} voided: {err}", hand_number + 1);
                self.hands_voided += 1;
                None
            }
        };
        self.dealer = next_dealer(&self.players, self.dealer);
        summary
    }

    /// Plays hands until the match is finished, handing each completed
    /// hand to `on_hand`.
    pub fn run(&mut self, mut on_hand: impl FnMut(&HandSummary)) -> MatchReport {
        while !self.is_finished() {
            if let Some(summary) = self.play_next() {
                on_hand(&summary);
            }
        }
        self.report()
    }

    #[must_use]
    pub fn report(&self) -> MatchReport {
        let winner = is_hand_over(&self.players)
            .then(|| self.players.iter().find(|player| player.chips > 0))
            .flatten()
            .map(|player| player.name.to_string());
        MatchReport {
            hands_played: self.hands_played,
            hands_voided: self.hands_voided,
            final_blind: self.blind,
            winner,
            standings: self
                .players
                .iter()
                .map(|player| Standing {
                    name: player.name.to_string(),
                    chips: player.chips,
                })
                .collect(),
        }
    }
}

fn seat_policy(mix: StrategyMix, seat: SeatIndex, rng: &mut StdRng) -> Strategy {
    match mix {
        StrategyMix::Default => DefaultStrategy::default().into(),
        StrategyMix::Mixed if seat % 2 == 0 => DefaultStrategy::default().into(),
        StrategyMix::Random | StrategyMix::Mixed => RandomStrategy::new(rng.random()).into(),
    }
}

/// The next seat clockwise that still has chips, or `dealer` if nobody does.
fn next_dealer(players: &[Player], dealer: SeatIndex) -> SeatIndex {
    let n = players.len();
    (1..=n)
        .map(|step| (dealer + step) % n)
        .find(|&seat| players[seat].chips > 0)
        .unwrap_or(dealer)
}
