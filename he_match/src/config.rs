//! Match configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use holdem_engine::{
    HandSettings, MAX_PLAYERS, OddChip,
    constants::{DEFAULT_BLIND, DEFAULT_RAISE_CAP, DEFAULT_STARTING_CHIPS},
    entities::Chips,
};
use std::str::FromStr;

/// Which bots sit at the table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StrategyMix {
    /// Every seat plays the hand-strength bot.
    #[default]
    Default,
    /// Every seat picks actions at random.
    Random,
    /// Even seats play the hand-strength bot, odd seats play randomly.
    Mixed,
}

impl FromStr for StrategyMix {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "random" => Ok(Self::Random),
            "mixed" => Ok(Self::Mixed),
            other => Err(ConfigError::Invalid {
                var: "HE_STRATEGY".to_string(),
                reason: format!("Unknown strategy '{other}' (expected default, random or mixed)"),
            }),
        }
    }
}

/// Complete match configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Seats at the table
    pub players: usize,
    /// Stack every seat starts with
    pub starting_chips: Chips,
    /// Big blind for the first hand
    pub blind: Chips,
    /// Raises allowed per street
    pub raise_cap: u8,
    /// Most hands to play before stopping
    pub hands: usize,
    /// Double the blind after this many hands (0 keeps it fixed)
    pub blind_increase_every: usize,
    /// Bots to seat
    pub strategy: StrategyMix,
    /// Seed for the deck and the random bots; unseeded matches use OS entropy
    pub seed: Option<u64>,
    /// Odd chip rule for split pots
    pub odd_chip: OddChip,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            players: 4,
            starting_chips: DEFAULT_STARTING_CHIPS,
            blind: DEFAULT_BLIND,
            raise_cap: DEFAULT_RAISE_CAP,
            hands: 1000,
            blind_increase_every: 0,
            strategy: StrategyMix::default(),
            seed: None,
            odd_chip: OddChip::default(),
        }
    }
}

impl MatchConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `players_override` - Optional seat count override (from CLI args)
    /// * `hands_override` - Optional hand limit override (from CLI args)
    /// * `seed_override` - Optional RNG seed override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if the strategy or odd chip rule is not recognised
    pub fn from_env(
        players_override: Option<usize>,
        hands_override: Option<usize>,
        seed_override: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let strategy = match std::env::var("HE_STRATEGY") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.strategy,
        };

        let odd_chip = match std::env::var("HE_ODD_CHIP") {
            Ok(v) => parse_odd_chip(&v)?,
            Err(_) => defaults.odd_chip,
        };

        let seed = seed_override.or_else(|| {
            std::env::var("HE_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
        });

        Ok(MatchConfig {
            players: players_override.unwrap_or_else(|| parse_env_or("HE_PLAYERS", defaults.players)),
            starting_chips: parse_env_or("HE_STARTING_CHIPS", defaults.starting_chips),
            blind: parse_env_or("HE_BLIND", defaults.blind),
            raise_cap: parse_env_or("HE_RAISE_CAP", defaults.raise_cap),
            hands: hands_override.unwrap_or_else(|| parse_env_or("HE_HANDS", defaults.hands)),
            blind_increase_every: parse_env_or(
                "HE_BLIND_INCREASE_EVERY",
                defaults.blind_increase_every,
            ),
            strategy,
            seed,
            odd_chip,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::Invalid {
                var: "HE_PLAYERS".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.players > MAX_PLAYERS {
            return Err(ConfigError::Invalid {
                var: "HE_PLAYERS".to_string(),
                reason: format!("Must be at most {MAX_PLAYERS} (max players with 52-card deck)"),
            });
        }

        if self.starting_chips == 0 {
            return Err(ConfigError::Invalid {
                var: "HE_STARTING_CHIPS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let table_total = Chips::try_from(self.players)
            .ok()
            .and_then(|players| players.checked_mul(self.starting_chips));
        if table_total.is_none() {
            return Err(ConfigError::Invalid {
                var: "HE_STARTING_CHIPS".to_string(),
                reason: format!(
                    "{} players x {} chips exceeds the {} chip table limit",
                    self.players,
                    self.starting_chips,
                    Chips::MAX
                ),
            });
        }

        if self.blind == 0 {
            return Err(ConfigError::Invalid {
                var: "HE_BLIND".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.raise_cap == 0 {
            return Err(ConfigError::Invalid {
                var: "HE_RAISE_CAP".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.hands == 0 {
            return Err(ConfigError::Invalid {
                var: "HE_HANDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Engine settings for a hand played at `blind`.
    #[must_use]
    pub fn hand_settings(&self, blind: Chips) -> HandSettings {
        let mut settings = HandSettings::new(blind, self.raise_cap);
        settings.odd_chip = self.odd_chip;
        settings
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_odd_chip(value: &str) -> Result<OddChip, ConfigError> {
    match value.to_lowercase().as_str() {
        "left-of-dealer" => Ok(OddChip::LeftOfDealer),
        "spread" => Ok(OddChip::Spread),
        other => Err(ConfigError::Invalid {
            var: "HE_ODD_CHIP".to_string(),
            reason: format!("Unknown rule '{other}' (expected left-of-dealer or spread)"),
        }),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
