use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{DEFAULT_BLIND, DEFAULT_RAISE_CAP, FLOP_CARDS};
use super::errors::HandError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Spade, Self::Heart, Self::Diamond, Self::Club];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Spade => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Card rank value. Two is 2, face cards map to 11..=13 and the ace is
/// always high at 14.
pub type Value = u8;

pub const JACK: Value = 11;
pub const QUEEN: Value = 12;
pub const KING: Value = 13;
pub const ACE: Value = 14;

/// A card is a rank value (2..=14) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    #[must_use]
    pub fn value(&self) -> Value {
        self.0
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            ACE => "A".to_string(),
            KING => "K".to_string(),
            QUEEN => "Q".to_string(),
            JACK => "J".to_string(),
            v => v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

/// Where the engine gets its cards from. The engine only ever draws the
/// next card and asks whether any are left.
pub trait CardSource {
    fn draw(&mut self) -> Option<Card>;

    fn is_empty(&self) -> bool;
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    deck_idx: usize,
}

impl Deck {
    /// A deck that deals `cards` in the given order. Used to replay a known
    /// hand; it may hold fewer than 52 cards.
    #[must_use]
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self { cards, deck_idx: 0 }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.deck_idx = 0;
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| (2..=ACE).map(move |value| Card(value, suit)))
            .collect();
        Self { cards, deck_idx: 0 }
    }
}

impl CardSource for Deck {
    fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.deck_idx).copied()?;
        self.deck_idx += 1;
        Some(card)
    }

    fn is_empty(&self) -> bool {
        self.deck_idx >= self.cards.len()
    }
}

/// Chips are whole units; stacks and pots never go negative.
pub type Chips = u32;

/// Index into the stable player store for the hand.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The four things a decision policy may ask for.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    Fold,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "fold",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "all-in",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Self; 4] = [Self::Preflop, Self::Flop, Self::Turn, Self::River];

    /// Community cards dealt before this street's betting opens.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => FLOP_CARDS,
            Self::Turn | Self::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub name: Username,
    /// Persists across hands; only settlement and betting move it.
    pub chips: Chips,
    pub cards: Vec<Card>,
    pub folded: bool,
    pub all_in: bool,
    /// Chips committed on the current street.
    pub round_bet: Chips,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<Username>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            chips,
            cards: Vec::with_capacity(2),
            folded: false,
            all_in: false,
            round_bet: 0,
        }
    }

    /// Clears hand-scoped state. The chip stack is left alone.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.folded = false;
        self.all_in = false;
        self.round_bet = 0;
    }

    /// Can still be asked for an action this hand.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.folded && self.chips > 0
    }

    /// Moves up to `amount` from the stack onto the current street and
    /// returns what was actually paid. Emptying the stack marks the player
    /// all-in.
    pub fn pay(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.round_bet += paid;
        if self.chips == 0 && paid > 0 {
            self.all_in = true;
        }
        paid
    }

    #[must_use]
    pub fn view(&self) -> PlayerView {
        PlayerView {
            name: self.name.clone(),
            cards: self.cards.clone(),
            chips: self.chips,
            round_bet: self.round_bet,
        }
    }
}

/// What a decision policy gets to see about the player it decides for.
/// Other players' hole cards never appear here.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerView {
    pub name: Username,
    pub cards: Vec<Card>,
    pub chips: Chips,
    pub round_bet: Chips,
}

/// How chips that don't divide evenly among tied winners are handed out.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum OddChip {
    /// The whole remainder goes to the tied winner closest to the dealer's left.
    #[default]
    LeftOfDealer,
    /// One chip each to tied winners, starting left of the dealer.
    Spread,
}

/// Per-hand configuration passed explicitly through the engine.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HandSettings {
    pub blind: Chips,
    pub raise_cap: u8,
    pub odd_chip: OddChip,
}

impl Default for HandSettings {
    fn default() -> Self {
        Self::new(DEFAULT_BLIND, DEFAULT_RAISE_CAP)
    }
}

impl HandSettings {
    #[must_use]
    pub fn new(blind: Chips, raise_cap: u8) -> Self {
        Self {
            blind,
            raise_cap,
            odd_chip: OddChip::default(),
        }
    }

    #[must_use]
    pub fn small_blind(&self) -> Chips {
        self.blind / 2
    }

    pub fn validate(&self) -> Result<(), HandError> {
        if self.blind == 0 {
            return Err(HandError::InvalidSettings {
                reason: "blind must be greater than 0",
            });
        }
        if self.raise_cap == 0 {
            return Err(HandError::InvalidSettings {
                reason: "raise cap must be at least 1",
            });
        }
        Ok(())
    }
}
