//! Hand evaluation.
//!
//! Five-card hands are ranked into a [`Category`] plus a tiebreak sequence.
//! Seven-card hands (two hole cards and the board) are ranked by trying
//! every five-card subset and keeping the best.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use super::entities::{ACE, Card, Value};

/// Hand categories, worst to best. The discriminant is the category score.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    #[must_use]
    pub fn score(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "hi",
            Self::OnePair => "1p",
            Self::TwoPair => "2p",
            Self::ThreeOfAKind => "3k",
            Self::Straight => "s8",
            Self::Flush => "fs",
            Self::FullHouse => "fh",
            Self::FourOfAKind => "4k",
            Self::StraightFlush => "sf",
            Self::RoyalFlush => "rf",
        };
        write!(f, "{repr}")
    }
}

/// Strength of a five-card hand.
///
/// `tiebreak` lists the five cards grouped by multiplicity (quads, trips and
/// pairs before kickers), each group by descending value. Comparison only
/// looks at card values, so suits never break a tie.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HandRank {
    pub category: Category,
    pub tiebreak: Vec<Card>,
}

impl HandRank {
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.tiebreak.iter().map(Card::value)
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.values().cmp(other.values()))
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandRank {}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        for card in &self.tiebreak {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}

/// Ranks exactly five cards.
///
/// Aces are always high, so A-2-3-4-5 is not a straight.
#[must_use]
pub fn rank(hand: &[Card; 5]) -> HandRank {
    let mut counts = [0u8; ACE as usize + 1];
    for card in hand {
        counts[usize::from(card.0)] += 1;
    }
    let count_of = |card: &Card| counts[usize::from(card.0)];

    let mut tiebreak = hand.to_vec();
    tiebreak.sort_by(|a, b| {
        count_of(b)
            .cmp(&count_of(a))
            .then(b.0.cmp(&a.0))
            .then(b.1.cmp(&a.1))
    });

    let mut groups: Vec<u8> = counts.iter().copied().filter(|&n| n > 0).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = hand.iter().all(|card| card.1 == hand[0].1);
    let high = tiebreak[0].0;
    let is_straight = groups.len() == 5 && high - tiebreak[4].0 == 4;

    let category = match (is_straight, is_flush, groups.as_slice()) {
        (true, true, _) if high == ACE => Category::RoyalFlush,
        (true, true, _) => Category::StraightFlush,
        (_, _, [4, ..]) => Category::FourOfAKind,
        (_, _, [3, 2]) => Category::FullHouse,
        (_, true, _) => Category::Flush,
        (true, _, _) => Category::Straight,
        (_, _, [3, ..]) => Category::ThreeOfAKind,
        (_, _, [2, 2, ..]) => Category::TwoPair,
        (_, _, [2, ..]) => Category::OnePair,
        _ => Category::HighCard,
    };

    HandRank { category, tiebreak }
}

/// Every five-card subset of `cards` that reaches the maximum rank.
///
/// More than one entry means several subsets tie at the top; they all
/// compare equal. Returns nothing for fewer than five cards.
#[must_use]
pub fn best_hands(cards: &[Card]) -> Vec<HandRank> {
    let n = cards.len();
    if n < 5 {
        return Vec::new();
    }
    debug_assert!(n <= 16, "subset enumeration is meant for hold'em sized hands");

    let mut best: Vec<HandRank> = Vec::new();
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let mut hand = [cards[0]; 5];
        for (slot, card) in cards
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, card)| card)
            .enumerate()
        {
            hand[slot] = *card;
        }
        let candidate = rank(&hand);
        match best.first().map(|top| candidate.cmp(top)) {
            None | Some(Ordering::Greater) => best = vec![candidate],
            Some(Ordering::Equal) => best.push(candidate),
            Some(Ordering::Less) => {}
        }
    }
    best
}

/// Best five-card rank available from `cards`, if there are at least five.
#[must_use]
pub fn eval(cards: &[Card]) -> Option<HandRank> {
    best_hands(cards).into_iter().next()
}

/// Indices of every hand tied for the maximum, in input order.
#[must_use]
pub fn argmax(hands: &[HandRank]) -> Vec<usize> {
    let Some(best) = hands.iter().max() else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter(|(_, hand)| *hand == best)
        .map(|(i, _)| i)
        .collect()
}

/// Hole-card heuristic for decision policies before the flop.
///
/// A pocket pair scores 1, anything else 0; cards are listed high to low.
/// Settlement never uses this.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PreflopRank {
    pub category: u8,
    pub cards: Vec<Card>,
}

impl Ord for PreflopRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| {
            self.cards
                .iter()
                .map(Card::value)
                .cmp(other.cards.iter().map(Card::value))
        })
    }
}

impl PartialOrd for PreflopRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[must_use]
pub fn preflop_rank(hole: &[Card]) -> PreflopRank {
    let mut cards = hole.to_vec();
    cards.sort_by(|a, b| b.cmp(a));
    let is_pair = cards.len() == 2 && cards[0].0 == cards[1].0;
    PreflopRank {
        category: u8::from(is_pair),
        cards,
    }
}
