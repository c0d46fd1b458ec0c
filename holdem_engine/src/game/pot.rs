//! Pot ledger and side-pot resolver.
//!
//! The ledger owns every chip committed to the table this hand. Chips are
//! tracked per seat as a running contribution; pots are horizontal layers
//! over those contributions. Each all-in adds a threshold (its total
//! contribution) and the layer it lands in is split in two, so a short
//! all-in can never win chips it didn't match.

use log::debug;
use serde::{Deserialize, Serialize};
use std::iter;

use super::constants::BOARD_CARDS;
use super::entities::{Card, Chips, Player, SeatIndex};
use super::errors::HandError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Pot {
    pub chips: Chips,
    /// Seats that can win this pot. Recorded when the pot is carved and
    /// extended as later callers reach its cap; a later fold never removes
    /// a seat, settlement just skips folded seats.
    pub eligible: Vec<SeatIndex>,
    /// Per-seat contribution this pot tops out at. `None` for the open
    /// pot at the top that still takes new bets.
    pub cap: Option<Chips>,
}

impl Pot {
    #[must_use]
    pub fn is_eligible(&self, seat: SeatIndex) -> bool {
        self.eligible.contains(&seat)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PotLedger {
    contributions: Vec<Chips>,
    folded: Vec<bool>,
    // Ascending, no duplicates.
    caps: Vec<Chips>,
    pots: Vec<Pot>,
    board: Vec<Card>,
}

impl PotLedger {
    #[must_use]
    pub fn new(num_seats: usize) -> Self {
        Self {
            contributions: vec![0; num_seats],
            folded: vec![false; num_seats],
            caps: Vec::new(),
            pots: vec![Pot::default()],
            board: Vec::with_capacity(BOARD_CARDS),
        }
    }

    /// Main pot first, then side pots from the lowest cap up. The open pot
    /// is only listed once something is in it.
    pub fn pots(&self) -> impl Iterator<Item = &Pot> + '_ {
        self.pots
            .iter()
            .enumerate()
            .filter(|(i, pot)| *i == 0 || pot.chips > 0)
            .map(|(_, pot)| pot)
    }

    #[must_use]
    pub fn main_pot(&self) -> &Pot {
        &self.pots[0]
    }

    #[must_use]
    pub fn total(&self) -> Chips {
        self.pots.iter().map(|pot| pot.chips).sum()
    }

    #[must_use]
    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions.get(seat).copied().unwrap_or_default()
    }

    /// Community cards, shared by every pot this hand.
    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn deal_board(&mut self, card: Card) {
        self.board.push(card);
    }

    /// Records chips a seat is moving from its stack onto the table. Fails
    /// without touching the ledger if the seat is unknown or the table total
    /// would no longer fit in [`Chips`].
    pub fn commit(&mut self, seat: SeatIndex, amount: Chips) -> Result<(), HandError> {
        let current = self.contribution_of(seat)?;
        if amount == 0 {
            return Ok(());
        }
        let contribution = current.checked_add(amount).ok_or(HandError::ChipOverflow)?;
        self.total().checked_add(amount).ok_or(HandError::ChipOverflow)?;
        self.contributions[seat] = contribution;
        self.rebuild();
        Ok(())
    }

    pub fn fold(&mut self, seat: SeatIndex) -> Result<(), HandError> {
        let folded = self.folded.get_mut(seat).ok_or(HandError::InvalidSeat(seat))?;
        *folded = true;
        Ok(())
    }

    /// Side-pot resolver. Called as soon as `seat` has put in its last chip:
    /// its total contribution becomes a cap, and the pot that cap falls
    /// inside is split into a lower pot everyone at or above the cap can win
    /// and an upper pot for the excess.
    pub fn carve_all_in(&mut self, seat: SeatIndex) -> Result<(), HandError> {
        let level = self.contribution_of(seat)?;
        if level == 0 {
            return Ok(());
        }
        if let Err(idx) = self.caps.binary_search(&level) {
            self.caps.insert(idx, level);
            self.rebuild();
            debug!(
                "seat {seat} all-in at {level}, pots now {:?}",
                self.pots().map(|pot| pot.chips).collect::<Vec<_>>()
            );
        }
        Ok(())
    }

    /// Hands back whatever the single largest contributor put in beyond
    /// everyone else. Nobody can call those chips, so they never go into a
    /// contestable pot.
    pub fn return_uncalled(&mut self, players: &mut [Player]) -> Option<(SeatIndex, Chips)> {
        let (top_seat, &top) = self
            .contributions
            .iter()
            .enumerate()
            .max_by_key(|(_, chips)| **chips)?;
        let runner_up = self
            .contributions
            .iter()
            .enumerate()
            .filter(|(seat, _)| *seat != top_seat)
            .map(|(_, chips)| *chips)
            .max()
            .unwrap_or_default();
        let excess = top - runner_up;
        if excess == 0 {
            return None;
        }

        self.contributions[top_seat] = runner_up;
        let player = &mut players[top_seat];
        player.chips += excess;
        player.round_bet = player.round_bet.saturating_sub(excess);
        player.all_in = player.chips == 0;
        self.caps.retain(|&cap| cap <= runner_up);
        self.rebuild();
        debug!("returned {excess} uncalled chips to seat {top_seat}");
        Some((top_seat, excess))
    }

    /// Closes out a street: uncalled chips go back and everyone's street
    /// bet resets.
    pub fn end_street(&mut self, players: &mut [Player]) {
        self.return_uncalled(players);
        for player in players.iter_mut() {
            player.round_bet = 0;
        }
    }

    /// Gives every committed chip back to its owner. Used when a hand is
    /// aborted.
    pub fn void(&mut self, players: &mut [Player]) {
        for (seat, chips) in self.contributions.iter_mut().enumerate() {
            if let Some(player) = players.get_mut(seat) {
                player.chips += *chips;
            }
            *chips = 0;
        }
        self.caps.clear();
        self.rebuild();
    }

    fn contribution_of(&self, seat: SeatIndex) -> Result<Chips, HandError> {
        self.contributions
            .get(seat)
            .copied()
            .ok_or(HandError::InvalidSeat(seat))
    }

    // Layer sums can't overflow: they add up to `total`, which `commit` keeps
    // within `Chips`.
    fn rebuild(&mut self) {
        let previous = std::mem::take(&mut self.pots);
        let mut floor: Chips = 0;
        for cap in self.caps.iter().copied().map(Some).chain(iter::once(None)) {
            let chips = self
                .contributions
                .iter()
                .map(|&put_in| layer_share(put_in, floor, cap))
                .sum();
            let recorded = previous.iter().find(|pot| pot.cap == cap);
            let mut eligible: Vec<SeatIndex> = self
                .contributions
                .iter()
                .enumerate()
                .filter(|(_, put_in)| match cap {
                    Some(top) => **put_in >= top,
                    None => **put_in > floor,
                })
                .map(|(seat, _)| seat)
                .filter(|&seat| {
                    !self.folded[seat] || recorded.is_some_and(|pot| pot.is_eligible(seat))
                })
                .collect();
            // Only a folded seat can reach a higher pot without the one below.
            if let Some(below) = self.pots.last() {
                eligible.retain(|&seat| below.is_eligible(seat));
            }
            self.pots.push(Pot {
                chips,
                eligible,
                cap,
            });
            if let Some(top) = cap {
                floor = top;
            }
        }
    }
}

fn layer_share(put_in: Chips, floor: Chips, cap: Option<Chips>) -> Chips {
    let above = put_in.saturating_sub(floor);
    match cap {
        Some(top) => above.min(top - floor),
        None => above,
    }
}
