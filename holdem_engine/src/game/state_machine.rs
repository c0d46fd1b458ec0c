//! Betting round state machine.
//!
//! One [`BettingRound`] drives one street. It walks a fixed turn order,
//! asks each seat that still owes an action, applies the action to the
//! seat's stack and the pot ledger, and decides when the street is over.

use log::debug;
use serde::{Deserialize, Serialize};

use super::entities::{Action, Chips, Player, SeatIndex, Street};
use super::errors::HandError;
use super::pot::PotLedger;

/// Why a street stopped taking actions.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundEnd {
    /// Every seat that can still act has matched the bet and acted since
    /// the last raise, or nobody is left to bet against.
    Matched,
    /// Everyone else folded; the hand is over.
    LastStanding(SeatIndex),
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundState {
    Open,
    ActionPending(SeatIndex),
    Closed(RoundEnd),
}

#[derive(Clone, Debug)]
pub struct BettingRound {
    street: Street,
    // Seats in the hand, starting left of the button.
    order: Vec<SeatIndex>,
    // Seats that acted since the last raise.
    acted: Vec<SeatIndex>,
    cursor: usize,
    min_bet: Chips,
    raise_count: u8,
    raise_cap: u8,
    state: RoundState,
}

impl BettingRound {
    #[must_use]
    pub fn new(street: Street, order: Vec<SeatIndex>, min_bet: Chips, raise_cap: u8) -> Self {
        Self {
            street,
            acted: Vec::with_capacity(order.len()),
            order,
            cursor: 0,
            min_bet,
            raise_count: 0,
            raise_cap,
            state: RoundState::Open,
        }
    }

    #[must_use]
    pub fn street(&self) -> Street {
        self.street
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    #[must_use]
    pub fn min_bet(&self) -> Chips {
        self.min_bet
    }

    #[must_use]
    pub fn raise_count(&self) -> u8 {
        self.raise_count
    }

    /// The seat the round is waiting on, if any.
    #[must_use]
    pub fn pending(&self) -> Option<SeatIndex> {
        match self.state {
            RoundState::ActionPending(seat) => Some(seat),
            _ => None,
        }
    }

    /// Starts the street. Returns the first seat to act, or a closed state
    /// when nobody has anything to do.
    pub fn open(&mut self, players: &[Player]) -> Result<RoundState, HandError> {
        self.check_order(players)?;
        if self.state == RoundState::Open {
            self.advance(players, 0);
        }
        Ok(self.state)
    }

    /// Applies `action` for `seat`, which must be the pending seat.
    ///
    /// A raise past the street's raise cap is treated as a call. Any payment
    /// that empties the stack runs the side-pot resolver before the next
    /// seat is chosen.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        seat: SeatIndex,
        action: Action,
    ) -> Result<RoundState, HandError> {
        match self.state {
            RoundState::Closed(_) => return Err(HandError::RoundClosed),
            RoundState::ActionPending(expected) if expected == seat => {}
            RoundState::ActionPending(expected) => {
                return Err(HandError::OutOfTurn {
                    seat,
                    expected: Some(expected),
                });
            }
            RoundState::Open => {
                return Err(HandError::OutOfTurn {
                    seat,
                    expected: None,
                });
            }
        }

        self.check_order(players)?;
        let player = players.get_mut(seat).ok_or(HandError::InvalidSeat(seat))?;
        let mut paid = 0;
        match action {
            Action::Fold => {
                ledger.fold(seat)?;
                player.folded = true;
            }
            Action::Call => {
                paid = pay_in(player, ledger, seat, self.min_bet.saturating_sub(player.round_bet))?;
            }
            Action::Raise if self.raise_count >= self.raise_cap => {
                debug!("raise cap of {} reached, seat {seat} calls", self.raise_cap);
                paid = pay_in(player, ledger, seat, self.min_bet.saturating_sub(player.round_bet))?;
            }
            Action::Raise | Action::AllIn => {
                if player.chips == 0 {
                    return Err(HandError::ProtocolViolation {
                        seat,
                        action,
                        reason: "no chips left",
                    });
                }
                let amount = match action {
                    Action::AllIn => player.chips,
                    _ => self.min_bet.saturating_mul(2).saturating_sub(player.round_bet),
                };
                paid = pay_in(player, ledger, seat, amount)?;
                if player.round_bet > self.min_bet {
                    self.min_bet = player.round_bet;
                    self.raise_count = self.raise_count.saturating_add(1);
                    self.acted.clear();
                }
            }
        }

        debug!(
            "{} {}: seat {seat} {action} ({paid}), min bet {}",
            self.street, player.name, self.min_bet
        );
        if player.all_in && paid > 0 {
            ledger.carve_all_in(seat)?;
        }
        if !self.acted.contains(&seat) {
            self.acted.push(seat);
        }

        Ok(self.advance(players, self.cursor + 1))
    }

    fn check_order(&self, players: &[Player]) -> Result<(), HandError> {
        match self.order.iter().find(|&&seat| seat >= players.len()) {
            Some(&seat) => Err(HandError::InvalidSeat(seat)),
            None => Ok(()),
        }
    }

    fn advance(&mut self, players: &[Player], from: usize) -> RoundState {
        let mut live = self
            .order
            .iter()
            .copied()
            .filter(|&seat| !players[seat].folded);
        if let (Some(last), None) = (live.next(), live.next()) {
            self.state = RoundState::Closed(RoundEnd::LastStanding(last));
            return self.state;
        }

        let able: Vec<SeatIndex> = self
            .order
            .iter()
            .copied()
            .filter(|&seat| players[seat].is_active())
            .collect();
        let contested = match able.as_slice() {
            [] => false,
            [only] => {
                let facing = self
                    .order
                    .iter()
                    .filter(|&&seat| seat != *only && !players[seat].folded)
                    .map(|&seat| players[seat].round_bet)
                    .max()
                    .unwrap_or_default();
                players[*only].round_bet < facing
            }
            _ => true,
        };

        if contested {
            let n = self.order.len();
            for step in 0..n {
                let pos = (from + step) % n;
                let seat = self.order[pos];
                let player = &players[seat];
                if player.is_active()
                    && (!self.acted.contains(&seat) || player.round_bet < self.min_bet)
                {
                    self.cursor = pos;
                    self.state = RoundState::ActionPending(seat);
                    return self.state;
                }
            }
        }

        self.state = RoundState::Closed(RoundEnd::Matched);
        self.state
    }
}

/// Moves up to `amount` from `player`'s stack into the ledger. The ledger
/// is updated first so a rejected commit leaves the stack untouched.
pub(super) fn pay_in(
    player: &mut Player,
    ledger: &mut PotLedger,
    seat: SeatIndex,
    amount: Chips,
) -> Result<Chips, HandError> {
    ledger.commit(seat, amount.min(player.chips))?;
    Ok(player.pay(amount))
}
