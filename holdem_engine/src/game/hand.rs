//! One hand, start to finish.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::constants::HOLE_CARDS;
use super::entities::{Card, CardSource, Chips, HandSettings, Player, SeatIndex, Street};
use super::errors::HandError;
use super::pot::{Pot, PotLedger};
use super::showdown::{Payout, settle};
use super::state_machine::{BettingRound, RoundEnd, RoundState, pay_in};
use crate::bot::DecisionPolicy;

/// What happened in a hand, for the caller to log or serialize.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HandSummary {
    pub dealer: SeatIndex,
    pub board: Vec<Card>,
    /// Pots as they stood before settlement, main pot first.
    pub pots: Vec<Pot>,
    pub payouts: Vec<Payout>,
    /// Every seat's stack after settlement.
    pub stacks: Vec<Chips>,
    /// Everyone but one player folded before showdown.
    pub ended_by_fold: bool,
}

/// Plays a full hand: blinds, hole cards, four streets and settlement.
///
/// `policies[i]` decides for `players[i]`. Seats without chips sit the hand
/// out. On error the hand is voided: every committed chip goes back to its
/// owner and all hand state is cleared, so stacks are exactly as they were
/// before the call.
pub fn play_hand<P: DecisionPolicy>(
    players: &mut [Player],
    policies: &mut [P],
    dealer: SeatIndex,
    deck: &mut impl CardSource,
    settings: &HandSettings,
) -> Result<HandSummary, HandError> {
    settings.validate()?;
    if policies.len() != players.len() {
        return Err(HandError::PolicyCountMismatch {
            players: players.len(),
            policies: policies.len(),
        });
    }
    if dealer >= players.len() {
        return Err(HandError::InvalidSeat(dealer));
    }

    // Every pot is bounded by the table total, so checking it once here
    // keeps all chip arithmetic in the hand within `Chips`.
    players
        .iter()
        .try_fold(0, |total: Chips, player| total.checked_add(player.chips))
        .ok_or(HandError::ChipOverflow)?;

    let order = seats_from_dealer(players, dealer);
    if order.len() < 2 {
        return Err(HandError::NotEnoughPlayers);
    }
    for player in players.iter_mut() {
        player.reset();
        // Busted seats sit out.
        player.folded = player.chips == 0;
    }

    let mut ledger = PotLedger::new(players.len());
    match run(players, policies, &order, deck, settings, &mut ledger) {
        Ok(ended_by_fold) => {
            let pots = ledger.pots().cloned().collect();
            let payouts = settle(players, &ledger, dealer, settings.odd_chip);
            for player in players.iter_mut() {
                player.reset();
            }
            Ok(HandSummary {
                dealer,
                board: ledger.board().to_vec(),
                pots,
                payouts,
                stacks: players.iter().map(|player| player.chips).collect(),
                ended_by_fold,
            })
        }
        Err(err) => {
            ledger.void(players);
            for player in players.iter_mut() {
                player.reset();
            }
            warn!("hand voided: {err}");
            Err(err)
        }
    }
}

/// A match is over once at most one player still has chips.
#[must_use]
pub fn is_hand_over(players: &[Player]) -> bool {
    players.iter().filter(|player| player.chips > 0).count() <= 1
}

/// Returns whether the hand ended with everyone else folding.
fn run<P: DecisionPolicy>(
    players: &mut [Player],
    policies: &mut [P],
    order: &[SeatIndex],
    deck: &mut impl CardSource,
    settings: &HandSettings,
    ledger: &mut PotLedger,
) -> Result<bool, HandError> {
    post_blinds(players, ledger, order, settings)?;
    for _ in 0..HOLE_CARDS {
        for &seat in order {
            players[seat].cards.push(draw(deck)?);
        }
    }

    for street in Street::ALL {
        for _ in 0..street.cards_dealt() {
            ledger.deal_board(draw(deck)?);
        }
        if street != Street::Preflop {
            debug!(
                "{street}: {}",
                ledger
                    .board()
                    .iter()
                    .map(Card::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }

        let mut round = BettingRound::new(street, order.to_vec(), settings.blind, settings.raise_cap);
        let mut state = round.open(players)?;
        while let RoundState::ActionPending(seat) = state {
            let view = players[seat].view();
            let action = policies[seat].decide(&view, ledger.board(), round.min_bet());
            state = round.apply(players, ledger, seat, action)?;
        }
        ledger.end_street(players);

        if let RoundState::Closed(RoundEnd::LastStanding(seat)) = state {
            debug!("{street}: everyone but seat {seat} folded");
            return Ok(true);
        }
    }
    Ok(false)
}

/// Seats with chips, starting left of the dealer and ending on the dealer.
fn seats_from_dealer(players: &[Player], dealer: SeatIndex) -> Vec<SeatIndex> {
    let n = players.len();
    (1..=n)
        .map(|step| (dealer + step) % n)
        .filter(|&seat| players[seat].chips > 0)
        .collect()
}

/// Heads-up the dealer (last in `order`) posts the small blind; otherwise
/// the first two seats left of the dealer post small and big. A blind
/// bigger than the stack puts the poster all-in.
fn post_blinds(
    players: &mut [Player],
    ledger: &mut PotLedger,
    order: &[SeatIndex],
    settings: &HandSettings,
) -> Result<(), HandError> {
    let (small, big) = match order {
        [big, small] => (*small, *big),
        [small, big, ..] => (*small, *big),
        _ => return Ok(()),
    };
    for (seat, blind) in [(small, settings.small_blind()), (big, settings.blind)] {
        let player = players.get_mut(seat).ok_or(HandError::InvalidSeat(seat))?;
        let paid = pay_in(player, ledger, seat, blind)?;
        debug!("{} posts {paid}", player.name);
        if player.all_in {
            ledger.carve_all_in(seat)?;
        }
    }
    Ok(())
}

fn draw(deck: &mut impl CardSource) -> Result<Card, HandError> {
    deck.draw().ok_or(HandError::DeckExhausted)
}
