//! Showdown settlement.

use log::info;
use serde::{Deserialize, Serialize};

use super::entities::{Chips, OddChip, Player, SeatIndex};
use super::functional::{HandRank, argmax, eval};
use super::pot::PotLedger;

/// Chips credited to one seat from one pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payout {
    /// Position in [`PotLedger::pots`], main pot first.
    pub pot: usize,
    pub seat: SeatIndex,
    pub chips: Chips,
}

/// Awards every pot in `ledger` and credits the winners' stacks.
///
/// If only one player hasn't folded they take everything without a card
/// comparison. Otherwise each pot goes to the best hand among its eligible,
/// non-folded seats. A pot nobody can contest is merged into the pot below
/// it (or above it, for the main pot).
pub fn settle(
    players: &mut [Player],
    ledger: &PotLedger,
    dealer: SeatIndex,
    odd_chip: OddChip,
) -> Vec<Payout> {
    let live: Vec<SeatIndex> = (0..players.len())
        .filter(|&seat| !players[seat].folded)
        .collect();
    if let [winner] = live.as_slice() {
        return award_uncontested(players, ledger, *winner);
    }

    let ranks: Vec<Option<HandRank>> = players
        .iter()
        .map(|player| {
            if player.folded {
                return None;
            }
            let cards: Vec<_> = player.cards.iter().chain(ledger.board()).copied().collect();
            eval(&cards)
        })
        .collect();

    let mut contests: Vec<(usize, Chips, Vec<SeatIndex>)> = Vec::new();
    let mut orphaned: Chips = 0;
    for (i, pot) in ledger.pots().enumerate() {
        let contenders: Vec<SeatIndex> = pot
            .eligible
            .iter()
            .copied()
            .filter(|&seat| ranks.get(seat).is_some_and(Option::is_some))
            .collect();
        if contenders.is_empty() {
            match contests.last_mut() {
                Some(below) => below.1 += pot.chips,
                None => orphaned += pot.chips,
            }
        } else {
            contests.push((i, pot.chips + orphaned, contenders));
            orphaned = 0;
        }
    }
    // Nobody holds five cards yet, so no hand can be ranked: the live seats
    // tie for everything.
    if orphaned > 0 {
        contests.push((0, orphaned, live));
    }

    let mut payouts = Vec::new();
    for (pot, chips, contenders) in contests {
        let hands: Vec<HandRank> = contenders
            .iter()
            .filter_map(|&seat| ranks[seat].clone())
            .collect();
        let mut winners: Vec<SeatIndex> = if hands.is_empty() {
            contenders
        } else {
            argmax(&hands).into_iter().map(|i| contenders[i]).collect()
        };
        winners.sort_by_key(|&seat| seats_left_of(dealer, seat, players.len()));

        for (seat, won) in split(chips, &winners, odd_chip) {
            let player = &mut players[seat];
            player.chips += won;
            if let Some(hand) = &ranks[seat] {
                info!("{} wins {won} from pot {pot} with {hand}", player.name);
            }
            payouts.push(Payout {
                pot,
                seat,
                chips: won,
            });
        }
    }
    payouts
}

fn award_uncontested(players: &mut [Player], ledger: &PotLedger, winner: SeatIndex) -> Vec<Payout> {
    let payouts: Vec<Payout> = ledger
        .pots()
        .enumerate()
        .filter(|(_, pot)| pot.chips > 0)
        .map(|(i, pot)| Payout {
            pot: i,
            seat: winner,
            chips: pot.chips,
        })
        .collect();
    let total: Chips = payouts.iter().map(|payout| payout.chips).sum();
    players[winner].chips += total;
    info!("{} wins {total} uncontested", players[winner].name);
    payouts
}

/// Distance from the dealer going left; the dealer itself is last.
fn seats_left_of(dealer: SeatIndex, seat: SeatIndex, num_seats: usize) -> usize {
    (seat + num_seats - dealer - 1) % num_seats
}

/// Splits `chips` between `winners`, already ordered from the dealer's left.
fn split(chips: Chips, winners: &[SeatIndex], odd_chip: OddChip) -> Vec<(SeatIndex, Chips)> {
    let Ok(k) = Chips::try_from(winners.len()) else {
        return Vec::new();
    };
    if k == 0 {
        return Vec::new();
    }
    let share = chips / k;
    let remainder = chips % k;
    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| {
            let bonus = match odd_chip {
                OddChip::LeftOfDealer if i == 0 => remainder,
                OddChip::Spread if (i as Chips) < remainder => 1,
                _ => 0,
            };
            (seat, share + bonus)
        })
        .collect()
}
