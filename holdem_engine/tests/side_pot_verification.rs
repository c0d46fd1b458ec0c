//! Side pot and settlement tests.
//!
//! These verify the pot ledger across random contribution patterns:
//! - Pots add up to exactly what was committed
//! - Side pot eligibility is a subset of the main pot's
//! - Folded players contribute but are never paid
//! - Tied winners split evenly with the remainder handed out, not dropped

use holdem_engine::game::{
    BettingRound, PotLedger, RoundEnd, RoundState, settle,
    entities::{ACE, Action, Card, Chips, JACK, KING, OddChip, Player, QUEEN, Street, Suit},
};
use proptest::prelude::*;

/// Per seat: chips committed, whether that emptied the stack, whether the
/// seat folded afterwards.
fn seat_strategy() -> impl Strategy<Value = Vec<(Chips, bool, bool)>> {
    prop::collection::vec((1u32..=500, any::<bool>(), any::<bool>()), 2..=9)
}

fn build_ledger(seats: &[(Chips, bool, bool)]) -> PotLedger {
    let mut ledger = PotLedger::new(seats.len());
    for (seat, &(chips, all_in, folded)) in seats.iter().enumerate() {
        ledger.commit(seat, chips).unwrap();
        if all_in {
            ledger.carve_all_in(seat).unwrap();
        }
        if folded {
            ledger.fold(seat).unwrap();
        }
    }
    ledger
}

fn royal_board(ledger: &mut PotLedger) {
    for value in [ACE, KING, QUEEN, JACK, 10] {
        ledger.deal_board(Card(value, Suit::Spade));
    }
}

#[test]
fn test_short_call_splits_main_and_side() {
    let mut players = vec![
        Player::new("alice", 1000),
        Player::new("bob", 1000),
        Player::new("carol", 40),
    ];
    let mut ledger = PotLedger::new(3);
    let mut round = BettingRound::new(Street::Flop, vec![0, 1, 2], 100, 3);
    round.open(&players).unwrap();
    for seat in 0..3 {
        round
            .apply(&mut players, &mut ledger, seat, Action::Call)
            .unwrap();
    }
    assert_eq!(round.state(), RoundState::Closed(RoundEnd::Matched));
    assert!(players[2].all_in);

    let pots: Vec<_> = ledger
        .pots()
        .map(|pot| (pot.chips, pot.eligible.clone()))
        .collect();
    assert_eq!(pots, vec![(120, vec![0, 1, 2]), (120, vec![0, 1])]);
}

#[test]
fn test_folded_player_contributes_but_is_not_paid() {
    let mut players: Vec<Player> = ["alice", "bob", "carol"]
        .into_iter()
        .map(|name| Player::new(name, 0))
        .collect();
    let mut ledger = PotLedger::new(3);
    ledger.commit(0, 50).unwrap();
    ledger.commit(1, 100).unwrap();
    ledger.commit(2, 100).unwrap();
    players[0].folded = true;
    ledger.fold(0).unwrap();
    players[1].cards = vec![Card(ACE, Suit::Heart), Card(ACE, Suit::Club)];
    players[2].cards = vec![Card(2, Suit::Heart), Card(3, Suit::Club)];
    for card in [
        Card(4, Suit::Diamond),
        Card(9, Suit::Club),
        Card(KING, Suit::Heart),
        Card(7, Suit::Spade),
        Card(JACK, Suit::Diamond),
    ] {
        ledger.deal_board(card);
    }

    settle(&mut players, &ledger, 2, OddChip::default());
    assert_eq!(players[0].chips, 0);
    assert_eq!(players[1].chips, 250);
}

proptest! {
    #[test]
    fn test_pots_add_up_to_contributions(seats in seat_strategy()) {
        let ledger = build_ledger(&seats);
        let committed: Chips = seats.iter().map(|(chips, _, _)| chips).sum();
        prop_assert_eq!(ledger.total(), committed);
        prop_assert_eq!(ledger.pots().map(|pot| pot.chips).sum::<Chips>(), committed);
    }

    #[test]
    fn test_side_pots_are_subsets_of_main(seats in seat_strategy()) {
        let ledger = build_ledger(&seats);
        let main = ledger.main_pot();
        for side in ledger.pots().skip(1) {
            for seat in &side.eligible {
                prop_assert!(main.is_eligible(*seat), "seat {} in side pot but not main", seat);
            }
        }
    }

    #[test]
    fn test_caps_ascend_and_bound_eligibility(seats in seat_strategy()) {
        let ledger = build_ledger(&seats);
        let mut floor = 0;
        for pot in ledger.pots() {
            for &seat in &pot.eligible {
                prop_assert!(ledger.contribution(seat) > floor);
                if let Some(cap) = pot.cap {
                    prop_assert!(ledger.contribution(seat) >= cap);
                }
            }
            if let Some(cap) = pot.cap {
                prop_assert!(cap > floor);
                floor = cap;
            }
        }
    }

    #[test]
    fn test_every_live_contributor_is_eligible(seats in seat_strategy()) {
        let ledger = build_ledger(&seats);
        for (seat, &(chips, _, folded)) in seats.iter().enumerate() {
            if folded {
                continue;
            }
            for pot in ledger.pots() {
                let reaches = match pot.cap {
                    Some(cap) => chips >= cap,
                    None => pot.chips > 0 && ledger.pots().filter_map(|p| p.cap).all(|cap| chips > cap),
                };
                if reaches {
                    prop_assert!(pot.is_eligible(seat), "seat {} should be eligible", seat);
                }
            }
        }
    }

    #[test]
    fn test_all_in_never_wins_more_than_it_matched(seats in seat_strategy()) {
        let ledger = build_ledger(&seats);
        for (seat, &(chips, all_in, _)) in seats.iter().enumerate() {
            if !all_in {
                continue;
            }
            let winnable: Chips = ledger
                .pots()
                .filter(|pot| pot.is_eligible(seat))
                .map(|pot| pot.chips)
                .sum();
            let matched: Chips = seats.iter().map(|(other, _, _)| (*other).min(chips)).sum();
            prop_assert!(winnable <= matched, "seat {} can win {} but matched {}", seat, winnable, matched);
        }
    }

    #[test]
    fn test_tied_winners_split_fairly(
        bets in prop::collection::vec(1u32..=100, 2..=6),
        dealer in 0usize..6,
        spread in any::<bool>(),
    ) {
        let n = bets.len();
        let dealer = dealer % n;
        let mut players: Vec<Player> = (0..n)
            .map(|i| {
                let mut player = Player::new(format!("p{i}"), 0);
                let value = 2 + i as u8;
                player.cards = vec![Card(value, Suit::Heart), Card(value, Suit::Club)];
                player
            })
            .collect();
        let mut ledger = PotLedger::new(n);
        for (seat, &chips) in bets.iter().enumerate() {
            ledger.commit(seat, chips).unwrap();
        }
        royal_board(&mut ledger);

        let odd_chip = if spread { OddChip::Spread } else { OddChip::LeftOfDealer };
        settle(&mut players, &ledger, dealer, odd_chip);

        let pot: Chips = bets.iter().sum();
        let k = n as Chips;
        let share = pot / k;
        let stacks: Vec<Chips> = players.iter().map(|p| p.chips).collect();
        prop_assert_eq!(stacks.iter().sum::<Chips>(), pot);
        prop_assert!(stacks.iter().all(|&won| won >= share));

        let first = (dealer + 1) % n;
        if spread {
            prop_assert!(stacks.iter().all(|&won| won <= share + 1));
        } else {
            prop_assert_eq!(stacks[first], share + pot % k);
        }
    }
}
