//! Property-based tests for hand evaluation.
//!
//! These check the evaluator's ordering laws across random hands: category
//! dominates tiebreak, card order never matters, and seven-card evaluation
//! is exactly the best of its 21 five-card subsets.

use holdem_engine::game::{
    entities::{ACE, Card, JACK, KING, QUEEN, Suit},
    functional::{Category, HandRank, argmax, best_hands, eval, rank},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn card_strategy() -> impl Strategy<Value = Card> {
    (2u8..=ACE, 0usize..4).prop_map(|(value, suit)| Card(value, Suit::ALL[suit]))
}

fn unique_cards_strategy(n: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), n).prop_filter("cards must be unique", |cards| {
        let set: BTreeSet<_> = cards.iter().collect();
        set.len() == cards.len()
    })
}

fn five(cards: &[Card]) -> [Card; 5] {
    <[Card; 5]>::try_from(cards).unwrap()
}

fn five_card_subsets(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut subsets = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        subsets.push([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
    subsets
}

proptest! {
    #[test]
    fn test_rank_ignores_card_order(
        (cards, shuffled) in unique_cards_strategy(5)
            .prop_flat_map(|cards| (Just(cards.clone()), Just(cards).prop_shuffle()))
    ) {
        let original = rank(&five(&cards));
        let permuted = rank(&five(&shuffled));
        prop_assert_eq!(original.category, permuted.category);
        prop_assert_eq!(original.values().collect::<Vec<_>>(), permuted.values().collect::<Vec<_>>());
        prop_assert_eq!(original, permuted);
    }

    #[test]
    fn test_category_dominates_tiebreak(
        a in unique_cards_strategy(5),
        b in unique_cards_strategy(5),
    ) {
        let a = rank(&five(&a));
        let b = rank(&five(&b));
        if a.category > b.category {
            prop_assert!(a > b, "{} should beat {}", a, b);
        } else if a.category < b.category {
            prop_assert!(a < b, "{} should lose to {}", a, b);
        }
    }

    #[test]
    fn test_tiebreak_lists_all_five_cards(cards in unique_cards_strategy(5)) {
        let hand = rank(&five(&cards));
        let listed: BTreeSet<_> = hand.tiebreak.iter().collect();
        let given: BTreeSet<_> = cards.iter().collect();
        prop_assert_eq!(listed, given);
    }

    #[test]
    fn test_seven_card_eval_is_best_subset(cards in unique_cards_strategy(7)) {
        let best = eval(&cards).unwrap();
        let subsets = five_card_subsets(&cards);
        prop_assert_eq!(subsets.len(), 21);

        let max = subsets.iter().map(rank).max().unwrap();
        prop_assert_eq!(&best, &max);
        prop_assert!(subsets.iter().map(rank).all(|hand| hand <= best));
    }

    #[test]
    fn test_best_hands_keeps_every_tie(cards in unique_cards_strategy(7)) {
        let best = best_hands(&cards);
        let expected = five_card_subsets(&cards)
            .iter()
            .map(rank)
            .filter(|hand| *hand == best[0])
            .count();
        prop_assert_eq!(best.len(), expected);
        prop_assert!(best.iter().all(|hand| *hand == best[0]));
    }

    #[test]
    fn test_eval_needs_five_cards(n in 0usize..5, cards in unique_cards_strategy(4)) {
        let cards = &cards[..n.min(cards.len())];
        prop_assert!(eval(cards).is_none());
    }

    #[test]
    fn test_argmax_identical_hands_all_win(cards in unique_cards_strategy(5)) {
        let hand = rank(&five(&cards));
        let winners = argmax(&[hand.clone(), hand.clone(), hand]);
        prop_assert_eq!(winners, vec![0, 1, 2]);
    }

    #[test]
    fn test_argmax_returns_sorted_valid_indices(
        hands in prop::collection::vec(unique_cards_strategy(5), 1..=10)
    ) {
        let evaluated: Vec<HandRank> = hands.iter().map(|cards| rank(&five(cards))).collect();
        let winners = argmax(&evaluated);
        prop_assert!(!winners.is_empty());

        let mut sorted = winners.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(&winners, &sorted);

        let best = evaluated.iter().max().unwrap();
        for (i, hand) in evaluated.iter().enumerate() {
            prop_assert_eq!(winners.contains(&i), hand == best);
        }
    }
}

#[test]
fn test_royal_flush_in_hearts() {
    let hand = [
        Card(ACE, Suit::Heart),
        Card(KING, Suit::Heart),
        Card(QUEEN, Suit::Heart),
        Card(JACK, Suit::Heart),
        Card(10, Suit::Heart),
    ];
    let ranked = rank(&hand);
    assert_eq!(ranked.category, Category::RoyalFlush);
    assert_eq!(ranked.category.score(), 10);
    assert_eq!(ranked.tiebreak, hand.to_vec());
}

#[test]
fn test_board_plays_for_everyone() {
    let board = [
        Card(ACE, Suit::Spade),
        Card(KING, Suit::Spade),
        Card(QUEEN, Suit::Spade),
        Card(JACK, Suit::Spade),
        Card(10, Suit::Spade),
    ];
    let hands: Vec<HandRank> = [
        [Card(2, Suit::Heart), Card(3, Suit::Club)],
        [Card(ACE, Suit::Heart), Card(ACE, Suit::Club)],
    ]
    .iter()
    .map(|hole| {
        let cards: Vec<Card> = hole.iter().chain(&board).copied().collect();
        eval(&cards).unwrap()
    })
    .collect();
    assert_eq!(argmax(&hands), vec![0, 1]);
}
