//! Hand Evaluation Example
//!
//! Ranks a few hands, compares them at a shared board and shows a tie.

use holdem_engine::entities::{ACE, Card, JACK, KING, QUEEN, Suit};
use holdem_engine::functional::{argmax, eval, rank};

fn main() {
    println!("=== Hold'em Hand Evaluation Example ===\n");

    // Example 1: Each category
    let examples = [
        (
            "Royal Flush",
            [
                Card(ACE, Suit::Spade),
                Card(KING, Suit::Spade),
                Card(QUEEN, Suit::Spade),
                Card(JACK, Suit::Spade),
                Card(10, Suit::Spade),
            ],
        ),
        (
            "Full House",
            [
                Card(10, Suit::Spade),
                Card(10, Suit::Heart),
                Card(10, Suit::Diamond),
                Card(6, Suit::Club),
                Card(6, Suit::Spade),
            ],
        ),
        (
            "Two Pair",
            [
                Card(QUEEN, Suit::Spade),
                Card(QUEEN, Suit::Heart),
                Card(5, Suit::Diamond),
                Card(5, Suit::Club),
                Card(2, Suit::Spade),
            ],
        ),
        (
            "Ace-low run (no wheel, so high card)",
            [
                Card(ACE, Suit::Spade),
                Card(2, Suit::Heart),
                Card(3, Suit::Diamond),
                Card(4, Suit::Club),
                Card(5, Suit::Spade),
            ],
        ),
    ];
    for (name, hand) in &examples {
        let ranked = rank(hand);
        println!("{name}: {} (score {}) {ranked}", ranked.category, ranked.category.score());
    }

    // Example 2: Two players at a shared board
    println!("\nExample 2: Showdown at a shared board");
    let board = [
        Card(ACE, Suit::Club),
        Card(10, Suit::Club),
        Card(9, Suit::Diamond),
        Card(4, Suit::Heart),
        Card(2, Suit::Spade),
    ];
    let holes = [
        ("alice", [Card(ACE, Suit::Heart), Card(KING, Suit::Diamond)]),
        ("bob", [Card(ACE, Suit::Spade), Card(QUEEN, Suit::Heart)]),
        ("carol", [Card(ACE, Suit::Diamond), Card(KING, Suit::Spade)]),
    ];
    let hands: Vec<_> = holes
        .iter()
        .filter_map(|(_, hole)| {
            let cards: Vec<Card> = hole.iter().chain(&board).copied().collect();
            eval(&cards)
        })
        .collect();
    for ((name, _), hand) in holes.iter().zip(&hands) {
        println!("{name}: {hand}");
    }
    let winners: Vec<_> = argmax(&hands).into_iter().map(|i| holes[i].0).collect();
    println!("Winner(s): {winners:?}");

    println!("\n=== End of Hand Evaluation Example ===");
}
