//! Hand Evaluation Example
//!
//! Demonstrates how hands are scored and how a showdown picks its winner.

use douji::entities::{BLACK_JOKER, Card, RED_JOKER, SPECIAL, Suit, WILDCARD};
use douji::functional::eval;

fn show(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    println!("=== Douji Hand Evaluation Example ===\n");

    // Example 1: Every scoring rule, one hand each
    println!("Example 1: Scoring rules");

    let examples = vec![
        ("Plain cards", vec![
            Card(15, Suit::Spade),
            Card(13, Suit::Heart),
            Card(9, Suit::Club),
        ]),
        ("Three of a kind", vec![
            Card(7, Suit::Spade),
            Card(7, Suit::Heart),
            Card(7, Suit::Diamond),
            Card(12, Suit::Club),
        ]),
        ("Two triples, lowest promoted", vec![
            Card(5, Suit::Spade),
            Card(5, Suit::Heart),
            Card(5, Suit::Club),
            Card(10, Suit::Spade),
            Card(10, Suit::Heart),
            Card(10, Suit::Club),
        ]),
        ("Four of a kind", vec![
            Card(8, Suit::Spade),
            Card(8, Suit::Heart),
            Card(8, Suit::Diamond),
            Card(8, Suit::Club),
        ]),
        ("Wildcard lifts a pair", vec![
            WILDCARD,
            Card(11, Suit::Spade),
            Card(11, Suit::Club),
            Card(4, Suit::Diamond),
        ]),
        ("Both jokers", vec![RED_JOKER, BLACK_JOKER, Card(6, Suit::Club)]),
        ("Jokers and wildcard", vec![RED_JOKER, BLACK_JOKER, WILDCARD]),
        ("Special card", vec![SPECIAL, Card(3, Suit::Heart)]),
        ("Five of a kind", vec![
            WILDCARD,
            Card(15, Suit::Spade),
            Card(15, Suit::Heart),
            Card(15, Suit::Diamond),
            Card(15, Suit::Club),
        ]),
    ];

    for (name, hand) in &examples {
        let evaluation = eval(hand);
        let quad = if evaluation.four_of_a_kind { " (four of a kind)" } else { "" };
        println!("{name:<30} {:<24} => {}{quad}", show(hand), evaluation.score);
    }

    // Example 2: A showdown between three final hands
    println!("\n\nExample 2: Showdown");

    let hands = [
        ("Liu", vec![
            Card(10, Suit::Heart),
            Card(10, Suit::Diamond),
            Card(10, Suit::Club),
            Card(3, Suit::Spade),
            Card(4, Suit::Heart),
        ]),
        ("Wang", vec![
            Card(6, Suit::Spade),
            Card(6, Suit::Club),
            Card(6, Suit::Heart),
            Card(6, Suit::Diamond),
            Card(3, Suit::Club),
        ]),
        ("Gu", vec![
            SPECIAL,
            RED_JOKER,
            BLACK_JOKER,
            Card(15, Suit::Spade),
            Card(13, Suit::Spade),
        ]),
    ];

    let evaluations: Vec<_> = hands.iter().map(|(_, hand)| eval(hand)).collect();
    for ((name, hand), evaluation) in hands.iter().zip(&evaluations) {
        println!("{name:<5} {:<24} => {}", show(hand), evaluation.score);
    }

    // A lone four of a kind wins outright, whatever the scores say.
    let quads: Vec<_> = evaluations
        .iter()
        .enumerate()
        .filter(|(_, evaluation)| evaluation.four_of_a_kind)
        .map(|(i, _)| i)
        .collect();
    let best = evaluations.iter().map(|e| e.score).max().unwrap_or_default();
    let leaders: Vec<_> = evaluations
        .iter()
        .enumerate()
        .filter(|(_, evaluation)| evaluation.score == best)
        .map(|(i, _)| i)
        .collect();

    match (quads.as_slice(), leaders.as_slice()) {
        ([holder], _) => println!("\nWinner: {} (four of a kind)", hands[*holder].0),
        ([], [leader]) => println!("\nWinner: {} (highest score)", hands[*leader].0),
        _ => println!("\nTie: the pot bombs and carries over"),
    }

    println!("\n=== End of Hand Evaluation Example ===");
}
