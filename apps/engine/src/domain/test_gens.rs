// Proptest generators for domain types.
// Generators keep cards unique so generated tricks and deals are valid.

use proptest::prelude::*;

use crate::domain::{Card, Rank, Seat, Strain, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn strain() -> impl Strategy<Value = Strain> {
    prop_oneof![
        Just(Strain::Clubs),
        Just(Strain::Diamonds),
        Just(Strain::Hearts),
        Just(Strain::Spades),
        Just(Strain::NoTrump),
    ]
}

pub fn seat() -> impl Strategy<Value = Seat> {
    prop_oneof![
        Just(Seat::North),
        Just(Seat::East),
        Just(Seat::South),
        Just(Seat::West),
    ]
}

fn full_pack() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for &suit in &[Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades] {
        for &rank in &Rank::ALL {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// A vector of N unique cards, drawn as a shuffled prefix of the pack.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(full_pack())
        .prop_shuffle()
        .prop_map(move |mut cards| {
            cards.truncate(count);
            cards
        })
}

/// A full 52-card deal: four hands of 13 unique cards.
pub fn full_deal() -> impl Strategy<Value = [Vec<Card>; 4]> {
    unique_cards(52).prop_map(|cards| {
        let mut hands: [Vec<Card>; 4] = [vec![], vec![], vec![], vec![]];
        for (i, card) in cards.into_iter().enumerate() {
            hands[i % 4].push(card);
        }
        hands
    })
}

/// Complete trick: (leader, plays in rotation order, trump strain).
pub fn complete_trick() -> impl Strategy<Value = (Seat, Vec<(Seat, Card)>, Strain)> {
    (seat(), unique_cards(4), strain()).prop_map(|(leader, cards, trump)| {
        let mut plays = Vec::with_capacity(4);
        let mut turn = leader;
        for &card in cards.iter().take(4) {
            plays.push((turn, card));
            turn = turn.next();
        }
        (leader, plays, trump)
    })
}
