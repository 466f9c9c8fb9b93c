use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::cards_types::Card;
use crate::domain::hands::{DealHands, TrickScope};
use crate::domain::seats::Seat;
use crate::errors::domain::DomainError;

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("hardcoded valid card tokens")
}

fn card(tok: &str) -> Card {
    tok.parse().expect("hardcoded valid card token")
}

fn small_hands() -> DealHands {
    DealHands::new([
        cards(&["SA", "H2", "C3"]),
        cards(&["SK", "H5", "C4"]),
        cards(&["SQ", "H7", "C6"]),
        cards(&["SJ", "H9", "C8"]),
    ])
}

#[test]
fn remaining_cards_rederives_from_the_play_log() {
    let mut hands = small_hands();
    hands.record_play(Seat::North, card("SA")).unwrap();
    hands.record_play(Seat::East, card("SK")).unwrap();

    assert_eq!(hands.remaining_cards(Seat::North, TrickScope::Legal), cards(&["H2", "C3"]));
    assert_eq!(hands.remaining_cards(Seat::East, TrickScope::Legal), cards(&["H5", "C4"]));
    // Derivation is idempotent: asking twice changes nothing.
    assert_eq!(hands.remaining_cards(Seat::North, TrickScope::Legal), cards(&["H2", "C3"]));
    assert_eq!(hands.remaining_cards(Seat::South, TrickScope::Legal), cards(&["SQ", "H7", "C6"]));
}

#[test]
fn open_trick_plays_stay_in_the_air_for_the_oracle() {
    let mut hands = small_hands();
    hands.record_play(Seat::North, card("SA")).unwrap();

    assert!(!hands.holds(Seat::North, card("SA"), TrickScope::Legal));
    assert!(hands.holds(Seat::North, card("SA"), TrickScope::InTheAir));

    hands.close_trick();
    assert!(!hands.holds(Seat::North, card("SA"), TrickScope::InTheAir));
}

#[test]
fn a_card_can_be_removed_at_most_once() {
    let mut hands = small_hands();
    hands.record_play(Seat::North, card("SA")).unwrap();
    assert_eq!(
        hands.record_play(Seat::North, card("SA")),
        Err(DomainError::CardNotInHand {
            seat: Seat::North,
            card: card("SA")
        })
    );
    // The rejected play did not touch the log.
    assert_eq!(hands.plays_logged(), 1);
}

#[test]
fn playing_a_card_the_seat_never_held_is_rejected() {
    let mut hands = small_hands();
    assert_eq!(
        hands.record_play(Seat::North, card("D2")),
        Err(DomainError::CardNotInHand {
            seat: Seat::North,
            card: card("D2")
        })
    );
}

#[test]
fn exhausted_hand_is_its_own_error() {
    let mut hands = small_hands();
    for tok in ["SA", "H2", "C3"] {
        hands.record_play(Seat::North, card(tok)).unwrap();
    }
    assert_eq!(
        hands.record_play(Seat::North, card("D2")),
        Err(DomainError::HandExhausted(Seat::North))
    );
}

#[test]
fn undealt_seat_degrades_to_an_empty_hand() {
    let hands = DealHands::new([cards(&["SA"]), Vec::new(), Vec::new(), Vec::new()]);
    assert!(hands.remaining_cards(Seat::West, TrickScope::Legal).is_empty());
}
