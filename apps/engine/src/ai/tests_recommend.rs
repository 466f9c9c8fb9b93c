use std::collections::HashMap;

use crate::ai::dd_table::DdTable;
use crate::ai::recommend::{recommend, NoRecommendation, RecommendInputs};
use crate::domain::auction::Call;
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::cards_types::{Card, Suit};
use crate::domain::seats::{PlayerRef, Seat};
use crate::domain::state::{DealState, Vulnerability};
use crate::domain::tricks::play_card;

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("hardcoded valid card tokens")
}

fn card(tok: &str) -> Card {
    tok.parse().expect("hardcoded valid card token")
}

fn no_inputs() -> RecommendInputs<'static> {
    RecommendInputs {
        solved: None,
        table: None,
        oracle_failed: false,
    }
}

/// Contract `bid` by North; East on lead.
fn deal(hands: [Vec<Card>; 4], bid: &str) -> DealState {
    let mut state = DealState::new(1, Seat::North, Vulnerability::None, hands);
    state.record_call(Seat::North, bid.parse::<Call>().unwrap());
    state.record_call(Seat::East, Call::Pass);
    state.record_call(Seat::South, Call::Pass);
    state.record_call(Seat::West, Call::Pass);
    state
}

fn standard_hands() -> [Vec<Card>; 4] {
    [
        cards(&["SA", "HK", "H2", "C5"]),
        cards(&["SK", "H9", "D3", "C2"]),
        cards(&["SQ", "H8", "D7", "C7"]),
        cards(&["S2", "HQ", "H3", "D9"]),
    ]
}

#[test]
fn no_recommendation_while_the_auction_is_open() {
    let state = DealState::new(1, Seat::North, Vulnerability::None, standard_hands());
    assert_eq!(
        recommend(&state, no_inputs()),
        Err(NoRecommendation::NoActivePlayer)
    );
}

#[test]
fn follows_high_when_it_wins_the_trick() {
    let mut state = deal(standard_hands(), "1NT");
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H9")).unwrap();
    // South holds H8 only... play to West's turn instead: West holds HQ, H3.
    play_card(&mut state, PlayerRef::Known(Seat::South), card("H8")).unwrap();
    let rec = recommend(&state, no_inputs()).unwrap();
    assert_eq!(rec.seat, Seat::West);
    assert_eq!(rec.card, card("HQ"));
    assert!(!rec.degraded);
}

#[test]
fn follows_low_when_the_trick_cannot_be_won() {
    let mut state = deal(standard_hands(), "1NT");
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H9")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::South), card("H8")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::West), card("HQ")).unwrap();
    // North holds HK, H2: the king would win, so it is chosen...
    let rec = recommend(&state, no_inputs()).unwrap();
    assert_eq!(rec.card, card("HK"));

    // ...but if only the deuce remained it would be thrown low. Rebuild
    // with North holding small hearts only.
    let mut state = deal(
        [
            cards(&["SA", "H4", "H2", "C5"]),
            cards(&["SK", "H9", "D3", "C2"]),
            cards(&["SQ", "H8", "D7", "C7"]),
            cards(&["S2", "HQ", "H3", "D9"]),
        ],
        "1NT",
    );
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H9")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::South), card("H8")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::West), card("HQ")).unwrap();
    let rec = recommend(&state, no_inputs()).unwrap();
    assert_eq!(rec.card, card("H2"));
}

#[test]
fn ruffs_low_when_void_in_a_suit_contract() {
    let mut state = deal(
        [
            cards(&["SA", "S3", "S2", "C5"]),
            cards(&["SK", "H9", "D3", "C2"]),
            cards(&["SQ", "H8", "D7", "C7"]),
            cards(&["S5", "HQ", "H3", "D9"]),
        ],
        "1S",
    );
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H9")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::South), card("H8")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::West), card("HQ")).unwrap();
    // North is void in hearts and spades are trumps: ruff with the deuce.
    let rec = recommend(&state, no_inputs()).unwrap();
    assert_eq!(rec.card, card("S2"));
}

#[test]
fn discards_from_the_longest_suit_at_notrump() {
    let mut state = deal(
        [
            cards(&["D8", "D5", "D2", "C9"]),
            cards(&["SK", "H9", "D3", "C2"]),
            cards(&["SQ", "H8", "D7", "C7"]),
            cards(&["S5", "HQ", "H3", "D9"]),
        ],
        "1NT",
    );
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H9")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::South), card("H8")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::West), card("HQ")).unwrap();
    // North cannot follow and has no trumps: lowest diamond goes.
    let rec = recommend(&state, no_inputs()).unwrap();
    assert_eq!(rec.card, card("D2"));
}

#[test]
fn leads_high_from_the_table_ranked_suit() {
    let state = deal(standard_hands(), "1NT");
    let mut by_suit = HashMap::new();
    by_suit.insert(Suit::Diamonds, 5u8);
    by_suit.insert(Suit::Clubs, 2u8);
    let mut tricks = HashMap::new();
    tricks.insert(Seat::East, by_suit);
    let table = DdTable::new(tricks);

    let rec = recommend(
        &state,
        RecommendInputs {
            solved: None,
            table: Some(&table),
            oracle_failed: false,
        },
    )
    .unwrap();
    assert_eq!(rec.seat, Seat::East);
    assert_eq!(rec.card, card("D3"));
}

#[test]
fn leads_high_from_length_without_a_table() {
    let state = deal(
        [
            cards(&["SA", "HK", "H2", "C5"]),
            cards(&["H9", "H7", "H4", "C2"]),
            cards(&["SQ", "H8", "D7", "C7"]),
            cards(&["S2", "HQ", "H3", "D9"]),
        ],
        "1NT",
    );
    let rec = recommend(&state, no_inputs()).unwrap();
    assert_eq!(rec.card, card("H9"));
}

#[test]
fn oracle_best_card_wins_when_valid() {
    let state = deal(standard_hands(), "1NT");
    let solved = vec![(card("C2"), 3u8), (card("SK"), 6u8), (card("H9"), 4u8)];
    let rec = recommend(
        &state,
        RecommendInputs {
            solved: Some(&solved),
            table: None,
            oracle_failed: false,
        },
    )
    .unwrap();
    assert_eq!(rec.card, card("SK"));
    assert!(!rec.degraded);
}

#[test]
fn invalid_oracle_card_is_discarded_not_surfaced() {
    let state = deal(standard_hands(), "1NT");
    // The oracle names a card East does not hold.
    let solved = vec![(card("DA"), 13u8)];
    let rec = recommend(
        &state,
        RecommendInputs {
            solved: Some(&solved),
            table: None,
            oracle_failed: false,
        },
    )
    .unwrap();
    assert_ne!(rec.card, card("DA"));
    let east_hand = cards(&["SK", "H9", "D3", "C2"]);
    assert!(east_hand.contains(&rec.card));
}

#[test]
fn oracle_failure_degrades_but_still_recommends() {
    let state = deal(standard_hands(), "1NT");
    let rec = recommend(
        &state,
        RecommendInputs {
            solved: None,
            table: None,
            oracle_failed: true,
        },
    )
    .unwrap();
    assert!(rec.degraded);
    assert!(rec.explanation.contains("double dummy unavailable"));
}

#[test]
fn exhausted_hand_is_reported_not_invented() {
    let mut state = deal(
        [cards(&["SA"]), cards(&["SK"]), cards(&["SQ"]), cards(&["S2"])],
        "1NT",
    );
    play_card(&mut state, PlayerRef::Known(Seat::East), card("SK")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::South), card("SQ")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::West), card("S2")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::North), card("SA")).unwrap();
    // North won but has nothing left to lead.
    assert_eq!(
        recommend(&state, no_inputs()),
        Err(NoRecommendation::HandExhausted(Seat::North))
    );
}

mod props {
    use proptest::prelude::*;

    use super::*;
    use crate::domain::hands::TrickScope;
    use crate::domain::test_gens;
    use crate::domain::tricks::legal_moves;

    proptest! {
        /// The engine never recommends a card outside the player's derived
        /// remaining hand, for any reachable position in a random playout.
        #[test]
        fn prop_recommendation_is_always_held(
            hands in test_gens::full_deal(),
            strain in test_gens::strain(),
            choices in proptest::collection::vec(any::<u32>(), 52),
        ) {
            let mut state = deal(hands, &format!("1{}", strain.token()));
            let mut step = 0usize;
            while !state.is_complete() {
                match recommend(&state, no_inputs()) {
                    Ok(rec) => {
                        let held = state
                            .hands
                            .remaining_cards(rec.seat, TrickScope::Legal);
                        prop_assert!(held.contains(&rec.card));
                    }
                    Err(reason) => {
                        prop_assert_eq!(reason, NoRecommendation::NoActivePlayer);
                    }
                }
                let seat = state.next_to_play.unwrap();
                let legal = legal_moves(&state, seat);
                let card = legal[choices[step] as usize % legal.len()];
                play_card(&mut state, crate::domain::seats::PlayerRef::Known(seat), card).unwrap();
                step += 1;
            }
        }
    }
}
