use crate::domain::auction::Call;
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::cards_types::{Card, Strain};
use crate::domain::hands::TrickScope;
use crate::domain::seats::{PlayerRef, Seat};
use crate::domain::state::{DealState, Vulnerability};
use crate::domain::tricks::{legal_moves, play_card, resolve_trick_winner};
use crate::errors::domain::DomainError;

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("hardcoded valid card tokens")
}

fn card(tok: &str) -> Card {
    tok.parse().expect("hardcoded valid card token")
}

fn plays(entries: &[(Seat, &str)]) -> Vec<(Seat, Card)> {
    entries.iter().map(|&(s, tok)| (s, card(tok))).collect()
}

/// Deal with a finalized contract: `bid` by North, everyone else passing.
/// Opening leader is East.
fn deal_with_contract(hands: [Vec<Card>; 4], bid: &str) -> DealState {
    let mut state = DealState::new(1, Seat::North, Vulnerability::None, hands);
    state.record_call(Seat::North, bid.parse::<Call>().unwrap());
    state.record_call(Seat::East, Call::Pass);
    state.record_call(Seat::South, Call::Pass);
    state.record_call(Seat::West, Call::Pass);
    assert!(state.auction.is_closed());
    state
}

fn three_card_deal(bid: &str) -> DealState {
    deal_with_contract(
        [
            cards(&["SA", "HK", "C2"]),
            cards(&["ST", "H3", "C4"]),
            cards(&["SQ", "D5", "C6"]),
            cards(&["S9", "H7", "C8"]),
        ],
        bid,
    )
}

#[test]
fn trump_beats_any_nontrump_regardless_of_rank() {
    let trick = plays(&[
        (Seat::North, "H2"),
        (Seat::East, "SA"),
        (Seat::South, "HK"),
        (Seat::West, "H3"),
    ]);
    assert_eq!(resolve_trick_winner(&trick, Strain::Spades), Some(Seat::East));
}

#[test]
fn highest_of_led_suit_wins_when_no_trump_appears() {
    let trick = plays(&[
        (Seat::North, "H2"),
        (Seat::East, "S5"),
        (Seat::South, "HK"),
        (Seat::West, "H3"),
    ]);
    // Trump is clubs; the spade discard cannot win.
    assert_eq!(resolve_trick_winner(&trick, Strain::Clubs), Some(Seat::South));
}

#[test]
fn offsuit_card_never_wins_at_notrump() {
    let trick = plays(&[
        (Seat::West, "D4"),
        (Seat::North, "SA"),
        (Seat::East, "D6"),
        (Seat::South, "D2"),
    ]);
    assert_eq!(resolve_trick_winner(&trick, Strain::NoTrump), Some(Seat::East));
}

#[test]
fn completed_trick_rotates_lead_and_counts_partnership_tricks() {
    // 1NT by North; East leads.
    let mut state = three_card_deal("1NT");
    assert_eq!(state.next_to_play, Some(Seat::East));

    play_card(&mut state, PlayerRef::Known(Seat::East), card("H3")).unwrap();
    assert_eq!(state.next_to_play, Some(Seat::South));
    play_card(&mut state, PlayerRef::Known(Seat::South), card("D5")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::West), card("H7")).unwrap();
    let result = play_card(&mut state, PlayerRef::Known(Seat::North), card("HK")).unwrap();

    assert!(result.trick_complete);
    assert_eq!(result.winner, Some(Seat::North));
    assert_eq!(state.tricks_won.ns, 1);
    assert_eq!(state.tricks_won.ew, 0);
    assert_eq!(state.next_to_play, Some(Seat::North));
    assert!(state.current_trick.is_empty());
    assert_eq!(state.completed_tricks.len(), 1);
    assert_eq!(state.completed_tricks[0].winner, Seat::North);
}

#[test]
fn unknown_player_on_lead_resolves_to_the_recorded_lead_seat() {
    let mut state = three_card_deal("1NT");
    let result = play_card(&mut state, PlayerRef::Unknown, card("H3")).unwrap();
    assert_eq!(result.seat, Seat::East);
}

#[test]
fn unknown_player_mid_trick_resolves_to_successor_of_previous_play() {
    let mut state = three_card_deal("1NT");
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H3")).unwrap();
    let result = play_card(&mut state, PlayerRef::Unknown, card("D5")).unwrap();
    assert_eq!(result.seat, Seat::South);
}

#[test]
fn unknown_player_with_no_lead_context_is_ambiguous() {
    // Auction still open: nobody is on play and the trick is empty.
    let mut state = DealState::new(
        1,
        Seat::North,
        Vulnerability::None,
        [
            cards(&["SA"]),
            cards(&["ST"]),
            cards(&["SQ"]),
            cards(&["S9"]),
        ],
    );
    assert!(matches!(
        play_card(&mut state, PlayerRef::Unknown, card("SA")),
        Err(DomainError::AmbiguousPlayer(_))
    ));
}

#[test]
fn declarer_playing_dummys_card_is_reattributed_to_dummy() {
    // 1NT by North: South is dummy and holds the D5.
    let mut state = three_card_deal("1NT");
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H3")).unwrap();
    let result = play_card(&mut state, PlayerRef::Known(Seat::North), card("D5")).unwrap();
    assert_eq!(result.seat, Seat::South);
    assert!(!state
        .hands
        .holds(Seat::South, card("D5"), TrickScope::Legal));
    // North's own hand was untouched.
    assert!(state.hands.holds(Seat::North, card("HK"), TrickScope::Legal));
}

#[test]
fn nondeclarer_is_not_reattributed() {
    let mut state = three_card_deal("1NT");
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H3")).unwrap();
    // West naming a card only dummy holds stays an illegal play.
    assert!(matches!(
        play_card(&mut state, PlayerRef::Known(Seat::West), card("D5")),
        Err(DomainError::CardNotInHand { seat: Seat::West, .. })
    ));
}

#[test]
fn rejected_play_leaves_state_untouched() {
    let mut state = three_card_deal("1NT");
    let before = state.hands.plays_logged();
    assert!(play_card(&mut state, PlayerRef::Known(Seat::East), card("D2")).is_err());
    assert_eq!(state.hands.plays_logged(), before);
    assert!(state.current_trick.is_empty());
    assert_eq!(state.next_to_play, Some(Seat::East));
}

#[test]
fn tricks_resolve_notrump_style_before_a_contract_exists() {
    // No calls at all; plays with explicit seats must not crash.
    let mut state = DealState::new(
        7,
        Seat::North,
        Vulnerability::None,
        [
            cards(&["H2"]),
            cards(&["S5"]),
            cards(&["HK"]),
            cards(&["H3"]),
        ],
    );
    play_card(&mut state, PlayerRef::Known(Seat::North), card("H2")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::East), card("S5")).unwrap();
    play_card(&mut state, PlayerRef::Known(Seat::South), card("HK")).unwrap();
    let result = play_card(&mut state, PlayerRef::Known(Seat::West), card("H3")).unwrap();
    // Best-effort ordering: the spade is treated as a discard.
    assert_eq!(result.winner, Some(Seat::South));
}

#[test]
fn legal_moves_follow_the_led_suit_when_possible() {
    let mut state = three_card_deal("1NT");
    play_card(&mut state, PlayerRef::Known(Seat::East), card("H3")).unwrap();
    // West holds H7 and must follow hearts.
    assert_eq!(legal_moves(&state, Seat::West), cards(&["H7"]));
    // South is void in hearts: anything goes.
    assert_eq!(legal_moves(&state, Seat::South).len(), 3);
}
