use crate::domain::auction::{Auction, Call, Doubling};
use crate::domain::cards_types::Strain;
use crate::domain::seats::Seat;

fn call(tok: &str) -> Call {
    tok.parse::<Call>().expect("hardcoded valid call token")
}

fn run_auction(calls: &[(Seat, &str)]) -> Auction {
    let mut auction = Auction::new();
    for &(seat, tok) in calls {
        auction.record_call(seat, call(tok));
    }
    auction
}

#[test]
fn call_tokens_roundtrip() {
    for tok in ["P", "X", "XX", "1C", "3NT", "7S"] {
        assert_eq!(call(tok).to_string(), tok);
    }
    assert_eq!(call("pass"), Call::Pass);
    assert_eq!(call("3n"), Call::Bid { level: 3, strain: Strain::NoTrump });
    assert!("8H".parse::<Call>().is_err());
    assert!("0NT".parse::<Call>().is_err());
    assert!("XXX".parse::<Call>().is_err());
}

#[test]
fn auction_stays_open_until_three_trailing_passes() {
    let mut auction = Auction::new();
    auction.record_call(Seat::North, call("1H"));
    auction.record_call(Seat::East, call("P"));
    auction.record_call(Seat::South, call("P"));
    assert!(!auction.is_closed());
    auction.record_call(Seat::West, call("P"));
    assert!(auction.is_closed());
    assert!(auction.contract().is_some());
}

#[test]
fn passed_out_deal_finalizes_no_contract() {
    let auction = run_auction(&[
        (Seat::North, "P"),
        (Seat::East, "P"),
        (Seat::South, "P"),
        (Seat::West, "P"),
    ]);
    assert!(auction.is_closed());
    assert!(auction.contract().is_none());
}

#[test]
fn declarer_is_first_of_partnership_to_name_final_strain() {
    // 1H(N) P 2H(S) P 4H(N) P P P: North named hearts first for NS.
    let auction = run_auction(&[
        (Seat::North, "1H"),
        (Seat::East, "P"),
        (Seat::South, "2H"),
        (Seat::West, "P"),
        (Seat::North, "4H"),
        (Seat::East, "P"),
        (Seat::South, "P"),
        (Seat::West, "P"),
    ]);
    let contract = auction.contract().expect("contract");
    assert_eq!(contract.level, 4);
    assert_eq!(contract.strain, Strain::Hearts);
    assert_eq!(contract.declarer, Seat::North);
    assert_eq!(contract.dummy(), Seat::South);
    assert_eq!(contract.opening_leader(), Seat::East);
}

#[test]
fn declarer_can_differ_from_final_bidder() {
    // South named hearts first; North's raise still makes South declarer.
    let auction = run_auction(&[
        (Seat::South, "1H"),
        (Seat::West, "P"),
        (Seat::North, "3H"),
        (Seat::East, "P"),
        (Seat::South, "P"),
        (Seat::West, "P"),
    ]);
    let contract = auction.contract().expect("contract");
    assert_eq!(contract.level, 3);
    assert_eq!(contract.declarer, Seat::South);
    assert_eq!(contract.opening_leader(), Seat::West);
}

#[test]
fn opponents_bid_of_same_strain_does_not_steal_declarership() {
    // East bid spades before North, but East-West did not win the auction.
    let auction = run_auction(&[
        (Seat::East, "1S"),
        (Seat::South, "P"),
        (Seat::West, "P"),
        (Seat::North, "2S"),
        (Seat::East, "P"),
        (Seat::South, "P"),
        (Seat::West, "P"),
    ]);
    let contract = auction.contract().expect("contract");
    assert_eq!(contract.declarer, Seat::North);
}

#[test]
fn double_and_redouble_set_doubling_state() {
    let doubled = run_auction(&[
        (Seat::North, "1S"),
        (Seat::East, "X"),
        (Seat::South, "P"),
        (Seat::West, "P"),
        (Seat::North, "P"),
    ]);
    assert_eq!(doubled.contract().expect("contract").doubling, Doubling::Doubled);

    let redoubled = run_auction(&[
        (Seat::North, "1S"),
        (Seat::East, "X"),
        (Seat::South, "XX"),
        (Seat::West, "P"),
        (Seat::North, "P"),
        (Seat::East, "P"),
    ]);
    assert_eq!(
        redoubled.contract().expect("contract").doubling,
        Doubling::Redoubled
    );
}

#[test]
fn doubling_of_an_earlier_bid_does_not_survive_a_later_bid() {
    // 1S(N) X(E) 2S(S): the double applied to 1S; 2S plays undoubled.
    let auction = run_auction(&[
        (Seat::North, "1S"),
        (Seat::East, "X"),
        (Seat::South, "2S"),
        (Seat::West, "P"),
        (Seat::North, "P"),
        (Seat::East, "P"),
    ]);
    let contract = auction.contract().expect("contract");
    assert_eq!(contract.level, 2);
    assert_eq!(contract.doubling, Doubling::Undoubled);
}

#[test]
fn calls_after_closure_are_ignored() {
    let mut auction = run_auction(&[
        (Seat::North, "1H"),
        (Seat::East, "P"),
        (Seat::South, "P"),
        (Seat::West, "P"),
    ]);
    let before = auction.calls().len();
    auction.record_call(Seat::North, call("2H"));
    assert_eq!(auction.calls().len(), before);
    assert_eq!(auction.contract().expect("contract").level, 1);
}
