use proptest::prelude::*;

use crate::domain::auction::Call;
use crate::domain::cards_types::{Card, Strain};
use crate::domain::hands::TrickScope;
use crate::domain::seats::{PlayerRef, Seat};
use crate::domain::state::{DealState, Vulnerability};
use crate::domain::tricks::{legal_moves, play_card, resolve_trick_winner};
use crate::domain::{test_gens, test_prelude};

/// Independent trick-winner oracle: collect the candidate cards (trumps if
/// any were played, otherwise lead-suit cards) and take the highest rank.
fn oracle_trick_winner(plays: &[(Seat, Card)], trump: Strain) -> Seat {
    let lead_suit = plays[0].1.suit;
    let relevant = match trump.trump_suit() {
        Some(ts) if plays.iter().any(|(_, c)| c.suit == ts) => ts,
        _ => lead_suit,
    };
    plays
        .iter()
        .filter(|(_, c)| c.suit == relevant)
        .max_by_key(|(_, c)| c.rank)
        .map(|&(s, _)| s)
        .expect("lead suit always has at least the led card")
}

fn deal_with_contract(hands: [Vec<Card>; 4], strain: Strain) -> DealState {
    let mut state = DealState::new(1, Seat::North, Vulnerability::None, hands);
    state.record_call(Seat::North, Call::Bid { level: 1, strain });
    state.record_call(Seat::East, Call::Pass);
    state.record_call(Seat::South, Call::Pass);
    state.record_call(Seat::West, Call::Pass);
    state
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// The winner walk must agree with an independent oracle for every
    /// complete trick and trump choice.
    #[test]
    fn prop_trick_winner_matches_oracle(
        trick_data in test_gens::complete_trick(),
    ) {
        let (_leader, plays, trump) = trick_data;
        let winner = resolve_trick_winner(&plays, trump);
        prop_assert_eq!(winner, Some(oracle_trick_winner(&plays, trump)));
    }

    /// Off-suit, non-trump cards can never win.
    #[test]
    fn prop_winner_holds_a_relevant_suit(
        trick_data in test_gens::complete_trick(),
    ) {
        let (_leader, plays, trump) = trick_data;
        let winner = resolve_trick_winner(&plays, trump).unwrap();
        let winning_card = plays.iter().find(|(s, _)| *s == winner).unwrap().1;
        let lead_suit = plays[0].1.suit;
        let is_relevant = winning_card.suit == lead_suit
            || trump.trump_suit() == Some(winning_card.suit);
        prop_assert!(is_relevant, "winner played {:?} on {:?} lead", winning_card, lead_suit);
    }

    /// Playing out a whole random deal: every trick resolves, the
    /// partnership tallies always sum to the completed-trick count, and
    /// after 13 tricks the sum is exactly 13 with all hands empty.
    #[test]
    fn prop_full_playout_conserves_tricks(
        hands in test_gens::full_deal(),
        strain in test_gens::strain(),
        choices in proptest::collection::vec(any::<u32>(), 52),
    ) {
        let mut state = deal_with_contract(hands, strain);
        let mut step = 0usize;
        while !state.is_complete() {
            let seat = state.next_to_play.expect("someone is on play");
            let legal = legal_moves(&state, seat);
            prop_assert!(!legal.is_empty());
            let card = legal[choices[step] as usize % legal.len()];
            let result = play_card(&mut state, PlayerRef::Known(seat), card).unwrap();
            prop_assert_eq!(result.seat, seat);
            step += 1;
            prop_assert_eq!(
                state.tricks_won.total(),
                state.tricks_played(),
                "tally must track completed tricks"
            );
        }
        prop_assert_eq!(step, 52);
        prop_assert_eq!(state.tricks_played(), 13);
        prop_assert_eq!(state.tricks_won.ns + state.tricks_won.ew, 13);
        for seat in Seat::ALL {
            prop_assert!(state.hands.remaining_cards(seat, TrickScope::Legal).is_empty());
        }
    }

    /// Winners lead the next trick.
    #[test]
    fn prop_winner_leads_next_trick(
        hands in test_gens::full_deal(),
        strain in test_gens::strain(),
        choices in proptest::collection::vec(any::<u32>(), 8),
    ) {
        let mut state = deal_with_contract(hands, strain);
        let mut step = 0usize;
        let mut last_winner = None;
        while step < 8 {
            let seat = state.next_to_play.unwrap();
            if let Some(winner) = last_winner {
                if state.current_trick.is_empty() {
                    prop_assert_eq!(seat, winner);
                }
            }
            let legal = legal_moves(&state, seat);
            let card = legal[choices[step] as usize % legal.len()];
            let result = play_card(&mut state, PlayerRef::Known(seat), card).unwrap();
            if result.trick_complete {
                last_winner = result.winner;
            }
            step += 1;
        }
    }
}
