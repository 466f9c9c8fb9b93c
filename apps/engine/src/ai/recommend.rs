//! Card-play recommendation engine.
//!
//! Preference ladder: a validated live double-dummy result first, then the
//! rule-based heuristics informed by the static lead table. Every oracle
//! suggestion is checked against the player's derived legal hand before it
//! can surface; an illegal suggestion is logged and dropped, never shown.

use crate::domain::cards_logic::{
    card_beats, current_winning_play, highest_in_suit, longest_suit, lowest_in_suit,
};
use crate::domain::cards_types::{Card, Strain, Suit};
use crate::domain::hands::TrickScope;
use crate::domain::seats::Seat;
use crate::domain::snapshot::RecommendationView;
use crate::domain::state::DealState;

use super::dd_table::DdTable;
use super::trait_def::SolvedPlay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub seat: Seat,
    pub card: Card,
    pub explanation: String,
    /// True when the live oracle failed and a fallback produced the card.
    pub degraded: bool,
}

impl Recommendation {
    pub fn view(&self) -> RecommendationView {
        RecommendationView {
            seat: self.seat,
            card: self.card,
            explanation: self.explanation.clone(),
            degraded: self.degraded,
        }
    }
}

/// Why no card could be recommended. None of these are fatal; the caller
/// reports the reason and waits for the game to move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoRecommendation {
    /// Auction not resolved yet: nobody is on play.
    NoActivePlayer,
    /// The active player has no cards left.
    HandExhausted(Seat),
}

impl std::fmt::Display for NoRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoRecommendation::NoActivePlayer => {
                f.write_str("no active player (waiting for auction to complete)")
            }
            NoRecommendation::HandExhausted(seat) => {
                write!(f, "{seat} has no cards remaining")
            }
        }
    }
}

/// Inputs beyond the deal itself: a live solve for the current position
/// (already stale-filtered by the session) and the static lead table.
/// `oracle_failed` marks that a live solve was attempted and errored, so
/// the fallback explanation is annotated as degraded.
pub struct RecommendInputs<'a> {
    pub solved: Option<&'a [SolvedPlay]>,
    pub table: Option<&'a DdTable>,
    pub oracle_failed: bool,
}

pub fn recommend(
    state: &DealState,
    inputs: RecommendInputs<'_>,
) -> Result<Recommendation, NoRecommendation> {
    let seat = state.next_to_play.ok_or(NoRecommendation::NoActivePlayer)?;
    let legal = state.hands.remaining_cards(seat, TrickScope::Legal);
    if legal.is_empty() {
        return Err(NoRecommendation::HandExhausted(seat));
    }
    let trump = state.trump();

    // Live oracle first: best card by tricks achievable, validated against
    // the derived hand. An invalid card is a correctness signal for the
    // oracle integration, logged and discarded.
    if let Some(solved) = inputs.solved {
        if let Some(&(card, tricks)) = solved.iter().max_by_key(|&&(_, t)| t) {
            if legal.contains(&card) {
                return Ok(Recommendation {
                    seat,
                    card,
                    explanation: format!("Double dummy: {card} holds {tricks} tricks"),
                    degraded: false,
                });
            }
            tracing::warn!(
                %seat,
                %card,
                "oracle suggested a card not in the player's derived hand; falling back"
            );
        }
    }

    let (card, explanation) = heuristic_choice(state, seat, &legal, trump, inputs.table);
    let degraded = inputs.oracle_failed;
    let explanation = if degraded {
        format!("{explanation} (double dummy unavailable)")
    } else {
        explanation
    };
    Ok(Recommendation {
        seat,
        card,
        explanation,
        degraded,
    })
}

/// The rule ladder of plays that are always legal and rarely embarrassing.
fn heuristic_choice(
    state: &DealState,
    seat: Seat,
    legal: &[Card],
    trump: Strain,
    table: Option<&DdTable>,
) -> (Card, String) {
    if state.current_trick.is_empty() {
        return lead_choice(seat, legal, table);
    }

    let lead_suit = state.current_trick[0].1.suit;
    let following: Vec<Card> = legal.iter().copied().filter(|c| c.suit == lead_suit).collect();

    if !following.is_empty() {
        // Follow suit: highest if it takes the trick, otherwise lowest so
        // winners are not wasted under a card we cannot beat.
        let winning = current_winning_play(&state.current_trick, trump);
        let high = highest_in_suit(&following, lead_suit).unwrap_or(following[0]);
        let beats = winning
            .map(|(_, w)| card_beats(high, w, lead_suit, trump))
            .unwrap_or(true);
        if beats {
            return (high, format!("Winning the trick with {high}"));
        }
        let low = lowest_in_suit(&following, lead_suit).unwrap_or(following[0]);
        return (low, format!("Cannot beat the trick; keeping winners, playing {low}"));
    }

    // Void in the led suit: ruff low when the contract has a trump suit.
    if let Some(trump_suit) = trump.trump_suit() {
        if let Some(ruff) = lowest_in_suit(legal, trump_suit) {
            return (ruff, format!("Ruffing with lowest trump {ruff}"));
        }
    }

    // Discard: lowest card of the longest remaining suit.
    let suit = longest_suit(legal).unwrap_or(legal[0].suit);
    let discard = lowest_in_suit(legal, suit).unwrap_or(legal[0]);
    (discard, format!("Discarding {discard} from longest suit"))
}

/// On lead: prefer the suit the static table ranks highest for this seat;
/// lead the highest card of it. Without a table, lead high from length.
fn lead_choice(seat: Seat, legal: &[Card], table: Option<&DdTable>) -> (Card, String) {
    let held_suits: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|&s| legal.iter().any(|c| c.suit == s))
        .collect();

    if let Some(table) = table {
        if let Some((suit, tricks)) = table.best_lead(seat, &held_suits) {
            if let Some(card) = highest_in_suit(legal, suit) {
                return (
                    card,
                    format!("Double dummy favors a {card} lead ({tricks} tricks)"),
                );
            }
        }
    }

    let suit = longest_suit(legal).unwrap_or(legal[0].suit);
    let card = highest_in_suit(legal, suit).unwrap_or(legal[0]);
    (card, format!("Leading {card} high from longest suit"))
}
