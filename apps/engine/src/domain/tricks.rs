//! Trick engine: card plays in, trick winners and turn rotation out.
//!
//! The feed is allowed to be sloppy about who played a card. Inference and
//! re-attribution happen here, before any state mutation, so everything
//! downstream sees a concrete seat.

use super::cards_logic::card_beats;
use super::cards_types::{Card, Strain};
use super::hands::TrickScope;
use super::seats::{PlayerRef, Seat};
use super::state::{DealState, TrickRecord};
use crate::errors::domain::DomainError;

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether this play completed a trick (4 cards collected).
    pub trick_complete: bool,
    /// Winner of the completed trick, if one was completed.
    pub winner: Option<Seat>,
    /// The seat the play was finally attributed to, after inference and
    /// dummy re-attribution.
    pub seat: Seat,
}

/// Cards the seat may legally play right now: lead-suit cards when the
/// seat holds the led suit, otherwise the whole remaining hand.
pub fn legal_moves(state: &DealState, seat: Seat) -> Vec<Card> {
    let hand = state.hands.remaining_cards(seat, TrickScope::Legal);
    if let Some(&(_, lead_card)) = state.current_trick.first() {
        let following: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|c| c.suit == lead_card.suit)
            .collect();
        if !following.is_empty() {
            return following;
        }
    }
    hand
}

/// Play a card into the current trick.
///
/// Unknown players are inferred (lead seat on an empty trick, successor of
/// the previous play otherwise). A declarer named for a card only dummy
/// holds is re-attributed to dummy: the derived hand is the source of
/// truth for who actually played.
pub fn play_card(
    state: &mut DealState,
    player: PlayerRef,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    let mut seat = resolve_seat(state, player)?;

    if !state.hands.holds(seat, card, TrickScope::Legal) {
        if let Some(contract) = state.contract() {
            let dummy = contract.dummy();
            if seat == contract.declarer && state.hands.holds(dummy, card, TrickScope::Legal) {
                tracing::debug!(%card, declarer = %seat, %dummy, "re-attributing declarer's play to dummy");
                seat = dummy;
            }
        }
    }

    state.hands.record_play(seat, card)?;
    state.current_trick.push((seat, card));

    if state.current_trick.len() < 4 {
        state.next_to_play = Some(seat.next());
        return Ok(PlayCardResult {
            trick_complete: false,
            winner: None,
            seat,
        });
    }

    let mut result = PlayCardResult {
        trick_complete: true,
        winner: None,
        seat,
    };
    if let Some(winner) = resolve_trick_winner(&state.current_trick, state.trump()) {
        state.tricks_won.add(winner.partnership(), 1);
        state.completed_tricks.push(TrickRecord {
            plays: std::mem::take(&mut state.current_trick),
            winner,
        });
        state.hands.close_trick();
        result.winner = Some(winner);

        if state.tricks_played() >= 13 {
            state.play_finished = true;
            state.next_to_play = None;
        } else {
            state.next_to_play = Some(winner);
        }
    }

    Ok(result)
}

/// Walk the trick tracking the winning play: a trump beats any non-trump;
/// within equal trump status the relevant suit's highest rank wins; a card
/// in neither the led suit nor trumps cannot win.
pub fn resolve_trick_winner(plays: &[(Seat, Card)], trump: Strain) -> Option<Seat> {
    let &(lead_seat, lead_card) = plays.first()?;
    let mut winner = (lead_seat, lead_card);
    for &(seat, card) in &plays[1..] {
        if card_beats(card, winner.1, lead_card.suit, trump) {
            winner = (seat, card);
        }
    }
    Some(winner.0)
}

/// Resolve the upstream player reference into a concrete seat before any
/// mutation: first play of a trick falls to the recorded lead seat, later
/// plays to the successor of the previous play.
fn resolve_seat(state: &DealState, player: PlayerRef) -> Result<Seat, DomainError> {
    match player {
        PlayerRef::Known(seat) => Ok(seat),
        PlayerRef::Unknown => {
            if let Some(&(last_seat, _)) = state.current_trick.last() {
                Ok(last_seat.next())
            } else {
                state.next_to_play.ok_or_else(|| {
                    DomainError::AmbiguousPlayer(
                        "trick is empty and no lead seat is recorded".to_string(),
                    )
                })
            }
        }
    }
}
