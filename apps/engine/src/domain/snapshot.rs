//! Public snapshot of the table for the excluded UI layer.
//!
//! Produced fresh from state on demand; never panics, fills safe defaults
//! for whatever the table does not know yet.

use serde::Serialize;

use super::cards_types::Card;
use super::hands::TrickScope;
use super::rubber::RubberStatus;
use super::seats::Seat;
use super::state::{DealState, TrickTally, Vulnerability};
use super::tricks::legal_moves;

#[derive(Debug, Clone, Serialize)]
pub struct CallView {
    pub seat: Seat,
    pub call: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractView {
    pub contract: String,
    pub declarer: Seat,
    pub dummy: Seat,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayView {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub seat: Seat,
    pub card: Card,
    pub explanation: String,
    pub degraded: bool,
}

/// Per-deal portion of the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DealView {
    pub board: u32,
    pub dealer: Seat,
    pub vulnerability: Vulnerability,
    /// Remaining cards per seat (N, E, S, W), current-trick plays excluded.
    pub hands: [Vec<Card>; 4],
    pub auction: Vec<CallView>,
    pub auction_closed: bool,
    pub contract: Option<ContractView>,
    pub current_trick: Vec<PlayView>,
    pub tricks_won: TrickTally,
    pub tricks_played: u8,
    pub active_player: Option<Seat>,
    /// Cards the active player may legally play right now.
    pub playable: Vec<Card>,
    pub play_finished: bool,
}

/// Top-level export: deal (when one is running), latest recommendation,
/// rubber standing.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub deal: Option<DealView>,
    pub last_recommendation: Option<RecommendationView>,
    pub rubber: RubberStatus,
}

pub fn deal_view(state: &DealState) -> DealView {
    let mut hands: [Vec<Card>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    for seat in Seat::ALL {
        let mut remaining = state.hands.remaining_cards(seat, TrickScope::Legal);
        remaining.sort();
        hands[seat.index()] = remaining;
    }

    DealView {
        board: state.board,
        dealer: state.dealer,
        vulnerability: state.vulnerability,
        hands,
        auction: state
            .auction
            .calls()
            .iter()
            .map(|&(seat, call)| CallView {
                seat,
                call: call.to_string(),
            })
            .collect(),
        auction_closed: state.auction.is_closed(),
        contract: state.contract().map(|c| ContractView {
            contract: c.to_string(),
            declarer: c.declarer,
            dummy: c.dummy(),
        }),
        current_trick: state
            .current_trick
            .iter()
            .map(|&(seat, card)| PlayView { seat, card })
            .collect(),
        tricks_won: state.tricks_won,
        tricks_played: state.tricks_played(),
        active_player: state.next_to_play,
        playable: state
            .next_to_play
            .map(|seat| legal_moves(state, seat))
            .unwrap_or_default(),
        play_finished: state.play_finished,
    }
}
