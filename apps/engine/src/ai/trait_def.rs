//! Double-dummy oracle trait.
//!
//! The solver itself is an external collaborator. The engine only fixes
//! the contract it expects: given a full position it returns, for each
//! playable card, the tricks the playing side can still achieve. Failures
//! are values; the recommendation engine always recovers from them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::cards_types::{Card, Strain};
use crate::domain::seats::Seat;
use crate::domain::state::DealState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// No result for this position (yet).
    #[error("double-dummy solver unavailable")]
    Unavailable,
    #[error("double-dummy solve timed out")]
    Timeout,
    #[error("double-dummy solver failed: {0}")]
    Internal(String),
}

/// A full-deal position for the oracle: remaining hands with the open
/// trick's cards still in the air, plus the trick context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Remaining cards per seat (N, E, S, W), open-trick plays included.
    pub hands: [Vec<Card>; 4],
    pub trump: Strain,
    /// Seat that led (or will lead) the open trick.
    pub leader: Seat,
    /// Cards already played to the open trick, in play order.
    pub trick_cards: Vec<Card>,
    /// Identifies the exact position this solve was requested for, so a
    /// result arriving after the game has moved on can be discarded.
    pub fingerprint: u64,
}

impl Position {
    /// Build the solver position for the deal as it stands. None until the
    /// contract (hence trump) and a leader are known.
    pub fn of(state: &DealState) -> Option<Position> {
        let contract = state.contract()?;
        let leader = state.trick_leader()?;
        let mut hands: [Vec<Card>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        for seat in Seat::ALL {
            hands[seat.index()] = state
                .hands
                .remaining_cards(seat, crate::domain::hands::TrickScope::InTheAir);
        }
        Some(Position {
            hands,
            trump: contract.strain,
            leader,
            trick_cards: state.current_trick.iter().map(|&(_, c)| c).collect(),
            fingerprint: state.position_fingerprint(),
        })
    }
}

/// One card the oracle evaluated, with the tricks the side to move can
/// still take after playing it.
pub type SolvedPlay = (Card, u8);

#[async_trait]
pub trait DoubleDummySolver: Send + Sync {
    async fn solve(&self, position: &Position) -> Result<Vec<SolvedPlay>, SolverError>;
}
