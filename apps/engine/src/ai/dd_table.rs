//! Static double-dummy table: tricks achievable per seat and opening-lead
//! suit, as pushed by the analysis feed at the start of the deal.
//!
//! Accurate only before any card has been played; after that it is still
//! usable as a coarse suit ranking when no live solve is available.

use std::collections::HashMap;

use crate::domain::cards_types::Suit;
use crate::domain::seats::Seat;

#[derive(Debug, Clone, Default)]
pub struct DdTable {
    /// seat -> lead suit -> tricks that seat's side can take.
    tricks: HashMap<Seat, HashMap<Suit, u8>>,
}

impl DdTable {
    pub fn new(tricks: HashMap<Seat, HashMap<Suit, u8>>) -> Self {
        Self { tricks }
    }

    pub fn tricks_for(&self, seat: Seat, suit: Suit) -> Option<u8> {
        self.tricks.get(&seat)?.get(&suit).copied()
    }

    /// The lead suit the table ranks highest for this seat, restricted to
    /// `holding` so the recommendation can never name a suit the player is
    /// void in.
    pub fn best_lead(&self, seat: Seat, holding: &[Suit]) -> Option<(Suit, u8)> {
        let by_suit = self.tricks.get(&seat)?;
        holding
            .iter()
            .filter_map(|&suit| by_suit.get(&suit).map(|&t| (suit, t)))
            .max_by_key(|&(_, t)| t)
    }

    pub fn is_empty(&self) -> bool {
        self.tricks.is_empty()
    }
}
