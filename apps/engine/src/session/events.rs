//! Inbound event vocabulary.
//!
//! The transport layer (out of scope here) turns whatever the browser
//! extension and the solver feed produce into these events and enqueues
//! them; nothing outside the session task ever touches table state.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ai::trait_def::SolvedPlay;
use crate::domain::auction::Call;
use crate::domain::cards_types::{Card, Suit};
use crate::domain::seats::{PlayerRef, Seat};
use crate::domain::state::Vulnerability;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    /// A fresh deal: board header plus the four dealt hands keyed by seat
    /// token, each a list of interchange card tokens.
    NewDeal {
        board: u32,
        dealer: Seat,
        vulnerability: Vulnerability,
        hands: BTreeMap<Seat, Vec<Card>>,
    },

    BidMade {
        seat: Seat,
        call: Call,
    },

    /// A card hit the table. The player may be the upstream unknown
    /// sentinel; the trick engine infers the seat.
    CardPlayed {
        #[serde(default = "unknown_player")]
        seat: PlayerRef,
        card: Card,
    },

    /// A claim for some number of the remaining tricks was accepted.
    ClaimAccepted {
        seat: Seat,
        tricks_claimed: u8,
    },

    /// Static opening-lead double-dummy table pushed by the analysis feed.
    DdResult {
        tricks: BTreeMap<Seat, BTreeMap<Suit, u8>>,
    },

    /// A full-position solve pushed by the external solver, tagged with the
    /// fingerprint of the position it analyzed.
    SolveResult {
        fingerprint: u64,
        plays: Vec<SolvedPlay>,
    },

    /// Close the completed rubber and open the next one.
    NewRubber,
}

fn unknown_player() -> PlayerRef {
    PlayerRef::Unknown
}
