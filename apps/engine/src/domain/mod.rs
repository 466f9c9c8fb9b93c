//! Domain layer: pure bridge state machines and helpers.

pub mod auction;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod hands;
pub mod rubber;
pub mod scoring;
pub mod seats;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
pub mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_auction;
#[cfg(test)]
mod tests_hands;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use auction::{Auction, Call, Contract, Doubling};
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_parsing::{parse_contract, try_parse_cards};
pub use cards_types::{Card, Rank, Strain, Suit};
pub use hands::{DealHands, TrickScope};
pub use rubber::{RubberState, RubberStatus};
pub use scoring::{honors, score_contract, HonorAward, ScoreResult};
pub use seats::{Partnership, PlayerRef, Seat};
pub use snapshot::TableSnapshot;
pub use state::{DealState, Vulnerability};
