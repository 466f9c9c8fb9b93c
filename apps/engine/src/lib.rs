#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Live rubber-bridge table assistant: auction and play tracking, rubber
//! scoring, and double-dummy-informed card recommendations. Transport and
//! UI live elsewhere; they enqueue events and read snapshots.

pub mod ai;
pub mod domain;
pub mod errors;
pub mod session;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use ai::{DdTable, DoubleDummySolver, PushedSolver, Recommendation, SolverError};
pub use domain::{
    Auction, Call, Card, Contract, DealState, Doubling, Partnership, PlayerRef, Rank, RubberState,
    Seat, Strain, Suit, TableSnapshot, Vulnerability,
};
pub use errors::DomainError;
pub use session::{spawn, spawn_with_solver, SessionConfig, TableEvent, TableHandle, TableSession};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
