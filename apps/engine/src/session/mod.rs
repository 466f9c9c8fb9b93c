//! Table session: event ingestion, state ownership, oracle dispatch.

pub mod events;
pub mod table;


pub use events::TableEvent;
pub use table::{spawn, spawn_with_solver, SessionConfig, TableHandle, TableSession};
