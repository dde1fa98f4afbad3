//! Race coordination subsystem.
//!
//! # Data Flow
//! ```text
//! PostalCode
//!     → coordinator.rs spawns ViaCEP task ─┐
//!     → coordinator.rs spawns ApiCEP task ─┼→ select! (first wins) → verdict.rs RaceResult
//!     → deadline timer (1s default) ───────┘
//! ```

pub mod coordinator;
pub mod verdict;

pub use coordinator::{race, RaceCoordinator};
pub use verdict::RaceResult;
