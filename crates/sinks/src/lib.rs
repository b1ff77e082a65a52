//! Result sinks for the Mooring framework.
//!
//! This crate materializes runtime-owned sparse arrays into host-owned
//! memory:
//!
//! - [`ResultRecord`] and [`ResultCollection`] — host-owned copies of
//!   extracted data
//! - [`extract`] — the drain protocol: size the array, allocate exactly,
//!   traverse once
//! - [`SolutionSink`] — a [`ResultSink`] that dispatches on a closed set of
//!   recognized output-item kinds and reports everything else
//!
//! # Features
//!
//! - `serde-derive` — derives `Serialize`/`Deserialize` for the host-owned
//!   record types.
//!
//! [`ResultSink`]: mooring_core::ResultSink

pub mod extract;

mod record;
mod solution;

pub use extract::ExtractError;
pub use record::{ResultCollection, ResultRecord};
pub use solution::{OutputKind, SolutionSink};
