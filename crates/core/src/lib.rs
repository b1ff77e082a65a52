//! Core traits and types for Mooring.
//!
//! This crate defines the shared abstractions that runtimes, sinks, and host
//! programs build on:
//!
//! - [`SparseArray`] — a read-only, runtime-owned multi-dimensional sparse
//!   array with a stable traversal order
//! - [`ArrayRef`] and [`ArrayCursor`] — a move-only borrow of such an array
//!   and the single cursor it can be turned into
//! - [`IndexSet`] and [`IndexTuple`] — external integer labels for dense
//!   positions, and per-dimension position tuples
//! - [`Value`] — a typed handle to one output item, valid for the extent of
//!   a single callback invocation
//! - [`ResultSink`] — the callback capability a runtime invokes while a
//!   model run is in flight; any matching closure qualifies
//! - [`CooArray`] — an in-memory [`SparseArray`] for fixtures and scripted
//!   runtimes

mod array;
mod index_set;
mod index_tuple;
mod sink;
mod value;

pub use array::{ArrayCursor, ArrayRef, CooArray, CooError, SparseArray};
pub use index_set::{IndexSet, OutOfRange};
pub use index_tuple::IndexTuple;
pub use sink::ResultSink;
pub use value::Value;
