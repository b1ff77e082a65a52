//! The sparse-array seam between an embedded runtime and host code.
//!
//! A runtime exposes result arrays to the host as [`SparseArray`] trait
//! objects wrapped in an [`ArrayRef`]. The ref is a move-only capability:
//! turning it into an [`ArrayCursor`] consumes it, so at most one traversal
//! of a callback-provided array can ever be in flight.

mod coo;
mod cursor;

pub use coo::{CooArray, CooError};
pub use cursor::ArrayCursor;

use crate::{IndexSet, IndexTuple};

/// A read-only, externally owned multi-dimensional sparse array.
///
/// Only populated cells are stored; absent cells are implicitly default.
/// The set of dimensions and their sizes is fixed for the lifetime of an
/// instance. The traversal order produced by [`first_entry`] and
/// [`next_entry`] is opaque to callers but must be stable and deterministic
/// for a given instance, and must visit every populated cell exactly once.
///
/// [`first_entry`]: SparseArray::first_entry
/// [`next_entry`]: SparseArray::next_entry
pub trait SparseArray {
    /// Returns the number of index dimensions.
    fn dimensions(&self) -> usize;

    /// Returns the index set backing a dimension, or `None` for a
    /// dimension the array does not have.
    fn index_set(&self, dimension: usize) -> Option<&IndexSet>;

    /// Returns the number of populated cells.
    fn entry_count(&self) -> usize;

    /// Positions `tuple` at the first populated cell in traversal order.
    ///
    /// Returns `false`, leaving `tuple` unspecified but safe, when the
    /// array has no populated cells.
    fn first_entry(&self, tuple: &mut IndexTuple) -> bool;

    /// Advances `tuple` in place to the next populated cell.
    ///
    /// Returns `false`, leaving `tuple` unspecified but safe, when no
    /// further cells exist.
    fn next_entry(&self, tuple: &mut IndexTuple) -> bool;

    /// Returns the value of the cell at `tuple`, or `None` for a cell that
    /// is not populated.
    fn value(&self, tuple: &IndexTuple) -> Option<f64>;
}

/// A move-only borrow of a runtime-owned sparse array.
///
/// An `ArrayRef` arrives inside a [`Value::Array`](crate::Value::Array)
/// during a callback and is valid only for that invocation's extent. It is
/// deliberately neither `Copy` nor `Clone`: [`into_cursor`] consumes it,
/// which makes re-entrant traversal of the same array unrepresentable.
///
/// [`into_cursor`]: ArrayRef::into_cursor
pub struct ArrayRef<'a> {
    array: &'a dyn SparseArray,
}

impl<'a> ArrayRef<'a> {
    /// Wraps an array for handing to a sink.
    #[must_use]
    pub fn new(array: &'a dyn SparseArray) -> Self {
        Self { array }
    }

    /// Returns the number of index dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.array.dimensions()
    }

    /// Returns the index set backing a dimension.
    #[must_use]
    pub fn index_set(&self, dimension: usize) -> Option<&IndexSet> {
        self.array.index_set(dimension)
    }

    /// Returns the number of populated cells.
    ///
    /// Sinks query this before allocating storage so a drain can fill an
    /// exactly sized collection in a single traversal.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.array.entry_count()
    }

    /// Consumes the ref, producing the one cursor allowed over this array.
    #[must_use]
    pub fn into_cursor(self) -> ArrayCursor<'a> {
        ArrayCursor::new(self.array)
    }
}

impl std::fmt::Debug for ArrayRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayRef")
            .field("dimensions", &self.dimensions())
            .field("entry_count", &self.entry_count())
            .finish()
    }
}
