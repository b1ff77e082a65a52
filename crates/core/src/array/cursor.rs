use crate::{IndexSet, IndexTuple};

use super::SparseArray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Unstarted,
    Active,
    Done,
}

/// A lazy, finite, non-restartable traversal over an array's populated
/// cells.
///
/// The cursor owns its index buffer; [`first`] and [`advance`] are its only
/// mutators, and callers see the buffer only through shared references, so
/// the in-place repositioning can never alias host data.
///
/// A cursor visits every populated cell exactly once, in the array's
/// intrinsic order. Once [`advance`] has returned `false` the cursor is
/// exhausted: [`current`] and [`value`] return `None`, and [`first`] does
/// not restart it.
///
/// [`first`]: ArrayCursor::first
/// [`advance`]: ArrayCursor::advance
/// [`current`]: ArrayCursor::current
/// [`value`]: ArrayCursor::value
pub struct ArrayCursor<'a> {
    array: &'a dyn SparseArray,
    tuple: IndexTuple,
    state: CursorState,
}

impl<'a> ArrayCursor<'a> {
    pub(super) fn new(array: &'a dyn SparseArray) -> Self {
        Self {
            array,
            tuple: IndexTuple::zeros(array.dimensions()),
            state: CursorState::Unstarted,
        }
    }

    /// Positions the cursor at the first populated cell.
    ///
    /// Returns `None` when the array has no populated cells, or when the
    /// traversal was already started; the sequence is not restartable.
    pub fn first(&mut self) -> Option<&IndexTuple> {
        if self.state != CursorState::Unstarted {
            return None;
        }
        if self.array.first_entry(&mut self.tuple) {
            self.state = CursorState::Active;
            Some(&self.tuple)
        } else {
            self.state = CursorState::Done;
            None
        }
    }

    /// Moves to the next populated cell.
    ///
    /// Returns `false` when no further cells exist (or the cursor was never
    /// positioned), after which the cursor is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.state != CursorState::Active {
            return false;
        }
        if self.array.next_entry(&mut self.tuple) {
            true
        } else {
            self.state = CursorState::Done;
            false
        }
    }

    /// Returns the current cell's index tuple while the cursor is
    /// positioned on one.
    #[must_use]
    pub fn current(&self) -> Option<&IndexTuple> {
        match self.state {
            CursorState::Active => Some(&self.tuple),
            _ => None,
        }
    }

    /// Returns the current cell's index tuple paired with its value.
    #[must_use]
    pub fn entry(&self) -> Option<(&IndexTuple, f64)> {
        match self.state {
            CursorState::Active => {
                let value = self.array.value(&self.tuple)?;
                Some((&self.tuple, value))
            }
            _ => None,
        }
    }

    /// Returns the value at the current cell.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns the index set backing a dimension of the underlying array.
    #[must_use]
    pub fn index_set(&self, dimension: usize) -> Option<&IndexSet> {
        self.array.index_set(dimension)
    }

    /// Returns the underlying array's dimensionality.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.array.dimensions()
    }
}
