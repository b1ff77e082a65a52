//! The drain protocol: size the array, allocate exactly, traverse once.

use thiserror::Error;

use mooring_core::{ArrayRef, OutOfRange};

use crate::{ResultCollection, ResultRecord};

/// Errors that can occur while draining a sparse array.
///
/// These are local to one extraction: the collection under construction is
/// discarded and nothing previously stored is touched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// The array has no index dimensions to resolve labels against.
    #[error("array has no index dimensions")]
    NoDimensions,

    /// A dense position fell outside its dimension's index set.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),

    /// Traversal visited a different number of cells than the array
    /// reported when it was sized.
    #[error("array reported {expected} entries but traversal visited {visited}")]
    EntryCountMismatch { expected: usize, visited: usize },
}

/// Drains a real-valued sparse array into a host-owned collection.
///
/// The array is sized before any storage is allocated; a single traversal
/// then fills every slot, resolving each cell's dimension-0 position to its
/// external label. Arrays whose traversal disagrees with their reported
/// size are rejected so that a short or overlong drain can never masquerade
/// as a complete one.
///
/// An array with zero populated cells drains to an empty collection.
///
/// # Errors
///
/// Returns an error when the array is zero-dimensional, a dense position
/// cannot be resolved to a label, or the visit count does not match the
/// reported entry count.
pub fn real_vector(array: ArrayRef<'_>) -> Result<ResultCollection, ExtractError> {
    if array.dimensions() == 0 {
        return Err(ExtractError::NoDimensions);
    }

    let expected = array.entry_count();
    let mut records = Vec::with_capacity(expected);

    let mut cursor = array.into_cursor();
    if cursor.first().is_some() {
        loop {
            let Some((tuple, value)) = cursor.entry() else {
                break;
            };
            let position = tuple.get(0).ok_or(ExtractError::NoDimensions)?;
            let label = cursor
                .index_set(0)
                .ok_or(ExtractError::NoDimensions)?
                .label(position)?;
            records.push(ResultRecord::new(label, value));
            if !cursor.advance() {
                break;
            }
        }
    }

    if records.len() != expected {
        return Err(ExtractError::EntryCountMismatch {
            expected,
            visited: records.len(),
        });
    }
    Ok(ResultCollection::from_records(records))
}
