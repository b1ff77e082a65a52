use thiserror::Error;

use crate::{IndexSet, IndexTuple};

use super::SparseArray;

/// Errors that can occur when building a [`CooArray`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CooError {
    /// The array was given no index dimensions.
    #[error("array must have at least one index dimension")]
    NoDimensions,

    /// An entry's position count does not match the array's dimensionality.
    #[error("entry has {got} positions but the array has {expected} dimensions")]
    DimensionMismatch { expected: usize, got: usize },

    /// A position exceeds its dimension's index set.
    #[error("position {position} is out of range for dimension {dimension} of size {size}")]
    PositionOutOfRange {
        dimension: usize,
        position: usize,
        size: usize,
    },
}

/// A coordinate-format sparse array held in host memory.
///
/// Entries are kept sorted lexicographically by index tuple, which gives a
/// deterministic, insertion-order-independent traversal. The sorted order
/// is an implementation detail: consumers only rely on the stable-order
/// contract of [`SparseArray`].
///
/// Runtimes that stage results host-side (such as the scripted runtime in
/// `mooring-host`) build one of these and hand it to the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct CooArray {
    sets: Vec<IndexSet>,
    tuples: Vec<IndexTuple>,
    values: Vec<f64>,
}

impl CooArray {
    /// Creates an empty array over the given per-dimension index sets.
    ///
    /// # Errors
    ///
    /// Returns [`CooError::NoDimensions`] when `sets` is empty.
    pub fn new(sets: Vec<IndexSet>) -> Result<Self, CooError> {
        if sets.is_empty() {
            return Err(CooError::NoDimensions);
        }
        Ok(Self {
            sets,
            tuples: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Populates one cell, replacing any existing value at that position.
    ///
    /// # Errors
    ///
    /// Returns an error when the position count does not match the array's
    /// dimensionality or a position falls outside its index set.
    pub fn insert(&mut self, positions: &[usize], value: f64) -> Result<(), CooError> {
        if positions.len() != self.sets.len() {
            return Err(CooError::DimensionMismatch {
                expected: self.sets.len(),
                got: positions.len(),
            });
        }
        for (dimension, (&position, set)) in positions.iter().zip(&self.sets).enumerate() {
            if position >= set.len() {
                return Err(CooError::PositionOutOfRange {
                    dimension,
                    position,
                    size: set.len(),
                });
            }
        }

        let tuple = IndexTuple::from(positions);
        match self.tuples.binary_search(&tuple) {
            Ok(found) => self.values[found] = value,
            Err(slot) => {
                self.tuples.insert(slot, tuple);
                self.values.insert(slot, value);
            }
        }
        Ok(())
    }

    /// Returns the per-dimension index sets.
    #[must_use]
    pub fn index_sets(&self) -> &[IndexSet] {
        &self.sets
    }
}

impl SparseArray for CooArray {
    fn dimensions(&self) -> usize {
        self.sets.len()
    }

    fn index_set(&self, dimension: usize) -> Option<&IndexSet> {
        self.sets.get(dimension)
    }

    fn entry_count(&self) -> usize {
        self.values.len()
    }

    fn first_entry(&self, tuple: &mut IndexTuple) -> bool {
        match self.tuples.first() {
            Some(first) => {
                tuple.clone_from(first);
                true
            }
            None => false,
        }
    }

    fn next_entry(&self, tuple: &mut IndexTuple) -> bool {
        let after = self.tuples.partition_point(|t| t <= &*tuple);
        match self.tuples.get(after) {
            Some(next) => {
                tuple.clone_from(next);
                true
            }
            None => false,
        }
    }

    fn value(&self, tuple: &IndexTuple) -> Option<f64> {
        let found = self.tuples.binary_search(tuple).ok()?;
        self.values.get(found).copied()
    }
}
