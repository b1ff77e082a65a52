use std::collections::HashMap;

use thiserror::Error;

/// A dense position outside an index set's bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("dense position {position} is out of range for an index set of size {size}")]
pub struct OutOfRange {
    /// The requested dense position.
    pub position: usize,

    /// The size of the index set at the time of the lookup.
    pub size: usize,
}

/// An ordered, deduplicated collection mapping dense positions to external
/// integer labels.
///
/// Each dimension of a [`SparseArray`](crate::SparseArray) is backed by one
/// index set. Positions are assigned in insertion order; inserting a label
/// that is already present returns its existing position instead of growing
/// the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSet {
    labels: Vec<i64>,
    positions: HashMap<i64, usize>,
}

impl IndexSet {
    /// Creates an empty index set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index set from labels, preserving first-occurrence order
    /// and dropping duplicates.
    #[must_use]
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut set = Self::new();
        for label in labels {
            set.insert(label);
        }
        set
    }

    /// Inserts a label and returns its dense position.
    ///
    /// A label already present keeps its original position.
    pub fn insert(&mut self, label: i64) -> usize {
        if let Some(&position) = self.positions.get(&label) {
            return position;
        }
        let position = self.labels.len();
        self.labels.push(label);
        self.positions.insert(label, position);
        position
    }

    /// Returns the external label at a dense position.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] when `position >= len()`, including the
    /// boundary case `position == len()`.
    pub fn label(&self, position: usize) -> Result<i64, OutOfRange> {
        self.labels.get(position).copied().ok_or(OutOfRange {
            position,
            size: self.labels.len(),
        })
    }

    /// Returns the dense position of an external label, if present.
    #[must_use]
    pub fn position(&self, label: i64) -> Option<usize> {
        self.positions.get(&label).copied()
    }

    /// Returns the labels in dense-position order.
    #[must_use]
    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Returns the number of labels in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the set holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<i64> for IndexSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::from_labels(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_dedups() {
        let set = IndexSet::from_labels([7, 3, 7, 12, 3]);

        assert_eq!(set.labels(), &[7, 3, 12]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn label_lookup_is_stable() {
        let set = IndexSet::from_labels(1..=14);

        for position in 0..set.len() {
            let first = set.label(position).unwrap();
            let second = set.label(position).unwrap();
            assert_eq!(first, second);
            assert_eq!(first, position as i64 + 1);
        }
    }

    #[test]
    fn position_is_inverse_of_label() {
        let set = IndexSet::from_labels([10, 20, 30]);

        assert_eq!(set.position(20), Some(1));
        assert_eq!(set.position(99), None);
    }

    #[test]
    fn rejects_position_at_size() {
        let set = IndexSet::from_labels([1, 2, 3]);

        let err = set.label(3).unwrap_err();
        assert_eq!(err, OutOfRange { position: 3, size: 3 });
    }

    #[test]
    fn empty_set_rejects_position_zero() {
        let set = IndexSet::new();

        assert!(set.is_empty());
        assert_eq!(set.label(0).unwrap_err(), OutOfRange { position: 0, size: 0 });
    }

    #[test]
    fn reinserting_returns_existing_position() {
        let mut set = IndexSet::from_labels([5, 6]);

        assert_eq!(set.insert(5), 0);
        assert_eq!(set.insert(9), 2);
        assert_eq!(set.len(), 3);
    }
}
