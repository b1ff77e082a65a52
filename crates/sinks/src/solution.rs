use std::collections::HashMap;

use log::{error, warn};

use mooring_core::{ResultSink, Value};

use crate::{extract, ResultCollection};

/// The kinds of output items a [`SolutionSink`] knows how to extract.
///
/// This is a closed set: each kind has exactly one extraction routine, and
/// anything the host did not register falls to the unrecognized-item arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// A sparse array of reals, keyed by dimension 0's index set.
    RealVector,
}

/// A [`ResultSink`] that materializes recognized output items into host
/// memory.
///
/// Labels registered with [`expect_item`] are drained on receipt: the array
/// is sized, storage is allocated exactly once, and a single traversal
/// fills it. Unrecognized labels are reported through the `log` facade and
/// skipped; the exchange continues. An extraction failure reports the
/// cause and returns `false` to the runtime; collections stored by earlier
/// invocations are never disturbed.
///
/// Receiving the same label again over an unchanged array replaces the
/// stored collection with an equal one.
///
/// [`expect_item`]: SolutionSink::expect_item
#[derive(Debug, Clone, Default)]
pub struct SolutionSink {
    expected: HashMap<String, OutputKind>,
    vectors: HashMap<String, ResultCollection>,
}

impl SolutionSink {
    /// Creates a sink that recognizes no labels yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a label the runtime is expected to emit.
    #[must_use]
    pub fn expect_item(mut self, label: impl Into<String>, kind: OutputKind) -> Self {
        self.expected.insert(label.into(), kind);
        self
    }

    /// Returns the collection extracted for a label, if one arrived.
    #[must_use]
    pub fn vector(&self, label: &str) -> Option<&ResultCollection> {
        self.vectors.get(label)
    }

    /// Removes and returns the collection extracted for a label.
    pub fn take_vector(&mut self, label: &str) -> Option<ResultCollection> {
        self.vectors.remove(label)
    }
}

impl ResultSink for SolutionSink {
    fn receive(&mut self, label: &str, value: Value<'_>) -> bool {
        let Some(kind) = self.expected.get(label).copied() else {
            warn!("unknown output data item: {label}={value}");
            return true;
        };

        match kind {
            OutputKind::RealVector => match value {
                Value::Array(array) => match extract::real_vector(array) {
                    Ok(collection) => {
                        self.vectors.insert(label.to_string(), collection);
                        true
                    }
                    Err(cause) => {
                        error!("failed to extract output item `{label}`: {cause}");
                        false
                    }
                },
                other => {
                    error!("output item `{label}` is not an array: {other}");
                    false
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use mooring_core::{ArrayRef, CooArray, IndexSet, IndexTuple, SparseArray};

    use super::*;

    fn fixture(values: &[(i64, f64)]) -> CooArray {
        let set = IndexSet::from_labels(values.iter().map(|&(label, _)| label));
        let mut array = CooArray::new(vec![set]).unwrap();
        for (position, &(_, value)) in values.iter().enumerate() {
            array.insert(&[position], value).unwrap();
        }
        array
    }

    #[test]
    fn recognized_label_is_drained() {
        let array = fixture(&[(1, 1.0), (2, 4.0)]);
        let mut sink = SolutionSink::new().expect_item("Res", OutputKind::RealVector);

        assert!(sink.receive("Res", Value::Array(ArrayRef::new(&array))));

        let collection = sink.vector("Res").unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(1).unwrap().label(), 2);
        assert_relative_eq!(collection.get(1).unwrap().value(), 4.0);
    }

    #[test]
    fn bogus_label_is_reported_and_skipped() {
        let array = fixture(&[(1, 1.0)]);
        let mut sink = SolutionSink::new().expect_item("Res", OutputKind::RealVector);
        assert!(sink.receive("Res", Value::Array(ArrayRef::new(&array))));
        let before = sink.vector("Res").cloned();

        // Unrecognized items do not fail the exchange or disturb state.
        assert!(sink.receive("Bogus", Value::Int(3)));

        assert_eq!(sink.vector("Res").cloned(), before);
        assert!(sink.vector("Bogus").is_none());
    }

    #[test]
    fn repeated_receipt_stores_equal_collections() {
        let array = fixture(&[(1, 1.0), (2, 4.0), (3, 9.0)]);
        let mut sink = SolutionSink::new().expect_item("Res", OutputKind::RealVector);

        assert!(sink.receive("Res", Value::Array(ArrayRef::new(&array))));
        let first = sink.vector("Res").cloned().unwrap();

        assert!(sink.receive("Res", Value::Array(ArrayRef::new(&array))));
        let second = sink.vector("Res").cloned().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn recognized_label_with_scalar_value_fails() {
        let mut sink = SolutionSink::new().expect_item("Res", OutputKind::RealVector);

        assert!(!sink.receive("Res", Value::Real(1.5)));
        assert!(sink.vector("Res").is_none());
    }

    /// Reports one more entry than traversal yields, forcing an
    /// extraction failure.
    struct Overclaiming {
        inner: CooArray,
    }

    impl SparseArray for Overclaiming {
        fn dimensions(&self) -> usize {
            self.inner.dimensions()
        }

        fn index_set(&self, dimension: usize) -> Option<&IndexSet> {
            self.inner.index_set(dimension)
        }

        fn entry_count(&self) -> usize {
            self.inner.entry_count() + 1
        }

        fn first_entry(&self, tuple: &mut IndexTuple) -> bool {
            self.inner.first_entry(tuple)
        }

        fn next_entry(&self, tuple: &mut IndexTuple) -> bool {
            self.inner.next_entry(tuple)
        }

        fn value(&self, tuple: &IndexTuple) -> Option<f64> {
            self.inner.value(tuple)
        }
    }

    #[test]
    fn failed_extraction_leaves_previous_collection_intact() {
        let good = fixture(&[(1, 1.0), (2, 4.0)]);
        let bad = Overclaiming {
            inner: fixture(&[(1, 1.0)]),
        };
        let mut sink = SolutionSink::new().expect_item("Res", OutputKind::RealVector);

        assert!(sink.receive("Res", Value::Array(ArrayRef::new(&good))));
        let before = sink.vector("Res").cloned().unwrap();

        assert!(!sink.receive("Res", Value::Array(ArrayRef::new(&bad))));

        assert_eq!(sink.vector("Res").cloned().unwrap(), before);
        assert_eq!(before.len(), 2);
    }

    #[test]
    fn take_vector_hands_ownership_to_the_host() {
        let array = fixture(&[(7, 49.0)]);
        let mut sink = SolutionSink::new().expect_item("Res", OutputKind::RealVector);
        assert!(sink.receive("Res", Value::Array(ArrayRef::new(&array))));

        let taken = sink.take_vector("Res").unwrap();
        assert_eq!(taken.len(), 1);
        assert!(sink.vector("Res").is_none());
    }
}
