use std::fmt;

use crate::ArrayRef;

/// A typed handle to one named output item.
///
/// A `Value` is only valid for the extent of the callback invocation that
/// delivered it; the borrow it carries ends when the callback returns. Data
/// to keep must be copied into host-owned storage first.
#[derive(Debug)]
pub enum Value<'a> {
    /// An integer scalar.
    Int(i64),

    /// A real scalar.
    Real(f64),

    /// A text scalar.
    Text(&'a str),

    /// A sparse array, traversable through the contained [`ArrayRef`].
    Array(ArrayRef<'a>),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
            Self::Array(array) => write!(
                f,
                "array[{} entries, {} dims]",
                array.entry_count(),
                array.dimensions()
            ),
        }
    }
}
