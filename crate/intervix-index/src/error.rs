use crate::key::Item;
use intervix_types::{Interval, IntervalError};

/// Error returned by lookups on an [crate::IntervalIndex].
///
/// Every lookup either resolves completely or fails with exactly one
/// of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// A key, or some elements of a list key, matched nothing.
    ///
    /// For list keys, `missing` lists every element that matched
    /// nothing, in list order.
    #[error("not found: [{}]", join_items(.missing))]
    NotFound { missing: Vec<Item> },

    #[error("cannot slice a non-unique interval index")]
    AmbiguousSlice,

    #[error("interval slices only support a step of 1, got {0}")]
    InvalidStep(i64),

    #[error("slicing with interval bound {0} is not supported")]
    UnsupportedSliceBound(Interval),

    #[error("boolean mask has length {actual}, index has length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl LookupError {
    pub(crate) fn not_found(item: Item) -> Self {
        LookupError::NotFound {
            missing: vec![item],
        }
    }

    /// True if the key was valid but missing from the index.
    ///
    /// Other errors mean the request itself could not be served by
    /// this index.
    pub fn is_key_error(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}

fn join_items(items: &[Item]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error returned when building an index or a series.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid interval at position {position}: {source}")]
    InvalidInterval {
        position: usize,
        #[source]
        source: IntervalError,
    },

    #[error("{values} values for an index of length {index}")]
    LengthMismatch { index: usize, values: usize },
}
