//! A labeled sequence of values indexed by intervals.

use crate::error::{BuildError, LookupError};
use crate::index::IntervalIndex;
use crate::key::{Key, Located};
use intervix_types::Interval;
use std::ops::Range;

/// Values labeled by an [IntervalIndex], one value per position.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalSeries<V> {
    index: IntervalIndex,
    values: Vec<V>,
}

/// Result of [IntervalSeries::loc].
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<V> {
    /// The key matched exactly one position.
    Value(V),

    /// The key matched any number of positions, gathered in order.
    Series(IntervalSeries<V>),
}

impl<V> Selection<V> {
    /// The selected values, in order.
    pub fn into_values(self) -> Vec<V> {
        match self {
            Selection::Value(value) => vec![value],
            Selection::Series(series) => series.values,
        }
    }
}

impl<V> IntervalSeries<V> {
    pub fn new(index: IntervalIndex, values: Vec<V>) -> Result<Self, BuildError> {
        if index.len() != values.len() {
            return Err(BuildError::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }

        Ok(IntervalSeries { index, values })
    }

    pub fn index(&self) -> &IntervalIndex {
        &self.index
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(interval, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Interval, &V)> {
        self.index.iter().zip(self.values.iter())
    }

    /// Boolean mask of the values matching `pred`, usable as a key.
    pub fn mask(&self, pred: impl Fn(&V) -> bool) -> Vec<bool> {
        self.values.iter().map(pred).collect()
    }
}

impl<V: Clone> IntervalSeries<V> {
    /// Select by label.
    pub fn loc(&self, key: impl Into<Key>) -> Result<Selection<V>, LookupError> {
        match self.index.locate(key)? {
            Located::One(pos) => Ok(Selection::Value(self.values[pos].clone())),
            Located::Many(positions) => Ok(Selection::Series(self.take(&positions))),
        }
    }

    /// Gather the rows at the given positions, which may repeat.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of bounds.
    pub fn take(&self, positions: &[usize]) -> IntervalSeries<V> {
        IntervalSeries {
            index: self.index.take(positions),
            values: positions.iter().map(|&pos| self.values[pos].clone()).collect(),
        }
    }

    /// Select a range of positions. The range is clamped to the length
    /// of the series.
    pub fn iloc(&self, range: Range<usize>) -> IntervalSeries<V> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        self.take(&(start..end).collect::<Vec<_>>())
    }
}
