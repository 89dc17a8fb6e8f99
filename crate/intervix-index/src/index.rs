//! The interval index and its query dispatcher.

use crate::classify::classify;
use crate::config::{IndexConfig, StrategyChoice};
use crate::error::{BuildError, LookupError};
use crate::key::{Bound, Item, Key, Located, SliceKey};
use crate::strategy::{LookupStrategy, NON_OVERLAPPING, OVERLAPPING, Table};
use intervix_types::{Closed, Interval};
use std::ops::Range;

/// An immutable, ordered sequence of intervals, used as the row index
/// of a labeled sequence.
///
/// Intervals are paired with positions `0..len()` in the order they
/// were given. They need not be sorted, and may overlap or repeat.
///
/// Sort order, overlap and uniqueness are computed once by the
/// constructor; lookups never modify the index, so an index can be
/// shared freely between threads.
#[derive(Clone, Debug)]
pub struct IntervalIndex {
    intervals: Vec<Interval>,
    sorted: Vec<usize>,
    is_overlapping: bool,
    is_unique: bool,
    is_monotonic_increasing: bool,
    choice: StrategyChoice,
    strategy: &'static dyn LookupStrategy,
}

impl IntervalIndex {
    /// Build an index from intervals, in storage order.
    pub fn new(intervals: impl IntoIterator<Item = Interval>) -> Self {
        IntervalIndex::build(intervals.into_iter().collect(), StrategyChoice::Auto)
    }

    /// Build an index, executing lookups as configured.
    pub fn with_config(
        intervals: impl IntoIterator<Item = Interval>,
        config: &IndexConfig,
    ) -> Self {
        IntervalIndex::build(intervals.into_iter().collect(), config.strategy)
    }

    /// Build an index of consecutive intervals from a list of breaks.
    ///
    /// `n` breaks give `n - 1` intervals; fewer than two breaks give an
    /// empty index.
    pub fn from_breaks(breaks: &[f64], config: &IndexConfig) -> Result<Self, BuildError> {
        let tuples = breaks.windows(2).map(|w| (w[0], w[1]));

        IntervalIndex::from_tuples(tuples, config)
    }

    /// Build an index from `(low, high)` pairs, all given the closure
    /// from `config`.
    pub fn from_tuples(
        tuples: impl IntoIterator<Item = (f64, f64)>,
        config: &IndexConfig,
    ) -> Result<Self, BuildError> {
        let intervals = tuples
            .into_iter()
            .enumerate()
            .map(|(position, (low, high))| {
                Interval::new(low, high, config.closed)
                    .map_err(|source| BuildError::InvalidInterval { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(IntervalIndex::build(intervals, config.strategy))
    }

    fn build(intervals: Vec<Interval>, choice: StrategyChoice) -> Self {
        let classification = classify(&intervals);
        let strategy: &'static dyn LookupStrategy =
            match (choice, classification.is_overlapping) {
                (StrategyChoice::Auto, false) => &NON_OVERLAPPING,
                (StrategyChoice::Auto, true) | (StrategyChoice::Scan, _) => &OVERLAPPING,
            };
        log::debug!(
            "Built index of {} intervals: overlapping={} unique={} monotonic={} strategy={}",
            intervals.len(),
            classification.is_overlapping,
            classification.is_unique,
            classification.is_monotonic_increasing,
            strategy.name()
        );

        IntervalIndex {
            intervals,
            sorted: classification.sorted,
            is_overlapping: classification.is_overlapping,
            is_unique: classification.is_unique,
            is_monotonic_increasing: classification.is_monotonic_increasing,
            choice,
            strategy,
        }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Interval at the given position.
    pub fn get(&self, position: usize) -> Option<&Interval> {
        self.intervals.get(position)
    }

    /// Iterate over the intervals, in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// True if two distinct positions share a value.
    pub fn is_overlapping(&self) -> bool {
        self.is_overlapping
    }

    /// True if no two positions hold equal intervals.
    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    /// True if intervals are stored in sorted order.
    pub fn is_monotonic_increasing(&self) -> bool {
        self.is_monotonic_increasing
    }

    /// The closure shared by all intervals, if there is one.
    pub fn closed(&self) -> Option<Closed> {
        let first = self.intervals.first()?.closed();
        self.intervals
            .iter()
            .all(|iv| iv.closed() == first)
            .then_some(first)
    }

    /// Name of the lookup strategy in use.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Build a new index from the intervals at the given positions.
    ///
    /// Positions may repeat. The new index keeps this index's
    /// strategy choice.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of bounds.
    pub fn take(&self, positions: &[usize]) -> IntervalIndex {
        IntervalIndex::build(
            positions.iter().map(|&pos| self.intervals[pos]).collect(),
            self.choice,
        )
    }

    /// Resolve a key into positions.
    ///
    /// - A scalar or an interval resolves to [Located::One] if it
    ///   matches a single position and to [Located::Many] if it
    ///   matches several. Matching nothing is [LookupError::NotFound].
    /// - A list resolves each element like a scalar or interval key
    ///   and concatenates the results. If any element matches nothing,
    ///   the whole lookup fails, listing all such elements.
    /// - A boolean mask must have the length of the index.
    /// - A slice resolves to a contiguous range of positions; see
    ///   [IntervalIndex::resolve_slice].
    pub fn locate(&self, key: impl Into<Key>) -> Result<Located, LookupError> {
        let key = key.into();
        log::trace!("locate {key:?} with {} strategy", self.strategy.name());

        match key {
            Key::Scalar(value) => self.get_loc(value),
            Key::Interval(interval) => self.get_interval_loc(&interval),
            Key::List(items) => self.locate_list(&items).map(Located::Many),
            Key::Mask(mask) => self.locate_mask(&mask).map(Located::Many),
            Key::Slice(slice) => self
                .resolve_slice(&slice)
                .map(|range| Located::Many(range.collect())),
        }
    }

    /// Locate the intervals containing `value`.
    pub fn get_loc(&self, value: f64) -> Result<Located, LookupError> {
        single_item(self.locate_scalar(value), Item::Scalar(value))
    }

    /// Locate the intervals equal to `interval` or, if there are none,
    /// those overlapping it.
    pub fn get_interval_loc(&self, interval: &Interval) -> Result<Located, LookupError> {
        single_item(self.locate_interval(interval), Item::Interval(*interval))
    }

    /// Positions whose interval contains `value`, in storage order.
    pub fn locate_scalar(&self, value: f64) -> Vec<usize> {
        self.strategy.locate_scalar(&self.table(), value)
    }

    /// Positions matching an interval key, in storage order.
    ///
    /// Exact matches take precedence: positions overlapping the key are
    /// only returned when no position holds an equal interval.
    pub fn locate_interval(&self, interval: &Interval) -> Vec<usize> {
        let exact = self.exact_matches(interval);
        if !exact.is_empty() {
            return exact.to_vec();
        }

        self.strategy.locate_overlaps(&self.table(), interval)
    }

    /// Positions holding an interval equal to `interval`.
    ///
    /// Equal intervals are adjacent in the sorted order and sorted by
    /// position, so this is a slice of it.
    fn exact_matches(&self, interval: &Interval) -> &[usize] {
        let start = self
            .sorted
            .partition_point(|&pos| self.intervals[pos] < *interval);
        let len = self.sorted[start..]
            .partition_point(|&pos| self.intervals[pos] == *interval);

        &self.sorted[start..start + len]
    }

    fn locate_item(&self, item: &Item) -> Vec<usize> {
        match item {
            Item::Scalar(value) => self.locate_scalar(*value),
            Item::Interval(interval) => self.locate_interval(interval),
        }
    }

    /// Resolve each element of a list key and concatenate the results.
    pub fn locate_list(&self, items: &[Item]) -> Result<Vec<usize>, LookupError> {
        if items.is_empty() {
            return Err(LookupError::NotFound { missing: vec![] });
        }

        let mut positions = Vec::with_capacity(items.len());
        let mut missing = vec![];
        for item in items {
            let found = self.locate_item(item);
            if found.is_empty() {
                missing.push(*item);
            } else {
                positions.extend(found);
            }
        }
        if !missing.is_empty() {
            log::trace!("{} of {} list elements not found", missing.len(), items.len());
            return Err(LookupError::NotFound { missing });
        }

        Ok(positions)
    }

    /// Positions where `mask` is true.
    pub fn locate_mask(&self, mask: &[bool]) -> Result<Vec<usize>, LookupError> {
        if mask.len() != self.len() {
            return Err(LookupError::LengthMismatch {
                expected: self.len(),
                actual: mask.len(),
            });
        }

        Ok(mask
            .iter()
            .enumerate()
            .filter_map(|(pos, &selected)| selected.then_some(pos))
            .collect())
    }

    /// Resolve a `[start:stop:step]` slice into a contiguous range of
    /// positions.
    ///
    /// The range starts at the first interval that contains `start` or
    /// lies after it and ends with the last interval that contains
    /// `stop` or lies before it. Missing bounds extend to the ends of
    /// the index.
    ///
    /// Both ends are searched in storage order. When intervals aren't
    /// stored sorted, the range may therefore include intervals lying
    /// entirely outside the bounds: with storage `(2, 3], (0, 1], (3, 4]`
    /// a stop of `0.5` gives `0..2`. Use [IntervalIndex::locate_mask]
    /// to select by value on such an index.
    ///
    /// Fails, checking in this order, if:
    /// - the step is anything other than 1 ([LookupError::InvalidStep]),
    /// - the index is not unique ([LookupError::AmbiguousSlice]),
    /// - a bound is an interval ([LookupError::UnsupportedSliceBound]).
    pub fn resolve_slice(&self, slice: &SliceKey) -> Result<Range<usize>, LookupError> {
        match slice.step {
            None | Some(1) => {}
            Some(step) => return Err(LookupError::InvalidStep(step)),
        }
        if !self.is_unique {
            return Err(LookupError::AmbiguousSlice);
        }
        let start = scalar_bound(slice.start)?;
        let stop = scalar_bound(slice.stop)?;

        Ok(self.strategy.resolve_slice(&self.table(), start, stop))
    }

    /// Resolve a slice with scalar bounds and the default step.
    pub fn slice_locs(
        &self,
        start: Option<f64>,
        stop: Option<f64>,
    ) -> Result<Range<usize>, LookupError> {
        self.resolve_slice(&SliceKey::between(start, stop))
    }

    fn table(&self) -> Table<'_> {
        Table {
            intervals: &self.intervals,
            sorted: &self.sorted,
            is_monotonic_increasing: self.is_monotonic_increasing,
        }
    }
}

impl PartialEq for IntervalIndex {
    /// Indexes are equal if they hold the same intervals in the same
    /// order, whatever their strategy.
    fn eq(&self, other: &Self) -> bool {
        self.intervals == other.intervals
    }
}

impl FromIterator<Interval> for IntervalIndex {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        IntervalIndex::new(iter)
    }
}

impl<'a> IntoIterator for &'a IntervalIndex {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn single_item(positions: Vec<usize>, item: Item) -> Result<Located, LookupError> {
    match positions.len() {
        0 => {
            log::trace!("{item} not found");
            Err(LookupError::not_found(item))
        }
        1 => Ok(Located::One(positions[0])),
        _ => Ok(Located::Many(positions)),
    }
}

fn scalar_bound(bound: Option<Bound>) -> Result<Option<f64>, LookupError> {
    match bound {
        None => Ok(None),
        Some(Bound::Scalar(value)) => Ok(Some(value)),
        Some(Bound::Interval(interval)) => Err(LookupError::UnsupportedSliceBound(interval)),
    }
}
