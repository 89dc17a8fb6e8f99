//! Lookup strategies.
//!
//! An index picks one strategy when it is built, depending on
//! whether its intervals overlap:
//!
//! - [NonOverlapping] relies on the highs being sorted once the
//!   intervals are sorted, so a scalar is located with a single binary
//!   search and matches at most one position.
//! - [Overlapping] prunes the sorted intervals to those starting at or
//!   before the key and filters what remains.
//!
//! [Overlapping] gives correct results on any index and can be forced
//! through [crate::config::StrategyChoice::Scan].

use intervix_types::Interval;
use std::fmt;
use std::ops::Range;

/// Read-only view of an index, as seen by a strategy.
pub(crate) struct Table<'a> {
    /// Intervals, in storage order.
    pub(crate) intervals: &'a [Interval],
    /// Storage positions, ordered by interval.
    pub(crate) sorted: &'a [usize],
    pub(crate) is_monotonic_increasing: bool,
}

impl<'a> Table<'a> {
    fn sorted_interval(&self, rank: usize) -> &'a Interval {
        &self.intervals[self.sorted[rank]]
    }

    /// Number of sorted intervals starting at or before `value`.
    fn count_starting_by(&self, value: f64) -> usize {
        self.sorted
            .partition_point(|&pos| self.intervals[pos].low() <= value)
    }
}

/// Operations whose algorithm depends on whether intervals overlap.
///
/// All positions returned are in storage order.
pub(crate) trait LookupStrategy: fmt::Debug + Sync {
    fn name(&self) -> &'static str;

    /// Positions whose interval contains `value`.
    fn locate_scalar(&self, table: &Table<'_>, value: f64) -> Vec<usize>;

    /// Positions whose interval overlaps `query`.
    fn locate_overlaps(&self, table: &Table<'_>, query: &Interval) -> Vec<usize>;

    /// Contiguous range of positions between two scalar label bounds.
    fn resolve_slice(&self, table: &Table<'_>, start: Option<f64>, stop: Option<f64>)
    -> Range<usize>;
}

/// Binary search over an index whose intervals don't overlap.
#[derive(Debug)]
pub(crate) struct NonOverlapping;

/// Pruned scan over an index whose intervals may overlap.
#[derive(Debug)]
pub(crate) struct Overlapping;

pub(crate) static NON_OVERLAPPING: NonOverlapping = NonOverlapping;
pub(crate) static OVERLAPPING: Overlapping = Overlapping;

impl LookupStrategy for NonOverlapping {
    fn name(&self) -> &'static str {
        "non-overlapping"
    }

    fn locate_scalar(&self, table: &Table<'_>, value: f64) -> Vec<usize> {
        // Intervals entirely below `value` form a prefix of the sorted
        // order. The first one past that prefix is the only candidate.
        let rank = table
            .sorted
            .partition_point(|&pos| !table.intervals[pos].has_point_at_or_after(value));
        match table.sorted.get(rank) {
            Some(&pos) if table.intervals[pos].contains(value) => vec![pos],
            _ => vec![],
        }
    }

    fn locate_overlaps(&self, table: &Table<'_>, query: &Interval) -> Vec<usize> {
        // Skip intervals entirely below the query; the overlapping ones
        // then form a single run.
        let first = table.sorted.partition_point(|&pos| {
            let interval = &table.intervals[pos];
            !(interval.high() > query.low()
                || (interval.high() == query.low()
                    && interval.closed_right()
                    && query.closed_left()))
        });
        let mut positions = (first..table.sorted.len())
            .take_while(|&rank| table.sorted_interval(rank).overlaps(query))
            .map(|rank| table.sorted[rank])
            .collect::<Vec<_>>();
        positions.sort_unstable();

        positions
    }

    fn resolve_slice(
        &self,
        table: &Table<'_>,
        start: Option<f64>,
        stop: Option<f64>,
    ) -> Range<usize> {
        if !table.is_monotonic_increasing {
            return scan_slice(table.intervals, start, stop);
        }

        let intervals = table.intervals;
        let first = start.map_or(0, |start| {
            intervals.partition_point(|iv| !iv.has_point_at_or_after(start))
        });
        let end = stop.map_or(intervals.len(), |stop| {
            intervals.partition_point(|iv| iv.has_point_at_or_before(stop))
        });

        first..end.max(first)
    }
}

impl LookupStrategy for Overlapping {
    fn name(&self) -> &'static str {
        "overlapping"
    }

    fn locate_scalar(&self, table: &Table<'_>, value: f64) -> Vec<usize> {
        let candidates = table.count_starting_by(value);
        let mut positions = table.sorted[..candidates]
            .iter()
            .copied()
            .filter(|&pos| table.intervals[pos].contains(value))
            .collect::<Vec<_>>();
        positions.sort_unstable();

        positions
    }

    fn locate_overlaps(&self, table: &Table<'_>, query: &Interval) -> Vec<usize> {
        let candidates = table.count_starting_by(query.high());
        let mut positions = table.sorted[..candidates]
            .iter()
            .copied()
            .filter(|&pos| table.intervals[pos].overlaps(query))
            .collect::<Vec<_>>();
        positions.sort_unstable();

        positions
    }

    fn resolve_slice(
        &self,
        table: &Table<'_>,
        start: Option<f64>,
        stop: Option<f64>,
    ) -> Range<usize> {
        scan_slice(table.intervals, start, stop)
    }
}

/// Resolve a slice by scanning storage order from both ends.
///
/// The range starts at the first interval that reaches `start` and
/// ends after the last interval that begins by `stop`.
fn scan_slice(intervals: &[Interval], start: Option<f64>, stop: Option<f64>) -> Range<usize> {
    let first = start.map_or(0, |start| {
        intervals
            .iter()
            .position(|iv| iv.has_point_at_or_after(start))
            .unwrap_or(intervals.len())
    });
    let end = stop.map_or(intervals.len(), |stop| {
        intervals
            .iter()
            .rposition(|iv| iv.has_point_at_or_before(stop))
            .map_or(0, |last| last + 1)
    });

    first..end.max(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use intervix_types::Closed;

    struct Fixture {
        intervals: Vec<Interval>,
        sorted: Vec<usize>,
        is_monotonic_increasing: bool,
    }

    impl Fixture {
        fn new(tuples: &[(f64, f64)], closed: Closed) -> Self {
            let intervals = tuples
                .iter()
                .map(|&(low, high)| Interval::new(low, high, closed).unwrap())
                .collect::<Vec<_>>();
            let classification = classify(&intervals);
            Fixture {
                intervals,
                sorted: classification.sorted,
                is_monotonic_increasing: classification.is_monotonic_increasing,
            }
        }

        fn breaks(n: usize, closed: Closed) -> Self {
            let tuples = (0..n)
                .map(|i| (i as f64, (i + 1) as f64))
                .collect::<Vec<_>>();
            Fixture::new(&tuples, closed)
        }

        fn table(&self) -> Table<'_> {
            Table {
                intervals: &self.intervals,
                sorted: &self.sorted,
                is_monotonic_increasing: self.is_monotonic_increasing,
            }
        }
    }

    fn iv(low: f64, high: f64, closed: Closed) -> Interval {
        Interval::new(low, high, closed).unwrap()
    }

    #[test]
    fn non_overlapping_scalar() {
        let f = Fixture::breaks(5, Closed::Right);
        let t = f.table();
        assert_eq!(vec![0], NON_OVERLAPPING.locate_scalar(&t, 0.5));
        assert_eq!(vec![0], NON_OVERLAPPING.locate_scalar(&t, 1.0));
        assert_eq!(vec![1], NON_OVERLAPPING.locate_scalar(&t, 1.5));
        assert_eq!(vec![4], NON_OVERLAPPING.locate_scalar(&t, 5.0));
        assert!(NON_OVERLAPPING.locate_scalar(&t, 0.0).is_empty());
        assert!(NON_OVERLAPPING.locate_scalar(&t, 5.5).is_empty());
        assert!(NON_OVERLAPPING.locate_scalar(&t, -3.0).is_empty());
        assert!(NON_OVERLAPPING.locate_scalar(&t, f64::NAN).is_empty());
    }

    #[test]
    fn non_overlapping_scalar_with_gaps_and_unsorted_storage() {
        let f = Fixture::new(&[(10.0, 20.0), (0.0, 1.0), (3.0, 4.0)], Closed::Left);
        let t = f.table();
        assert_eq!(vec![1], NON_OVERLAPPING.locate_scalar(&t, 0.0));
        assert!(NON_OVERLAPPING.locate_scalar(&t, 1.0).is_empty());
        assert!(NON_OVERLAPPING.locate_scalar(&t, 2.0).is_empty());
        assert_eq!(vec![2], NON_OVERLAPPING.locate_scalar(&t, 3.5));
        assert_eq!(vec![0], NON_OVERLAPPING.locate_scalar(&t, 10.0));
        assert!(NON_OVERLAPPING.locate_scalar(&t, 20.0).is_empty());
    }

    #[test]
    fn overlapping_scalar_in_storage_order() {
        let f = Fixture::new(&[(3.0, 7.0), (1.0, 5.0), (4.0, 4.5)], Closed::Right);
        let t = f.table();
        assert_eq!(vec![0, 1, 2], OVERLAPPING.locate_scalar(&t, 4.25));
        assert_eq!(vec![0, 1], OVERLAPPING.locate_scalar(&t, 4.0));
        assert_eq!(vec![1], OVERLAPPING.locate_scalar(&t, 2.0));
        assert_eq!(vec![0], OVERLAPPING.locate_scalar(&t, 7.0));
        assert!(OVERLAPPING.locate_scalar(&t, 1.0).is_empty());
    }

    #[test]
    fn overlaps_both_strategies() {
        let f = Fixture::breaks(5, Closed::Right);
        let t = f.table();
        let query = iv(3.0, 6.0, Closed::Right);
        assert_eq!(vec![3, 4], NON_OVERLAPPING.locate_overlaps(&t, &query));
        assert_eq!(vec![3, 4], OVERLAPPING.locate_overlaps(&t, &query));

        let touching = iv(5.0, 6.0, Closed::Right);
        assert!(NON_OVERLAPPING.locate_overlaps(&t, &touching).is_empty());
        assert!(OVERLAPPING.locate_overlaps(&t, &touching).is_empty());

        let touching_closed = iv(5.0, 6.0, Closed::Both);
        assert_eq!(vec![4], NON_OVERLAPPING.locate_overlaps(&t, &touching_closed));
        assert_eq!(vec![4], OVERLAPPING.locate_overlaps(&t, &touching_closed));

        let below = iv(-2.0, 0.0, Closed::Right);
        assert!(NON_OVERLAPPING.locate_overlaps(&t, &below).is_empty());
        assert!(OVERLAPPING.locate_overlaps(&t, &below).is_empty());
    }

    #[test]
    fn strategies_agree_on_non_overlapping_index() {
        for closed in [Closed::Left, Closed::Right, Closed::Neither] {
            let f = Fixture::new(
                &[(4.0, 5.0), (0.0, 1.0), (1.0, 2.0), (2.5, 3.0), (3.0, 4.0)],
                closed,
            );
            let t = f.table();
            for i in -4..=24 {
                let x = i as f64 / 4.0;
                assert_eq!(
                    OVERLAPPING.locate_scalar(&t, x),
                    NON_OVERLAPPING.locate_scalar(&t, x),
                    "{closed} {x}"
                );
                for j in (i + 1)..=24 {
                    let query = iv(x, j as f64 / 4.0, Closed::Both);
                    assert_eq!(
                        OVERLAPPING.locate_overlaps(&t, &query),
                        NON_OVERLAPPING.locate_overlaps(&t, &query),
                        "{closed} {query}"
                    );
                }
            }
        }
    }

    #[test]
    fn slice_bounds() {
        let f = Fixture::breaks(5, Closed::Right);
        let t = f.table();
        for strategy in [&NON_OVERLAPPING as &dyn LookupStrategy, &OVERLAPPING] {
            assert_eq!(0..3, strategy.resolve_slice(&t, None, Some(3.0)));
            assert_eq!(0..3, strategy.resolve_slice(&t, None, Some(2.5)));
            assert_eq!(0..3, strategy.resolve_slice(&t, Some(0.1), Some(2.5)));
            assert_eq!(0..3, strategy.resolve_slice(&t, Some(-1.0), Some(3.0)));
            assert_eq!(1..5, strategy.resolve_slice(&t, Some(1.5), None));
            assert_eq!(0..5, strategy.resolve_slice(&t, Some(1.0), None));
            assert_eq!(0..5, strategy.resolve_slice(&t, None, None));
            assert_eq!(5..5, strategy.resolve_slice(&t, Some(6.0), None));
            assert!(strategy.resolve_slice(&t, None, Some(0.0)).is_empty());
            assert!(strategy.resolve_slice(&t, Some(3.0), Some(1.0)).is_empty());
        }
    }

    #[test]
    fn slice_on_closed_left() {
        let f = Fixture::breaks(5, Closed::Left);
        let t = f.table();
        // [3, 4) contains the stop label 3.
        assert_eq!(0..4, NON_OVERLAPPING.resolve_slice(&t, None, Some(3.0)));
        // [0, 1) ends before 1.
        assert_eq!(1..5, NON_OVERLAPPING.resolve_slice(&t, Some(1.0), None));
    }

    #[test]
    fn slice_unsorted_storage_scans() {
        let f = Fixture::new(&[(2.0, 3.0), (0.0, 1.0), (3.0, 4.0)], Closed::Right);
        let t = f.table();
        assert_eq!(0..3, NON_OVERLAPPING.resolve_slice(&t, None, Some(3.5)));
        assert_eq!(0..2, NON_OVERLAPPING.resolve_slice(&t, None, Some(0.5)));
        assert_eq!(0..3, NON_OVERLAPPING.resolve_slice(&t, Some(0.5), None));
    }
}
