//! Overlap classification, run once when an index is built.

use intervix_types::Interval;

/// Flags derived from a set of intervals, plus the sort order they
/// were derived from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Classification {
    /// Storage positions, ordered by interval. Positions holding equal
    /// intervals keep their storage order.
    pub(crate) sorted: Vec<usize>,

    /// Two distinct positions share at least one value.
    pub(crate) is_overlapping: bool,

    /// No two positions hold equal intervals.
    pub(crate) is_unique: bool,

    /// Storage order is already sorted.
    pub(crate) is_monotonic_increasing: bool,
}

/// Sort the intervals and sweep them once to compute the flags.
pub(crate) fn classify(intervals: &[Interval]) -> Classification {
    let mut sorted = (0..intervals.len()).collect::<Vec<_>>();
    // Stable, so equal intervals stay in storage order.
    sorted.sort_by(|&a, &b| intervals[a].cmp(&intervals[b]));

    let is_monotonic_increasing = intervals.windows(2).all(|w| w[0] <= w[1]);
    let is_unique = sorted
        .windows(2)
        .all(|w| intervals[w[0]] != intervals[w[1]]);
    let is_overlapping = sweep_overlaps(sorted.iter().map(|&pos| &intervals[pos]));

    Classification {
        sorted,
        is_overlapping,
        is_unique,
        is_monotonic_increasing,
    }
}

/// Return true if any two intervals of a sorted sequence overlap.
///
/// Keeps the highest `high` seen so far and whether an interval
/// ending there includes it. Every interval seen so far starts at or
/// before the current one, so the current one overlaps one of them iff
/// it starts before that maximum, or exactly on it with both sides
/// closed.
fn sweep_overlaps<'a>(sorted: impl Iterator<Item = &'a Interval>) -> bool {
    let mut reach: Option<(f64, bool)> = None;
    for interval in sorted {
        if let Some((max_high, max_closed)) = reach {
            if interval.low() < max_high
                || (interval.low() == max_high && max_closed && interval.closed_left())
            {
                return true;
            }
        }
        reach = match reach {
            Some((max_high, _)) if interval.high() > max_high => {
                Some((interval.high(), interval.closed_right()))
            }
            Some((max_high, max_closed)) if interval.high() == max_high => {
                Some((max_high, max_closed || interval.closed_right()))
            }
            Some(unchanged) => Some(unchanged),
            None => Some((interval.high(), interval.closed_right())),
        };
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervix_types::Closed;

    fn intervals(tuples: &[(f64, f64)], closed: Closed) -> Vec<Interval> {
        tuples
            .iter()
            .map(|&(low, high)| Interval::new(low, high, closed).unwrap())
            .collect()
    }

    /// Pairwise check, for comparison with the sweep.
    fn any_pair_overlaps(intervals: &[Interval]) -> bool {
        for (i, a) in intervals.iter().enumerate() {
            for b in &intervals[i + 1..] {
                if a.overlaps(b) {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn empty_and_single() {
        let c = classify(&[]);
        assert!(!c.is_overlapping);
        assert!(c.is_unique);
        assert!(c.is_monotonic_increasing);
        assert!(c.sorted.is_empty());

        let c = classify(&intervals(&[(0.0, 1.0)], Closed::Right));
        assert!(!c.is_overlapping);
        assert!(c.is_unique);
        assert_eq!(vec![0], c.sorted);
    }

    #[test]
    fn adjacent_breaks_do_not_overlap() {
        let c = classify(&intervals(
            &[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0), (4.0, 5.0)],
            Closed::Right,
        ));
        assert!(!c.is_overlapping);
        assert!(c.is_unique);
        assert!(c.is_monotonic_increasing);
        assert_eq!(vec![0, 1, 2, 3, 4], c.sorted);
    }

    #[test]
    fn adjacent_closed_both_overlap() {
        let c = classify(&intervals(&[(0.0, 1.0), (1.0, 2.0)], Closed::Both));
        assert!(c.is_overlapping);
        assert!(c.is_unique);
    }

    #[test]
    fn overlapping() {
        let c = classify(&intervals(&[(1.0, 5.0), (3.0, 7.0)], Closed::Right));
        assert!(c.is_overlapping);
        assert!(c.is_unique);
    }

    #[test]
    fn nested_far_back() {
        // (0, 10] still covers (8, 9] even though (2, 3] came in between.
        let c = classify(&intervals(
            &[(0.0, 10.0), (2.0, 3.0), (8.0, 9.0)],
            Closed::Right,
        ));
        assert!(c.is_overlapping);
    }

    #[test]
    fn duplicates() {
        let c = classify(&intervals(&[(1.0, 3.0), (1.0, 3.0), (3.0, 7.0)], Closed::Right));
        assert!(c.is_overlapping);
        assert!(!c.is_unique);
        assert_eq!(vec![0, 1, 2], c.sorted);
    }

    #[test]
    fn same_values_different_closure_are_unique() {
        let v = vec![
            Interval::new(1.0, 3.0, Closed::Right).unwrap(),
            Interval::new(1.0, 3.0, Closed::Left).unwrap(),
        ];
        let c = classify(&v);
        assert!(c.is_unique);
        assert!(c.is_overlapping);
        assert!(!c.is_monotonic_increasing);
        assert_eq!(vec![1, 0], c.sorted);
    }

    #[test]
    fn unsorted_storage() {
        let c = classify(&intervals(&[(2.0, 3.0), (0.0, 1.0), (1.0, 2.0)], Closed::Right));
        assert!(!c.is_overlapping);
        assert!(!c.is_monotonic_increasing);
        assert_eq!(vec![1, 2, 0], c.sorted);
    }

    #[test]
    fn point_touching_open_side() {
        let v = vec![
            Interval::point(1.0).unwrap(),
            Interval::new(1.0, 2.0, Closed::Right).unwrap(),
            Interval::new(0.0, 1.0, Closed::Left).unwrap(),
        ];
        assert!(!classify(&v).is_overlapping);

        let v = vec![
            Interval::point(1.0).unwrap(),
            Interval::new(1.0, 2.0, Closed::Left).unwrap(),
        ];
        assert!(classify(&v).is_overlapping);
    }

    #[test]
    fn sweep_agrees_with_pairwise() {
        let closures = [Closed::Left, Closed::Right, Closed::Both, Closed::Neither];
        let shapes: &[&[(f64, f64)]] = &[
            &[(0.0, 1.0), (1.0, 2.0)],
            &[(0.0, 1.0), (2.0, 3.0), (1.0, 2.0)],
            &[(0.0, 4.0), (1.0, 2.0)],
            &[(0.0, 1.0), (0.5, 0.75), (3.0, 4.0)],
            &[(5.0, 6.0), (0.0, 1.0), (1.0, 5.0)],
        ];
        for shape in shapes {
            for &a in &closures {
                for &b in &closures {
                    let v = shape
                        .iter()
                        .enumerate()
                        .map(|(i, &(low, high))| {
                            Interval::new(low, high, if i % 2 == 0 { a } else { b }).unwrap()
                        })
                        .collect::<Vec<_>>();
                    assert_eq!(
                        any_pair_overlaps(&v),
                        classify(&v).is_overlapping,
                        "{v:?}"
                    );
                }
            }
        }
    }
}
