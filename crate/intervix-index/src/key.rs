//! Lookup keys accepted by [crate::IntervalIndex::locate] and the
//! positions it returns.

use intervix_types::Interval;
use std::fmt;
use std::ops::{RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};

/// A lookup key.
///
/// The variant decides how the key is resolved:
///
/// - [Key::Scalar] and [Key::Interval] are single-item lookups.
/// - [Key::List] resolves each item on its own and concatenates the
///   results in list order.
/// - [Key::Mask] selects the positions where the mask is true.
/// - [Key::Slice] selects a contiguous run of positions.
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    Scalar(f64),
    Interval(Interval),
    List(Vec<Item>),
    Mask(Vec<bool>),
    Slice(SliceKey),
}

/// One element of a [Key::List].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Item {
    Scalar(f64),
    Interval(Interval),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Scalar(x) => write!(f, "{x}"),
            Item::Interval(iv) => write!(f, "{iv}"),
        }
    }
}

impl From<f64> for Item {
    fn from(value: f64) -> Self {
        Item::Scalar(value)
    }
}

impl From<i64> for Item {
    fn from(value: i64) -> Self {
        Item::Scalar(value as f64)
    }
}

impl From<Interval> for Item {
    fn from(value: Interval) -> Self {
        Item::Interval(value)
    }
}

/// A start or stop bound of a [SliceKey].
///
/// Only scalar bounds can be resolved; interval bounds are accepted
/// as keys but always rejected by the slice resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    Scalar(f64),
    Interval(Interval),
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::Scalar(value)
    }
}

impl From<Interval> for Bound {
    fn from(value: Interval) -> Self {
        Bound::Interval(value)
    }
}

/// A `[start:stop:step]` request.
///
/// Both bounds are label bounds and are inclusive: every interval
/// that contains `stop` is part of the result.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SliceKey {
    pub start: Option<Bound>,
    pub stop: Option<Bound>,
    pub step: Option<i64>,
}

impl SliceKey {
    pub fn new(start: Option<Bound>, stop: Option<Bound>, step: Option<i64>) -> Self {
        SliceKey { start, stop, step }
    }

    /// A slice over the whole index, `[:]`.
    pub fn full() -> Self {
        SliceKey::default()
    }

    /// A slice with scalar bounds.
    pub fn between(start: Option<f64>, stop: Option<f64>) -> Self {
        SliceKey {
            start: start.map(Bound::Scalar),
            stop: stop.map(Bound::Scalar),
            step: None,
        }
    }

    /// Return a copy with the given step.
    pub fn with_step(self, step: i64) -> Self {
        SliceKey {
            step: Some(step),
            ..self
        }
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key::Scalar(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Scalar(value as f64)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Scalar(value.into())
    }
}

impl From<Interval> for Key {
    fn from(value: Interval) -> Self {
        Key::Interval(value)
    }
}

impl From<Item> for Key {
    fn from(value: Item) -> Self {
        match value {
            Item::Scalar(x) => Key::Scalar(x),
            Item::Interval(iv) => Key::Interval(iv),
        }
    }
}

impl From<Vec<Item>> for Key {
    fn from(value: Vec<Item>) -> Self {
        Key::List(value)
    }
}

impl From<Vec<f64>> for Key {
    fn from(value: Vec<f64>) -> Self {
        Key::List(value.into_iter().map(Item::Scalar).collect())
    }
}

impl From<Vec<i64>> for Key {
    fn from(value: Vec<i64>) -> Self {
        Key::List(value.into_iter().map(Item::from).collect())
    }
}

impl From<Vec<Interval>> for Key {
    fn from(value: Vec<Interval>) -> Self {
        Key::List(value.into_iter().map(Item::Interval).collect())
    }
}

impl From<Vec<bool>> for Key {
    fn from(value: Vec<bool>) -> Self {
        Key::Mask(value)
    }
}

impl From<&[bool]> for Key {
    fn from(value: &[bool]) -> Self {
        Key::Mask(value.to_vec())
    }
}

impl From<SliceKey> for Key {
    fn from(value: SliceKey) -> Self {
        Key::Slice(value)
    }
}

impl From<RangeFull> for Key {
    fn from(_: RangeFull) -> Self {
        Key::Slice(SliceKey::full())
    }
}

impl From<RangeInclusive<f64>> for Key {
    fn from(value: RangeInclusive<f64>) -> Self {
        let (start, stop) = value.into_inner();
        Key::Slice(SliceKey::between(Some(start), Some(stop)))
    }
}

impl From<RangeFrom<f64>> for Key {
    fn from(value: RangeFrom<f64>) -> Self {
        Key::Slice(SliceKey::between(Some(value.start), None))
    }
}

impl From<RangeToInclusive<f64>> for Key {
    fn from(value: RangeToInclusive<f64>) -> Self {
        Key::Slice(SliceKey::between(None, Some(value.end)))
    }
}

/// Positions resolved by a lookup.
///
/// A single-item key that matches exactly one position resolves to
/// [Located::One]; everything else resolves to [Located::Many], in
/// the order the positions should be gathered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Located {
    One(usize),
    Many(Vec<usize>),
}

impl Located {
    /// The positions, as a slice.
    pub fn positions(&self) -> &[usize] {
        match self {
            Located::One(pos) => std::slice::from_ref(pos),
            Located::Many(positions) => positions,
        }
    }

    pub fn into_vec(self) -> Vec<usize> {
        match self {
            Located::One(pos) => vec![pos],
            Located::Many(positions) => positions,
        }
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Located::One(_))
    }

    pub fn len(&self) -> usize {
        self.positions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervix_types::Closed;

    #[test]
    fn conversions() {
        assert_eq!(Key::Scalar(2.0), Key::from(2));
        assert_eq!(Key::Scalar(2.5), Key::from(2.5));
        assert_eq!(
            Key::List(vec![Item::Scalar(2.0), Item::Scalar(3.0)]),
            Key::from(vec![2i64, 3])
        );
        assert_eq!(Key::Mask(vec![true, false]), Key::from(&[true, false][..]));
    }

    #[test]
    fn range_conversions() {
        assert_eq!(
            Key::Slice(SliceKey::between(None, Some(3.0))),
            Key::from(..=3.0)
        );
        assert_eq!(
            Key::Slice(SliceKey::between(Some(0.1), Some(2.5))),
            Key::from(0.1..=2.5)
        );
        assert_eq!(
            Key::Slice(SliceKey::between(Some(1.0), None)),
            Key::from(1.0..)
        );
        assert_eq!(Key::Slice(SliceKey::full()), Key::from(..));
    }

    #[test]
    fn slice_with_step() {
        let slice = SliceKey::between(Some(0.0), Some(4.0)).with_step(2);
        assert_eq!(Some(2), slice.step);
        assert_eq!(Some(Bound::Scalar(0.0)), slice.start);
    }

    #[test]
    fn item_display() {
        let iv = Interval::new(-2.0, 0.0, Closed::Right).unwrap();
        assert_eq!("(-2, 0]", Item::Interval(iv).to_string());
        assert_eq!("1.5", Item::Scalar(1.5).to_string());
    }

    #[test]
    fn located_positions() {
        assert_eq!(&[3], Located::One(3).positions());
        assert_eq!(&[1, 2], Located::Many(vec![1, 2]).positions());
        assert!(Located::Many(vec![]).is_empty());
        assert!(Located::One(0).is_one());
        assert_eq!(vec![0, 1, 0], Located::Many(vec![0, 1, 0]).into_vec());
    }
}
