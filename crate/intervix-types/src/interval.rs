//! The `Interval` type and its endpoint ordering.
//!
//! An [Interval] is an immutable numeric range `low..high` whose
//! endpoints are independently inclusive or exclusive, as described
//! by [Closed].
//!
//! - Endpoints are never NaN and `low <= high`.
//! - `low == high` is only allowed for [Closed::Both], which is a
//!   single point. Every valid interval contains at least one value.
//! - Intervals are totally ordered by `low`, then `high`, then
//!   closure, so equal intervals end up next to each other once sorted.
//!
//! # Examples
//!
//! ```rust
//! use intervix_types::{Closed, Interval};
//!
//! let a = Interval::new(0.0, 1.0, Closed::Right).unwrap();
//! let b = Interval::new(1.0, 2.0, Closed::Right).unwrap();
//! assert!(a.contains(1.0));
//! assert!(!b.contains(1.0));
//! assert!(!a.overlaps(&b));
//! ```

use crate::Closed;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A numeric interval with configurable inclusive/exclusive endpoints.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct Interval {
    low: f64,
    high: f64,
    closed: Closed,
}

impl Interval {
    /// Create a new interval.
    ///
    /// Fails if an endpoint is NaN, if `low > high` or if `low ==
    /// high` for anything other than [Closed::Both].
    pub fn new(low: f64, high: f64, closed: Closed) -> Result<Self, IntervalError> {
        if low.is_nan() || high.is_nan() {
            return Err(IntervalError::NotANumber);
        }
        if low > high {
            return Err(IntervalError::InvertedBounds { low, high });
        }
        if low == high && closed != Closed::Both {
            return Err(IntervalError::EmptyPoint { value: low, closed });
        }

        // Adding 0.0 turns -0.0 into 0.0, so that equality, hashing
        // and total_cmp all agree.
        Ok(Interval {
            low: low + 0.0,
            high: high + 0.0,
            closed,
        })
    }

    /// The interval `[value, value]`.
    pub fn point(value: f64) -> Result<Self, IntervalError> {
        Interval::new(value, value, Closed::Both)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn closed(&self) -> Closed {
        self.closed
    }

    pub fn closed_left(&self) -> bool {
        self.closed.closed_left()
    }

    pub fn closed_right(&self) -> bool {
        self.closed.closed_right()
    }

    /// True for a single-point interval `[x, x]`.
    pub fn is_point(&self) -> bool {
        self.low == self.high
    }

    /// Distance between the two endpoints.
    pub fn length(&self) -> f64 {
        self.high - self.low
    }

    /// Midpoint between the two endpoints.
    pub fn mid(&self) -> f64 {
        self.low + self.length() / 2.0
    }

    /// Check whether `value` is within the interval, honoring closure.
    pub fn contains(&self, value: f64) -> bool {
        (value > self.low || (self.closed_left() && value == self.low))
            && (value < self.high || (self.closed_right() && value == self.high))
    }

    /// True if this interval and `other` share at least one value.
    ///
    /// Intervals that only touch at a boundary overlap if both are
    /// closed on that side.
    pub fn overlaps(&self, other: &Interval) -> bool {
        let self_starts_first = self.low < other.high
            || (self.low == other.high && self.closed_left() && other.closed_right());
        let other_starts_first = other.low < self.high
            || (other.low == self.high && other.closed_left() && self.closed_right());

        self_starts_first && other_starts_first
    }

    /// True if the interval contains `value` or any value above it.
    pub fn has_point_at_or_after(&self, value: f64) -> bool {
        self.high > value || (self.closed_right() && self.high == value)
    }

    /// True if the interval contains `value` or any value below it.
    pub fn has_point_at_or_before(&self, value: f64) -> bool {
        self.low < value || (self.closed_left() && self.low == value)
    }

    /// Compare the interval with a scalar.
    ///
    /// Returns [Ordering::Less] if the whole interval is below
    /// `value`, [Ordering::Greater] if it is above and
    /// [Ordering::Equal] if it contains `value`. A NaN compares as
    /// [Ordering::Less].
    pub fn cmp_scalar(&self, value: f64) -> Ordering {
        if !self.has_point_at_or_after(value) {
            Ordering::Less
        } else if !self.has_point_at_or_before(value) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

// Endpoints are never NaN.
impl Eq for Interval {}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.low
            .total_cmp(&other.low)
            .then_with(|| self.high.total_cmp(&other.high))
            .then_with(|| self.closed.cmp(&other.closed))
    }
}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.low.to_bits().hash(state);
        self.high.to_bits().hash(state);
        self.closed.hash(state);
    }
}

impl fmt::Display for Interval {
    /// Formats the interval as `(low, high]`, with brackets matching
    /// the closure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.closed_left() { '[' } else { '(' },
            self.low,
            self.high,
            if self.closed_right() { ']' } else { ')' }
        )
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = IntervalError;

    /// Build an interval closed on the right, the default closure.
    fn try_from((low, high): (f64, f64)) -> Result<Self, Self::Error> {
        Interval::new(low, high, Closed::default())
    }
}

/// Serialized form of an [Interval], checked when converted back.
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct RawInterval {
    low: f64,
    high: f64,
    #[serde(default)]
    closed: Closed,
}

impl TryFrom<RawInterval> for Interval {
    type Error = IntervalError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.low, raw.high, raw.closed)
    }
}

impl From<Interval> for RawInterval {
    fn from(interval: Interval) -> Self {
        RawInterval {
            low: interval.low,
            high: interval.high,
            closed: interval.closed,
        }
    }
}

/// Errors returned when building an [Interval].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntervalError {
    #[error("interval endpoints must not be NaN")]
    NotANumber,

    #[error("interval low {low} is greater than high {high}")]
    InvertedBounds { low: f64, high: f64 },

    /// Only [Closed::Both] allows `low == high`.
    #[error("interval ({value}, {value}) closed on {closed} is empty")]
    EmptyPoint { value: f64, closed: Closed },
}
