//! Value types shared by the intervix crates.
//!
//! - [Interval]: an immutable numeric interval with per-side closure.
//! - [Closed]: which sides of an interval are inclusive.

mod closed;
mod interval;

pub use closed::{Closed, ClosedParseError};
pub use interval::{Interval, IntervalError};
