//! Intervix - Interval-Indexed Lookup Library
//!
//! An [IntervalIndex] labels the rows of a sequence with numeric
//! intervals and resolves lookup keys into row positions.
//!
//! # Main Components
//!
//! - `index`: the index, its construction and the query dispatcher.
//! - `key`: lookup keys and resolved positions.
//! - `series`: a minimal labeled sequence built on the index.
//! - `config`: index configuration, read from TOML.
//! - `error`: lookup and construction errors.
//! - `logging`: env_logger setup for binaries.
//!
//! ```
//! use intervix_index::{IndexConfig, IntervalIndex, Located};
//!
//! let index = IntervalIndex::from_breaks(&[0.0, 1.0, 2.0, 3.0], &IndexConfig::default())?;
//! assert_eq!(Located::One(1), index.locate(1.5)?);
//! assert_eq!(Located::Many(vec![0, 1]), index.locate(..=2.0)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod classify;
pub mod config;
mod error;
mod index;
mod key;
pub mod logging;
mod series;
mod strategy;

pub use config::{IndexConfig, StrategyChoice};
pub use error::{BuildError, LookupError};
pub use index::IntervalIndex;
pub use intervix_types::{Closed, Interval, IntervalError};
pub use key::{Bound, Item, Key, Located, SliceKey};
pub use series::{IntervalSeries, Selection};
