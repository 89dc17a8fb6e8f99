use anyhow::Context as _;
use intervix_index::{IndexConfig, IntervalIndex, StrategyChoice};
use intervix_types::{Closed, Interval};
use std::fs;
use std::path::Path;

/// An index, as described in a TOML file.
///
/// Either list breaks:
///
/// ```toml
/// closed = "right"
/// breaks = [0, 1, 2, 3]
/// ```
///
/// or intervals, each with an optional closure:
///
/// ```toml
/// [[interval]]
/// low = 1
/// high = 5
///
/// [[interval]]
/// low = 3
/// high = 7
/// closed = "both"
/// ```
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct IndexFile {
    /// Closure of the breaks, and of intervals that don't set one.
    #[serde(default)]
    pub(crate) closed: Closed,

    #[serde(default)]
    pub(crate) strategy: StrategyChoice,

    #[serde(default)]
    pub(crate) breaks: Option<Vec<f64>>,

    #[serde(default, rename = "interval")]
    pub(crate) intervals: Vec<IntervalEntry>,
}

#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct IntervalEntry {
    pub(crate) low: f64,
    pub(crate) high: f64,

    /// Defaults to the closure of the file.
    #[serde(default)]
    pub(crate) closed: Option<Closed>,
}

impl IndexFile {
    pub(crate) fn parse(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub(crate) fn read(path: &Path) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;

        IndexFile::parse(&content).with_context(|| format!("invalid index file {}", path.display()))
    }

    /// Index configuration set by the file.
    pub(crate) fn config(&self) -> IndexConfig {
        IndexConfig::new(self.closed).with_strategy(self.strategy)
    }

    /// Build the index, optionally overriding the configured strategy.
    pub(crate) fn build(&self, config: &IndexConfig) -> anyhow::Result<IntervalIndex> {
        match (&self.breaks, self.intervals.is_empty()) {
            (Some(_), false) => {
                anyhow::bail!("index file must define either breaks or intervals, not both")
            }
            (Some(breaks), true) => Ok(IntervalIndex::from_breaks(breaks, config)?),
            (None, _) => {
                let intervals = self
                    .intervals
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        Interval::new(entry.low, entry.high, entry.closed.unwrap_or(config.closed))
                            .with_context(|| format!("interval #{i}"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;

                Ok(IntervalIndex::with_config(intervals, config))
            }
        }
    }
}
