use intervix_types::Closed;

/// Index configuration.
///
/// Usually read from a TOML file:
///
/// ```toml
/// closed = "left"
/// strategy = "scan"
/// ```
#[derive(Clone, Copy, serde::Deserialize, serde::Serialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Closure given to intervals built from breaks or tuples.
    #[serde(default)]
    pub closed: Closed,

    /// How lookups are executed.
    #[serde(default)]
    pub strategy: StrategyChoice,
}

impl IndexConfig {
    pub fn new(closed: Closed) -> Self {
        IndexConfig {
            closed,
            ..Default::default()
        }
    }

    /// Parse a TOML configuration.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Return a copy with the given strategy.
    pub fn with_strategy(self, strategy: StrategyChoice) -> Self {
        IndexConfig { strategy, ..self }
    }
}

/// Selects the lookup strategy of an index.
#[derive(Clone, Copy, serde::Deserialize, serde::Serialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyChoice {
    /// Binary search when intervals don't overlap, pruned scan
    /// otherwise.
    #[default]
    Auto,

    /// Always use the pruned scan.
    ///
    /// Slower on non-overlapping indexes, same results.
    Scan,
}
