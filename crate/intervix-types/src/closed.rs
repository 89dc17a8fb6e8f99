use std::fmt;
use std::str::FromStr;

/// Which endpoints of an [crate::Interval] are inclusive.
///
/// The default is [Closed::Right], that is, `(low, high]`, which is
/// what an index built from a list of breaks normally uses.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Closed {
    /// `[low, high)`
    Left,
    /// `(low, high]`
    #[default]
    Right,
    /// `[low, high]`
    Both,
    /// `(low, high)`
    Neither,
}

impl Closed {
    /// True if the low endpoint is part of the interval.
    pub fn closed_left(self) -> bool {
        matches!(self, Closed::Left | Closed::Both)
    }

    /// True if the high endpoint is part of the interval.
    pub fn closed_right(self) -> bool {
        matches!(self, Closed::Right | Closed::Both)
    }

    /// Build from the inclusiveness of each side.
    pub fn from_sides(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Closed::Both,
            (true, false) => Closed::Left,
            (false, true) => Closed::Right,
            (false, false) => Closed::Neither,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Closed::Left => "left",
            Closed::Right => "right",
            Closed::Both => "both",
            Closed::Neither => "neither",
        }
    }
}

impl fmt::Display for Closed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Closed {
    type Err = ClosedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Closed::Left),
            "right" => Ok(Closed::Right),
            "both" => Ok(Closed::Both),
            "neither" => Ok(Closed::Neither),
            _ => Err(ClosedParseError(s.to_string())),
        }
    }
}

/// Returned when parsing an unknown closure name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid closure {0:?}: expected left, right, both or neither")]
pub struct ClosedParseError(String);
