//! Core identifiers shared across the tracker.

use crate::error::TrackError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Line number within a unit (1-based)
pub type Line = u32;

/// Qualified name of an executing routine, root segment first.
///
/// `"__anonymous_block.PROC1.PROC2"` is held as three segments; the dotted
/// form only exists at the host and serialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitName {
    segments: Vec<String>,
}

impl UnitName {
    pub fn new<I, S>(segments: I) -> Result<Self, TrackError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(TrackError::invalid("unit name has no segments"));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TrackError::invalid("unit name has an empty segment"));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Innermost segment (the routine itself)
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl FromStr for UnitName {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TrackError::invalid("unit name is empty"));
        }
        UnitName::new(s.split('.'))
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl Serialize for UnitName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.dotted())
    }
}

impl<'de> Deserialize<'de> for UnitName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of the host's actual runtime stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub unit: UnitName,
    pub line: Line,
}

impl CallSite {
    pub fn new(unit: UnitName, line: Line) -> Result<Self, TrackError> {
        if line == 0 {
            return Err(TrackError::invalid(format!(
                "line must be positive (unit {})",
                unit
            )));
        }
        Ok(Self { unit, line })
    }

    /// Parse a dotted unit name and build the call site.
    pub fn parse(unit: &str, line: Line) -> Result<Self, TrackError> {
        Self::new(unit.parse()?, line)
    }
}

/// Number of innermost actual frames to exclude before comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct HideDepth(usize);

impl HideDepth {
    pub const NONE: HideDepth = HideDepth(0);

    pub fn new(depth: usize) -> Self {
        HideDepth(depth)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Validate a hide depth handed over by the host, which may be null.
    pub fn from_host(raw: Option<i64>) -> Result<Self, TrackError> {
        match raw {
            None => Err(TrackError::invalid("hide depth must not be null")),
            Some(depth) => HideDepth::try_from(depth),
        }
    }
}

impl TryFrom<i64> for HideDepth {
    type Error = TrackError;

    fn try_from(depth: i64) -> Result<Self, Self::Error> {
        usize::try_from(depth)
            .map(HideDepth)
            .map_err(|_| TrackError::invalid(format!("hide depth must not be negative, got {depth}")))
    }
}

impl From<usize> for HideDepth {
    fn from(depth: usize) -> Self {
        HideDepth(depth)
    }
}

/// Identifier of one tracking session inside a registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
