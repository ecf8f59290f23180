//! Go-style duration strings as they appear in provider configuration.

use crate::validation::{format_go_duration, parse_go_duration};
use chrono::TimeDelta;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Duration (de)serialised as a Go duration string (`"24h"`, `"1h30m"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetaDuration(pub TimeDelta);

impl MetaDuration {
    #[must_use]
    pub fn hours(hours: i64) -> Self {
        Self(TimeDelta::hours(hours))
    }

    #[must_use]
    pub fn as_delta(&self) -> TimeDelta {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for MetaDuration {
    fn default() -> Self {
        Self(TimeDelta::zero())
    }
}

impl From<TimeDelta> for MetaDuration {
    fn from(delta: TimeDelta) -> Self {
        Self(delta)
    }
}

impl FromStr for MetaDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_go_duration(s).map(Self)
    }
}

impl fmt::Display for MetaDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_go_duration(self.0))
    }
}

impl Serialize for MetaDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MetaDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|e: anyhow::Error| de::Error::custom(format!("{e:#}")))
    }
}
