use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The granularity at which events are bucketed by the aggregation endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggBy {
    /// One bucket per calendar day.
    #[default]
    Day,
    /// One bucket per week.
    Week,
    /// One bucket per calendar month.
    Month,
}

impl AggBy {
    /// Returns the canonical name of this granularity.
    pub fn name(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
        }
    }
}

impl fmt::Display for AggBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error used when parsing [`AggBy`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid aggregation granularity")]
pub struct ParseAggByError;

impl FromStr for AggBy {
    type Err = ParseAggByError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(match string {
            "DAY" => Self::Day,
            "WEEK" => Self::Week,
            "MONTH" => Self::Month,
            _ => return Err(ParseAggByError),
        })
    }
}
