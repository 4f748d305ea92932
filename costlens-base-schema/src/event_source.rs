use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The origin tag of an event that was not authored by a user.
///
/// User-authored ("custom") events carry no source at all, which is why this type only knows
/// the integrations. Unknown tags are rejected during deserialization.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Imported from a GitHub repository through the GitHub integration.
    Github,
    /// Reported by the cloud provider.
    Provider,
}

impl EventSource {
    /// Returns the canonical name of this source.
    pub fn name(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Provider => "provider",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error used when parsing [`EventSource`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid event source")]
pub struct ParseEventSourceError;

impl FromStr for EventSource {
    type Err = ParseEventSourceError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(match string {
            "github" => Self::Github,
            "provider" => Self::Provider,
            _ => return Err(ParseEventSourceError),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("github".parse(), Ok(EventSource::Github));
        assert_eq!("provider".parse(), Ok(EventSource::Provider));
        assert_eq!("custom".parse::<EventSource>(), Err(ParseEventSourceError));
    }

    #[test]
    fn test_deserialize_unknown_fails() {
        assert!(serde_json::from_str::<EventSource>(r#""gitlab""#).is_err());
    }
}
