//! Deployment environment selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Process variable holding the environment indicator
pub const ENV_VAR: &str = "COFFEE_ENV";

/// A deployment environment with its own set of service URLs
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Testing,
        Environment::Production,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        }
    }

    /// Resolve an environment indicator.
    ///
    /// An absent or blank indicator selects [`Environment::Development`]. Any
    /// other value must name one of the known environments (case-insensitive);
    /// unknown names are rejected rather than mapped to a fallback.
    pub fn resolve(indicator: Option<&str>) -> Result<Self, ConfigError> {
        match indicator.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(name) => name.parse(),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
