//! Comparison rules for matching a register against a stored feedback stream

use serde::{Deserialize, Serialize};
use crate::types::ConfigError;

/// How a register is compared against a recorded block stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionRule {
    /// Stream length equals the register length and every bit agrees
    #[default]
    Exact,
    /// The overlapping prefix (`min` of both lengths, non-empty) agrees
    ///
    /// Matches spuriously while a stream is shorter than the register.
    Prefix,
}

impl CollisionRule {
    /// Compare `current` register cells against one `stored` stream
    pub fn matches(self, stored: &[bool], current: &[bool]) -> bool {
        match self {
            CollisionRule::Exact => stored == current,
            CollisionRule::Prefix => {
                let n = stored.len().min(current.len());
                n > 0 && stored[..n] == current[..n]
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollisionRule::Exact => "exact",
            CollisionRule::Prefix => "prefix",
        }
    }
}

impl std::fmt::Display for CollisionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for CollisionRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "strict" => Ok(CollisionRule::Exact),
            "prefix" => Ok(CollisionRule::Prefix),
            _ => Err(ConfigError::UnknownRule { kind: "collision rule", value: s.to_string() }),
        }
    }
}
