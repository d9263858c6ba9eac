//! Tap pairs and the rule for moving to the next one
//!
//! Sweep order: `tap_a` climbs toward `width - 1`, then `tap_b` descends to 0.
//! When `tap_a` runs into `tap_b` on the way up, `tap_b` steps down once.

use serde::{Deserialize, Serialize};
use crate::types::ConfigError;

/// Two register indices whose XOR produces the feedback bit
///
/// Both indices are valid for the width the pair was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TapPair {
    a: usize,
    b: usize,
}

impl TapPair {
    /// Create a pair checked against `width`
    pub fn new(a: usize, b: usize, width: usize) -> Result<Self, ConfigError> {
        for tap in [a, b] {
            if tap >= width {
                return Err(ConfigError::TapOutOfRange { tap, width });
            }
        }
        Ok(Self { a, b })
    }

    /// First pair of a sweep: `(0, width - 1)`
    pub fn initial(width: usize) -> Self {
        Self { a: 0, b: width.saturating_sub(1) }
    }

    pub fn a(&self) -> usize {
        self.a
    }

    pub fn b(&self) -> usize {
        self.b
    }

    /// Both taps on the same cell: feedback is always 0
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// `a + b`, folded into the seed when the pair is exhausted
    pub fn index_sum(&self) -> u64 {
        (self.a + self.b) as u64
    }
}

impl std::fmt::Display for TapPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.a, self.b)
    }
}

/// When does a freshly incremented `tap_a` force `tap_b` down?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapRule {
    /// `tap_a == tap_b`
    #[default]
    Equal,
    /// `tap_a % tap_b == 0` (never when `tap_b == 0`)
    Modulo,
}

impl TapRule {
    fn collides(self, a: usize, b: usize) -> bool {
        match self {
            TapRule::Equal => a == b,
            TapRule::Modulo => a.checked_rem(b) == Some(0),
        }
    }

    /// Next pair after `taps`, or `None` once both taps are exhausted
    pub fn advance(self, taps: TapPair, width: usize) -> Option<TapPair> {
        let last = width.saturating_sub(1);
        let TapPair { mut a, mut b } = taps;

        if a < last {
            a += 1;
            if self.collides(a, b) {
                b = b.saturating_sub(1);
            }
        } else if b > 0 {
            b -= 1;
        } else {
            return None;
        }

        Some(TapPair { a, b })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TapRule::Equal => "equal",
            TapRule::Modulo => "modulo",
        }
    }
}

impl std::fmt::Display for TapRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for TapRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equal" => Ok(TapRule::Equal),
            "modulo" => Ok(TapRule::Modulo),
            _ => Err(ConfigError::UnknownRule { kind: "tap rule", value: s.to_string() }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
