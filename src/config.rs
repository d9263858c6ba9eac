//! Sweep configuration
//!
//! Everything a run depends on is fixed here and validated before the first
//! step. Defaults reproduce the classic run: 16-bit register, seed `0x0af0`,
//! taps `(0, 15)`, exact collisions, equal-tap rule, clock capture on.

use serde::{Deserialize, Serialize};
use crate::types::{check_width, BitRegister, CollisionRule, ConfigError, TapPair, TapRule};
use crate::{DEFAULT_SEED, DEFAULT_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Initial register contents, bit `i` → cell `i`
    pub seed: u64,
    /// Register length
    pub width: usize,
    /// Starting `(tap_a, tap_b)`; `None` means `(0, width - 1)`
    pub initial_taps: Option<(usize, usize)>,
    pub collision_rule: CollisionRule,
    pub tap_rule: TapRule,
    /// Store a register snapshot at every step
    pub capture_clock: bool,
    /// Stop after this many tap pairs
    pub max_pairs: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_WIDTH)
    }
}

impl SweepConfig {
    pub fn new(seed: u64, width: usize) -> Self {
        Self {
            seed,
            width,
            initial_taps: None,
            collision_rule: CollisionRule::default(),
            tap_rule: TapRule::default(),
            capture_clock: true,
            max_pairs: None,
        }
    }

    pub fn with_taps(mut self, tap_a: usize, tap_b: usize) -> Self {
        self.initial_taps = Some((tap_a, tap_b));
        self
    }

    pub fn with_collision_rule(mut self, rule: CollisionRule) -> Self {
        self.collision_rule = rule;
        self
    }

    pub fn with_tap_rule(mut self, rule: TapRule) -> Self {
        self.tap_rule = rule;
        self
    }

    pub fn with_clock_capture(mut self, capture: bool) -> Self {
        self.capture_clock = capture;
        self
    }

    pub fn with_max_pairs(mut self, max_pairs: u64) -> Self {
        self.max_pairs = Some(max_pairs);
        self
    }

    /// Check width, seed, taps and pair limit
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width(self.width)?;
        self.register()?;
        self.taps()?;
        if self.max_pairs == Some(0) {
            return Err(ConfigError::EmptyPairLimit);
        }
        Ok(())
    }

    /// Register loaded from the seed
    pub fn register(&self) -> Result<BitRegister, ConfigError> {
        BitRegister::from_seed(self.seed, self.width)
    }

    /// First tap pair of the sweep
    pub fn taps(&self) -> Result<TapPair, ConfigError> {
        check_width(self.width)?;
        match self.initial_taps {
            Some((a, b)) => TapPair::new(a, b, self.width),
            None => Ok(TapPair::initial(self.width)),
        }
    }
}
