//! Sweep phase definitions

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

/// The three phases of a tap sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SweepPhase {
    /// Clocking the register through its cycle for the current tap pair
    Stepping,
    /// Cycle exhausted, reseeding and picking the next tap pair
    Advancing,
    /// No tap pair left (or pair limit reached), terminal
    Done,
}

impl SweepPhase {
    /// Color `text` for terminal display
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            SweepPhase::Stepping => text.dimmed(),
            SweepPhase::Advancing => text.yellow(),
            SweepPhase::Done => text.green().bold(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == SweepPhase::Done
    }
}

impl std::fmt::Display for SweepPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SweepPhase::Stepping => "STEPPING",
            SweepPhase::Advancing => "ADVANCING",
            SweepPhase::Done => "DONE",
        };
        write!(f, "{}", name)
    }
}
