//! Core types for lfsr-sweep

mod collision;
mod error;
mod output;
mod phase;
mod register;
mod taps;

pub use collision::CollisionRule;
pub use error::{ConfigError, SweepError};
pub use output::{AdvanceOutput, StepOutput, StepView, SweepSummary};
pub use phase::SweepPhase;
pub use register::{check_width, cycle_threshold, width_mask, BitRegister};
pub use taps::{TapPair, TapRule};
