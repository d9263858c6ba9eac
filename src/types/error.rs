//! Error types for configuration and sweep finalization

use thiserror::Error;

/// Rejected before any stepping begins
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("register width {width} is outside the supported range {min}..={max}")]
    WidthOutOfRange { width: usize, min: usize, max: usize },
    #[error("seed {seed:#x} does not fit in a {width}-bit register")]
    SeedTooWide { seed: u64, width: usize },
    #[error("tap {tap} is not a valid index for a {width}-bit register")]
    TapOutOfRange { tap: usize, width: usize },
    #[error("pair limit must be at least 1")]
    EmptyPairLimit,
    #[error("unknown {kind} '{value}'")]
    UnknownRule { kind: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("sweep is still running (phase {0}); finalize only after DONE")]
    SweepInProgress(crate::types::SweepPhase),
    #[error("registry has already been finalized")]
    AlreadyFinalized,
    #[error("registry has not been finalized yet")]
    NotFinalized,
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
