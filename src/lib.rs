//! lfsr-sweep: tap-pair sweep over a Fibonacci LFSR
//!
//! Steps a bit register through its full state space for every tap pair,
//! accumulates the feedback history per register length, flags collisions
//! against that history and reduces it into a checksum at the end.

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// REGISTER LIMITS
// =============================================================================

/// Largest register the sweep supports (one packed `u64` per snapshot)
pub const MAX_REGISTER_LEN: usize = 64;

/// Smallest register the sweep supports
pub const MIN_REGISTER_LEN: usize = 1;

// =============================================================================
// DEFAULT RUN
// =============================================================================

/// Seed used when none is given (2800)
pub const DEFAULT_SEED: u64 = 0x0af0;

/// Register width used when none is given, the bit width of a `u16` seed
pub const DEFAULT_WIDTH: usize = 16;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
