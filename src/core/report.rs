//! Run reports
//!
//! A finished sweep can be written out as JSON: config, summary and one
//! entry per register length with a SHA-256 digest of its packed stream.
//! The registry itself is never persisted.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::SweepConfig;
use crate::core::checksum::pack_bytes;
use crate::core::{SequenceState, TapSweeper};
use crate::types::{SweepError, SweepSummary, TapPair};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub config: SweepConfig,
    pub summary: SweepSummary,
    pub lengths: Vec<LengthReport>,
}

/// Per-length slice of the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthReport {
    pub length: usize,
    /// Tap pair that created the record
    pub origin: TapPair,
    pub stream_bits: usize,
    pub snapshot_count: usize,
    /// Hex SHA-256 of the stream packed MSB-first
    pub stream_digest: String,
}

impl LengthReport {
    fn from_state(state: &SequenceState) -> Self {
        Self {
            length: state.width(),
            origin: state.origin(),
            stream_bits: state.block_stream().len(),
            snapshot_count: state.clock_len(),
            stream_digest: hex(&sha256(&pack_bytes(state.block_stream()))),
        }
    }
}

impl RunReport {
    /// Build a report from a finalized sweep
    ///
    /// Reporting before finalization would publish a checksum of 0.
    pub fn from_sweep(sweeper: &TapSweeper) -> Result<Self, SweepError> {
        if !sweeper.registry().is_sealed() {
            return Err(SweepError::NotFinalized);
        }

        let summary = sweeper.summary();
        let lengths: Vec<LengthReport> = sweeper
            .registry()
            .iter()
            .map(LengthReport::from_state)
            .collect();

        let generated_at = Utc::now();
        let digest_prefix = lengths
            .first()
            .map(|l| l.stream_digest[..8].to_string())
            .unwrap_or_else(|| "00000000".to_string());
        let id = format!(
            "sweep_{}_{:x}_{}",
            generated_at.format("%Y%m%d_%H%M%S"),
            summary.seed,
            digest_prefix
        );

        Ok(Self {
            id,
            generated_at,
            config: sweeper.config().clone(),
            summary,
            lengths,
        })
    }
}

/// Write `report` as pretty JSON, creating parent directories
pub fn save_report(report: &RunReport, path: impl AsRef<Path>) -> Result<PathBuf, SweepError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;

    tracing::info!(path = %path.display(), id = %report.id, "report saved");
    Ok(path.to_path_buf())
}

/// Load a report written by [`save_report`]
pub fn load_report(path: impl AsRef<Path>) -> Result<RunReport, SweepError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// SHA-256 helper
fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NullObserver;

    fn finished(seed: u64, width: usize) -> TapSweeper {
        let mut sweeper = TapSweeper::new(SweepConfig::new(seed, width)).unwrap();
        sweeper.run(&mut NullObserver).unwrap();
        sweeper
    }

    #[test]
    fn test_report_requires_finalized_sweep() {
        let mut sweeper = TapSweeper::new(SweepConfig::new(0b101, 3)).unwrap();
        sweeper.step();
        assert!(matches!(RunReport::from_sweep(&sweeper), Err(SweepError::NotFinalized)));
    }

    #[test]
    fn test_report_contents() {
        let sweeper = finished(0b1010, 4);
        let report = RunReport::from_sweep(&sweeper).unwrap();

        assert_eq!(report.summary.checksum, 1848);
        assert_eq!(report.lengths.len(), 1);

        let entry = &report.lengths[0];
        assert_eq!(entry.length, 4);
        assert_eq!(entry.origin, TapPair::initial(4));
        assert_eq!(entry.stream_bits, 96);
        assert_eq!(entry.snapshot_count, 95);
        assert_eq!(entry.stream_digest.len(), 64);
        assert!(report.id.starts_with("sweep_"));
    }

    #[test]
    fn test_digest_is_deterministic() {
        let a = RunReport::from_sweep(&finished(0b101, 3)).unwrap();
        let b = RunReport::from_sweep(&finished(0b101, 3)).unwrap();
        let c = RunReport::from_sweep(&finished(0b110, 3)).unwrap();

        assert_eq!(a.lengths[0].stream_digest, b.lengths[0].stream_digest);
        assert_ne!(a.lengths[0].stream_digest, c.lengths[0].stream_digest);
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex(&sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
