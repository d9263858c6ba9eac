//! Integration tests for run reports and finalization
//!
//! - Report only from a finalized sweep
//! - Save/load round trip on disk
//! - Double finalization is rejected, accumulator is never reset implicitly

use lfsr_sweep::config::SweepConfig;
use lfsr_sweep::core::{load_report, save_report, NullObserver, OutputAccumulator, RunReport, TapSweeper};
use lfsr_sweep::types::{CollisionRule, SweepError};
use pretty_assertions::assert_eq;

fn finished(config: SweepConfig) -> TapSweeper {
    let mut sweeper = TapSweeper::new(config).unwrap();
    sweeper.run(&mut NullObserver).unwrap();
    sweeper
}

#[test]
fn test_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("run.json");

    let sweeper = finished(SweepConfig::new(0b1010, 4).with_collision_rule(CollisionRule::Prefix));
    let report = RunReport::from_sweep(&sweeper).unwrap();

    let saved = save_report(&report, &path).unwrap();
    assert_eq!(saved, path);

    let loaded = load_report(&path).unwrap();
    assert_eq!(loaded, report);
    assert_eq!(loaded.summary.collisions, 9);
    assert_eq!(loaded.config.collision_rule, CollisionRule::Prefix);
}

#[test]
fn test_report_json_shape() {
    let sweeper = finished(SweepConfig::new(0b101, 3));
    let report = RunReport::from_sweep(&sweeper).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["checksum"], 399);
    assert_eq!(json["lengths"][0]["length"], 3);
    assert_eq!(json["lengths"][0]["origin"]["b"], 2);
    assert_eq!(json["config"]["tap_rule"], "equal");
}

#[test]
fn test_load_missing_report_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_report(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SweepError::Io(_)));
}

#[test]
fn test_load_corrupt_report_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_report(&path), Err(SweepError::Json(_))));
}

#[test]
fn test_double_finalization_guarded() {
    let mut sweeper = finished(SweepConfig::new(0b1010, 4));
    assert_eq!(sweeper.summary().checksum, 1848);
    assert!(matches!(sweeper.finish(), Err(SweepError::AlreadyFinalized)));
    assert_eq!(sweeper.summary().checksum, 1848);
}

#[test]
fn test_shared_accumulator_double_counts() {
    let mut acc = OutputAccumulator::new();
    let mut first = finished(SweepConfig::new(0b1010, 4).with_max_pairs(1)).into_registry();
    let mut second = finished(SweepConfig::new(0b1010, 4).with_max_pairs(1)).into_registry();

    // both registries are already sealed by their own sweeps
    assert!(acc.finalize(&mut first).is_err());
    assert!(acc.finalize(&mut second).is_err());

    // the raw reduction has no guard and keeps adding
    let stream = first.get(4).unwrap().block_stream().to_vec();
    acc.absorb(&stream);
    acc.absorb(&stream);
    assert_eq!(acc.value(), 2 * 445);
}
