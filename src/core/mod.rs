//! Core modules for lfsr-sweep

pub mod checksum;
pub mod collision;
pub mod feedback;
pub mod observer;
pub mod registry;
pub mod report;
pub mod sweep;

pub use checksum::{pack_bytes, pad_to_byte, OutputAccumulator};
pub use collision::CollisionDetector;
pub use feedback::{clock, feedback_bit};
pub use observer::{NullObserver, RecordingObserver, StepObserver};
pub use registry::{SequenceRegistry, SequenceState};
pub use report::{load_report, save_report, LengthReport, RunReport};
pub use sweep::TapSweeper;
