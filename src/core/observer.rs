//! Step observers
//!
//! Presentation hooks invoked by the sweep. Observers only read; nothing they
//! do feeds back into the register, registry or counters.

use crate::types::{AdvanceOutput, StepView};

pub trait StepObserver {
    /// Called at the start of every step, before the collision test
    fn on_step(&mut self, _view: &StepView<'_>) {}

    /// Called when the register matched a recorded stream
    fn on_collision(&mut self, _view: &StepView<'_>) {}

    /// Called after a reseed, once per exhausted tap pair
    fn on_advance(&mut self, _advance: &AdvanceOutput) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl StepObserver for NullObserver {}

/// Observer that keeps formatted lines, mostly for tests
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub steps: Vec<String>,
    pub collisions: Vec<String>,
    pub advances: Vec<AdvanceOutput>,
}

impl StepObserver for RecordingObserver {
    fn on_step(&mut self, view: &StepView<'_>) {
        self.steps.push(view.to_parseable_string());
    }

    fn on_collision(&mut self, view: &StepView<'_>) {
        self.collisions.push(view.to_collision_string());
    }

    fn on_advance(&mut self, advance: &AdvanceOutput) {
        self.advances.push(*advance);
    }
}
