//! Tap sweep: the state machine driving a whole run
//!
//! Phase transitions:
//! - STEPPING → STEPPING: step counter still below 2^L
//! - STEPPING → ADVANCING: step counter reaches 2^L
//! - ADVANCING → STEPPING: reseeded, next tap pair available
//! - ADVANCING → DONE: taps exhausted or pair limit reached
//!
//! Each step: notify observer, collision test, snapshot, clock, record
//! feedback, count.

use crate::config::SweepConfig;
use crate::core::feedback;
use crate::core::{CollisionDetector, NullObserver, OutputAccumulator, SequenceRegistry, StepObserver};
use crate::types::{
    cycle_threshold, width_mask, AdvanceOutput, BitRegister, StepOutput, StepView, SweepError,
    SweepPhase, SweepSummary, TapPair,
};

/// Sweep engine owning the register, registry and counters for one run
#[derive(Debug)]
pub struct TapSweeper {
    config: SweepConfig,
    /// Current phase
    phase: SweepPhase,
    register: BitRegister,
    /// Seed the register was last loaded from
    seed: u64,
    taps: TapPair,
    /// Steps taken for the current tap pair
    cycle: u128,
    /// `2^width`
    threshold: u128,
    /// Tap pairs started, including the current one
    pairs_swept: u64,
    total_steps: u128,
    registry: SequenceRegistry,
    detector: CollisionDetector,
    accumulator: OutputAccumulator,
}

impl TapSweeper {
    /// Validate `config` and load the register from its seed
    pub fn new(config: SweepConfig) -> Result<Self, SweepError> {
        config.validate()?;
        let register = config.register()?;
        let taps = config.taps()?;

        tracing::debug!(
            seed = config.seed,
            width = config.width,
            taps = %taps,
            collision_rule = %config.collision_rule,
            tap_rule = %config.tap_rule,
            "sweep configured"
        );

        Ok(Self {
            phase: SweepPhase::Stepping,
            register,
            seed: config.seed,
            taps,
            cycle: 0,
            threshold: cycle_threshold(config.width),
            pairs_swept: 1,
            total_steps: 0,
            registry: SequenceRegistry::new(),
            detector: CollisionDetector::new(config.collision_rule),
            accumulator: OutputAccumulator::new(),
            config,
        })
    }

    /// Run one step without an observer
    pub fn step(&mut self) -> Option<StepOutput> {
        self.step_with(&mut NullObserver)
    }

    /// Run one step, `None` once the sweep is DONE
    pub fn step_with<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Option<StepOutput> {
        if self.phase.is_terminal() {
            return None;
        }

        let cycle = self.cycle;
        let taps = self.taps;
        let view = StepView {
            cycle,
            threshold: self.threshold,
            taps,
            register: &self.register,
        };
        observer.on_step(&view);

        let collision = self.detector.check(&self.register, &self.registry);
        if collision {
            observer.on_collision(&view);
        }

        if self.config.capture_clock {
            self.registry.record_snapshot(&self.register);
        }

        let feedback = feedback::clock(&mut self.register, taps);
        self.registry.record_feedback(self.register.len(), feedback, taps);

        self.cycle += 1;
        self.total_steps += 1;

        let advance = if self.cycle >= self.threshold {
            self.phase = SweepPhase::Advancing;
            let advance = self.advance();
            observer.on_advance(&advance);
            Some(advance)
        } else {
            None
        };

        Some(StepOutput {
            cycle,
            taps,
            feedback,
            collision,
            phase: self.phase,
            advance,
        })
    }

    /// Reseed from the exhausted pair and move to the next one
    fn advance(&mut self) -> AdvanceOutput {
        let width = self.register.len();
        let exhausted = self.taps;
        let old_seed = self.seed;

        self.seed = ((old_seed | exhausted.index_sum()) << 1) & width_mask(width);
        self.register.reload(self.seed);

        let limit_reached = self
            .config
            .max_pairs
            .is_some_and(|limit| self.pairs_swept >= limit);
        let next = if limit_reached {
            None
        } else {
            self.config.tap_rule.advance(exhausted, width)
        };

        match next {
            Some(taps) => {
                tracing::debug!(from = %exhausted, to = %taps, seed = self.seed, "advancing tap pair");
                self.taps = taps;
                self.pairs_swept += 1;
                self.cycle = 0;
                self.phase = SweepPhase::Stepping;
            }
            None => {
                tracing::info!(
                    pairs = self.pairs_swept,
                    steps = %self.total_steps,
                    limit_reached,
                    "sweep done"
                );
                self.phase = SweepPhase::Done;
            }
        }

        AdvanceOutput {
            old_seed,
            new_seed: self.seed,
            exhausted,
            next,
            width,
        }
    }

    /// Step until DONE, then finalize
    pub fn run<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> Result<SweepSummary, SweepError> {
        while self.step_with(observer).is_some() {}
        self.finish()
    }

    /// Reduce the registry into the checksum
    ///
    /// Only valid once the sweep is DONE, and only once.
    pub fn finish(&mut self) -> Result<SweepSummary, SweepError> {
        if !self.phase.is_terminal() {
            return Err(SweepError::SweepInProgress(self.phase));
        }
        self.accumulator.finalize(&mut self.registry)?;
        Ok(self.summary())
    }

    /// Figures so far; the checksum is 0 until [`TapSweeper::finish`]
    pub fn summary(&self) -> SweepSummary {
        SweepSummary {
            seed: self.config.seed,
            final_seed: self.seed,
            width: self.config.width,
            collision_rule: self.config.collision_rule,
            tap_rule: self.config.tap_rule,
            pairs_swept: self.pairs_swept,
            total_steps: self.total_steps,
            collisions: self.detector.collisions(),
            map_size: self.registry.len(),
            checksum: self.accumulator.value(),
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    pub fn register(&self) -> &BitRegister {
        &self.register
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn taps(&self) -> TapPair {
        self.taps
    }

    pub fn cycle(&self) -> u128 {
        self.cycle
    }

    pub fn threshold(&self) -> u128 {
        self.threshold
    }

    pub fn pairs_swept(&self) -> u64 {
        self.pairs_swept
    }

    pub fn total_steps(&self) -> u128 {
        self.total_steps
    }

    pub fn collisions(&self) -> u64 {
        self.detector.collisions()
    }

    pub fn registry(&self) -> &SequenceRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> SequenceRegistry {
        self.registry
    }
}

// =============================================================================
// TESTS
// =============================================================================
