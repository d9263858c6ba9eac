//! Output structures for terminal display and JSON export

use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::{BitRegister, CollisionRule, SweepPhase, TapPair, TapRule};

/// Register state at the start of one step, as shown to observers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepView<'a> {
    /// Steps already taken for the current tap pair
    pub cycle: u128,
    /// Cycle threshold (`2^width`)
    pub threshold: u128,
    pub taps: TapPair,
    /// Register cells before this step
    pub register: &'a BitRegister,
}

impl StepView<'_> {
    /// `cycle/threshold) a b = bits`
    pub fn to_parseable_string(&self) -> String {
        format!(
            "{}/{}) {} = {}",
            self.cycle, self.threshold, self.taps, self.register
        )
    }

    /// Progress line with the cycle counter dimmed
    pub fn to_terminal_string(&self) -> String {
        format!(
            "{} {} = {}",
            format!("{}/{})", self.cycle, self.threshold).as_str().dimmed(),
            self.taps.to_string().as_str().cyan(),
            self.register
        )
    }

    pub fn to_collision_string(&self) -> String {
        format!("Collision Detected: {}", self.to_parseable_string())
    }
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutput {
    /// Cycle index the step ran at
    pub cycle: u128,
    /// Pair the step was clocked with
    pub taps: TapPair,
    /// Bit inserted at index 0
    pub feedback: bool,
    /// Register matched a recorded stream before the step
    pub collision: bool,
    /// Phase after the step (`STEPPING` or `DONE`)
    pub phase: SweepPhase,
    /// Present when this step exhausted the pair's cycle
    pub advance: Option<AdvanceOutput>,
}

/// Reseed and tap change emitted while `ADVANCING`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceOutput {
    pub old_seed: u64,
    pub new_seed: u64,
    /// Pair whose cycle just ended
    pub exhausted: TapPair,
    /// Pair the sweep continues with, `None` when the sweep is done
    pub next: Option<TapPair>,
    pub width: usize,
}

impl AdvanceOutput {
    pub fn to_parseable_string(&self) -> String {
        let next = self
            .next
            .map(|t| t.to_string())
            .unwrap_or_else(|| "none".to_string());
        format!(
            "Old State: {:0w$b}\nUsing new State: {:0w$b}\nTaps: {} -> {}",
            self.old_seed,
            self.new_seed,
            self.exhausted,
            next,
            w = self.width
        )
    }

    pub fn to_terminal_string(&self) -> String {
        let phase = if self.next.is_some() { SweepPhase::Advancing } else { SweepPhase::Done };
        phase.paint(&self.to_parseable_string()).to_string()
    }
}

/// End-of-run figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub seed: u64,
    /// Seed after the last reseed
    pub final_seed: u64,
    pub width: usize,
    pub collision_rule: CollisionRule,
    pub tap_rule: TapRule,
    pub pairs_swept: u64,
    pub total_steps: u128,
    pub collisions: u64,
    /// Number of distinct register lengths in the registry
    pub map_size: usize,
    pub checksum: u64,
}

impl SweepSummary {
    /// The three closing lines of a run
    pub fn to_parseable_string(&self) -> String {
        format!(
            "Feedback Map Size = {}\nCalculated Stream Output: {}\nTotal Collisions: {}",
            self.map_size, self.checksum, self.collisions
        )
    }

    pub fn to_terminal_string(&self) -> String {
        format!(
            "{} {}\n{} {}\n{} {}\n{}",
            "Feedback Map Size =".bold(),
            self.map_size,
            "Calculated Stream Output:".bold(),
            self.checksum.to_string().as_str().green(),
            "Total Collisions:".bold(),
            if self.collisions > 0 {
                self.collisions.to_string().as_str().red()
            } else {
                self.collisions.to_string().as_str().normal()
            },
            format!(
                "({} pairs, {} steps, collision rule {}, tap rule {})",
                self.pairs_swept, self.total_steps, self.collision_rule, self.tap_rule
            )
            .as_str()
            .dimmed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_line_format() {
        let register = BitRegister::from_seed(0b1010, 4).unwrap();
        let view = StepView {
            cycle: 3,
            threshold: 16,
            taps: TapPair::initial(4),
            register: &register,
        };
        assert_eq!(view.to_parseable_string(), "3/16) 0 3 = 0101");
        assert_eq!(view.to_collision_string(), "Collision Detected: 3/16) 0 3 = 0101");
    }

    #[test]
    fn test_step_view_json() {
        let register = BitRegister::from_seed(1, 2).unwrap();
        let view = StepView { cycle: 0, threshold: 4, taps: TapPair::initial(2), register: &register };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"register\":\"10\""));
        assert!(json.contains("\"taps\":{\"a\":0,\"b\":1}"));
    }

    #[test]
    fn test_advance_pads_seed_to_width() {
        let advance = AdvanceOutput {
            old_seed: 0xa,
            new_seed: 0x6,
            exhausted: TapPair::initial(4),
            next: Some(TapPair::new(1, 3, 4).unwrap()),
            width: 4,
        };
        assert_eq!(
            advance.to_parseable_string(),
            "Old State: 1010\nUsing new State: 0110\nTaps: 0 3 -> 1 3"
        );
    }

    #[test]
    fn test_summary_lines() {
        let summary = SweepSummary {
            seed: 0xa,
            final_seed: 0xe,
            width: 4,
            collision_rule: CollisionRule::Exact,
            tap_rule: TapRule::Equal,
            pairs_swept: 6,
            total_steps: 96,
            collisions: 0,
            map_size: 1,
            checksum: 1848,
        };
        assert_eq!(
            summary.to_parseable_string(),
            "Feedback Map Size = 1\nCalculated Stream Output: 1848\nTotal Collisions: 0"
        );

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"collision_rule\":\"exact\""));
        let restored: SweepSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, summary);
    }
}
