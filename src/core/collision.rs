//! Collision detector
//!
//! Compares the live register against every recorded block stream (not only
//! the one for the register's own length) and counts positive results.

use crate::core::SequenceRegistry;
use crate::types::{BitRegister, CollisionRule};

#[derive(Debug, Clone)]
pub struct CollisionDetector {
    rule: CollisionRule,
    collisions: u64,
}

impl CollisionDetector {
    pub fn new(rule: CollisionRule) -> Self {
        Self { rule, collisions: 0 }
    }

    /// True when any record matches `register` under the configured rule
    ///
    /// Does not say which record matched. Positive results bump the count.
    pub fn check(&mut self, register: &BitRegister, registry: &SequenceRegistry) -> bool {
        let hit = registry
            .iter()
            .any(|state| self.rule.matches(state.block_stream(), register.bits()));
        if hit {
            self.collisions += 1;
            tracing::trace!(register = %register, total = self.collisions, "collision");
        }
        hit
    }

    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn rule(&self) -> CollisionRule {
        self.rule
    }
}
