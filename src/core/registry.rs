//! Sequence state registry
//!
//! One record per register length, created lazily by the first feedback bit
//! recorded for that length and never removed. Every tap pair swept at a
//! length appends to the same block stream.

use crate::types::{BitRegister, TapPair};
use crate::MAX_REGISTER_LEN;

/// Feedback history and clock snapshots for one register length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    width: usize,
    /// Tap pair that created the record
    origin: TapPair,
    block_stream: Vec<bool>,
    /// Snapshots packed one per `u64`, cell `i` → bit `i`
    clock_sequence: Vec<u64>,
}

impl SequenceState {
    fn new(width: usize, origin: TapPair) -> Self {
        Self {
            width,
            origin,
            block_stream: Vec::new(),
            clock_sequence: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn origin(&self) -> TapPair {
        self.origin
    }

    /// Feedback bits in recording order
    pub fn block_stream(&self) -> &[bool] {
        &self.block_stream
    }

    pub(crate) fn block_stream_mut(&mut self) -> &mut Vec<bool> {
        &mut self.block_stream
    }

    pub fn clock_len(&self) -> usize {
        self.clock_sequence.len()
    }

    /// Captured registers in capture order
    pub fn clock_sequence(&self) -> impl Iterator<Item = BitRegister> + '_ {
        self.clock_sequence
            .iter()
            .map(move |&packed| BitRegister::unpack(packed, self.width))
    }
}

/// Length-indexed registry of [`SequenceState`] records
///
/// Dense: slot `n` holds the record for length `n`, so iteration runs in
/// ascending length order.
#[derive(Debug, Clone)]
pub struct SequenceRegistry {
    slots: Vec<Option<SequenceState>>,
    sealed: bool,
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self {
            slots: vec![None; MAX_REGISTER_LEN + 1],
            sealed: false,
        }
    }

    /// Append a feedback bit to the stream for `length`
    ///
    /// Creates the record on first use, tagged with `taps`; later calls never
    /// touch the tag. Panics if `length` exceeds `MAX_REGISTER_LEN`.
    pub fn record_feedback(&mut self, length: usize, bit: bool, taps: TapPair) {
        let slot = &mut self.slots[length];
        let state = slot.get_or_insert_with(|| {
            tracing::debug!(length, taps = %taps, "creating sequence record");
            SequenceState::new(length, taps)
        });
        state.block_stream.push(bit);
    }

    /// Capture a copy of `register` under its length
    ///
    /// Only stored when a record for that length already exists; returns
    /// whether the snapshot was kept.
    pub fn record_snapshot(&mut self, register: &BitRegister) -> bool {
        match self.slots.get_mut(register.len()).and_then(Option::as_mut) {
            Some(state) => {
                state.clock_sequence.push(register.pack());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, length: usize) -> Option<&SequenceState> {
        self.slots.get(length).and_then(Option::as_ref)
    }

    /// Records in ascending length order
    pub fn iter(&self) -> impl Iterator<Item = &SequenceState> {
        self.slots.iter().flatten()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut SequenceState> {
        self.slots.iter_mut().flatten()
    }

    /// Number of distinct lengths recorded
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalized: streams are padded and must not be reduced again
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }
}

// =============================================================================
// TESTS
// =============================================================================
