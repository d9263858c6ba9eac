//! Checksum finalizer
//!
//! Pads each block stream with zero bits to a byte boundary, packs every
//! group of 8 bits MSB-first and adds the byte values into a running
//! accumulator. Runs once per registry, after the sweep is done.

use serde::{Deserialize, Serialize};
use crate::core::SequenceRegistry;
use crate::types::SweepError;

/// Running sum of stream bytes
///
/// Never reset implicitly: finalizing two registries into the same
/// accumulator adds both totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputAccumulator {
    value: u64,
}

impl OutputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Add the byte sum of `bits` and return it
    ///
    /// A trailing partial byte counts as if zero-padded.
    pub fn absorb(&mut self, bits: &[bool]) -> u64 {
        let delta = byte_sum(bits);
        self.value = self.value.wrapping_add(delta);
        delta
    }

    /// Pad and reduce every record, then seal the registry
    ///
    /// Returns the amount added. A sealed registry is rejected so its
    /// streams are never counted twice.
    pub fn finalize(&mut self, registry: &mut SequenceRegistry) -> Result<u64, SweepError> {
        if registry.is_sealed() {
            return Err(SweepError::AlreadyFinalized);
        }

        let mut delta = 0u64;
        for state in registry.iter_mut() {
            pad_to_byte(state.block_stream_mut());
            delta = delta.wrapping_add(self.absorb(state.block_stream()));
        }
        registry.seal();

        tracing::info!(records = registry.len(), delta, total = self.value, "registry finalized");
        Ok(delta)
    }
}

/// Append zero bits until the length is a multiple of 8
pub fn pad_to_byte(stream: &mut Vec<bool>) {
    let padded = stream.len().div_ceil(8) * 8;
    stream.resize(padded, false);
}

/// Pack bits into bytes, first bit of each group → most-significant bit
pub fn pack_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << (7 - i)))
        })
        .collect()
}

fn byte_sum(bits: &[bool]) -> u64 {
    pack_bytes(bits).iter().map(|&b| u64::from(b)).sum()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TapPair;
    use pretty_assertions::assert_eq;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    fn registry_with(stream: &str) -> SequenceRegistry {
        let mut registry = SequenceRegistry::new();
        for bit in bits(stream) {
            registry.record_feedback(4, bit, TapPair::initial(4));
        }
        registry
    }

    #[test]
    fn test_pack_msb_first() {
        assert_eq!(pack_bytes(&bits("10000000")), vec![0x80]);
        assert_eq!(pack_bytes(&bits("0000000111001000")), vec![0x01, 0xc8]);
    }

    #[test]
    fn test_pad_to_byte() {
        let mut stream = bits("101");
        pad_to_byte(&mut stream);
        assert_eq!(stream, bits("10100000"));

        let mut aligned = bits("11111111");
        pad_to_byte(&mut aligned);
        assert_eq!(aligned.len(), 8);

        let mut empty = Vec::new();
        pad_to_byte(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_partial_byte_counts_as_padded() {
        let mut acc = OutputAccumulator::new();
        assert_eq!(acc.absorb(&bits("101")), 0xa0);
    }

    #[test]
    fn test_finalize_pads_and_sums() {
        let mut registry = registry_with("1100100011110101");
        let mut acc = OutputAccumulator::new();

        let delta = acc.finalize(&mut registry).unwrap();
        assert_eq!(delta, 200 + 245);
        assert_eq!(acc.value(), 445);
        assert!(registry.is_sealed());
    }

    #[test]
    fn test_finalize_pads_stream_in_place() {
        let mut registry = registry_with("11");
        OutputAccumulator::new().finalize(&mut registry).unwrap();
        assert_eq!(registry.get(4).unwrap().block_stream(), bits("11000000").as_slice());
    }

    #[test]
    fn test_second_finalize_rejected() {
        let mut registry = registry_with("11110000");
        let mut acc = OutputAccumulator::new();
        acc.finalize(&mut registry).unwrap();

        let err = acc.finalize(&mut registry).unwrap_err();
        assert!(matches!(err, SweepError::AlreadyFinalized));
        assert_eq!(acc.value(), 0xf0);
    }

    #[test]
    fn test_accumulator_is_not_reset_between_registries() {
        let mut acc = OutputAccumulator::new();
        let first = acc.finalize(&mut registry_with("10101010")).unwrap();
        let second = acc.finalize(&mut registry_with("10101010")).unwrap();

        assert_eq!(first, second);
        assert_eq!(acc.value(), 2 * first);

        acc.reset();
        acc.finalize(&mut registry_with("10101010")).unwrap();
        assert_eq!(acc.value(), first);
    }

    #[test]
    fn test_empty_registry_adds_nothing() {
        let mut acc = OutputAccumulator::new();
        assert_eq!(acc.finalize(&mut SequenceRegistry::new()).unwrap(), 0);
    }
}
