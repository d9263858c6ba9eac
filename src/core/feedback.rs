//! Feedback step engine
//!
//! One clock of a Fibonacci LFSR: `feedback = reg[a] ^ reg[b]`, shift every
//! cell one position right, insert `feedback` at index 0.

use crate::types::{BitRegister, TapPair};

/// Feedback bit for the current register and tap pair
///
/// Tap indices must be valid for the register; `TapPair` guarantees this when
/// it was built for the register's width.
pub fn feedback_bit(register: &BitRegister, taps: TapPair) -> bool {
    let bits = register.bits();
    bits[taps.a()] ^ bits[taps.b()]
}

/// Advance the register by one step and return the inserted feedback bit
pub fn clock(register: &mut BitRegister, taps: TapPair) -> bool {
    let feedback = feedback_bit(register, taps);
    register.shift_in(feedback);
    feedback
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cycle_threshold;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_step() {
        let mut reg = BitRegister::from_seed(0b1010, 4).unwrap();
        let taps = TapPair::initial(4);
        // cells 0101: reg[0]=0, reg[3]=1
        let feedback = clock(&mut reg, taps);
        assert!(feedback);
        assert_eq!(reg.to_bit_string(), "1010");
    }

    #[test]
    fn test_first_step_of_default_run() {
        let mut reg = BitRegister::from_seed(0x0af0, 16).unwrap();
        let before = reg.to_bit_string();
        let feedback = clock(&mut reg, TapPair::initial(16));

        assert!(!feedback);
        let expected = format!("0{}", &before[..15]);
        assert_eq!(reg.to_bit_string(), expected);
    }

    #[test]
    fn test_known_trajectory() {
        let mut reg = BitRegister::from_seed(0b1010, 4).unwrap();
        let taps = TapPair::initial(4);
        let states: Vec<String> = (0..6)
            .map(|_| {
                clock(&mut reg, taps);
                reg.to_bit_string()
            })
            .collect();
        assert_eq!(states, vec!["1010", "1101", "0110", "0011", "1001", "0100"]);
    }

    #[test]
    fn test_cycle_closes_for_primitive_taps() {
        // x^4 + x^3 + 1 and x^3 + x^2 + 1 are primitive: period 2^L - 1
        for (seed, width) in [(0b1010u64, 4usize), (0b101, 3), (0b0001, 4)] {
            let taps = TapPair::initial(width);
            let mut reg = BitRegister::from_seed(seed, width).unwrap();
            clock(&mut reg, taps);
            let after_first = reg.clone();

            for _ in 1..cycle_threshold(width) {
                clock(&mut reg, taps);
            }
            assert_eq!(reg, after_first, "seed {:#b}, width {}", seed, width);
        }
    }

    #[test]
    fn test_degenerate_taps_drain_to_zero() {
        let taps = TapPair::new(2, 2, 4).unwrap();
        let mut reg = BitRegister::from_seed(0b1111, 4).unwrap();
        for _ in 0..4 {
            assert!(!clock(&mut reg, taps));
        }
        assert_eq!(reg.pack(), 0);
    }
}
