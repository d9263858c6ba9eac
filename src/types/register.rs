//! Bit register: the mutable LFSR state
//!
//! Cell `i` holds bit `i` of the seed (least-significant bit first).
//! The length is fixed at construction; stepping only rewrites cell values.

use serde::{Deserialize, Serialize};
use crate::{MAX_REGISTER_LEN, MIN_REGISTER_LEN};
use crate::types::ConfigError;

/// Fixed-length ordered sequence of single-bit cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitRegister {
    bits: Vec<bool>,
}

impl BitRegister {
    /// Load a `width`-bit register from `seed`
    pub fn from_seed(seed: u64, width: usize) -> Result<Self, ConfigError> {
        check_width(width)?;
        if seed & !width_mask(width) != 0 {
            return Err(ConfigError::SeedTooWide { seed, width });
        }
        Ok(Self {
            bits: (0..width).map(|i| (seed >> i) & 1 == 1).collect(),
        })
    }

    /// Build a register from explicit cell values
    pub fn from_bits(bits: impl Into<Vec<bool>>) -> Result<Self, ConfigError> {
        let bits = bits.into();
        check_width(bits.len())?;
        Ok(Self { bits })
    }

    /// Rebuild a register from its packed form (see [`BitRegister::pack`])
    pub fn unpack(packed: u64, width: usize) -> Self {
        Self {
            bits: (0..width).map(|i| (packed >> i) & 1 == 1).collect(),
        }
    }

    /// Overwrite every cell from `seed`, keeping the width
    ///
    /// Seed bits at or above the width are ignored.
    pub fn reload(&mut self, seed: u64) {
        for (i, bit) in self.bits.iter_mut().enumerate() {
            *bit = (seed >> i) & 1 == 1;
        }
    }

    /// Shift every cell one position toward the end and insert `bit` at index 0
    ///
    /// The last cell falls off.
    pub fn shift_in(&mut self, bit: bool) {
        let len = self.bits.len();
        self.bits.copy_within(0..len - 1, 1);
        self.bits[0] = bit;
    }

    /// Pack into a `u64`, cell `i` → bit `i`
    pub fn pack(&self) -> u64 {
        self.bits
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &bit)| acc | (u64::from(bit) << i))
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Cells as a `0`/`1` string in index order
    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

impl std::fmt::Display for BitRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_bit_string())
    }
}

impl From<BitRegister> for String {
    fn from(register: BitRegister) -> Self {
        register.to_bit_string()
    }
}

impl TryFrom<String> for BitRegister {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let bits = value
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(format!("invalid bit character '{}'", other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_bits(bits).map_err(|e| e.to_string())
    }
}

/// Reject widths outside `MIN_REGISTER_LEN..=MAX_REGISTER_LEN`
pub fn check_width(width: usize) -> Result<(), ConfigError> {
    if (MIN_REGISTER_LEN..=MAX_REGISTER_LEN).contains(&width) {
        Ok(())
    } else {
        Err(ConfigError::WidthOutOfRange {
            width,
            min: MIN_REGISTER_LEN,
            max: MAX_REGISTER_LEN,
        })
    }
}

/// Mask keeping the low `width` bits of a seed
pub fn width_mask(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Number of distinct states of a `width`-bit register (`2^width`)
pub fn cycle_threshold(width: usize) -> u128 {
    1u128 << width
}

// =============================================================================
// TESTS
// =============================================================================
