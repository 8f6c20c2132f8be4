//! # Flag Bitfield Views
//!
//! A 32-bit flags integer exposed as 32 named booleans. The integer is
//! canonical; the boolean view is derived and must round-trip bit-for-bit.

use config::constants::FLAG_BIT_COUNT;

/// Expands a flags integer into its per-bit boolean view, bit 0 first.
pub fn int_to_flags(value: u32) -> [bool; FLAG_BIT_COUNT] {
    std::array::from_fn(|bit| value & (1 << bit) != 0)
}

/// Packs a boolean view back into the canonical integer.
pub fn flags_to_int(flags: &[bool; FLAG_BIT_COUNT]) -> u32 {
    flags
        .iter()
        .enumerate()
        .fold(0, |acc, (bit, set)| if *set { acc | 1 << bit } else { acc })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_exact() {
        for value in [0, 1, 0x8000_0000, 0xDEAD_BEEF, u32::MAX] {
            assert_eq!(flags_to_int(&int_to_flags(value)), value);
        }
    }

    #[test]
    fn test_bit_order() {
        let flags = int_to_flags(0b101);
        assert!(flags[0]);
        assert!(!flags[1]);
        assert!(flags[2]);
    }

    #[test]
    fn test_high_bit() {
        let flags = int_to_flags(1 << 31);
        assert!(flags[31]);
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
    }
}
