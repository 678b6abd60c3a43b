//! # Model Constants
//!
//! Reserved names, tolerances and generator defaults shared by the
//! failure model.

// ============================================================================
// COMPONENT IDENTITY
// ============================================================================

/// Name reserved by the dispatcher for planned maintenance outages
pub const RESERVED_MAINTENANCE_NAME: &str = "MAINTENANCE";

// ============================================================================
// STATUS TOLERANCES
// ============================================================================

/// Downtime below this value (h) counts as operational
pub const OPERATIONAL_EPSILON: f64 = 1e-8;

/// Baseline hazard multiplier restored after every repair
pub const BASELINE_HAZARD_RATE: f64 = 1.0;

// ============================================================================
// WELL512 GENERATOR
// ============================================================================

/// Word size (bits)
pub const WELL_WORD_BITS: u32 = 32;

/// Number of state words (16 × 32 = 512 bits)
pub const WELL_STATE_WORDS: usize = 16;

/// Index mask for the rotating state window
pub const WELL_INDEX_MASK: usize = WELL_STATE_WORDS - 1;

/// Default taps (P, M1, M2, M3)
pub const WELL_DEFAULT_TAPS: (usize, usize, usize, usize) = (0, 13, 9, 5);

/// Tempering mask of the WELL512a output transform
pub const WELL_TEMPER_MASK: u32 = 0xda44_2d24;

/// 2^-32, scales a 32-bit word into [0, 1)
pub const WELL_FACT: f64 = 2.328_306_436_538_696_289_06e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_is_inverse_word_range() {
        assert_eq!(WELL_FACT, 1.0 / 4_294_967_296.0);
        assert!(u32::MAX as f64 * WELL_FACT < 1.0);
    }

    #[test]
    fn test_state_window() {
        assert_eq!(WELL_STATE_WORDS * WELL_WORD_BITS as usize, 512);
        assert_eq!(WELL_INDEX_MASK, 0xf);
    }
}
