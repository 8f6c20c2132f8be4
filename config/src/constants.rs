//! # Configuration Constants
//!
//! Shared constants for the conversion pipeline: floating-point
//! tolerances, format defaults, and cross-reference sentinels.

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used when comparing derived geometry values (scale uniformity checks,
/// radius comparisons) where exact equality is not meaningful.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// FORMAT DEFAULTS
// =============================================================================

/// Default LOD distance for archetypes and entities.
pub const DEFAULT_LOD_DIST: f64 = 100.0;

/// Default HD texture distance for archetypes.
pub const DEFAULT_HD_TEXTURE_DIST: f64 = 100.0;

/// Default room blend value.
pub const DEFAULT_ROOM_BLEND: i32 = 1;

/// Default primary timecycle assigned to newly created rooms.
pub const DEFAULT_ROOM_TIMECYCLE: &str = "int_GasStation";

/// Default exterior visibility depth for rooms.
pub const DEFAULT_EXTERIOR_VISIBILITY_DEPTH: i32 = -1;

/// Number of boolean flags exposed by a 32-bit flags field.
pub const FLAG_BIT_COUNT: usize = 32;

// =============================================================================
// SENTINELS
// =============================================================================

/// Sentinel id meaning "this entity is attached to no portal".
///
/// Distinct from index 0, which is a valid portal position.
pub const NO_ATTACHED_PORTAL: i32 = -1;

// =============================================================================
// DOCUMENT OUTPUT
// =============================================================================

/// Indentation width (spaces) for written resource documents.
pub const DOC_INDENT: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_is_small() {
        assert!(EPSILON > 0.0);
        assert!(EPSILON < 1e-6);
    }

    #[test]
    fn test_sentinel_is_negative() {
        assert!(NO_ATTACHED_PORTAL < 0);
    }
}
