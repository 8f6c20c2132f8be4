//! # Bound Errors
//!
//! Error types for bound construction and document conversion.

use thiserror::Error;

/// Errors that can occur while building or decoding bounds.
#[derive(Debug, Error)]
pub enum BoundError {
    /// A scene node carries a type tag the bound format does not cover.
    #[error("object '{object}' has unsupported bound kind '{kind}'")]
    UnsupportedBoundKind {
        /// The offending tag.
        kind: String,
        /// Host object name, for the failure report.
        object: String,
    },

    /// Geometry derivation was asked for the bounds of zero points.
    #[error("cannot compute bounds of an empty point set")]
    EmptyPointSet,

    /// A document carried a polygon tag the format does not define.
    #[error("unknown polygon tag '{0}' in bound document")]
    UnknownPolygonTag(String),

    /// Document-level failure.
    #[error(transparent)]
    Doc(#[from] rage_doc::DocError),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_display() {
        let err = BoundError::UnsupportedBoundKind {
            kind: "nurbs".to_string(),
            object: "Cube.001".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("nurbs"));
        assert!(msg.contains("Cube.001"));
    }
}
