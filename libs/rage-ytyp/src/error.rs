//! # Archetype Errors
//!
//! Error types for archetype export and import.

use thiserror::Error;

/// Errors that can occur while converting archetype definitions.
#[derive(Debug, Error)]
pub enum YtypError {
    /// An integer enum field has no symbolic name in the wire format.
    /// Serialization must fail rather than pick a default.
    #[error("no symbolic name for {field} value {value}")]
    AmbiguousEnumValue {
        /// Field being serialized.
        field: &'static str,
        /// The unmapped integer.
        value: u32,
    },

    /// A document carried an enum name the wire format does not define.
    #[error("unknown {field} name '{name}'")]
    UnknownEnumName {
        /// Field being parsed.
        field: &'static str,
        /// The unrecognized name.
        name: String,
    },

    /// A linked entity object has differing X and Y scale; the format only
    /// stores a single XY scale.
    #[error("entity '{entity}' has non-uniform XY scale")]
    NonUniformScale {
        /// Entity archetype name, for the failure report.
        entity: String,
    },

    /// A document carried an archetype type tag the format does not define.
    #[error("unknown archetype type '{0}'")]
    UnknownArchetypeType(String),

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
    fn test_ambiguous_enum_display() {
        let err = YtypError::AmbiguousEnumValue {
            field: "lodLevel",
            value: 99,
        };
        let msg = err.to_string();
        assert!(msg.contains("lodLevel"));
        assert!(msg.contains("99"));
    }
}
