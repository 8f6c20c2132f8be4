//! # Document Errors
//!
//! Error types for the resource document codec.

use thiserror::Error;

/// Errors that can occur while reading or writing resource documents.
#[derive(Debug, Error)]
pub enum DocError {
    /// Malformed document text.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// What went wrong.
        message: String,
        /// Byte offset into the source text.
        offset: usize,
    },

    /// A required child node is absent.
    #[error("node '{parent}' has no child '{child}'")]
    MissingChild {
        /// Name of the node that was searched.
        parent: String,
        /// Name of the missing child.
        child: String,
    },

    /// A required attribute is absent.
    #[error("node '{node}' has no attribute '{attribute}'")]
    MissingAttribute {
        /// Name of the node that was searched.
        node: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// An attribute or text value failed to parse as the expected type.
    #[error("node '{node}': cannot read '{value}' as {expected}")]
    InvalidValue {
        /// Name of the node holding the value.
        node: String,
        /// The offending text.
        value: String,
        /// Description of the expected type.
        expected: &'static str,
    },

    /// Underlying stream failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocError {
    /// Create a parse error at the given byte offset.
    pub fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::Parse {
            message: message.into(),
            offset,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
