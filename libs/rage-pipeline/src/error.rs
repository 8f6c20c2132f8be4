//! # Pipeline Errors
//!
//! The orchestration layer's error type: a thin union over the conversion
//! crates' errors plus the document codec boundary.

use thiserror::Error;

/// Errors surfaced by the export/import entry points.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bound construction or decoding failure.
    #[error(transparent)]
    Bound(#[from] rage_bound::BoundError),

    /// Archetype conversion failure.
    #[error(transparent)]
    Ytyp(#[from] rage_ytyp::YtypError),

    /// Document codec failure.
    #[error(transparent)]
    Doc(#[from] rage_doc::DocError),
}
