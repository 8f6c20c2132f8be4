//! # rage-pipeline
//!
//! Orchestration over the conversion crates: multi-item export with
//! per-item failure isolation and aggregated reporting, plus document-text
//! import entry points. Single-threaded and batch-oriented; each call owns
//! everything it builds and shares nothing across invocations.

pub mod error;
pub mod export;
pub mod import;
pub mod report;

pub use error::PipelineError;
pub use export::{export_bound_file, export_map_types, render_documents};
pub use import::{import_bound_file, import_map_types};
pub use report::{ExportFailure, ExportReport};
