//! # Import Orchestration
//!
//! Read-and-decode wrappers: document text in, rebuilt definitions out.

use crate::error::PipelineError;
use rage_bound::BoundComposite;
use rage_ytyp::MapTypes;

/// Parses bounds document text into a composite.
pub fn import_bound_file(text: &str) -> Result<BoundComposite, PipelineError> {
    let doc = rage_doc::read_tree(text)?;
    let composite = rage_bound::composite_from_doc(&doc)?;
    log::info!(
        "imported composite with {} child bounds",
        composite.children.len()
    );
    Ok(composite)
}

/// Parses map-types document text into definitions.
pub fn import_map_types(text: &str) -> Result<MapTypes, PipelineError> {
    let doc = rage_doc::read_tree(text)?;
    let map_types = rage_ytyp::map_types_from_doc(&doc)?;
    log::info!(
        "imported map types '{}' with {} archetypes",
        map_types.name,
        map_types.archetypes.len()
    );
    Ok(map_types)
}

// =============================================================================
// TESTS
// =============================================================================
