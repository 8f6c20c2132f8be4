//! # Export Orchestration
//!
//! Multi-item export with per-item failure isolation: one bad object or
//! archetype is reported and skipped, the rest still export. A partially
//! built tree for a failed item is discarded, never written.

use crate::report::ExportReport;
use rage_bound::{composite_from_node, composite_to_doc};
use rage_doc::DocNode;
use rage_scene::{SceneNode, SceneObjects, ShapeKind};
use rage_ytyp::{archetype_to_doc, MapTypes};

/// Exports every composite-tagged root to a bounds document.
///
/// Returns one document per successfully built composite plus the
/// aggregated report. Per-child failures inside a composite are recorded
/// but do not discard the composite itself; roots with other tags are
/// skipped quietly.
pub fn export_bound_file(roots: &[SceneNode]) -> (Vec<DocNode>, ExportReport) {
    let mut documents = Vec::new();
    let mut report = ExportReport::new();

    for root in roots {
        if root.kind != ShapeKind::BoundComposite {
            log::debug!("skipping non-composite root '{}'", root.name);
            continue;
        }
        match composite_from_node(root) {
            Ok(build) => {
                for error in &build.errors {
                    log::warn!("'{}': child failed: {error}", root.name);
                    report.record_failure(&root.name, error);
                }
                documents.push(composite_to_doc(&build.composite));
                report.record_success();
                log::info!("exported composite '{}'", root.name);
            }
            Err(error) => {
                log::warn!("'{}': export failed: {error}", root.name);
                report.record_failure(&root.name, error);
            }
        }
    }

    log::info!("bound export finished: {}", report.summary());
    (documents, report)
}

/// Exports a map-types definition to a `CMapTypes` document.
///
/// A failed archetype is reported and omitted from the output; the rest
/// are emitted in definition order.
pub fn export_map_types(map_types: &MapTypes, objects: &SceneObjects) -> (DocNode, ExportReport) {
    let mut report = ExportReport::new();
    let mut archetypes = DocNode::new("archetypes");

    for archetype in &map_types.archetypes {
        match archetype_to_doc(archetype, objects) {
            Ok(item) => {
                archetypes.push(item);
                report.record_success();
            }
            Err(error) => {
                log::warn!(
                    "archetype '{}': export failed: {error}",
                    archetype.common().name
                );
                report.record_failure(&archetype.common().name, error);
            }
        }
    }

    let doc = DocNode::new("CMapTypes")
        .with_child(archetypes)
        .with_child(DocNode::new("extensions"))
        .with_child(DocNode::text_node("name", &map_types.name));

    log::info!("map-types export finished: {}", report.summary());
    (doc, report)
}

/// Renders exported documents to text in one pass.
pub fn render_documents(documents: &[DocNode]) -> Vec<String> {
    documents.iter().map(rage_doc::write_tree).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use rage_ytyp::{Archetype, ArchetypeCommon, Entity, MloArchetype};

    fn composite_root(name: &str, children: Vec<SceneNode>) -> SceneNode {
        let mut root = SceneNode::new(name, ShapeKind::BoundComposite);
        root.local_min = DVec3::splat(-1.0);
        root.local_max = DVec3::splat(1.0);
        root.children = children;
        root
    }

    fn box_child(name: &str) -> SceneNode {
        let mut node = SceneNode::new(name, ShapeKind::BoundBox);
        node.local_min = DVec3::splat(-1.0);
        node.local_max = DVec3::splat(1.0);
        node
    }

    #[test]
    fn test_bound_export_isolation() {
        let good = composite_root("crate_col", vec![box_child("box")]);
        let mixed = composite_root(
            "mixed_col",
            vec![
                box_child("box"),
                SceneNode::new("bad", ShapeKind::Other("nurbs".to_string())),
            ],
        );
        let skipped = SceneNode::new("not_a_bound", ShapeKind::BoundBox);

        let (documents, report) = export_bound_file(&[good, mixed, skipped]);
        assert_eq!(documents.len(), 2);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].item, "mixed_col");
    }

    #[test]
    fn test_map_types_export_isolation() {
        let mut bad_mlo = MloArchetype::new(ArchetypeCommon {
            name: "int_broken".to_string(),
            ..ArchetypeCommon::default()
        });
        bad_mlo.entities.push(Entity {
            lod_level: 99, // no symbolic name
            ..Entity::default()
        });

        let map_types = MapTypes {
            name: "props".to_string(),
            archetypes: vec![
                Archetype::Base(ArchetypeCommon {
                    name: "prop_crate_01".to_string(),
                    ..ArchetypeCommon::default()
                }),
                Archetype::Mlo(bad_mlo),
            ],
        };

        let (doc, report) = export_map_types(&map_types, &SceneObjects::new());
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].item, "int_broken");
        // The failed archetype is absent from the document.
        let archetypes = doc.child("archetypes").unwrap();
        assert_eq!(archetypes.items().count(), 1);
        assert_eq!(doc.child_text("name"), "props");
    }
}
