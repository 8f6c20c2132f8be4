//! End-to-end bound export: scene tree in, document text out.

use glam::DVec3;
use rage_bound::{composite_from_node, composite_to_doc, BoundError, Polygon};
use rage_scene::{MeshData, MeshTriangle, SceneMaterial, SceneNode, ShapeKind};

fn box_node(name: &str, min: DVec3, max: DVec3, kind: ShapeKind) -> SceneNode {
    let mut node = SceneNode::new(name, kind);
    node.local_min = min;
    node.local_max = max;
    node
}

#[test]
fn test_single_box_export() {
    let mut root = box_node(
        "composite",
        DVec3::splat(-1.0),
        DVec3::splat(1.0),
        ShapeKind::BoundComposite,
    );
    root.children.push(box_node(
        "box",
        DVec3::splat(-1.0),
        DVec3::splat(1.0),
        ShapeKind::BoundBox,
    ));

    let build = composite_from_node(&root).unwrap();
    assert!(build.errors.is_empty());
    let child = build.composite.children[0].shared();
    assert_eq!(child.box_min, DVec3::splat(-1.0));
    assert_eq!(child.box_max, DVec3::splat(1.0));
    assert_eq!(child.box_center, DVec3::ZERO);
}

#[test]
fn test_unsupported_child_isolated() {
    let mut root = box_node(
        "composite",
        DVec3::splat(-2.0),
        DVec3::splat(2.0),
        ShapeKind::BoundComposite,
    );
    root.children.push(box_node(
        "sphere",
        DVec3::splat(-2.0),
        DVec3::splat(2.0),
        ShapeKind::BoundSphere,
    ));
    root.children.push(SceneNode::new(
        "custom",
        ShapeKind::Other("metaball".to_string()),
    ));

    let build = composite_from_node(&root).unwrap();
    assert_eq!(build.composite.children.len(), 1);
    assert_eq!(build.composite.children[0].tag(), "Sphere");
    assert_eq!(build.errors.len(), 1);
    assert!(matches!(
        build.errors[0],
        BoundError::UnsupportedBoundKind { .. }
    ));
}

#[test]
fn test_geometry_document_text() {
    let mut root = box_node(
        "composite",
        DVec3::splat(-1.0),
        DVec3::splat(1.0),
        ShapeKind::BoundComposite,
    );
    let mut geometry = box_node(
        "geo",
        DVec3::splat(-1.0),
        DVec3::splat(1.0),
        ShapeKind::BoundGeometryBvh,
    );
    let mut mesh_child = SceneNode::new("mesh", ShapeKind::PolyTriangle);
    mesh_child.mesh = Some(MeshData {
        vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
        materials: vec![SceneMaterial::collision(5)],
        triangles: vec![MeshTriangle {
            vertices: [0, 1, 2],
            material_index: 0,
        }],
    });
    geometry.children.push(mesh_child);
    root.children.push(geometry);

    let build = composite_from_node(&root).unwrap();
    let text = rage_doc::write_tree(&composite_to_doc(&build.composite));
    assert!(text.contains("<BoundsFile>"));
    assert!(text.contains("type=\"GeometryBVH\""));
    assert!(text.contains("<Triangle"));

    // The emitted text decodes back into an equivalent tree.
    let doc = rage_doc::read_tree(&text).unwrap();
    let back = rage_bound::composite_from_doc(&doc).unwrap();
    let g = back.children[0].geometry().unwrap();
    assert_eq!(g.vertices.len(), 3);
    assert_eq!(g.materials.items()[0].type_index, 5);
    assert!(matches!(g.polygons[0], Polygon::Triangle { .. }));
}
