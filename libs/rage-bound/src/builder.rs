//! # Bound Builder
//!
//! Converts scene node trees into collision bounds. Dispatch is keyed on
//! the node's declared shape kind; mesh geometry runs a two-pass walk over
//! its descendants (triangle meshes first, then primitive polygons), with
//! vertices and materials pooled per geometry.

use crate::bound::{Bound, BoundComposite, BoundGeometry, BoundShared, Polygon};
use crate::error::BoundError;
use crate::geometry::{
    bound_center, bounding_sphere, corner_bounds, cylinder_axis, object_radius, world_corners,
};
use crate::material::MaterialTable;
use crate::vertices::VertexPool;
use glam::DMat4;
use rage_scene::{MaterialKind, SceneNode, ShapeKind};

/// Result of building one composite: the bound tree plus any per-child
/// failures. Children that failed are absent from the tree; the rest are
/// kept, so one bad object never aborts its siblings.
#[derive(Debug)]
pub struct CompositeBuild {
    /// The built composite.
    pub composite: BoundComposite,
    /// Per-child failures, in scene order.
    pub errors: Vec<BoundError>,
}

/// Builds a composite bound from a scene root tagged as composite.
pub fn composite_from_node(node: &SceneNode) -> Result<CompositeBuild, BoundError> {
    if node.kind != ShapeKind::BoundComposite {
        return Err(unsupported(node));
    }

    let mut composite = BoundComposite {
        shared: shared_from_node(node, false)?,
        children: Vec::new(),
    };
    let mut errors = Vec::new();
    for child in &node.children {
        match bound_from_node(child) {
            Ok(bound) => composite.children.push(bound),
            Err(err) => errors.push(err),
        }
    }
    Ok(CompositeBuild { composite, errors })
}

/// Builds a single bound from a scene node.
pub fn bound_from_node(node: &SceneNode) -> Result<Bound, BoundError> {
    match &node.kind {
        ShapeKind::BoundBox => Ok(Bound::Box(shared_from_node(node, true)?)),
        ShapeKind::BoundSphere => Ok(Bound::Sphere(shared_from_node(node, true)?)),
        ShapeKind::BoundCapsule => Ok(Bound::Capsule(shared_from_node(node, true)?)),
        ShapeKind::BoundCylinder => Ok(Bound::Cylinder(shared_from_node(node, true)?)),
        ShapeKind::BoundDisc => Ok(Bound::Disc(shared_from_node(node, true)?)),
        ShapeKind::BoundCloth => Ok(Bound::Cloth(shared_from_node(node, true)?)),
        ShapeKind::BoundGeometry => Ok(Bound::Geometry(geometry_from_node(node)?)),
        ShapeKind::BoundGeometryBvh => Ok(Bound::GeometryBvh(geometry_from_node(node)?)),
        _ => Err(unsupported(node)),
    }
}

fn unsupported(node: &SceneNode) -> BoundError {
    BoundError::UnsupportedBoundKind {
        kind: node.kind.label().to_string(),
        object: node.name.clone(),
    }
}

/// Populates the fields every bound variant shares.
///
/// Composite flags are read only for child bounds; the composite root
/// itself carries none.
fn shared_from_node(
    node: &SceneNode,
    with_composite_flags: bool,
) -> Result<BoundShared, BoundError> {
    let corners = world_corners(node.local_min, node.local_max, &node.transform.matrix());
    let (box_min, box_max) = corner_bounds(&corners);
    // Corners are already world-space; no further transform.
    let (center, sphere_radius) = bounding_sphere(&corners, &DMat4::IDENTITY, false)?;

    let mut shared = BoundShared {
        box_min,
        box_max,
        box_center: center,
        sphere_center: center,
        sphere_radius,
        procedural_id: node.bound_properties.procedural_id,
        room_id: node.bound_properties.room_id,
        ped_density: node.bound_properties.ped_density,
        poly_flags: node.bound_properties.poly_flags,
        composite_flags1: Vec::new(),
        composite_flags2: Vec::new(),
    };
    if with_composite_flags {
        shared.composite_flags1 = node.composite_flags1.enabled_upper();
        shared.composite_flags2 = node.composite_flags2.enabled_upper();
    }
    Ok(shared)
}

/// Builds mesh geometry from a node and its descendants.
///
/// Pass 1 merges every descendant triangle mesh: materials slot by slot
/// into the table, vertices transformed by the geometry node's matrix into
/// the pool, one triangle polygon per face with the slot's table index
/// resolved at merge time. Pass 2 revisits every descendant and emits one
/// polygon per primitive-polygon node.
fn geometry_from_node(node: &SceneNode) -> Result<BoundGeometry, BoundError> {
    let shared = shared_from_node(node, true)?;
    let geometry_center = shared.box_center;
    let matrix = node.transform.matrix();

    let mut materials = MaterialTable::new();
    let mut vertices = VertexPool::new();
    let mut polygons = Vec::new();

    for child in node.descendants() {
        if child.kind != ShapeKind::PolyTriangle {
            continue;
        }
        let Some(mesh) = &child.mesh else { continue };

        // Non-collision materials never enter the table; faces in those
        // slots fall back to the default entry so every index stays valid.
        let slot_map: Vec<u32> = mesh
            .materials
            .iter()
            .map(|m| match m.kind {
                MaterialKind::Collision => materials.add(m) as u32,
                MaterialKind::Other => materials.ensure_default() as u32,
            })
            .collect();
        let base = vertices.len() as u32;
        for v in &mesh.vertices {
            vertices.append(matrix.transform_point3(*v));
        }
        for face in &mesh.triangles {
            let material_index = match slot_map.get(face.material_index as usize) {
                Some(index) => *index,
                None => materials.ensure_default() as u32,
            };
            polygons.push(Polygon::Triangle {
                v1: base + face.vertices[0],
                v2: base + face.vertices[1],
                v3: base + face.vertices[2],
                material_index,
            });
        }
    }

    for child in node.descendants() {
        if let Some(polygon) = polygon_from_node(child, &mut vertices, &mut materials) {
            polygons.push(polygon);
        }
    }

    Ok(BoundGeometry {
        shared,
        geometry_center,
        materials,
        vertices,
        polygons,
    })
}

/// Emits a primitive polygon for box/sphere/capsule/cylinder nodes.
///
/// Returns `None` for every other kind; triangle meshes were already
/// consumed by pass 1.
fn polygon_from_node(
    node: &SceneNode,
    vertices: &mut VertexPool,
    materials: &mut MaterialTable,
) -> Option<Polygon> {
    match node.kind {
        ShapeKind::PolyBox => Some(box_polygon(node, vertices, materials)),
        ShapeKind::PolySphere => Some(sphere_polygon(node, vertices, materials)),
        // Capsules share the cylinder derivation end to end, and the emitted
        // record stays cylinder-typed for parity with documents already in
        // circulation.
        ShapeKind::PolyCapsule | ShapeKind::PolyCylinder => {
            Some(cylinder_polygon(node, vertices, materials))
        }
        _ => None,
    }
}

fn polygon_material(node: &SceneNode, materials: &mut MaterialTable) -> u32 {
    match &node.material {
        Some(material) if material.kind == MaterialKind::Collision => {
            materials.index_or_insert(material) as u32
        }
        _ => materials.ensure_default() as u32,
    }
}

fn box_polygon(node: &SceneNode, vertices: &mut VertexPool, materials: &mut MaterialTable) -> Polygon {
    let material_index = polygon_material(node, materials);
    let corners = world_corners(node.local_min, node.local_max, &node.transform.matrix());
    // Four logical corners of the box record, by positional convention.
    let picks = [corners[0], corners[5], corners[2], corners[7]];
    let mut indices = [0u32; 4];
    for (slot, corner) in picks.iter().enumerate() {
        indices[slot] = vertices.append(*corner);
    }
    Polygon::Box {
        v1: indices[0],
        v2: indices[1],
        v3: indices[2],
        v4: indices[3],
        material_index,
    }
}

fn sphere_polygon(
    node: &SceneNode,
    vertices: &mut VertexPool,
    materials: &mut MaterialTable,
) -> Polygon {
    let material_index = polygon_material(node, materials);
    let corners = world_corners(node.local_min, node.local_max, &node.transform.matrix());
    let v = vertices.append(node.transform.position);
    Polygon::Sphere {
        v,
        radius: object_radius(&corners),
        material_index,
    }
}

fn cylinder_polygon(
    node: &SceneNode,
    vertices: &mut VertexPool,
    materials: &mut MaterialTable,
) -> Polygon {
    let material_index = polygon_material(node, materials);
    let corners = world_corners(node.local_min, node.local_max, &node.transform.matrix());
    let (min, max) = corner_bounds(&corners);
    let center = bound_center(min, max);
    let (p1, p2, radius) = cylinder_axis(corners[0], corners[1], corners[2], center);
    let v1 = vertices.append(p1);
    let v2 = vertices.append(p2);
    Polygon::Cylinder {
        v1,
        v2,
        radius,
        material_index,
    }
}

// =============================================================================
// TESTS
// =============================================================================
