//! # Bound Data Model
//!
//! The in-memory collision bound tree: primitive volumes, mesh geometry
//! with pooled vertices/materials, and the composite root that owns one
//! child bound per recognized scene child.

use crate::material::MaterialTable;
use crate::vertices::VertexPool;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Fields shared by every bound variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundShared {
    /// Axis-aligned box minimum (world space).
    pub box_min: DVec3,
    /// Axis-aligned box maximum (world space).
    pub box_max: DVec3,
    /// Box midpoint.
    pub box_center: DVec3,
    /// Bounding sphere center.
    pub sphere_center: DVec3,
    /// Bounding sphere radius.
    pub sphere_radius: f64,
    /// Procedural id.
    pub procedural_id: u32,
    /// Room id.
    pub room_id: u32,
    /// Pedestrian density.
    pub ped_density: u32,
    /// Polygon flags.
    pub poly_flags: u32,
    /// First composite flag set, upper-cased names.
    pub composite_flags1: Vec<String>,
    /// Second composite flag set, upper-cased names.
    pub composite_flags2: Vec<String>,
}

/// Mesh-based bound geometry with pooled sub-resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundGeometry {
    /// Shared bound fields.
    pub shared: BoundShared,
    /// Geometry center.
    pub geometry_center: DVec3,
    /// Material registry; polygon material indices are positions here.
    pub materials: MaterialTable,
    /// Vertex pool; polygon vertex indices are positions here.
    pub vertices: VertexPool,
    /// Polygons in emission order.
    pub polygons: Vec<Polygon>,
}

/// A collision bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Primitive box volume.
    Box(BoundShared),
    /// Primitive sphere volume.
    Sphere(BoundShared),
    /// Primitive capsule volume.
    Capsule(BoundShared),
    /// Primitive cylinder volume.
    Cylinder(BoundShared),
    /// Primitive disc volume.
    Disc(BoundShared),
    /// Cloth volume.
    Cloth(BoundShared),
    /// Mesh geometry.
    Geometry(BoundGeometry),
    /// Mesh geometry with a bounding-volume hierarchy.
    GeometryBvh(BoundGeometry),
}

impl Bound {
    /// Shared fields of any variant.
    pub fn shared(&self) -> &BoundShared {
        match self {
            Bound::Box(s)
            | Bound::Sphere(s)
            | Bound::Capsule(s)
            | Bound::Cylinder(s)
            | Bound::Disc(s)
            | Bound::Cloth(s) => s,
            Bound::Geometry(g) | Bound::GeometryBvh(g) => &g.shared,
        }
    }

    /// Mesh geometry payload, if this is a geometry variant.
    pub fn geometry(&self) -> Option<&BoundGeometry> {
        match self {
            Bound::Geometry(g) | Bound::GeometryBvh(g) => Some(g),
            _ => None,
        }
    }

    /// Wire tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Bound::Box(_) => "Box",
            Bound::Sphere(_) => "Sphere",
            Bound::Capsule(_) => "Capsule",
            Bound::Cylinder(_) => "Cylinder",
            Bound::Disc(_) => "Disc",
            Bound::Cloth(_) => "Cloth",
            Bound::Geometry(_) => "Geometry",
            Bound::GeometryBvh(_) => "GeometryBVH",
        }
    }
}

/// A composite bound: shared root fields plus one child per recognized
/// scene child. Built fresh per export run and never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundComposite {
    /// Root bound fields.
    pub shared: BoundShared,
    /// Child bounds in scene order.
    pub children: Vec<Bound>,
}

/// A collision polygon inside a bound geometry.
///
/// Vertex fields index into the owning geometry's [`VertexPool`];
/// `material_index` into its [`MaterialTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Polygon {
    /// Triangle face.
    Triangle {
        v1: u32,
        v2: u32,
        v3: u32,
        material_index: u32,
    },
    /// Box described by four corner vertices.
    Box {
        v1: u32,
        v2: u32,
        v3: u32,
        v4: u32,
        material_index: u32,
    },
    /// Sphere at one vertex.
    Sphere {
        v: u32,
        radius: f64,
        material_index: u32,
    },
    /// Capsule between two vertices.
    Capsule {
        v1: u32,
        v2: u32,
        radius: f64,
        material_index: u32,
    },
    /// Cylinder between two vertices.
    Cylinder {
        v1: u32,
        v2: u32,
        radius: f64,
        material_index: u32,
    },
}

impl Polygon {
    /// Material index of any variant.
    pub fn material_index(&self) -> u32 {
        match *self {
            Polygon::Triangle { material_index, .. }
            | Polygon::Box { material_index, .. }
            | Polygon::Sphere { material_index, .. }
            | Polygon::Capsule { material_index, .. }
            | Polygon::Cylinder { material_index, .. } => material_index,
        }
    }

    /// All vertex indices referenced by this polygon.
    pub fn vertex_indices(&self) -> Vec<u32> {
        match *self {
            Polygon::Triangle { v1, v2, v3, .. } => vec![v1, v2, v3],
            Polygon::Box { v1, v2, v3, v4, .. } => vec![v1, v2, v3, v4],
            Polygon::Sphere { v, .. } => vec![v],
            Polygon::Capsule { v1, v2, .. } | Polygon::Cylinder { v1, v2, .. } => vec![v1, v2],
        }
    }

    /// Wire tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Polygon::Triangle { .. } => "Triangle",
            Polygon::Box { .. } => "Box",
            Polygon::Sphere { .. } => "Sphere",
            Polygon::Capsule { .. } => "Capsule",
            Polygon::Cylinder { .. } => "Cylinder",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_access_across_variants() {
        let mut shared = BoundShared::default();
        shared.sphere_radius = 2.0;
        let bound = Bound::Sphere(shared.clone());
        assert_eq!(bound.shared().sphere_radius, 2.0);
        assert!(bound.geometry().is_none());

        let geometry = Bound::Geometry(BoundGeometry {
            shared,
            ..BoundGeometry::default()
        });
        assert!(geometry.geometry().is_some());
    }

    #[test]
    fn test_polygon_vertex_indices() {
        let tri = Polygon::Triangle {
            v1: 0,
            v2: 1,
            v3: 2,
            material_index: 0,
        };
        assert_eq!(tri.vertex_indices(), vec![0, 1, 2]);
        assert_eq!(tri.tag(), "Triangle");

        let capsule = Polygon::Capsule {
            v1: 4,
            v2: 5,
            radius: 0.5,
            material_index: 1,
        };
        assert_eq!(capsule.vertex_indices(), vec![4, 5]);
        assert_eq!(capsule.material_index(), 1);
    }
}
