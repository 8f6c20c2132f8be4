//! # Scene Nodes
//!
//! Snapshot types for the host scene hierarchy. The conversion layer only
//! ever reads these; they are produced by whatever embeds the pipeline and
//! their lifetime ends with the conversion call.

use crate::transform::Transform;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// SHAPE KINDS
// =============================================================================

/// The declared type tag of a scene node.
///
/// The set is closed by the file format; a tag the pipeline does not know
/// arrives as `Other` and is rejected at build time rather than silently
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Root of a composite bound.
    BoundComposite,
    /// Primitive box bound.
    BoundBox,
    /// Primitive sphere bound.
    BoundSphere,
    /// Primitive capsule bound.
    BoundCapsule,
    /// Primitive cylinder bound.
    BoundCylinder,
    /// Primitive disc bound.
    BoundDisc,
    /// Cloth bound.
    BoundCloth,
    /// Mesh geometry bound.
    BoundGeometry,
    /// Mesh geometry bound with a bounding-volume hierarchy.
    BoundGeometryBvh,
    /// Triangle-mesh polygon source.
    PolyTriangle,
    /// Box polygon.
    PolyBox,
    /// Sphere polygon.
    PolySphere,
    /// Capsule polygon.
    PolyCapsule,
    /// Cylinder polygon.
    PolyCylinder,
    /// Anything the host declared that the format does not cover.
    Other(String),
}

impl ShapeKind {
    /// Returns a display label for reports and errors.
    pub fn label(&self) -> &str {
        match self {
            ShapeKind::BoundComposite => "composite",
            ShapeKind::BoundBox => "box",
            ShapeKind::BoundSphere => "sphere",
            ShapeKind::BoundCapsule => "capsule",
            ShapeKind::BoundCylinder => "cylinder",
            ShapeKind::BoundDisc => "disc",
            ShapeKind::BoundCloth => "cloth",
            ShapeKind::BoundGeometry => "geometry",
            ShapeKind::BoundGeometryBvh => "geometrybvh",
            ShapeKind::PolyTriangle => "poly triangle",
            ShapeKind::PolyBox => "poly box",
            ShapeKind::PolySphere => "poly sphere",
            ShapeKind::PolyCapsule => "poly capsule",
            ShapeKind::PolyCylinder => "poly cylinder",
            ShapeKind::Other(tag) => tag,
        }
    }
}

// =============================================================================
// FLAG SETS
// =============================================================================

/// An ordered set of named boolean flags as the host stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
    entries: Vec<(String, bool)>,
}

impl FlagSet {
    /// Creates an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a flag, inserting it if absent.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Iterates over all `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Names of all flags currently true, upper-cased.
    pub fn enabled_upper(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, v)| *v)
            .map(|(n, _)| n.to_uppercase())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for FlagSet {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

// =============================================================================
// MATERIALS
// =============================================================================

/// Opaque identity of one logical material object.
///
/// Two materials with identical fields but distinct ids are distinct for
/// de-duplication purposes. Ids are issued once per process and never
/// recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(u64);

impl MaterialId {
    /// Issues a fresh, process-unique id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// What kind of material the host tagged this as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// A collision material; participates in bound export.
    Collision,
    /// Any other host material; skipped when merging mesh material lists.
    Other,
}

/// Snapshot of one host material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMaterial {
    /// Stable identity for de-duplication.
    pub id: MaterialId,
    /// Host material kind.
    pub kind: MaterialKind,
    /// Collision material type index.
    pub collision_index: u32,
    /// Procedural id.
    pub procedural_id: u32,
    /// Room id.
    pub room_id: u32,
    /// Pedestrian density.
    pub ped_density: u32,
    /// Material colour index.
    pub material_color_index: u32,
    /// Collision flags as the host names them (lower case).
    pub flags: FlagSet,
}

impl SceneMaterial {
    /// Creates a collision material snapshot with a fresh identity.
    pub fn collision(collision_index: u32) -> Self {
        Self {
            id: MaterialId::next(),
            kind: MaterialKind::Collision,
            collision_index,
            procedural_id: 0,
            room_id: 0,
            ped_density: 0,
            material_color_index: 0,
            flags: FlagSet::new(),
        }
    }
}

// =============================================================================
// MESH DATA
// =============================================================================

/// One triangulated face of a mesh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshTriangle {
    /// Indices into the mesh vertex list.
    pub vertices: [u32; 3],
    /// Index into the mesh material list.
    pub material_index: u32,
}

/// Triangulated mesh snapshot attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex positions in the node's local frame.
    pub vertices: Vec<DVec3>,
    /// Materials in slot order.
    pub materials: Vec<SceneMaterial>,
    /// Triangulated faces.
    pub triangles: Vec<MeshTriangle>,
}

// =============================================================================
// BOUND PROPERTIES
// =============================================================================

/// Collision properties stored on a bound node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundProperties {
    /// Procedural id.
    pub procedural_id: u32,
    /// Room id.
    pub room_id: u32,
    /// Pedestrian density.
    pub ped_density: u32,
    /// Polygon flags.
    pub poly_flags: u32,
}

// =============================================================================
// SCENE NODE
// =============================================================================

/// A node in the host scene hierarchy.
///
/// Children are owned by their parent; the tree has no cycles and lives
/// only for the duration of one conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Host object name, used in reports.
    pub name: String,
    /// Declared type tag.
    pub kind: ShapeKind,
    /// World transform.
    pub transform: Transform,
    /// Local-space bounding box minimum.
    pub local_min: DVec3,
    /// Local-space bounding box maximum.
    pub local_max: DVec3,
    /// Mesh snapshot, present on triangle-polygon nodes.
    pub mesh: Option<MeshData>,
    /// Active material, present on polygon nodes.
    pub material: Option<SceneMaterial>,
    /// Collision properties.
    pub bound_properties: BoundProperties,
    /// First composite flag set.
    pub composite_flags1: FlagSet,
    /// Second composite flag set.
    pub composite_flags2: FlagSet,
    /// Child nodes in host order.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates a bare node with identity transform and empty bounds.
    pub fn new(name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            local_min: DVec3::ZERO,
            local_max: DVec3::ZERO,
            mesh: None,
            material: None,
            bound_properties: BoundProperties::default(),
            composite_flags1: FlagSet::new(),
            composite_flags2: FlagSet::new(),
            children: Vec::new(),
        }
    }

    /// Iterates over all descendants depth-first, children before siblings.
    pub fn descendants(&self) -> impl Iterator<Item = &SceneNode> {
        let mut stack: Vec<&SceneNode> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_ids_are_unique() {
        let a = MaterialId::next();
        let b = MaterialId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_flag_set_enabled_upper() {
        let mut flags = FlagSet::new();
        flags.set("stairs", true);
        flags.set("see_through", false);
        flags.set("no_decal", true);
        assert_eq!(flags.enabled_upper(), vec!["STAIRS", "NO_DECAL"]);
    }

    #[test]
    fn test_flag_set_overwrites() {
        let mut flags = FlagSet::new();
        flags.set("stairs", true);
        flags.set("stairs", false);
        assert!(flags.enabled_upper().is_empty());
    }

    #[test]
    fn test_descendants_order() {
        let mut root = SceneNode::new("root", ShapeKind::BoundComposite);
        let mut a = SceneNode::new("a", ShapeKind::BoundGeometry);
        a.children.push(SceneNode::new("a1", ShapeKind::PolyTriangle));
        root.children.push(a);
        root.children.push(SceneNode::new("b", ShapeKind::BoundBox));

        let names: Vec<&str> = root.descendants().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a1", "b"]);
    }
}
