//! # RAGE Scene
//!
//! Boundary types for the host scene graph. The conversion crates consume
//! these snapshots; nothing in the pipeline reaches back into the host.
//!
//! ## Architecture
//!
//! ```text
//! host scene → SceneNode tree ──→ rage-bound (collision bounds)
//!            → SceneObjects   ──→ rage-ytyp  (entity/asset lookup)
//! ```

pub mod node;
pub mod object;
pub mod transform;

// Re-export public API
pub use node::{
    BoundProperties, FlagSet, MaterialId, MaterialKind, MeshData, MeshTriangle, SceneMaterial,
    SceneNode, ShapeKind,
};
pub use object::{SceneObject, SceneObjects};
pub use transform::Transform;
