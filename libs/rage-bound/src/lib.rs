//! # rage-bound
//!
//! Collision bound construction and document conversion.
//!
//! Scene node trees come in via [`composite_from_node`] / [`bound_from_node`];
//! the resulting [`BoundComposite`] converts to and from resource documents
//! with [`composite_to_doc`] / [`composite_from_doc`].

pub mod bound;
pub mod builder;
pub mod error;
pub mod geometry;
pub mod material;
pub mod vertices;
pub mod xml;

pub use bound::{Bound, BoundComposite, BoundGeometry, BoundShared, Polygon};
pub use builder::{bound_from_node, composite_from_node, CompositeBuild};
pub use error::BoundError;
pub use material::{MaterialItem, MaterialTable};
pub use vertices::VertexPool;
pub use xml::{composite_from_doc, composite_to_doc};
