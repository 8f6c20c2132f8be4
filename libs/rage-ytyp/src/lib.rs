//! # rage-ytyp
//!
//! Archetype definitions and their document conversion.
//!
//! [`MapTypes`] holds base, time, and MLO archetypes; MLO interiors own
//! rooms, portals, entities, and timecycle modifiers cross-linked by
//! surrogate ids. [`archetype_to_doc`] / [`map_types_from_doc`] convert to
//! and from `CMapTypes` resource documents.

pub mod archetype;
pub mod error;
pub mod export;
pub mod flags;
pub mod import;
pub mod lod;
pub mod mlo;

pub use archetype::{Archetype, ArchetypeCommon, AssetType, MapTypes};
pub use error::YtypError;
pub use export::archetype_to_doc;
pub use flags::{flags_to_int, int_to_flags};
pub use import::{archetype_from_doc, map_types_from_doc};
pub use mlo::{Entity, MloArchetype, Portal, Room, TimecycleModifier};
