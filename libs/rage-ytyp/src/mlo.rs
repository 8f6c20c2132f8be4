//! # MLO Interiors
//!
//! Multi-room interior archetypes: rooms, portals, entities, and timecycle
//! modifiers, cross-linked by surrogate ids.
//!
//! ## Surrogate ids
//!
//! Rooms and portals carry monotonically issued integer ids. Array position
//! shifts on deletion; ids never do, and are never reused for the lifetime
//! of the owning archetype. Cross-references (portal room links, entity
//! portal attachments) store ids and resolve to positional indices by
//! linear scan at read time.

use crate::archetype::ArchetypeCommon;
use config::constants::{
    DEFAULT_EXTERIOR_VISIBILITY_DEPTH, DEFAULT_LOD_DIST, DEFAULT_ROOM_BLEND,
    DEFAULT_ROOM_TIMECYCLE, NO_ATTACHED_PORTAL,
};
use glam::{DQuat, DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// An interior room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Surrogate id, unique within the owning archetype.
    pub id: u32,
    /// Room name.
    pub name: String,
    /// Room bounds minimum.
    pub bb_min: DVec3,
    /// Room bounds maximum.
    pub bb_max: DVec3,
    /// Blend value.
    pub blend: i32,
    /// Primary timecycle name.
    pub timecycle: String,
    /// Secondary timecycle name.
    pub secondary_timecycle: String,
    /// 32-bit flags.
    pub flags: u32,
    /// Floor id.
    pub floor_id: u32,
    /// Exterior visibility depth.
    pub exterior_visibility_depth: i32,
}

/// A portal between two rooms: a quad of corner points plus room links.
///
/// Corners keep their insertion order; it encodes the visual winding and
/// is never re-sorted on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    /// Surrogate id, unique within the owning archetype.
    pub id: u32,
    /// Corner points in stored order.
    pub corners: [DVec3; 4],
    /// Surrogate id of the room on the near side.
    pub room_from_id: u32,
    /// Surrogate id of the room on the far side.
    pub room_to_id: u32,
    /// 32-bit flags.
    pub flags: u32,
    /// Mirror priority.
    pub mirror_priority: u32,
    /// Opacity.
    pub opacity: u32,
    /// Audio occlusion.
    pub audio_occlusion: u32,
}

/// An entity placed inside an interior.
///
/// When `linked_object` names a placed scene object, position/rotation/scale
/// are read live from that object at export time; the stored transform
/// fields apply otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Name of the archetype this entity instantiates.
    pub archetype_name: String,
    /// Name of a placed scene object to read the transform from, if any.
    pub linked_object: Option<String>,
    /// Stored position.
    pub position: DVec3,
    /// Stored rotation.
    pub rotation: DQuat,
    /// Stored uniform XY scale.
    pub scale_xy: f64,
    /// Stored Z scale.
    pub scale_z: f64,
    /// 32-bit flags.
    pub flags: u32,
    /// Parent entity index.
    pub parent_index: i32,
    /// LOD distance.
    pub lod_dist: f64,
    /// Child LOD distance.
    pub child_lod_dist: f64,
    /// LOD level, serialized by symbolic name.
    pub lod_level: u32,
    /// Priority level, serialized by symbolic name.
    pub priority_level: u32,
    /// Number of child entities.
    pub num_children: u32,
    /// Ambient occlusion multiplier.
    pub ambient_occlusion_multiplier: u32,
    /// Artificial ambient occlusion.
    pub artificial_ambient_occlusion: u32,
    /// Tint value.
    pub tint_value: u32,
    /// Surrogate id of the attached portal, or [`NO_ATTACHED_PORTAL`].
    pub attached_portal_id: i32,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            archetype_name: String::new(),
            linked_object: None,
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale_xy: 1.0,
            scale_z: 1.0,
            flags: 0,
            parent_index: -1,
            lod_dist: DEFAULT_LOD_DIST,
            child_lod_dist: 0.0,
            lod_level: 0,
            priority_level: 0,
            num_children: 0,
            ambient_occlusion_multiplier: 0,
            artificial_ambient_occlusion: 0,
            tint_value: 0,
            attached_portal_id: NO_ATTACHED_PORTAL,
        }
    }
}

/// A timecycle modifier volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimecycleModifier {
    /// Modifier name.
    pub name: String,
    /// Sphere as center + radius packed into a 4-vector.
    pub sphere: DVec4,
    /// Percentage.
    pub percentage: u32,
    /// Range.
    pub range: f64,
    /// Start hour.
    pub start_hour: u32,
    /// End hour.
    pub end_hour: u32,
}

/// A multi-room interior archetype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MloArchetype {
    /// Common archetype fields.
    pub common: ArchetypeCommon,
    /// MLO-specific flags.
    pub mlo_flags: u32,
    /// Placed entities.
    pub entities: Vec<Entity>,
    /// Timecycle modifier volumes.
    pub timecycle_modifiers: Vec<TimecycleModifier>,
    rooms: Vec<Room>,
    portals: Vec<Portal>,
    last_room_id: u32,
    last_portal_id: u32,
}

impl MloArchetype {
    /// Creates an empty interior with the given common fields.
    pub fn new(common: ArchetypeCommon) -> Self {
        Self {
            common,
            ..Self::default()
        }
    }

    /// Creates a room with a fresh id and a positional default name.
    pub fn new_room(&mut self) -> &mut Room {
        let id = self.last_room_id + 1;
        self.last_room_id = id;
        self.rooms.push(Room {
            id,
            name: format!("Room.{}", self.rooms.len()),
            bb_min: DVec3::ZERO,
            bb_max: DVec3::ZERO,
            blend: DEFAULT_ROOM_BLEND,
            timecycle: DEFAULT_ROOM_TIMECYCLE.to_string(),
            secondary_timecycle: String::new(),
            flags: 0,
            floor_id: 0,
            exterior_visibility_depth: DEFAULT_EXTERIOR_VISIBILITY_DEPTH,
        });
        let last = self.rooms.len() - 1;
        &mut self.rooms[last]
    }

    /// Creates a portal with a fresh id.
    pub fn new_portal(&mut self) -> &mut Portal {
        let id = self.last_portal_id + 1;
        self.last_portal_id = id;
        self.portals.push(Portal {
            id,
            corners: [DVec3::ZERO; 4],
            room_from_id: 0,
            room_to_id: 0,
            flags: 0,
            mirror_priority: 0,
            opacity: 0,
            audio_occlusion: 0,
        });
        let last = self.portals.len() - 1;
        &mut self.portals[last]
    }

    /// Removes the room at `index`. Its id is retired, never reissued.
    pub fn remove_room(&mut self, index: usize) {
        if index < self.rooms.len() {
            self.rooms.remove(index);
        }
    }

    /// Removes the portal at `index`. Its id is retired, never reissued.
    pub fn remove_portal(&mut self, index: usize) {
        if index < self.portals.len() {
            self.portals.remove(index);
        }
    }

    /// Rooms in positional order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Mutable room access; ids must not be changed by callers.
    pub fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    /// Portals in positional order.
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Mutable portal access; ids must not be changed by callers.
    pub fn portals_mut(&mut self) -> &mut [Portal] {
        &mut self.portals
    }

    /// Current positional index of the room with the given id.
    ///
    /// Falls back to index 0 when no room matches; a dangling link points
    /// at the first room rather than failing the export.
    pub fn room_index_by_id(&self, id: u32) -> usize {
        self.rooms.iter().position(|r| r.id == id).unwrap_or(0)
    }

    /// Current positional index of the portal with the given id, or -1 for
    /// the no-portal sentinel and for ids no portal carries.
    pub fn portal_index_by_id(&self, id: i32) -> i32 {
        if id == NO_ATTACHED_PORTAL {
            return NO_ATTACHED_PORTAL;
        }
        self.portals
            .iter()
            .position(|p| p.id == id as u32)
            .map(|p| p as i32)
            .unwrap_or(NO_ATTACHED_PORTAL)
    }

    /// Display name of a portal: the names of its two linked rooms.
    pub fn portal_display_name(&self, portal: &Portal) -> String {
        let room_name = |id: u32| {
            self.rooms
                .get(self.room_index_by_id(id))
                .map(|r| r.name.as_str())
                .unwrap_or("")
        };
        format!(
            "{} to {}",
            room_name(portal.room_from_id),
            room_name(portal.room_to_id)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn interior() -> MloArchetype {
        MloArchetype::new(ArchetypeCommon::default())
    }

    #[test]
    fn test_room_ids_monotonic() {
        let mut mlo = interior();
        assert_eq!(mlo.new_room().id, 1);
        assert_eq!(mlo.new_room().id, 2);
        assert_eq!(mlo.new_room().id, 3);
    }

    #[test]
    fn test_room_id_not_reused_after_deletion() {
        let mut mlo = interior();
        mlo.new_room();
        mlo.new_room();
        mlo.remove_room(1);
        let id = mlo.new_room().id;
        assert_eq!(id, 3);
        assert!(mlo.rooms().iter().filter(|r| r.id == id).count() == 1);
    }

    #[test]
    fn test_room_defaults() {
        let mut mlo = interior();
        let room = mlo.new_room();
        assert_eq!(room.name, "Room.0");
        assert_eq!(room.blend, 1);
        assert_eq!(room.timecycle, "int_GasStation");
        assert_eq!(room.exterior_visibility_depth, -1);
    }

    #[test]
    fn test_room_resolution_fallback() {
        let mut mlo = interior();
        mlo.new_room();
        mlo.new_room();
        assert_eq!(mlo.room_index_by_id(2), 1);
        // No match resolves to the first room.
        assert_eq!(mlo.room_index_by_id(42), 0);
    }

    #[test]
    fn test_portal_resolution_sentinel() {
        let mut mlo = interior();
        mlo.new_portal();
        assert_eq!(mlo.portal_index_by_id(1), 0);
        assert_eq!(mlo.portal_index_by_id(NO_ATTACHED_PORTAL), -1);
        assert_eq!(mlo.portal_index_by_id(9), -1);
    }

    #[test]
    fn test_portal_display_name() {
        let mut mlo = interior();
        mlo.new_room().name = "lobby".to_string();
        mlo.new_room().name = "hall".to_string();
        let portal = Portal {
            room_from_id: 1,
            room_to_id: 2,
            ..mlo.new_portal().clone()
        };
        assert_eq!(mlo.portal_display_name(&portal), "lobby to hall");
    }
}
