//! # Archetype Import
//!
//! Rebuilds archetype definitions from document records. Rooms and portals
//! get fresh surrogate ids in array order; `roomFrom`/`roomTo` and portal
//! attachments are relinked against the fresh ids, because the file's
//! serialized indices are positional only and not stable across edits.

use crate::archetype::{Archetype, ArchetypeCommon, AssetType, MapTypes};
use crate::error::YtypError;
use crate::lod::{lod_level_value, priority_level_value};
use crate::mlo::{Entity, MloArchetype, TimecycleModifier};
use glam::{DQuat, DVec3};
use rage_doc::DocNode;

/// Decodes a `CMapTypes` document.
pub fn map_types_from_doc(doc: &DocNode) -> Result<MapTypes, YtypError> {
    let name = doc.child_text("name");
    let mut archetypes = Vec::new();
    if let Some(list) = doc.child("archetypes") {
        for item in list.items() {
            archetypes.push(archetype_from_doc(item)?);
        }
    }
    Ok(MapTypes { name, archetypes })
}

/// Decodes one archetype record.
pub fn archetype_from_doc(item: &DocNode) -> Result<Archetype, YtypError> {
    let common = read_common(item)?;
    match item.attr("type").unwrap_or_default() {
        "CBaseArchetypeDef" => Ok(Archetype::Base(common)),
        "CTimeArchetypeDef" => Ok(Archetype::Time {
            common,
            time_flags: item.child_u32("timeFlags")?,
        }),
        "CMloArchetypeDef" => Ok(Archetype::Mlo(read_mlo(item, common)?)),
        other => Err(YtypError::UnknownArchetypeType(other.to_string())),
    }
}

fn read_common(item: &DocNode) -> Result<ArchetypeCommon, YtypError> {
    let asset_type_name = item.child_text("assetType");
    let asset_type =
        AssetType::from_wire(&asset_type_name).ok_or_else(|| YtypError::UnknownEnumName {
            field: "assetType",
            name: asset_type_name,
        })?;
    Ok(ArchetypeCommon {
        name: item.child_text("name"),
        flags: item.child_u32("flags")?,
        special_attribute: item.child_u32("specialAttribute")?,
        bb_min: item.child_vec3("bbMin")?,
        bb_max: item.child_vec3("bbMax")?,
        bs_center: item.child_vec3("bsCentre")?,
        bs_radius: item.child_f64("bsRadius")?,
        lod_dist: item.child_f64("lodDist")?,
        hd_texture_dist: item.child_f64("hdTextureDist")?,
        texture_dictionary: item.child_text("textureDictionary"),
        clip_dictionary: item.child_text("clipDictionary"),
        drawable_dictionary: item.child_text("drawableDictionary"),
        physics_dictionary: item.child_text("physicsDictionary"),
        asset_type,
        asset_name: item.child_text("assetName"),
    })
}

fn read_mlo(item: &DocNode, common: ArchetypeCommon) -> Result<MloArchetype, YtypError> {
    let mut mlo = MloArchetype::new(common);
    mlo.mlo_flags = item.child_u32("mloFlags")?;

    if let Some(list) = item.child("entities") {
        for entity_item in list.items() {
            mlo.entities.push(read_entity(entity_item)?);
        }
    }

    if let Some(list) = item.child("rooms") {
        for room_item in list.items() {
            let room = mlo.new_room();
            room.name = room_item.child_text("name");
            room.bb_min = room_item.child_vec3("bbMin")?;
            room.bb_max = room_item.child_vec3("bbMax")?;
            room.blend = room_item.child_i32("blend")?;
            room.timecycle = room_item.child_text("timecycleName");
            room.secondary_timecycle = room_item.child_text("secondaryTimecycleName");
            room.flags = room_item.child_u32("flags")?;
            room.floor_id = room_item.child_u32("floorId")?;
            room.exterior_visibility_depth = room_item.child_i32("exteriorVisibiltyDepth")?;
            // Room attachedObjects are derived from entity positions at
            // export time; the serialized list is not read back.
        }
    }

    if let Some(list) = item.child("portals") {
        for portal_item in list.items() {
            let room_from = portal_item.child_i32("roomFrom")? as usize;
            let room_to = portal_item.child_i32("roomTo")? as usize;
            let room_from_id = mlo.rooms().get(room_from).map(|r| r.id).unwrap_or(0);
            let room_to_id = mlo.rooms().get(room_to).map(|r| r.id).unwrap_or(0);

            let mut corners = [DVec3::ZERO; 4];
            if let Some(corner_list) = portal_item.child("corners") {
                for (slot, corner) in corner_list.items().take(4).enumerate() {
                    corners[slot] = corner.as_vec3()?;
                }
            }

            let attached = portal_item.child_index_list("attachedObjects")?;
            let portal_id;
            {
                let portal = mlo.new_portal();
                portal.room_from_id = room_from_id;
                portal.room_to_id = room_to_id;
                portal.corners = corners;
                portal.flags = portal_item.child_u32("flags")?;
                portal.mirror_priority = portal_item.child_u32("mirrorPriority")?;
                portal.opacity = portal_item.child_u32("opacity")?;
                portal.audio_occlusion = portal_item.child_u32("audioOcclusion")?;
                portal_id = portal.id;
            }
            for entity_index in attached {
                if let Some(entity) = mlo.entities.get_mut(entity_index) {
                    entity.attached_portal_id = portal_id as i32;
                }
            }
        }
    }

    if let Some(list) = item.child("timeCycleModifiers") {
        for modifier_item in list.items() {
            mlo.timecycle_modifiers.push(TimecycleModifier {
                name: modifier_item.child_text("name"),
                sphere: modifier_item.child_vec4("sphere")?,
                percentage: modifier_item.child_u32("percentage")?,
                range: modifier_item.child_f64("range")?,
                start_hour: modifier_item.child_u32("startHour")?,
                end_hour: modifier_item.child_u32("endHour")?,
            });
        }
    }
    Ok(mlo)
}

fn read_entity(item: &DocNode) -> Result<Entity, YtypError> {
    let rotation = item.child_vec4("rotation")?;
    let lod_level_name = item.child_text("lodLevel");
    let priority_level_name = item.child_text("priorityLevel");
    Ok(Entity {
        archetype_name: item.child_text("archetypeName"),
        linked_object: None,
        position: item.child_vec3("position")?,
        rotation: DQuat::from_xyzw(rotation.x, rotation.y, rotation.z, rotation.w),
        scale_xy: item.child_f64("scaleXY")?,
        scale_z: item.child_f64("scaleZ")?,
        flags: item.child_u32("flags")?,
        parent_index: item.child_i32("parentIndex")?,
        lod_dist: item.child_f64("lodDist")?,
        child_lod_dist: item.child_f64("childLodDist")?,
        lod_level: lod_level_value(&lod_level_name)?,
        priority_level: priority_level_value(&priority_level_name)?,
        num_children: item.child_u32("numChildren")?,
        ambient_occlusion_multiplier: item.child_u32("ambientOcclusionMultiplier")?,
        artificial_ambient_occlusion: item.child_u32("artificialAmbientOcclusion")?,
        tint_value: item.child_u32("tintValue")?,
        ..Entity::default()
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::archetype_to_doc;
    use rage_scene::SceneObjects;

    fn interior_doc() -> DocNode {
        let mut mlo = MloArchetype::new(ArchetypeCommon {
            name: "int_test".to_string(),
            ..ArchetypeCommon::default()
        });
        mlo.new_room().name = "lobby".to_string();
        mlo.new_room().name = "hall".to_string();
        {
            let portal = mlo.new_portal();
            portal.room_from_id = 2;
            portal.room_to_id = 1;
        }
        mlo.entities.push(Entity {
            archetype_name: "prop_chair".to_string(),
            attached_portal_id: 1,
            ..Entity::default()
        });
        archetype_to_doc(&Archetype::Mlo(mlo), &SceneObjects::new()).unwrap()
    }

    #[test]
    fn test_portal_room_relinked_by_fresh_ids() {
        let archetype = archetype_from_doc(&interior_doc()).unwrap();
        let Archetype::Mlo(mlo) = archetype else {
            panic!("expected an MLO archetype");
        };
        let portal = &mlo.portals()[0];
        // roomFrom was serialized as index 1; after import the portal
        // points at the fresh id of the room at that position.
        assert_eq!(mlo.room_index_by_id(portal.room_from_id), 1);
        assert_eq!(mlo.room_index_by_id(portal.room_to_id), 0);
    }

    #[test]
    fn test_portal_attachment_relinked() {
        let archetype = archetype_from_doc(&interior_doc()).unwrap();
        let Archetype::Mlo(mlo) = archetype else {
            panic!("expected an MLO archetype");
        };
        let entity = &mlo.entities[0];
        assert_eq!(mlo.portal_index_by_id(entity.attached_portal_id), 0);
    }

    #[test]
    fn test_unknown_archetype_type_rejected() {
        let item = DocNode::new("Item").with_attr("type", "CCargenDef");
        assert!(matches!(
            archetype_from_doc(&item),
            Err(YtypError::UnknownArchetypeType(_))
        ));
    }

    #[test]
    fn test_base_archetype_round_trip() {
        let archetype = Archetype::Base(ArchetypeCommon {
            name: "prop_crate_01".to_string(),
            asset_name: "crate".to_string(),
            asset_type: AssetType::Drawable,
            flags: 32,
            ..ArchetypeCommon::default()
        });
        let doc = archetype_to_doc(&archetype, &SceneObjects::new()).unwrap();
        let back = archetype_from_doc(&doc).unwrap();
        assert_eq!(back.common().name, "prop_crate_01");
        assert_eq!(back.common().asset_type, AssetType::Drawable);
        assert_eq!(back.common().flags, 32);
    }
}
