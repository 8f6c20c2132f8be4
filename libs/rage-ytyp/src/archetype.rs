//! # Archetype Definitions
//!
//! The map-types definition model: base archetypes, time-gated archetypes,
//! and MLO interiors. Fields and enum names mirror the wire contract of the
//! external toolchain.

use crate::mlo::MloArchetype;
use config::constants::{DEFAULT_HD_TEXTURE_DIST, DEFAULT_LOD_DIST};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Asset backing an archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    /// No asset bound yet.
    #[default]
    Uninitialized,
    /// Fragment asset.
    Fragment,
    /// Drawable asset.
    Drawable,
    /// Drawable dictionary asset.
    DrawableDictionary,
    /// Archetype without an asset.
    Assetless,
}

impl AssetType {
    /// Wire name for this asset type.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AssetType::Uninitialized => "ASSET_TYPE_UNINITIALIZED",
            AssetType::Fragment => "ASSET_TYPE_FRAGMENT",
            AssetType::Drawable => "ASSET_TYPE_DRAWABLE",
            AssetType::DrawableDictionary => "ASSET_TYPE_DRAWABLEDICTIONARY",
            AssetType::Assetless => "ASSET_TYPE_ASSETLESS",
        }
    }

    /// Asset type for a wire name, if the name is defined.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "ASSET_TYPE_UNINITIALIZED" => Some(AssetType::Uninitialized),
            "ASSET_TYPE_FRAGMENT" => Some(AssetType::Fragment),
            "ASSET_TYPE_DRAWABLE" => Some(AssetType::Drawable),
            "ASSET_TYPE_DRAWABLEDICTIONARY" => Some(AssetType::DrawableDictionary),
            "ASSET_TYPE_ASSETLESS" => Some(AssetType::Assetless),
            _ => None,
        }
    }
}

/// Fields common to every archetype variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeCommon {
    /// Archetype name.
    pub name: String,
    /// 32-bit flags.
    pub flags: u32,
    /// Special attribute.
    pub special_attribute: u32,
    /// Bounding box minimum.
    pub bb_min: DVec3,
    /// Bounding box maximum.
    pub bb_max: DVec3,
    /// Bounding sphere center.
    pub bs_center: DVec3,
    /// Bounding sphere radius.
    pub bs_radius: f64,
    /// LOD distance.
    pub lod_dist: f64,
    /// HD texture distance.
    pub hd_texture_dist: f64,
    /// Texture dictionary name.
    pub texture_dictionary: String,
    /// Clip dictionary name.
    pub clip_dictionary: String,
    /// Drawable dictionary name.
    pub drawable_dictionary: String,
    /// Physics dictionary name.
    pub physics_dictionary: String,
    /// Asset type.
    pub asset_type: AssetType,
    /// Asset object name; a weak reference into the scene, never owned.
    pub asset_name: String,
}

impl Default for ArchetypeCommon {
    fn default() -> Self {
        Self {
            name: String::new(),
            flags: 0,
            special_attribute: 0,
            bb_min: DVec3::ZERO,
            bb_max: DVec3::ZERO,
            bs_center: DVec3::ZERO,
            bs_radius: 0.0,
            lod_dist: DEFAULT_LOD_DIST,
            hd_texture_dist: DEFAULT_HD_TEXTURE_DIST,
            texture_dictionary: String::new(),
            clip_dictionary: String::new(),
            drawable_dictionary: String::new(),
            physics_dictionary: String::new(),
            asset_type: AssetType::default(),
            asset_name: String::new(),
        }
    }
}

/// An archetype definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Archetype {
    /// Plain archetype.
    Base(ArchetypeCommon),
    /// Archetype gated by time-of-day flags.
    Time {
        /// Common fields.
        common: ArchetypeCommon,
        /// Hour-of-day visibility flags.
        time_flags: u32,
    },
    /// Multi-room interior.
    Mlo(MloArchetype),
}

impl Archetype {
    /// Common fields of any variant.
    pub fn common(&self) -> &ArchetypeCommon {
        match self {
            Archetype::Base(common) | Archetype::Time { common, .. } => common,
            Archetype::Mlo(mlo) => &mlo.common,
        }
    }

    /// Wire record tag for this variant.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Archetype::Base(_) => "CBaseArchetypeDef",
            Archetype::Time { .. } => "CTimeArchetypeDef",
            Archetype::Mlo(_) => "CMloArchetypeDef",
        }
    }
}

/// A map-types definition: a named collection of archetypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapTypes {
    /// Definition name.
    pub name: String,
    /// Archetypes in definition order.
    pub archetypes: Vec<Archetype>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_names_round_trip() {
        for asset_type in [
            AssetType::Uninitialized,
            AssetType::Fragment,
            AssetType::Drawable,
            AssetType::DrawableDictionary,
            AssetType::Assetless,
        ] {
            assert_eq!(AssetType::from_wire(asset_type.wire_name()), Some(asset_type));
        }
        assert!(AssetType::from_wire("ASSET_TYPE_BOGUS").is_none());
    }

    #[test]
    fn test_common_defaults() {
        let common = ArchetypeCommon::default();
        assert_eq!(common.lod_dist, 100.0);
        assert_eq!(common.hd_texture_dist, 100.0);
        assert_eq!(common.asset_type, AssetType::Uninitialized);
    }

    #[test]
    fn test_wire_tags() {
        assert_eq!(
            Archetype::Base(ArchetypeCommon::default()).wire_tag(),
            "CBaseArchetypeDef"
        );
        assert_eq!(
            Archetype::Time {
                common: ArchetypeCommon::default(),
                time_flags: 0
            }
            .wire_tag(),
            "CTimeArchetypeDef"
        );
    }
}
