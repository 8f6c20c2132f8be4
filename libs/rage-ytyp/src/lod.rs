//! # LOD and Priority Enum Names
//!
//! Entity LOD levels and priority levels are stored as raw integers and
//! serialized by their symbolic wire names. The mapping is closed: an
//! integer without a name is a hard error, never a silent default.

use crate::error::YtypError;

const LOD_LEVELS: [&str; 7] = [
    "LODTYPES_DEPTH_HD",
    "LODTYPES_DEPTH_LOD",
    "LODTYPES_DEPTH_SLOD1",
    "LODTYPES_DEPTH_SLOD2",
    "LODTYPES_DEPTH_SLOD3",
    "LODTYPES_DEPTH_SLOD4",
    "LODTYPES_DEPTH_ORPHANHD",
];

const PRIORITY_LEVELS: [&str; 4] = [
    "PRI_REQUIRED",
    "PRI_OPTIONAL_HIGH",
    "PRI_OPTIONAL_MEDIUM",
    "PRI_OPTIONAL_LOW",
];

/// Wire name for a LOD level value.
pub fn lod_level_name(value: u32) -> Result<&'static str, YtypError> {
    LOD_LEVELS
        .get(value as usize)
        .copied()
        .ok_or(YtypError::AmbiguousEnumValue {
            field: "lodLevel",
            value,
        })
}

/// LOD level value for a wire name.
pub fn lod_level_value(name: &str) -> Result<u32, YtypError> {
    LOD_LEVELS
        .iter()
        .position(|n| *n == name)
        .map(|p| p as u32)
        .ok_or_else(|| YtypError::UnknownEnumName {
            field: "lodLevel",
            name: name.to_string(),
        })
}

/// Wire name for a priority level value.
pub fn priority_level_name(value: u32) -> Result<&'static str, YtypError> {
    PRIORITY_LEVELS
        .get(value as usize)
        .copied()
        .ok_or(YtypError::AmbiguousEnumValue {
            field: "priorityLevel",
            value,
        })
}

/// Priority level value for a wire name.
pub fn priority_level_value(name: &str) -> Result<u32, YtypError> {
    PRIORITY_LEVELS
        .iter()
        .position(|n| *n == name)
        .map(|p| p as u32)
        .ok_or_else(|| YtypError::UnknownEnumName {
            field: "priorityLevel",
            name: name.to_string(),
        })
}

// =============================================================================
// TESTS
// =============================================================================
