//! # Bound Geometry Math
//!
//! Pure functions deriving boxes, spheres, and primitive axes from point
//! sets and transforms. No scene or document types leak in here.
//!
//! ## Corner convention
//!
//! [`world_corners`] emits the eight box corners in a fixed order:
//!
//! ```text
//! 0 (min,min,min)   4 (max,min,min)
//! 1 (min,min,max)   5 (max,min,max)
//! 2 (min,max,max)   6 (max,max,max)
//! 3 (min,max,min)   7 (max,max,min)
//! ```
//!
//! Primitive derivation indexes into this array positionally (box polygons
//! take corners 0/5/2/7, cylinders take 0/1/2). The order is part of the
//! wire contract with the external toolchain; do not reorder.

use crate::error::BoundError;
use glam::{DMat4, DVec3};

/// Computes the axis-aligned bounding box of a point set.
///
/// Errors on an empty set; callers guarantee at least one point.
pub fn axis_aligned_bounds(points: &[DVec3]) -> Result<(DVec3, DVec3), BoundError> {
    let first = points.first().ok_or(BoundError::EmptyPointSet)?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min = min.min(*p);
        max = max.max(*p);
    }
    Ok((min, max))
}

/// Midpoint of a bounding box.
pub fn bound_center(min: DVec3, max: DVec3) -> DVec3 {
    (min + max) * 0.5
}

/// Bounds of a fixed corner array; the infallible companion of
/// [`axis_aligned_bounds`] for the eight-corner case.
pub fn corner_bounds(corners: &[DVec3; 8]) -> (DVec3, DVec3) {
    let mut min = corners[0];
    let mut max = corners[0];
    for c in &corners[1..] {
        min = min.min(*c);
        max = max.max(*c);
    }
    (min, max)
}

/// Computes a bounding sphere for a point set: center is the midpoint of
/// the axis-aligned box, radius the largest distance from that center.
///
/// With `world` set, points are transformed by `matrix` first.
pub fn bounding_sphere(
    points: &[DVec3],
    matrix: &DMat4,
    world: bool,
) -> Result<(DVec3, f64), BoundError> {
    let transformed: Vec<DVec3> = if world {
        points.iter().map(|p| matrix.transform_point3(*p)).collect()
    } else {
        points.to_vec()
    };
    let (min, max) = axis_aligned_bounds(&transformed)?;
    let center = bound_center(min, max);
    let radius = transformed
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0, f64::max);
    Ok((center, radius))
}

/// Transforms the eight corners of a local box into world space, in the
/// fixed corner order documented at module level.
pub fn world_corners(local_min: DVec3, local_max: DVec3, matrix: &DMat4) -> [DVec3; 8] {
    let (n, x) = (local_min, local_max);
    let corners = [
        DVec3::new(n.x, n.y, n.z),
        DVec3::new(n.x, n.y, x.z),
        DVec3::new(n.x, x.y, x.z),
        DVec3::new(n.x, x.y, n.z),
        DVec3::new(x.x, n.y, n.z),
        DVec3::new(x.x, n.y, x.z),
        DVec3::new(x.x, x.y, x.z),
        DVec3::new(x.x, x.y, n.z),
    ];
    corners.map(|c| matrix.transform_point3(c))
}

/// Derives a cylinder axis from three box corners and the box center.
///
/// Height is the distance `a`→`b`, radius half the distance `b`→`c`; the
/// two endpoint vertices sit at center ∓/± half the height along local Z.
///
/// Returns `(v1, v2, radius)`.
pub fn cylinder_axis(a: DVec3, b: DVec3, c: DVec3, center: DVec3) -> (DVec3, DVec3, f64) {
    let height = a.distance(b);
    let radius = b.distance(c) / 2.0;
    let half = DVec3::new(0.0, 0.0, height / 2.0);
    (center - half, center + half, radius)
}

/// Radius of a primitive object from its world corners: half the extent
/// between corners 1 and 2 (the local Y span).
pub fn object_radius(corners: &[DVec3; 8]) -> f64 {
    corners[1].distance(corners[2]) / 2.0
}

// =============================================================================
// TESTS
// =============================================================================
