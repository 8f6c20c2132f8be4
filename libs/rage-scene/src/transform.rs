//! # Transform
//!
//! Decomposed affine transform as the host scene stores it: translation,
//! rotation quaternion, and non-uniform scale.

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// A decomposed object transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World translation.
    pub position: DVec3,
    /// World rotation.
    pub rotation: DQuat,
    /// Per-axis scale.
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    /// A pure translation.
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Composes the transform into a column-major matrix.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Applies the transform to a point.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.matrix().transform_point3(point)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_leaves_points_alone() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn test_translation() {
        let t = Transform::from_position(DVec3::new(10.0, 0.0, 0.0));
        assert_eq!(t.transform_point(DVec3::ZERO), DVec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let t = Transform {
            position: DVec3::new(1.0, 0.0, 0.0),
            rotation: DQuat::IDENTITY,
            scale: DVec3::splat(2.0),
        };
        assert_eq!(
            t.transform_point(DVec3::new(1.0, 0.0, 0.0)),
            DVec3::new(3.0, 0.0, 0.0)
        );
    }
}
