//! # Placed Object Lookup
//!
//! Weak, name-based access to placed scene objects. Entities and archetype
//! asset references point at objects by name; the pipeline reads a
//! transform snapshot at conversion time and never owns or mutates the
//! objects themselves.

use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Snapshot of one placed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Host object name.
    pub name: String,
    /// World transform at snapshot time.
    pub transform: Transform,
}

/// Name-indexed collection of placed objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneObjects {
    objects: Vec<SceneObject>,
}

impl SceneObjects {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object snapshot.
    pub fn push(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Finds an object by name. Linear scan; scenes are small.
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<SceneObject> for SceneObjects {
    fn from_iter<T: IntoIterator<Item = SceneObject>>(iter: T) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_find_by_name() {
        let mut objects = SceneObjects::new();
        objects.push(SceneObject {
            name: "prop_bench_01".to_string(),
            transform: Transform::from_position(DVec3::new(5.0, 0.0, 0.0)),
        });
        let found = objects.find("prop_bench_01").unwrap();
        assert_eq!(found.transform.position.x, 5.0);
        assert!(objects.find("missing").is_none());
    }
}
