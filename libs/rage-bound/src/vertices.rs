//! # Vertex Pool
//!
//! Append-only vertex storage scoped to one bound geometry. Positions are
//! never de-duplicated: geometrically identical points still get distinct
//! indices, because polygons reference vertices positionally in the wire
//! format.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Ordered, append-only list of geometry vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexPool {
    points: Vec<DVec3>,
}

impl VertexPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a pool from decoded points.
    pub fn from_points(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Appends a point and returns its index (the count before insertion).
    pub fn append(&mut self, point: DVec3) -> u32 {
        let index = self.points.len() as u32;
        self.points.push(point);
        index
    }

    /// Points in positional order.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_strictly_increase() {
        let mut pool = VertexPool::new();
        assert_eq!(pool.append(DVec3::ZERO), 0);
        assert_eq!(pool.append(DVec3::ONE), 1);
        assert_eq!(pool.append(DVec3::ZERO), 2); // no de-duplication
        assert_eq!(pool.len(), 3);
    }
}
