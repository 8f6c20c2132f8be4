//! # Material Table
//!
//! De-duplicating registry of collision materials inside one bound
//! geometry. Entries are keyed on the *identity* of the source material,
//! never on field values: two materials with equal fields but distinct
//! identities occupy distinct slots.

use rage_scene::{MaterialId, SceneMaterial};
use serde::{Deserialize, Serialize};

/// One material entry as written to the resource document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialItem {
    /// Collision material type index.
    pub type_index: u32,
    /// Procedural id.
    pub procedural_id: u32,
    /// Room id.
    pub room_id: u32,
    /// Pedestrian density.
    pub ped_density: u32,
    /// Material colour index.
    pub material_color_index: u32,
    /// Collision flags, rendered as `FLAG_<NAME>` strings.
    pub flags: Vec<String>,
}

impl MaterialItem {
    /// Converts a scene material snapshot into a table entry.
    pub fn from_scene(material: &SceneMaterial) -> Self {
        let flags = material
            .flags
            .enabled_upper()
            .into_iter()
            .map(|name| format!("FLAG_{name}"))
            .collect();
        Self {
            type_index: material.collision_index,
            procedural_id: material.procedural_id,
            room_id: material.room_id,
            ped_density: material.ped_density,
            material_color_index: material.material_color_index,
            flags,
        }
    }
}

/// Identity-keyed material registry with positional indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialTable {
    items: Vec<MaterialItem>,
    ids: Vec<MaterialId>,
}

impl MaterialTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table from decoded items, issuing fresh identities.
    pub fn from_items(items: Vec<MaterialItem>) -> Self {
        let ids = items.iter().map(|_| MaterialId::next()).collect();
        Self { items, ids }
    }

    /// Adds a material, returning its index.
    ///
    /// If the material's identity is already present the existing index is
    /// returned; otherwise the converted entry is appended. A lookup is
    /// never read-only.
    pub fn add(&mut self, material: &SceneMaterial) -> usize {
        match self.ids.iter().position(|id| *id == material.id) {
            Some(index) => index,
            None => {
                self.items.push(MaterialItem::from_scene(material));
                self.ids.push(material.id);
                self.items.len() - 1
            }
        }
    }

    /// Find-or-insert used by polygon construction; alias of [`add`].
    ///
    /// [`add`]: MaterialTable::add
    pub fn index_or_insert(&mut self, material: &SceneMaterial) -> usize {
        self.add(material)
    }

    /// Ensures the table is non-empty, returning the index of a default
    /// entry. Keeps polygon material indices valid when a mesh carries no
    /// materials at all.
    pub fn ensure_default(&mut self) -> usize {
        if self.items.is_empty() {
            self.items.push(MaterialItem::default());
            self.ids.push(MaterialId::next());
        }
        0
    }

    /// Entries in positional order.
    pub fn items(&self) -> &[MaterialItem] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rage_scene::FlagSet;

    #[test]
    fn test_same_identity_same_index() {
        let material = SceneMaterial::collision(3);
        let mut table = MaterialTable::new();
        assert_eq!(table.add(&material), 0);
        assert_eq!(table.add(&material), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_identities_distinct_indices() {
        // Field-identical materials, distinct identities.
        let a = SceneMaterial::collision(3);
        let b = SceneMaterial::collision(3);
        let mut table = MaterialTable::new();
        assert_eq!(table.add(&a), 0);
        assert_eq!(table.add(&b), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_flags_rendered_with_prefix() {
        let mut material = SceneMaterial::collision(0);
        material.flags = FlagSet::from_iter([("stairs", true), ("see_through", true)]);
        let item = MaterialItem::from_scene(&material);
        assert_eq!(item.flags, vec!["FLAG_STAIRS", "FLAG_SEE_THROUGH"]);
    }

    #[test]
    fn test_ensure_default_only_once() {
        let mut table = MaterialTable::new();
        assert_eq!(table.ensure_default(), 0);
        assert_eq!(table.ensure_default(), 0);
        assert_eq!(table.len(), 1);
    }
}
