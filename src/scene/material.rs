use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use slab::Slab;

use crate::color::{self, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId {
    index: usize,
}

impl MaterialId {
    pub(super) fn new(index: usize) -> Self {
        Self { index }
    }
}

/// A colored material, shared between every representation imported
/// with the same hex triplet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub color: Color,
}

/// Owns the materials of a scene and deduplicates them by the hex
/// triplet they were created from.
pub struct MaterialLibrary {
    materials: Slab<Material>,
    by_hex: AHashMap<String, MaterialId>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self {
            materials: Slab::new(),
            by_hex: AHashMap::new(),
        }
    }

    /// Returns the material for a hex triplet, creating it on first
    /// use. Repeated triplets share one instance.
    pub fn for_hex_triplet(&mut self, hex: &str) -> Result<MaterialId, color::Error> {
        if let Some(&id) = self.by_hex.get(hex) {
            return Ok(id);
        }

        let color = Color::from_hex_triplet(hex)?;
        let id = MaterialId::new(self.materials.insert(Material {
            name: format!("{hex}-mat"),
            color,
        }));

        self.by_hex.insert(hex.to_owned(), id);

        Ok(id)
    }

    /// Inserts an already-built material without touching the hex
    /// cache. Used when rebuilding a scene from its serialized form.
    pub fn add(&mut self, material: Material) -> MaterialId {
        MaterialId::new(self.materials.insert(material))
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index]
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .map(|(index, material)| (MaterialId::new(index), material))
    }
}
