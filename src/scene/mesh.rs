use serde::{Deserialize, Serialize};

use crate::scene::{MaterialId, ModelId, Node};

/// A node payload referencing an imported model and its material
/// slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshInstance {
    model: ModelId,
    materials: Vec<MaterialId>,
}

impl MeshInstance {
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            materials: Vec::new(),
        }
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    /// Assigns the primary material: replaces slot 0 when one exists,
    /// otherwise adds it as the first slot.
    pub fn set_primary_material(&mut self, material: MaterialId) {
        if let Some(slot) = self.materials.first_mut() {
            *slot = material;
        } else {
            self.materials.push(material);
        }
    }

    pub fn primary_material(&self) -> Option<MaterialId> {
        self.materials.first().copied()
    }
}

impl From<MeshInstance> for Node {
    fn from(value: MeshInstance) -> Node {
        Node::Mesh(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scene::{Material, MaterialLibrary};

    #[test]
    fn primary_material_replaces_slot_zero() {
        let mut library = MaterialLibrary::new();
        let red = library.add(Material {
            name: "red".to_owned(),
            color: Color { r: 1.0, g: 0.0, b: 0.0 },
        });
        let blue = library.add(Material {
            name: "blue".to_owned(),
            color: Color { r: 0.0, g: 0.0, b: 1.0 },
        });

        let mut instance = MeshInstance::new(ModelId::new(0));
        assert_eq!(instance.primary_material(), None);

        instance.set_primary_material(red);
        assert_eq!(instance.primary_material(), Some(red));
        assert_eq!(instance.materials().len(), 1);

        instance.set_primary_material(blue);
        assert_eq!(instance.primary_material(), Some(blue));
        assert_eq!(instance.materials().len(), 1);
    }
}
