use std::path::PathBuf;

use ahash::AHashMap;
use tracing::{info, warn};

use crate::asset::{model, Model};
use crate::color;
use crate::ontology::{Structure, StructureId};
use crate::scene::{MeshInstance, NodeId, Scene, Spatial};

/// Imports ontology structures into a scene in one forward pass.
///
/// Structures are processed in input order, so a parent is only
/// attachable if its own mesh was imported earlier in the list.
pub struct Importer {
    meshes_dir: PathBuf,
}

/// What one import pass produced.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Structure id to scene node, for every structure whose mesh file
    /// existed.
    pub registry: AHashMap<StructureId, NodeId>,
    /// Structures skipped because no mesh file was found.
    pub missing_meshes: Vec<StructureId>,
    /// `(child, parent)` edges dropped because the parent had no
    /// representation when the child was processed. The child stays at
    /// the scene root.
    pub unparented: Vec<(StructureId, StructureId)>,
}

impl Importer {
    pub fn new(meshes_dir: impl Into<PathBuf>) -> Self {
        Self {
            meshes_dir: meshes_dir.into(),
        }
    }

    /// Expected mesh file location for a structure id.
    pub fn mesh_path(&self, id: StructureId) -> PathBuf {
        self.meshes_dir.join(format!("{id}.obj"))
    }

    pub fn import_all(
        &self,
        structures: &[Structure],
        scene: &mut Scene,
    ) -> Result<ImportReport, Error> {
        let mut report = ImportReport::default();

        for structure in structures {
            let path = self.mesh_path(structure.id);
            if !path.is_file() {
                info!(id = %structure.id, path = %path.display(), "no mesh file, skipping");
                report.missing_meshes.push(structure.id);
                continue;
            }

            info!(id = %structure.id, name = %structure.name, "importing");

            let data = std::fs::read(&path)?;
            let mut model = Model::from_obj(&data)?;
            model.name = structure.name.clone();

            let model_id = scene.add_model(model);
            let node_id = scene.add_node(
                Spatial::new(MeshInstance::new(model_id)).with_name(structure.name.as_str()),
            );

            let material = scene
                .materials_mut()
                .for_hex_triplet(&structure.color_hex_triplet)?;
            if let Some(instance) = scene.node_mut(node_id).node_mut().as_mesh_mut() {
                instance.set_primary_material(material);
            }

            if let Some(parent_id) = structure.parent_structure_id {
                match report.registry.get(&parent_id) {
                    Some(&parent_node) => {
                        scene.attach_keep_transform(node_id, parent_node);
                    }
                    None => {
                        warn!(
                            id = %structure.id,
                            parent = %parent_id,
                            "parent has no representation, leaving at scene root"
                        );
                        report.unparented.push((structure.id, parent_id));
                    }
                }
            }

            report.registry.insert(structure.id, node_id);
        }

        info!(
            created = report.registry.len(),
            skipped = report.missing_meshes.len(),
            unparented = report.unparented.len(),
            "import pass finished"
        );

        Ok(report)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] model::Error),

    #[error(transparent)]
    Color(#[from] color::Error),
}
