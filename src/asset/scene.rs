use serde::{Deserialize, Serialize};

use crate::asset::model::Model;
use crate::scene::{Material, Scene, Spatial};

/// On-disk scene layout. The scene's slabs are dense (nothing is ever
/// removed), so vector order doubles as the id space and node, model
/// and material ids survive a round trip as indices.
#[derive(Serialize, Deserialize)]
struct SceneData {
    models: Vec<Model>,
    materials: Vec<Material>,
    nodes: Vec<Spatial>,
}

/// Serializes the whole scene (models, materials, nodes, hierarchy,
/// transforms) to pretty-printed JSON.
pub fn export_scenejson(scene: &Scene) -> Result<Vec<u8>, Error> {
    let data = SceneData {
        models: scene.models().map(|(_, model)| model.clone()).collect(),
        materials: scene
            .materials()
            .iter()
            .map(|(_, material)| material.clone())
            .collect(),
        nodes: scene.nodes().map(|(_, spatial)| spatial.clone()).collect(),
    };

    Ok(serde_json::to_vec_pretty(&data)?)
}

/// Rebuilds a scene from the `export_scenejson` layout.
pub fn import_scenejson(data: &[u8]) -> Result<Scene, Error> {
    let sc: SceneData = serde_json::from_slice(data)?;
    let mut scene = Scene::new();

    for model in sc.models {
        scene.add_model(model);
    }

    for material in sc.materials {
        scene.materials_mut().add(material);
    }

    for node in sc.nodes {
        scene.add_node(node);
    }

    Ok(scene)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("scene JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{MeshInstance, Pivot, Transform};

    #[test]
    fn scene_survives_a_round_trip() {
        let mut scene = Scene::new();

        let model = scene.add_model(Model::from_obj(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap());
        let material = scene.materials_mut().for_hex_triplet("BFDAE3").unwrap();

        let root = scene.add_node(
            Spatial::new(Pivot::new())
                .with_name("group")
                .with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))),
        );
        let mut instance = MeshInstance::new(model);
        instance.set_primary_material(material);
        let child = scene.add_node(Spatial::new(instance).with_name("region"));
        scene.attach_keep_transform(child, root);

        let data = export_scenejson(&scene).unwrap();
        let restored = import_scenejson(&data).unwrap();

        assert_eq!(restored.node_count(), 2);
        assert_eq!(restored.models().count(), 1);
        assert_eq!(restored.materials().len(), 1);

        let restored_child = restored
            .nodes()
            .find(|(_, spatial)| spatial.name() == "region")
            .map(|(handle, _)| handle)
            .unwrap();

        assert_eq!(restored.node(restored_child).parent(), root);
        assert!(restored
            .world_transform(restored_child)
            .matrix()
            .abs_diff_eq(scene.world_transform(child).matrix(), 1e-5));

        let restored_instance = restored
            .node(restored_child)
            .node()
            .as_mesh()
            .unwrap();
        assert_eq!(restored_instance.primary_material(), Some(material));
    }

    #[test]
    fn malformed_scene_json_is_an_error() {
        assert!(import_scenejson(b"not a scene").is_err());
    }
}
