mod material;
mod mesh;
mod node;
mod transform;

pub use self::material::*;
pub use self::mesh::*;
pub use self::node::*;
pub use self::transform::*;

use ahash::{AHashMap, AHashSet};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use slab::Slab;

use crate::asset::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId {
    index: usize,
}

impl ModelId {
    pub(super) fn new(index: usize) -> Self {
        Self { index }
    }
}

/// The assembled scene: mesh assets, materials and the node hierarchy.
pub struct Scene {
    nodes: Slab<Spatial>,
    models: Slab<Model>,
    materials: MaterialLibrary,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            models: Slab::new(),
            materials: MaterialLibrary::new(),
        }
    }

    pub fn add_model(&mut self, model: Model) -> ModelId {
        ModelId::new(self.models.insert(model))
    }

    pub fn model(&self, id: ModelId) -> &Model {
        &self.models[id.index]
    }

    pub fn models(&self) -> impl Iterator<Item = (ModelId, &Model)> {
        self.models
            .iter()
            .map(|(index, model)| (ModelId::new(index), model))
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    pub fn add_node(&mut self, node: Spatial) -> NodeId {
        NodeId::new(self.nodes.insert(node))
    }

    pub fn node(&self, handle: NodeId) -> &Spatial {
        &self.nodes[handle.index]
    }

    pub fn node_mut(&mut self, handle: NodeId) -> &mut Spatial {
        &mut self.nodes[handle.index]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Spatial)> {
        self.nodes
            .iter()
            .map(|(index, spatial)| (NodeId::new(index), spatial))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// World transform of a node: locals composed down from the root.
    pub fn world_transform(&self, handle: NodeId) -> Transform {
        let spatial = self.node(handle);
        let mut world = spatial.transform();

        let mut parent = spatial.parent();
        while parent != NodeId::NONE {
            let spatial = self.node(parent);
            world = spatial.transform() * world;
            parent = spatial.parent();
        }

        world
    }

    /// Re-parents a node without moving it: the world transform before
    /// and after the attachment is the same.
    pub fn attach_keep_transform(&mut self, child: NodeId, parent: NodeId) {
        assert_ne!(child, NodeId::NONE, "attached node ID must not be NONE");
        assert_ne!(parent, NodeId::NONE, "parent node ID must not be NONE");

        let child_world = self.world_transform(child);
        let parent_world = self.world_transform(parent);

        let old_parent = self.node(child).parent();
        if old_parent != NodeId::NONE {
            self.node_mut(old_parent).detach_child(child);
        }

        let spatial = self.node_mut(child);
        spatial.parent = parent;
        spatial.transform = parent_world.inverse() * child_world;

        self.node_mut(parent).attach_child(child);
    }

    /// Moves every mesh node's origin to its geometry centroid without
    /// moving the geometry in world space. Children keep their world
    /// placement because locals are recomputed against the updated
    /// parents.
    pub fn set_origins_to_geometry(&mut self) {
        let handles: Vec<NodeId> = self.nodes().map(|(handle, _)| handle).collect();

        let mut desired = AHashMap::new();
        for &handle in &handles {
            let world = self.world_transform(handle);
            let target = match self.node(handle).node().as_mesh() {
                Some(instance) => {
                    let centroid = self.model(instance.model()).centroid();
                    Transform {
                        position: world.transform_point(centroid),
                        rotation: world.rotation,
                    }
                }
                None => world,
            };
            desired.insert(handle, target);
        }

        let mut rebased = AHashSet::new();
        for &handle in &handles {
            if let Some(instance) = self.node(handle).node().as_mesh() {
                let model_id = instance.model();
                if rebased.insert(model_id) {
                    let centroid = self.models[model_id.index].centroid();
                    self.models[model_id.index].rebase(centroid);
                }
            }
        }

        for &handle in &handles {
            let parent = self.node(handle).parent();
            let local = if parent == NodeId::NONE {
                desired[&handle]
            } else {
                desired[&parent].inverse() * desired[&handle]
            };
            self.node_mut(handle).transform = local;
        }
    }

    /// Translates the whole hierarchy rigidly so the centroid of all
    /// mesh-node origins sits at the world origin.
    pub fn center_on_origin(&mut self) {
        let mut sum = Vec3::ZERO;
        let mut count = 0usize;

        for (handle, spatial) in self.nodes() {
            if spatial.node().as_mesh().is_some() {
                sum += self.world_transform(handle).position;
                count += 1;
            }
        }

        if count == 0 {
            return;
        }

        let offset = sum / count as f32;

        let roots: Vec<NodeId> = self
            .nodes()
            .filter(|(_, spatial)| spatial.parent() == NodeId::NONE)
            .map(|(handle, _)| handle)
            .collect();

        for handle in roots {
            self.node_mut(handle).transform.position -= offset;
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Spatial {
    parent: NodeId,
    children: Vec<NodeId>,
    transform: Transform,
    name: String,
    node: Node,
}

impl Spatial {
    pub fn new(node: impl Into<Node>) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            transform: Transform::IDENTITY,
            name: String::new(),
            node: node.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    pub fn attach_child(&mut self, child: NodeId) {
        assert_ne!(child, NodeId::NONE, "attached node ID must not be NONE");

        self.children.push(child);
    }

    pub fn detach_child(&mut self, child: NodeId) {
        let Some(position) = self.children.iter().position(|c| *c == child) else {
            return;
        };

        self.children.remove(position);
    }
}
