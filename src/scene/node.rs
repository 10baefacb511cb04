use serde::{Deserialize, Serialize};

use crate::scene::MeshInstance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId {
    pub(super) index: usize,
}

impl NodeId {
    pub const NONE: NodeId = NodeId { index: usize::MAX };
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}

impl NodeId {
    pub(super) fn new(index: usize) -> Self {
        Self { index }
    }
}

/// Payload of a scene node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    Pivot(Pivot),
    Mesh(MeshInstance),
}

impl Node {
    pub fn as_mesh(&self) -> Option<&MeshInstance> {
        match self {
            Node::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut MeshInstance> {
        match self {
            Node::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// A mesh-less node: a pure transform carrier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pivot {}

impl Pivot {
    pub fn new() -> Self {
        Self {}
    }
}

impl From<Pivot> for Node {
    fn from(value: Pivot) -> Node {
        Node::Pivot(value)
    }
}
