use std::io::Cursor;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
}

/// One group of triangles inside a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            vertices: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// An imported mesh asset. Scene nodes reference models through the
/// scene's model table rather than owning them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: Uuid,
    pub name: String,
    meshes: Vec<Mesh>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            meshes: Vec::new(),
        }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.meshes.iter()
    }

    pub fn vertex_count(&self) -> u32 {
        self.meshes.iter().map(|mesh| mesh.vertex_count()).sum()
    }

    /// Mean of all vertex positions, in model space. Zero for an empty
    /// model.
    pub fn centroid(&self) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0usize;

        for mesh in &self.meshes {
            for vertex in &mesh.vertices {
                sum += vertex.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        sum / count as f32
    }

    /// Translates every vertex by `-offset`, moving the model's local
    /// origin to `offset`.
    pub fn rebase(&mut self, offset: Vec3) {
        for mesh in &mut self.meshes {
            for vertex in &mut mesh.vertices {
                vertex.position -= offset;
            }
        }
    }

    /// Imports a Wavefront OBJ. Polygons are triangulated as fans;
    /// missing normals and texcoords get placeholder values.
    pub fn from_obj(data: &[u8]) -> Result<Self, Error> {
        let reader = Cursor::new(data);
        let obj = obj::ObjData::load_buf(reader)?;

        let mut model = Model::new();

        let vertex = |indices: obj::IndexTuple| Vertex {
            position: obj.position[indices.0].into(),
            normal: indices.2.map(|n| obj.normal[n]).unwrap_or([0.0; 3]).into(),
            texcoord: indices.1.map(|t| obj.texture[t]).unwrap_or([0.5; 2]).into(),
        };

        for group in obj.objects.iter().flat_map(|o| o.groups.iter()) {
            let mut mesh = Mesh::new();
            mesh.name = group.name.clone();

            for poly in &group.polys {
                if poly.0.len() < 3 {
                    continue;
                }

                let base = poly.0[0];

                for i in 0..poly.0.len() - 2 {
                    mesh.add_vertex(vertex(base));
                    mesh.add_vertex(vertex(poly.0[i + 1]));
                    mesh.add_vertex(vertex(poly.0[i + 2]));
                }
            }

            model.add_mesh(mesh);
        }

        Ok(model)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("OBJ import error: {0}")]
    Obj(#[from] obj::ObjError),
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_OBJ: &[u8] = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn imports_a_triangle() {
        let model = Model::from_obj(TRIANGLE_OBJ).unwrap();

        assert_eq!(model.vertex_count(), 3);
    }

    #[test]
    fn triangulates_polygons_as_fans() {
        let quad = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let model = Model::from_obj(quad).unwrap();

        assert_eq!(model.vertex_count(), 6);
    }

    #[test]
    fn rejects_malformed_data() {
        assert!(Model::from_obj(b"v one two three\nf 1 2 3\n").is_err());
    }

    #[test]
    fn centroid_is_the_vertex_mean() {
        let model = Model::from_obj(TRIANGLE_OBJ).unwrap();
        let expected = Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0);

        assert!((model.centroid() - expected).length() < 1e-6);
    }

    #[test]
    fn rebase_moves_the_centroid_to_zero() {
        let mut model = Model::from_obj(TRIANGLE_OBJ).unwrap();

        model.rebase(model.centroid());

        assert!(model.centroid().length() < 1e-6);
    }

    #[test]
    fn empty_model_centroid_is_zero() {
        let model = Model::new();

        assert_eq!(model.centroid(), Vec3::ZERO);
    }
}
