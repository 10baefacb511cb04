pub mod model;
pub mod scene;

pub use self::model::{Mesh, Model, Vertex};
