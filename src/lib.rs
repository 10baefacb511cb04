#![allow(clippy::new_without_default)]

pub mod asset;
pub mod color;
pub mod import;
pub mod ontology;
pub mod scene;

pub use glam as math;
