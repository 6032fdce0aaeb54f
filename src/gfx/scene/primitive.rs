//! Flat, classified primitive groups produced by the importer

use super::vertex::Vertex3D;
use crate::gfx::material::Classification;

/// Read access shared by CPU-side primitive groups and uploaded meshes.
///
/// The scene model and the UI only need these three facts about a draw unit,
/// which lets the render order be exercised without a GPU.
pub trait MeshResource {
    fn classification(&self) -> Classification;
    fn index_count(&self) -> u32;
    fn vertex_count(&self) -> u32;

    fn triangle_count(&self) -> u32 {
        self.index_count() / 3
    }
}

/// One independently drawable unit: interleaved vertices, a triangle index
/// list and the classification resolved at import.
///
/// Every index is smaller than `vertices.len()` and `indices.len()` is a
/// multiple of three; the importer rejects source data that breaks either.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveGroup {
    pub name: String,
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
    pub classification: Classification,
}

impl PrimitiveGroup {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex3D>,
        indices: Vec<u32>,
        classification: Classification,
    ) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            classification,
        }
    }
}

impl MeshResource for PrimitiveGroup {
    fn classification(&self) -> Classification {
        self.classification
    }

    fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}
