//! Asset file → [`SceneGraph`]
//!
//! The loader is picked by file extension:
//!
//! - `.obj` - Wavefront OBJ via `tobj`, one child node per OBJ object
//! - `.gltf`, `.glb` - glTF 2.0 via `gltf`, node hierarchy preserved
//!
//! Loaders only translate file contents; validation happens in the importer.

pub mod gltf_loader;
pub mod obj_loader;

use std::path::Path;

use cgmath::{InnerSpace, Vector3, Zero};
use log::info;

use super::graph::SceneGraph;
use crate::error::{SceneError, SceneResult};

/// Material name used for primitives the file assigns no material to.
pub const DEFAULT_MATERIAL_NAME: &str = "DefaultMaterial";

/// Supported asset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Obj,
    Gltf,
}

impl SceneFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "obj" => Some(SceneFormat::Obj),
            "gltf" | "glb" => Some(SceneFormat::Gltf),
            _ => None,
        }
    }
}

/// Reads and parses the scene file at `path`.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneGraph> {
    let path = path.as_ref();
    let format =
        SceneFormat::from_path(path).ok_or_else(|| SceneError::UnsupportedFormat(path.to_path_buf()))?;

    info!("Loading {:?} scene from {}", format, path.display());
    match format {
        SceneFormat::Obj => obj_loader::load(path),
        SceneFormat::Gltf => gltf_loader::load(path),
    }
}

/// Name for the synthetic root node: the file stem, or `"Scene"`.
pub(crate) fn scene_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("Scene")
        .to_string()
}

/// Area-weighted vertex normals from triangle faces. Vertices that belong to
/// no triangle keep a zero normal; out-of-range indices are skipped and left
/// for the importer to reject.
pub fn calculate_smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vector3::<f32>::zero(); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        if [i0, i1, i2].iter().any(|&i| i >= positions.len()) {
            continue;
        }

        let v0 = Vector3::from(positions[i0]);
        let edge1 = Vector3::from(positions[i1]) - v0;
        let edge2 = Vector3::from(positions[i2]) - v0;
        let face_normal = edge1.cross(edge2);

        for i in [i0, i1, i2] {
            normals[i] += face_normal;
        }
    }

    normals
        .into_iter()
        .map(|n| {
            if n.magnitude2() > 0.0 {
                n.normalize().into()
            } else {
                [0.0; 3]
            }
        })
        .collect()
}
