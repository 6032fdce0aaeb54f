//! glTF 2.0 loading through `gltf`
//!
//! Only geometry and material names are read. Images are never decoded and
//! node transforms are ignored.

use std::path::Path;

use log::warn;

use super::{calculate_smooth_normals, scene_name, DEFAULT_MATERIAL_NAME};
use crate::{
    error::{Malformed, SceneError, SceneResult},
    gfx::scene::graph::{SceneGraph, SceneNode, SourceMaterial, SourcePrimitive},
};

/// Node nesting beyond this is treated as a cycle.
pub const MAX_NODE_DEPTH: usize = 1024;

pub fn load(path: &Path) -> SceneResult<SceneGraph> {
    let gltf = gltf::Gltf::open(path).map_err(|e| SceneError::load(path, e))?;
    let buffers = gltf::import_buffers(&gltf.document, path.parent(), gltf.blob.clone())
        .map_err(|e| SceneError::load(path, e))?;

    graph_from_document(&gltf.document, &buffers, &scene_name(path))
}

/// Parses an in-memory `.gltf` or `.glb`. External buffer URIs are not
/// resolved; embedded and data-URI buffers are.
pub fn load_slice(bytes: &[u8], name: &str) -> SceneResult<SceneGraph> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| SceneError::load(name, e))?;
    let buffers = gltf::import_buffers(&gltf.document, None, gltf.blob.clone())
        .map_err(|e| SceneError::load(name, e))?;

    graph_from_document(&gltf.document, &buffers, name)
}

/// Converts the default scene (or the first one) under a synthetic root
/// holding every scene root node as a child.
pub fn graph_from_document(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    fallback_name: &str,
) -> SceneResult<SceneGraph> {
    let mut materials: Vec<SourceMaterial> = document
        .materials()
        .map(|material| {
            let index = material.index().unwrap_or_default();
            SourceMaterial::new(
                material
                    .name()
                    .map_or_else(|| format!("material_{}", index), str::to_string),
            )
        })
        .collect();

    let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) else {
        warn!("glTF document has no scenes");
        return Ok(SceneGraph {
            root: None,
            materials,
        });
    };

    let mut builder = GraphBuilder {
        buffers,
        default_material: None,
        materials: &mut materials,
    };

    let mut root = SceneNode::new(scene.name().unwrap_or(fallback_name));
    for node in scene.nodes() {
        root.children.push(builder.convert_node(&node, 1)?);
    }

    Ok(SceneGraph::new(root, materials))
}

struct GraphBuilder<'a> {
    buffers: &'a [gltf::buffer::Data],
    materials: &'a mut Vec<SourceMaterial>,
    default_material: Option<usize>,
}

impl GraphBuilder<'_> {
    fn convert_node(&mut self, node: &gltf::Node, depth: usize) -> SceneResult<SceneNode> {
        if depth > MAX_NODE_DEPTH {
            return Err(Malformed::DepthExceeded {
                limit: MAX_NODE_DEPTH,
            }
            .into());
        }

        let name = node
            .name()
            .map_or_else(|| format!("node_{}", node.index()), str::to_string);
        let mut scene_node = SceneNode::new(name);

        if let Some(mesh) = node.mesh() {
            let mesh_name = mesh
                .name()
                .map_or_else(|| format!("mesh_{}", mesh.index()), str::to_string);
            for primitive in mesh.primitives() {
                let primitive_name = format!("{}.{}", mesh_name, primitive.index());
                if let Some(source) = self.convert_primitive(&primitive, primitive_name) {
                    scene_node.primitives.push(source);
                }
            }
        }

        for child in node.children() {
            scene_node.children.push(self.convert_node(&child, depth + 1)?);
        }

        Ok(scene_node)
    }

    fn convert_primitive(
        &mut self,
        primitive: &gltf::Primitive,
        name: String,
    ) -> Option<SourcePrimitive> {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            warn!("Skipping primitive '{}': mode {:?} is not triangles", name, primitive.mode());
            return None;
        }

        let buffers = self.buffers;
        let reader = primitive.reader(move |buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

        let Some(positions) = reader.read_positions() else {
            warn!("Skipping primitive '{}': no POSITION attribute", name);
            return None;
        };
        let positions: Vec<[f32; 3]> = positions.collect();

        let tex_coords = reader
            .read_tex_coords(0)
            .map(|coords| coords.into_f32().collect());

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let normals = match reader.read_normals() {
            Some(normals) => normals.collect(),
            None => calculate_smooth_normals(&positions, &indices),
        };

        let material_index = match primitive.material().index() {
            Some(index) => index,
            None => self.default_material_index(),
        };

        Some(SourcePrimitive {
            name,
            positions,
            normals: Some(normals),
            tex_coords,
            faces: indices.chunks(3).map(<[u32]>::to_vec).collect(),
            material_index,
        })
    }

    fn default_material_index(&mut self) -> usize {
        *self.default_material.get_or_insert_with(|| {
            self.materials.push(SourceMaterial::new(DEFAULT_MATERIAL_NAME));
            self.materials.len() - 1
        })
    }
}
