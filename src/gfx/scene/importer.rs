//! Scene graph → flat primitive groups
//!
//! [`SceneImporter::import`] walks the node hierarchy depth-first in
//! pre-order: a node's own primitives in declaration order, then each child
//! subtree in declaration order. Every primitive becomes one
//! [`PrimitiveGroup`] whose classification is resolved here, once, from the
//! name of the material it references.

use log::{debug, info, warn};

use super::{
    graph::{SceneGraph, SceneNode, SourceMaterial, SourcePrimitive},
    model::SceneModel,
    primitive::PrimitiveGroup,
    vertex::Vertex3D,
};
use crate::{
    error::{Malformed, SceneResult},
    gfx::material::classify,
};

/// Tunables for [`SceneImporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Deepest node level accepted below the root (the root is level 0)
    pub max_depth: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl ImportOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneImporter {
    options: ImportOptions,
}

impl SceneImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ImportOptions {
        self.options
    }

    /// Flattens `graph` into classified primitive groups.
    ///
    /// The graph is only read, so importing the same graph twice yields
    /// identical results.
    ///
    /// # Errors
    /// [`SceneError::MalformedScene`](crate::error::SceneError::MalformedScene)
    /// if the graph has no root, nests deeper than
    /// [`ImportOptions::max_depth`], or contains a primitive with an invalid
    /// material or index reference.
    pub fn import(&self, graph: &SceneGraph) -> SceneResult<Vec<PrimitiveGroup>> {
        let root = graph.root.as_ref().ok_or(Malformed::MissingRoot)?;

        let mut groups = Vec::with_capacity(graph.primitive_count());
        self.visit(root, &graph.materials, 0, &mut groups)?;

        if groups.is_empty() {
            warn!("Scene '{}' contains no primitives", root.name);
        }
        info!(
            "Imported {} primitive groups ({} triangles) from scene '{}'",
            groups.len(),
            groups.iter().map(|g| g.indices.len() / 3).sum::<usize>(),
            root.name
        );
        Ok(groups)
    }

    /// Imports `graph` and uploads every group to the GPU.
    pub fn import_model(&self, device: &wgpu::Device, graph: &SceneGraph) -> SceneResult<SceneModel> {
        let groups = self.import(graph)?;
        Ok(SceneModel::upload(device, groups))
    }

    fn visit(
        &self,
        node: &SceneNode,
        materials: &[SourceMaterial],
        depth: usize,
        out: &mut Vec<PrimitiveGroup>,
    ) -> SceneResult<()> {
        if depth > self.options.max_depth {
            return Err(Malformed::DepthExceeded {
                limit: self.options.max_depth,
            }
            .into());
        }

        for primitive in &node.primitives {
            out.push(convert_primitive(primitive, materials)?);
        }

        for child in &node.children {
            self.visit(child, materials, depth + 1, out)?;
        }

        Ok(())
    }
}

/// Converts one source primitive into a [`PrimitiveGroup`].
///
/// Missing normals become the zero vector and missing texture coordinates
/// become `(0, 0)`; indices are every face's index list concatenated in
/// order.
pub fn convert_primitive(
    primitive: &SourcePrimitive,
    materials: &[SourceMaterial],
) -> SceneResult<PrimitiveGroup> {
    let material = materials
        .get(primitive.material_index)
        .ok_or_else(|| Malformed::MaterialOutOfBounds {
            primitive: primitive.name.clone(),
            index: primitive.material_index,
            len: materials.len(),
        })?;

    let vertices: Vec<Vertex3D> = primitive
        .positions
        .iter()
        .enumerate()
        .map(|(i, &position)| Vertex3D {
            position,
            normal: attribute(primitive.normals.as_deref(), i),
            tex_coords: attribute(primitive.tex_coords.as_deref(), i),
        })
        .collect();

    let indices: Vec<u32> = primitive.faces.iter().flatten().copied().collect();

    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
        return Err(Malformed::IndexOutOfRange {
            primitive: primitive.name.clone(),
            index,
            vertex_count: vertices.len(),
        }
        .into());
    }
    if indices.len() % 3 != 0 {
        return Err(Malformed::IncompleteTriangle {
            primitive: primitive.name.clone(),
            index_count: indices.len(),
        }
        .into());
    }

    let classification = classify(&material.name);
    debug!(
        "Primitive '{}' uses material '{}' -> class {}",
        primitive.name,
        material.name,
        classification.id()
    );

    Ok(PrimitiveGroup::new(
        primitive.name.clone(),
        vertices,
        indices,
        classification,
    ))
}

fn attribute<T: Copy + Default>(values: Option<&[T]>, index: usize) -> T {
    values
        .and_then(|values| values.get(index))
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::SceneError,
        gfx::material::{Classification, MaterialFamily},
    };

    fn quad(name: &str, material_index: usize) -> SourcePrimitive {
        SourcePrimitive {
            name: name.to_string(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            faces: vec![vec![0, 1, 2], vec![0, 2, 3]],
            material_index,
            ..Default::default()
        }
    }

    fn materials(names: &[&str]) -> Vec<SourceMaterial> {
        names.iter().map(|&n| SourceMaterial::new(n)).collect()
    }

    fn names(groups: &[PrimitiveGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_classifies_groups_in_node_order() {
        let root = SceneNode::new("root")
            .with_primitive(quad("king", 0))
            .with_primitive(quad("queen", 1));
        let graph = SceneGraph::new(root, materials(&["MarmoBianco", "LegnoNero"]));

        let groups = SceneImporter::default().import(&graph).unwrap();
        let ids: Vec<i32> = groups.iter().map(|g| g.classification.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_faces_are_concatenated_in_order() {
        let graph = SceneGraph::new(
            SceneNode::new("root").with_primitive(quad("square", 0)),
            materials(&["CaselleBianche"]),
        );

        let groups = SceneImporter::default().import(&graph).unwrap();
        assert_eq!(groups[0].indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(
            groups[0].classification,
            Classification::Family(MaterialFamily::WhiteSquares)
        );
    }

    #[test]
    fn test_flattening_is_preorder() {
        let root = SceneNode::new("root")
            .with_primitive(quad("a", 0))
            .with_child(
                SceneNode::new("left")
                    .with_primitive(quad("b", 0))
                    .with_child(SceneNode::new("leaf").with_primitive(quad("c", 0))),
            )
            .with_child(SceneNode::new("right").with_primitive(quad("d", 0)));
        let graph = SceneGraph::new(root, materials(&["Legno"]));

        let groups = SceneImporter::default().import(&graph).unwrap();
        assert_eq!(names(&groups), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_missing_attributes_default_to_zero() {
        let graph = SceneGraph::new(
            SceneNode::new("root").with_primitive(quad("bare", 0)),
            materials(&["Anything"]),
        );

        let groups = SceneImporter::default().import(&graph).unwrap();
        for vertex in &groups[0].vertices {
            assert_eq!(vertex.normal, [0.0; 3]);
            assert_eq!(vertex.tex_coords, [0.0; 2]);
        }
        assert_eq!(groups[0].classification, Classification::Unclassified);
    }

    #[test]
    fn test_declared_attributes_are_copied() {
        let mut primitive = quad("lit", 0);
        primitive.normals = Some(vec![[0.0, 0.0, 1.0]; 4]);
        primitive.tex_coords = Some(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let graph = SceneGraph::new(
            SceneNode::new("root").with_primitive(primitive),
            materials(&["Nero"]),
        );

        let groups = SceneImporter::default().import(&graph).unwrap();
        assert_eq!(groups[0].vertices[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(groups[0].vertices[2].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn test_empty_scene_imports_to_nothing() {
        let graph = SceneGraph::new(SceneNode::new("root"), Vec::new());
        let groups = SceneImporter::default().import(&graph).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_missing_root_is_malformed() {
        let err = SceneImporter::default()
            .import(&SceneGraph::default())
            .unwrap_err();
        assert_eq!(err.malformed(), Some(&Malformed::MissingRoot));
    }

    #[test]
    fn test_material_out_of_bounds_is_malformed() {
        let graph = SceneGraph::new(
            SceneNode::new("root").with_primitive(quad("rook", 3)),
            materials(&["Bianco"]),
        );

        let err = SceneImporter::default().import(&graph).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MalformedScene(Malformed::MaterialOutOfBounds {
                index: 3,
                len: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_depth_guard_rejects_deep_chains() {
        let mut node = SceneNode::new("leaf").with_primitive(quad("p", 0));
        for level in 0..4 {
            node = SceneNode::new(format!("level{level}")).with_child(node);
        }
        let graph = SceneGraph::new(node, materials(&["Legno"]));

        let shallow = SceneImporter::new(ImportOptions::default().with_max_depth(3));
        assert_eq!(
            shallow.import(&graph).unwrap_err().malformed(),
            Some(&Malformed::DepthExceeded { limit: 3 })
        );

        let deep_enough = SceneImporter::new(ImportOptions::default().with_max_depth(4));
        assert_eq!(deep_enough.import(&graph).unwrap().len(), 1);
    }

    #[test]
    fn test_out_of_range_index_is_malformed() {
        let mut primitive = quad("broken", 0);
        primitive.faces.push(vec![0, 1, 9]);
        let graph = SceneGraph::new(
            SceneNode::new("root").with_primitive(primitive),
            materials(&["Bianco"]),
        );

        let err = SceneImporter::default().import(&graph).unwrap_err();
        assert!(matches!(
            err.malformed(),
            Some(Malformed::IndexOutOfRange {
                index: 9,
                vertex_count: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_partial_triangle_is_malformed() {
        let mut primitive = quad("ragged", 0);
        primitive.faces.push(vec![1, 2]);
        let graph = SceneGraph::new(
            SceneNode::new("root").with_primitive(primitive),
            materials(&["Bianco"]),
        );

        let err = SceneImporter::default().import(&graph).unwrap_err();
        assert!(matches!(
            err.malformed(),
            Some(Malformed::IncompleteTriangle { index_count: 8, .. })
        ));
    }

    #[test]
    fn test_import_is_idempotent() {
        let root = SceneNode::new("root")
            .with_primitive(quad("a", 1))
            .with_child(SceneNode::new("child").with_primitive(quad("b", 0)));
        let graph = SceneGraph::new(root, materials(&["CaselleNere", "Bianco"]));

        let importer = SceneImporter::default();
        assert_eq!(importer.import(&graph).unwrap(), importer.import(&graph).unwrap());
    }
}
