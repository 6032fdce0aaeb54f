//! In-memory scene graph handed to the importer
//!
//! This is the boundary between asset parsing and the import pipeline: the
//! loaders in [`super::loader`] build a [`SceneGraph`], and the
//! [`SceneImporter`](super::importer::SceneImporter) only ever reads one.
//! Nodes own their children, so a graph built through these types is acyclic
//! by construction; the importer still guards against runaway depth.

/// A parsed scene: a node hierarchy plus the material table it indexes into.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub root: Option<SceneNode>,
    pub materials: Vec<SourceMaterial>,
}

impl SceneGraph {
    pub fn new(root: SceneNode, materials: Vec<SourceMaterial>) -> Self {
        Self {
            root: Some(root),
            materials,
        }
    }

    /// Total number of primitive groups across every node in the graph.
    pub fn primitive_count(&self) -> usize {
        self.root.as_ref().map_or(0, SceneNode::primitive_count)
    }
}

/// One node of the hierarchy.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: String,
    pub primitives: Vec<SourcePrimitive>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_primitive(mut self, primitive: SourcePrimitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    fn primitive_count(&self) -> usize {
        self.primitives.len()
            + self
                .children
                .iter()
                .map(SceneNode::primitive_count)
                .sum::<usize>()
    }
}

/// Raw geometry of one primitive group as the asset file declared it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcePrimitive {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// `None` when the file declares no normals
    pub normals: Option<Vec<[f32; 3]>>,
    /// `None` when the file declares no texture coordinates
    pub tex_coords: Option<Vec<[f32; 2]>>,
    /// Per-face index lists, already triangulated upstream
    pub faces: Vec<Vec<u32>>,
    /// Index into [`SceneGraph::materials`]
    pub material_index: usize,
}

/// A material table entry. Only the name matters to the importer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMaterial {
    pub name: String,
}

impl SourceMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
