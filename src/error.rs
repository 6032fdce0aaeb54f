//! Error types for scene loading and import
//!
//! Everything that can go wrong between reading an asset file and owning a
//! flat list of drawable meshes ends up in [`SceneError`]. Rendering itself
//! has no error path: an unclassified mesh degrades to the diagnostic colour
//! in the shader instead of failing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or importing a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The in-memory scene graph violates a structural rule.
    #[error("malformed scene: {0}")]
    MalformedScene(#[from] Malformed),

    /// The asset file could not be read or parsed.
    #[error("failed to load scene file {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No loader is registered for the file extension.
    #[error("unsupported scene format: {0:?}")]
    UnsupportedFormat(PathBuf),
}

impl SceneError {
    pub(crate) fn load(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SceneError::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Returns the structural fault if this is a malformed-scene error.
    pub fn malformed(&self) -> Option<&Malformed> {
        match self {
            SceneError::MalformedScene(kind) => Some(kind),
            _ => None,
        }
    }
}

/// The specific structural fault behind [`SceneError::MalformedScene`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("scene has no root node")]
    MissingRoot,

    #[error("node hierarchy is deeper than {limit} levels (cyclic or runaway graph)")]
    DepthExceeded { limit: usize },

    #[error("primitive '{primitive}' references material {index} but the table holds {len}")]
    MaterialOutOfBounds {
        primitive: String,
        index: usize,
        len: usize,
    },

    #[error("primitive '{primitive}' references vertex {index} but only has {vertex_count}")]
    IndexOutOfRange {
        primitive: String,
        index: u32,
        vertex_count: usize,
    },

    #[error("primitive '{primitive}' has {index_count} indices, not a whole number of triangles")]
    IncompleteTriangle {
        primitive: String,
        index_count: usize,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;
