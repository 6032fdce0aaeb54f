//! # Scene import pipeline
//!
//! Turns an asset file into an ordered list of GPU meshes, each tagged with
//! the material family its shading is chosen from.
//!
//! ## Key Components
//!
//! - [`loader`] - asset file → [`SceneGraph`] (OBJ and glTF)
//! - [`SceneImporter`] - depth-first flattening and classification
//! - [`PrimitiveGroup`] - one flat, classified draw unit on the CPU
//! - [`GpuMesh`] - the same unit uploaded to the device
//! - [`SceneModel`] - the ordered mesh collection rendered every frame
//! - [`Vertex3D`] - the vertex format shared by all of the above
//!
//! ## Usage
//!
//! ```no_run
//! use chessview::gfx::scene::{loader, ImportOptions, SceneImporter};
//!
//! # fn run(device: &wgpu::Device) -> Result<(), chessview::error::SceneError> {
//! let graph = loader::load_scene("assets/chessboard.glb")?;
//! let model = SceneImporter::new(ImportOptions::default()).import_model(device, &graph)?;
//! println!("{} meshes", model.len());
//! # Ok(())
//! # }
//! ```

pub mod graph;
pub mod importer;
pub mod loader;
pub mod mesh;
pub mod model;
pub mod primitive;
pub mod vertex;

// Re-export main types
pub use graph::{SceneGraph, SceneNode, SourceMaterial, SourcePrimitive};
pub use importer::{convert_primitive, ImportOptions, SceneImporter};
pub use loader::load_scene;
pub use mesh::{DrawMesh, GpuMesh};
pub use model::{FrameState, SceneModel, SceneStatistics, ShadingProgram};
pub use primitive::{MeshResource, PrimitiveGroup};
pub use vertex::Vertex3D;
