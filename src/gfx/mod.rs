//! # Graphics Module
//!
//! Everything between a scene file on disk and pixels on the surface.
//!
//! ## Architecture Overview
//!
//! - **Scene import** ([`scene`]) - loaders, flattening and GPU meshes
//! - **Materials** ([`material`]) - name classification and variant selectors
//! - **Shading** ([`shading`]) - the pattern table, its WGSL and a CPU reference
//! - **Rendering** ([`rendering`]) - surface, pipeline and the per-frame pass
//! - **Resources** ([`resources`]) - uniform layouts and bind groups
//! - **Camera** ([`camera`]) - orbit camera driven by mouse input
//!
//! ## Usage
//!
//! The graphics system is driven by [`ViewerApp`]:
//!
//! ```no_run
//! use chessview::{ViewerApp, ViewerConfig};
//!
//! let config = ViewerConfig::default().with_asset_path("assets/chessboard.glb");
//! ViewerApp::new(config).run().unwrap();
//! ```
//!
//! [`ViewerApp`]: crate::app::ViewerApp

pub mod camera;
pub mod material;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shading;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
