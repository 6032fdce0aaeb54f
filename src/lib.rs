//! Chessboard viewer
//!
//! Imports a scene file, tags every primitive group with a material family by
//! its material name, and renders it with procedural materials whose variant
//! the user can switch live.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use error::{SceneError, SceneResult};
