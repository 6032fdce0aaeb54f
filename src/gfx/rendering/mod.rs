//! Core rendering functionality
//!
//! Handles the render pipeline, the surface and frame rendering.

pub mod pipeline_manager;
pub mod render_engine;
pub mod scene_pass;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
pub use scene_pass::ScenePass;
