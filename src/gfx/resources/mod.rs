// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Uniform bindings for the frame (group 0) and for each draw (group 1),
//! plus the depth buffer.

pub mod draw_bindings;
pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use draw_bindings::{DrawBindings, DrawUniforms};
pub use global_bindings::{FrameUBO, FrameUniform, GlobalBindings};
pub use texture_resource::TextureResource;
