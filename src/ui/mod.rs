//! # User interface
//!
//! Dear ImGui overlay drawn on top of the scene each frame.
//!
//! - [`UiManager`] - imgui context, winit input and wgpu rendering
//! - [`panel`] - the material selector and the controls help overlay
//!
//! Input the overlay captures never reaches the orbit camera.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{controls_overlay, material_selector_panel, SelectorAction};
