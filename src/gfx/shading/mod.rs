//! # Material shading stage
//!
//! - [`table`] - family → pattern entries with their constants
//! - [`noise`] - lattice noise and fractal sums used by the patterns
//! - [`reference`] - CPU evaluation of the per-fragment shading function
//! - [`wgsl`] - shader source, with dispatch generated from the table

pub mod noise;
pub mod reference;
pub mod table;
pub mod wgsl;

pub use reference::{shade_fragment, FragmentInput};
pub use table::{MaterialTable, Pattern};
pub use wgsl::shader_source;
