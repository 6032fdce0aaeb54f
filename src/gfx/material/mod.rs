//! # Material classification and selection
//!
//! - [`classification`] - import-time naming policy mapping material names to
//!   shading families
//! - [`selector`] - user-adjustable variant selectors and their per-frame
//!   snapshot

pub mod classification;
pub mod selector;

pub use classification::{classify, Classification, MaterialFamily, CLASSIFICATION_RULES};
pub use selector::{VariantSelector, VariantSelectors, VariantSnapshot};
