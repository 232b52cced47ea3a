//! Render Model - template rendering
//!
//! This crate turns a template and a report data snapshot into a render
//! tree: positioned text and image nodes over a preview or export canvas,
//! with placeholders substituted and font sizes scaled to the target.

mod engine;
mod error;
mod render_item;

pub use engine::*;
pub use error::*;
pub use render_item::*;
