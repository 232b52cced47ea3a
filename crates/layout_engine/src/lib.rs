//! Layout Engine - text measurement and overflow reflow
//!
//! This crate measures rendered text and applies the single reflow pass
//! that grows overflowing text boxes and pushes later content down before a
//! render tree is exported.

mod measure;
mod reflow;

pub use measure::*;
pub use reflow::*;
