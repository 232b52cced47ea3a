//! Document Model - templates, elements, geometry and selection
//!
//! This crate provides the foundational model for the template designer:
//! percent-space geometry with a right-anchored x axis, the element and
//! template records exchanged with storage, and the selection set owned by an
//! authoring session.

mod element;
mod element_id;
mod error;
pub mod geometry;
mod selection;
mod template;

pub use element::*;
pub use element_id::*;
pub use error::*;
pub use geometry::*;
pub use selection::*;
pub use template::*;
