//! Error types for template model operations

use crate::ElementId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocModelError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Duplicate element id: {0}")]
    DuplicateElement(ElementId),

    #[error("Element id is empty")]
    EmptyElementId,

    #[error("Index {index} out of bounds for {len} elements")]
    InvalidIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, DocModelError>;
