//! Error types for editing operations

use doc_model::ElementId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    #[error("Undo stack is empty")]
    UndoStackEmpty,

    #[error("Redo stack is empty")]
    RedoStackEmpty,

    #[error("Template name is required")]
    MissingTemplateName,

    #[error("Element {0} is not a text element")]
    NotATextElement(ElementId),
}

pub type Result<T> = std::result::Result<T, EditError>;
