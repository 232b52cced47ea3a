//! Error types for report export

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No template selected")]
    NoTemplateSelected,

    #[error("An export is already in progress")]
    Busy,

    #[error("Render failed: {0}")]
    Render(#[from] render_model::RenderError),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Export sink failed: {0}")]
    Sink(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
