//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Placeholder substitution unavailable: {0}")]
    Merge(#[from] mail_merge::MailMergeError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
