//! The boundary to the external printer / rasterizer

use crate::{ExportError, Result};
use layout_engine::ReflowedTree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Hand the page to a native print dialog
    Print,
    /// Capture the page into a document file
    Pdf,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "print" => Ok(Self::Print),
            "pdf" => Ok(Self::Pdf),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// What an export produced
#[derive(Debug, Clone, PartialEq)]
pub enum ExportArtifact {
    /// The page went to the printer
    Printed { nodes: usize },
    /// A captured document
    Document { file_name: String, bytes: Vec<u8> },
}

/// Receives a reflowed page. Implementations own capture and printing.
pub trait ExportSink: Send + Sync {
    fn print(&self, page: &ReflowedTree) -> Result<()>;

    /// Capture the page as document bytes
    fn capture(&self, page: &ReflowedTree) -> Result<Vec<u8>>;
}

/// Reference sink: "prints" by logging and captures the page as pretty JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl ExportSink for JsonSink {
    fn print(&self, page: &ReflowedTree) -> Result<()> {
        tracing::info!(nodes = page.tree().nodes.len(), "page sent to printer");
        Ok(())
    }

    fn capture(&self, page: &ReflowedTree) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(page)?)
    }
}
