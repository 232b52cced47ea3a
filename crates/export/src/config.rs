//! Export settings

use render_model::{CanvasSize, RenderTarget, A4_EXPORT_HEIGHT_PX, A4_EXPORT_WIDTH_PX};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    pub canvas_width_px: f64,
    pub canvas_height_px: f64,
    /// Wait before capture so fonts and layout settle
    pub settle_delay_ms: u64,
    /// Name given to exported documents
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            canvas_width_px: A4_EXPORT_WIDTH_PX,
            canvas_height_px: A4_EXPORT_HEIGHT_PX,
            settle_delay_ms: 500,
            file_name: "report.pdf".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn target(&self) -> RenderTarget {
        RenderTarget::export(CanvasSize::new(self.canvas_width_px, self.canvas_height_px))
    }
}
