//! Designer tuning knobs

use serde::{Deserialize, Serialize};

/// A4 width at 96 DPI (210 mm x 3.78 px/mm)
pub const A4_WIDTH_PX_96DPI: f64 = 210.0 * 3.78;

/// Settings for an authoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Distance in pixels within which a press grabs a resize handle
    pub handle_radius_px: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Design width stamped on a template when the canvas was never laid out
    pub fallback_canvas_width_px: f64,
    /// Maximum number of undo entries kept
    pub undo_depth: usize,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            handle_radius_px: 6.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            fallback_canvas_width_px: A4_WIDTH_PX_96DPI,
            undo_depth: 100,
        }
    }
}
