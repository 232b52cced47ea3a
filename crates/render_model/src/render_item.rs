//! Render tree types

use doc_model::{ElementId, FontStyle, FontWeight, TextAlign};
use serde::{Deserialize, Serialize};

/// A4 at 300 DPI
pub const A4_EXPORT_WIDTH_PX: f64 = 2480.0;
pub const A4_EXPORT_HEIGHT_PX: f64 = 3508.0;

/// Line height multiplier applied to rendered text
pub const LINE_HEIGHT: f64 = 1.5;

/// Shown instead of a report when no template is chosen
pub const NO_TEMPLATE_MESSAGE: &str = "الرجاء اختيار قالب لعرض التقرير.";

/// Pixel dimensions of a render canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const A4_EXPORT: CanvasSize = CanvasSize::new(A4_EXPORT_WIDTH_PX, A4_EXPORT_HEIGHT_PX);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// On-screen preview: authored font sizes are used as-is
    Preview,
    /// High-resolution export: font sizes scale to the export canvas
    Export,
}

/// Where a tree is rendered to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderTarget {
    pub mode: RenderMode,
    pub canvas: CanvasSize,
}

impl RenderTarget {
    pub fn preview(width: f64, height: f64) -> Self {
        Self { mode: RenderMode::Preview, canvas: CanvasSize::new(width, height) }
    }

    pub fn export(canvas: CanvasSize) -> Self {
        Self { mode: RenderMode::Export, canvas }
    }

    /// Export to an A4 page at 300 DPI
    pub fn export_a4() -> Self {
        Self::export(CanvasSize::A4_EXPORT)
    }

    pub fn validate(&self) -> crate::Result<()> {
        let CanvasSize { width, height } = self.canvas;
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(crate::RenderError::InvalidCanvas { width, height })
        }
    }
}

/// Placement in percent of the canvas, x measured from the right edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentBox {
    pub right: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Placement in canvas pixels, x measured from the left edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    /// Keep authored spaces and newlines, wrap at the box edge
    PreWrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowWrap {
    /// Break inside a word when it does not fit a line on its own
    BreakWord,
}

/// Text style with every default filled in and font size in canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTextStyle {
    pub font_size_px: f64,
    /// `None` means the host default family
    pub font_family: Option<String>,
    pub color: String,
    pub text_align: TextAlign,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub line_height: f64,
    pub white_space: WhiteSpace,
    pub overflow_wrap: OverflowWrap,
}

impl ResolvedTextStyle {
    /// Height of one rendered line in pixels
    pub fn line_height_px(&self) -> f64 {
        self.font_size_px * self.line_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFit {
    /// Preserve aspect ratio, fit entirely inside the box
    Contain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeContent {
    Text { text: String, style: ResolvedTextStyle },
    Image { source: String, fit: ImageFit },
}

/// One positioned element of a rendered report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: ElementId,
    /// Placement as designed
    pub frame: PercentBox,
    /// Absolute top in pixels, replacing `frame.top` once set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_override_px: Option<f64>,
    /// Absolute height in pixels, replacing `frame.height` once set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_override_px: Option<f64>,
    pub content: NodeContent,
}

impl RenderNode {
    /// Designed top edge in percent, before any shift
    pub fn original_top_percent(&self) -> f64 {
        self.frame.top
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, NodeContent::Text { .. })
    }

    /// Text and style of a text node
    pub fn text(&self) -> Option<(&str, &ResolvedTextStyle)> {
        match &self.content {
            NodeContent::Text { text, style } => Some((text, style)),
            NodeContent::Image { .. } => None,
        }
    }

    pub fn width_px(&self, canvas: CanvasSize) -> f64 {
        self.frame.width * canvas.width / 100.0
    }

    pub fn top_px(&self, canvas: CanvasSize) -> f64 {
        self.top_override_px.unwrap_or(self.frame.top * canvas.height / 100.0)
    }

    pub fn height_px(&self, canvas: CanvasSize) -> f64 {
        self.height_override_px.unwrap_or(self.frame.height * canvas.height / 100.0)
    }

    /// Final placement in canvas pixels, overrides applied
    pub fn pixel_rect(&self, canvas: CanvasSize) -> PixelRect {
        let width = self.width_px(canvas);
        PixelRect {
            left: canvas.width - self.frame.right * canvas.width / 100.0 - width,
            top: self.top_px(canvas),
            width,
            height: self.height_px(canvas),
        }
    }
}

/// A rendered report: nodes in template z-order over a sized canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub target: RenderTarget,
    pub nodes: Vec<RenderNode>,
    /// Neutral message shown instead of nodes (no template chosen)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RenderTree {
    pub fn canvas(&self) -> CanvasSize {
        self.target.canvas
    }

    /// Tree shown when no template is chosen
    pub fn placeholder(target: RenderTarget) -> Self {
        Self { target, nodes: Vec::new(), message: Some(NO_TEMPLATE_MESSAGE.to_string()) }
    }

    pub fn is_placeholder(&self) -> bool {
        self.message.is_some()
    }

    pub fn get(&self, id: &ElementId) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> RenderNode {
        RenderNode {
            id: "n".into(),
            frame: PercentBox { right: 10.0, top: 20.0, width: 50.0, height: 10.0 },
            top_override_px: None,
            height_override_px: None,
            content: NodeContent::Image { source: "x".into(), fit: ImageFit::Contain },
        }
    }

    #[test]
    fn test_pixel_rect_is_left_based() {
        let r = node().pixel_rect(CanvasSize::new(1000.0, 2000.0));
        assert_eq!(r, PixelRect { left: 400.0, top: 400.0, width: 500.0, height: 200.0 });
        assert_eq!(r.bottom(), 600.0);
    }

    #[test]
    fn test_overrides_replace_percent_values() {
        let mut n = node();
        n.top_override_px = Some(450.0);
        n.height_override_px = Some(300.0);
        let r = n.pixel_rect(CanvasSize::new(1000.0, 2000.0));
        assert_eq!((r.top, r.height), (450.0, 300.0));
        assert_eq!(n.original_top_percent(), 20.0);
    }

    #[test]
    fn test_node_json_shape() {
        let json = serde_json::to_value(node()).unwrap();
        assert_eq!(json["content"]["type"], "image");
        assert_eq!(json["content"]["fit"], "contain");
        assert!(json.get("topOverridePx").is_none());
    }

    #[test]
    fn test_target_validation() {
        assert!(RenderTarget::export_a4().validate().is_ok());
        assert!(RenderTarget::preview(0.0, 100.0).validate().is_err());
        assert!(RenderTarget::preview(f64::NAN, 100.0).validate().is_err());
    }
}
