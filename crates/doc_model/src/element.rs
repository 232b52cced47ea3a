//! Template element types
//!
//! A template element is an absolutely positioned text or image region on the
//! page canvas. Geometry is stored in right-anchored percent space (see
//! [`crate::geometry`]); text styling is optional and only meaningful for text.

use crate::{ElementId, Point, Rect, MIN_DIMENSION};
use serde::{Deserialize, Serialize};

/// Position given to newly added elements
pub const DEFAULT_POSITION: Point = Point::new(5.0, 5.0);

/// Font size (canvas-design pixels) used when an element has none
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Body of a text element added without initial content ("new text")
pub const DEFAULT_TEXT_CONTENT: &str = "نص جديد";

/// Kind of template element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
}

impl ElementKind {
    /// Default (width, height) in percent for a freshly added element
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Text => (25.0, 5.0),
            Self::Image => (30.0, 10.0),
        }
    }

    /// Whether zoom scales the height together with the width.
    ///
    /// Text boxes keep their authored height; their apparent size is driven
    /// by font size instead.
    pub fn scales_proportionally(self) -> bool {
        matches!(self, Self::Image)
    }

    /// Whether resize may lock the aspect ratio
    pub fn supports_aspect_lock(self) -> bool {
        matches!(self, Self::Image)
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Right,
    Center,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Optional text styling attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in canvas-design pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// CSS-like font family list; empty means the host default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Color as `#RRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
}

impl TextStyle {
    /// Style given to text added from the designer
    pub fn designer_default() -> Self {
        Self {
            font_size: Some(DEFAULT_FONT_SIZE),
            font_family: Some(String::new()),
            text_align: Some(TextAlign::Right),
            color: Some("#000000".to_string()),
            font_weight: Some(FontWeight::Normal),
            font_style: Some(FontStyle::Normal),
        }
    }
}

/// An absolutely positioned region of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateElement {
    pub id: ElementId,
    #[serde(alias = "type")]
    pub kind: ElementKind,
    /// Text body (may contain `{{placeholder}}` tokens) or an opaque image
    /// payload reference such as a data URL
    pub content: String,
    /// Right/top offsets in percent of the canvas
    #[serde(alias = "positionPercent")]
    pub position: Point,
    #[serde(alias = "widthPercent")]
    pub width: f64,
    #[serde(alias = "heightPercent")]
    pub height: f64,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl TemplateElement {
    /// Create an element with default geometry and style for its kind
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        let (width, height) = kind.default_size();
        let style = match kind {
            ElementKind::Text => TextStyle::designer_default(),
            ElementKind::Image => TextStyle::default(),
        };
        Self {
            id: ElementId::new(),
            kind,
            content: content.into(),
            position: DEFAULT_POSITION,
            width,
            height,
            style,
        }
    }

    /// Replace the generated id
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace position and size
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    pub fn is_image(&self) -> bool {
        self.kind == ElementKind::Image
    }

    /// Position and size as a percent-space rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Set position and size, flooring dimensions at [`MIN_DIMENSION`]
    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.clamped();
        self.position = Point::new(rect.x, rect.y);
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Authored font size, or [`DEFAULT_FONT_SIZE`]
    pub fn font_size(&self) -> f64 {
        self.style.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub(crate) fn enforce_floor(&mut self) {
        self.width = self.width.max(MIN_DIMENSION);
        self.height = self.height.max(MIN_DIMENSION);
    }
}

/// A partial update of element attributes; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch, then re-assert the dimension floor
    pub fn apply_to(&self, element: &mut TemplateElement) {
        if let Some(ref content) = self.content {
            element.content = content.clone();
        }
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(width) = self.width {
            element.width = width;
        }
        if let Some(height) = self.height {
            element.height = height;
        }
        if let Some(size) = self.font_size {
            element.style.font_size = Some(size);
        }
        if let Some(ref family) = self.font_family {
            element.style.font_family = Some(family.clone());
        }
        if let Some(align) = self.text_align {
            element.style.text_align = Some(align);
        }
        if let Some(ref color) = self.color {
            element.style.color = Some(color.clone());
        }
        if let Some(weight) = self.font_weight {
            element.style.font_weight = Some(weight);
        }
        if let Some(style) = self.font_style {
            element.style.font_style = Some(style);
        }
        element.enforce_floor();
    }
}
