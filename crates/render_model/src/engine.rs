//! Template + report data -> render tree

use crate::{
    ImageFit, NodeContent, OverflowWrap, PercentBox, RenderMode, RenderNode, RenderTarget, RenderTree,
    ResolvedTextStyle, Result, WhiteSpace, LINE_HEIGHT,
};
use doc_model::{ElementKind, Template, TemplateElement};
use mail_merge::{MergeEngine, ReportData};

/// Default text color when an element carries none
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Builds render trees. Never mutates the template it is given.
#[derive(Debug, Clone)]
pub struct RenderEngine {
    merge: MergeEngine,
}

impl RenderEngine {
    pub fn new() -> Result<Self> {
        Ok(Self { merge: MergeEngine::new()? })
    }

    /// Render `template` against `data` onto `target`.
    ///
    /// A missing template yields a placeholder tree, not an error.
    pub fn render(&self, template: Option<&Template>, data: &ReportData, target: &RenderTarget) -> Result<RenderTree> {
        target.validate()?;
        let Some(template) = template else {
            return Ok(RenderTree::placeholder(*target));
        };

        let scale = font_scale(template, target);
        let nodes = template.elements().iter().map(|el| self.render_element(el, data, scale)).collect();

        Ok(RenderTree { target: *target, nodes, message: None })
    }

    fn render_element(&self, element: &TemplateElement, data: &ReportData, scale: f64) -> RenderNode {
        let content = match element.kind {
            ElementKind::Text => NodeContent::Text {
                text: self.merge.substitute(&element.content, data),
                style: resolve_style(element, scale),
            },
            ElementKind::Image => NodeContent::Image { source: element.content.clone(), fit: ImageFit::Contain },
        };

        RenderNode {
            id: element.id.clone(),
            frame: PercentBox {
                right: element.position.x,
                top: element.position.y,
                width: element.width,
                height: element.height,
            },
            top_override_px: None,
            height_override_px: None,
            content,
        }
    }
}

/// Font scale for `target`: export canvas width over the authored design
/// width, or 1 in preview mode and when the design width is unknown
pub fn font_scale(template: &Template, target: &RenderTarget) -> f64 {
    match (target.mode, template.design_canvas_width_px) {
        (RenderMode::Export, Some(design)) if design.is_finite() && design > 0.0 => target.canvas.width / design,
        _ => 1.0,
    }
}

fn resolve_style(element: &TemplateElement, scale: f64) -> ResolvedTextStyle {
    let style = &element.style;
    ResolvedTextStyle {
        font_size_px: element.font_size() * scale,
        font_family: style.font_family.clone().filter(|family| !family.is_empty()),
        color: style.color.clone().unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
        text_align: style.text_align.unwrap_or_default(),
        font_weight: style.font_weight.unwrap_or_default(),
        font_style: style.font_style.unwrap_or_default(),
        line_height: LINE_HEIGHT,
        white_space: WhiteSpace::PreWrap,
        overflow_wrap: OverflowWrap::BreakWord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanvasSize, NO_TEMPLATE_MESSAGE};
    use doc_model::{ElementPatch, Rect, TextAlign};

    fn template(design_width: Option<f64>) -> Template {
        let mut t = Template::with_id("t1", "report");
        t.insert(
            TemplateElement::new(ElementKind::Text, "مريض: {{patientName}} بتاريخ {{date}}")
                .with_id("title")
                .with_rect(Rect::new(10.0, 10.0, 50.0, 10.0)),
            None,
        )
        .unwrap();
        t.insert(
            TemplateElement::new(ElementKind::Image, "data:image/png;base64,AAAA")
                .with_id("logo")
                .with_rect(Rect::new(70.0, 2.0, 20.0, 8.0)),
            None,
        )
        .unwrap();
        t.design_canvas_width_px = design_width;
        t
    }

    fn data() -> ReportData {
        ReportData::default().with_date("2024-01-01").unwrap()
    }

    #[test]
    fn test_substitutes_text_and_passes_images() {
        let engine = RenderEngine::new().unwrap();
        let tree = engine.render(Some(&template(None)), &data(), &RenderTarget::preview(794.0, 1123.0)).unwrap();
        let (text, _) = tree.get(&"title".into()).unwrap().text().unwrap();
        assert_eq!(text, "مريض: غير محدد بتاريخ 2024-01-01");
        assert_eq!(
            tree.get(&"logo".into()).unwrap().content,
            NodeContent::Image { source: "data:image/png;base64,AAAA".into(), fit: ImageFit::Contain }
        );
    }

    #[test]
    fn test_export_scales_font_by_design_width() {
        let engine = RenderEngine::new().unwrap();
        let tree = engine.render(Some(&template(Some(620.0))), &data(), &RenderTarget::export_a4()).unwrap();
        let (_, style) = tree.get(&"title".into()).unwrap().text().unwrap();
        assert!((style.font_size_px - 16.0 * 4.0).abs() < 1e-9);
        assert_eq!(style.line_height, LINE_HEIGHT);
        assert!((style.line_height_px() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_preview_keeps_authored_size() {
        let engine = RenderEngine::new().unwrap();
        let tree = engine.render(Some(&template(Some(620.0))), &data(), &RenderTarget::preview(620.0, 877.0)).unwrap();
        let (_, style) = tree.get(&"title".into()).unwrap().text().unwrap();
        assert_eq!(style.font_size_px, 16.0);
    }

    #[test]
    fn test_unknown_design_width_means_unit_scale() {
        let t = template(None);
        assert_eq!(font_scale(&t, &RenderTarget::export_a4()), 1.0);
        let zero = template(Some(0.0));
        assert_eq!(font_scale(&zero, &RenderTarget::export_a4()), 1.0);
    }

    #[test]
    fn test_missing_font_size_defaults_before_scaling() {
        let mut t = template(Some(1240.0));
        let title = t.get(&"title".into()).unwrap().clone();
        let mut bare = title.clone();
        bare.style = Default::default();
        t.replace(bare).unwrap();

        let tree = RenderEngine::new().unwrap().render(Some(&t), &data(), &RenderTarget::export_a4()).unwrap();
        let (_, style) = tree.get(&"title".into()).unwrap().text().unwrap();
        assert!((style.font_size_px - 32.0).abs() < 1e-9);
        assert_eq!(style.text_align, TextAlign::Right);
        assert_eq!(style.color, DEFAULT_TEXT_COLOR);
        assert_eq!(style.font_family, None);
    }

    #[test]
    fn test_no_template_renders_placeholder() {
        let tree = RenderEngine::new().unwrap().render(None, &data(), &RenderTarget::export_a4()).unwrap();
        assert!(tree.nodes.is_empty());
        assert_eq!(tree.message.as_deref(), Some(NO_TEMPLATE_MESSAGE));
        assert_eq!(tree.canvas(), CanvasSize::A4_EXPORT);
    }

    #[test]
    fn test_render_leaves_template_untouched() {
        let mut t = template(Some(800.0));
        t.update(&[doc_model::ElementId::from("title")], &ElementPatch::new().with_font_size(20.0));
        let before = t.clone();
        let _ = RenderEngine::new().unwrap().render(Some(&t), &data(), &RenderTarget::export_a4()).unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn test_invalid_canvas_is_error() {
        let engine = RenderEngine::new().unwrap();
        assert!(engine.render(None, &data(), &RenderTarget::preview(-1.0, 10.0)).is_err());
    }
}
