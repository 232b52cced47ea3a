//! Export pipeline
//!
//! settle delay -> fresh render at the export canvas -> single reflow ->
//! sink. One export runs at a time; further requests are rejected until the
//! running one finishes.

use crate::{BusyFlag, ExportArtifact, ExportConfig, ExportError, ExportFormat, ExportSink, Result};
use doc_model::Template;
use layout_engine::{reflow, HeuristicMeasurer, ReflowedTree, TextMeasurer};
use mail_merge::ReportData;
use render_model::RenderEngine;

pub struct ExportPipeline<S> {
    config: ExportConfig,
    engine: RenderEngine,
    measurer: Box<dyn TextMeasurer + Send + Sync>,
    sink: S,
    busy: BusyFlag,
}

impl<S: ExportSink> ExportPipeline<S> {
    pub fn new(config: ExportConfig, sink: S) -> Result<Self> {
        Ok(Self {
            config,
            engine: RenderEngine::new()?,
            measurer: Box::new(HeuristicMeasurer::default()),
            sink,
            busy: BusyFlag::new(),
        })
    }

    /// Replace the text measurer used by reflow
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + Send + Sync + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Render and reflow `template` for export without handing it to the sink
    pub fn prepare(&self, template: &Template, data: &ReportData) -> Result<ReflowedTree> {
        let tree = self.engine.render(Some(template), data, &self.config.target())?;
        Ok(reflow(tree, self.measurer.as_ref()))
    }

    /// Export `template` rendered against `data`
    pub async fn export(
        &self,
        template: Option<&Template>,
        data: &ReportData,
        format: ExportFormat,
    ) -> Result<ExportArtifact> {
        let template = template.ok_or(ExportError::NoTemplateSelected)?;
        let _busy = self.busy.try_acquire().ok_or_else(|| {
            tracing::warn!("export requested while another is running");
            ExportError::Busy
        })?;

        tracing::info!(template = %template.id, ?format, "export started");
        tokio::time::sleep(self.config.settle_delay()).await;

        let page = self.prepare(template, data)?;
        let artifact = match format {
            ExportFormat::Print => {
                self.sink.print(&page)?;
                ExportArtifact::Printed { nodes: page.tree().nodes.len() }
            }
            ExportFormat::Pdf => ExportArtifact::Document {
                file_name: self.config.file_name.clone(),
                bytes: self.sink.capture(&page)?,
            },
        };

        tracing::info!(
            template = %template.id,
            shift_px = page.report().total_shift_px,
            "export finished"
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonSink;
    use doc_model::{ElementKind, Rect, TemplateElement};
    use std::time::Duration;

    struct FailingSink;

    impl ExportSink for FailingSink {
        fn print(&self, _page: &ReflowedTree) -> Result<()> {
            Err(ExportError::Sink("printer offline".into()))
        }

        fn capture(&self, _page: &ReflowedTree) -> Result<Vec<u8>> {
            Err(ExportError::Sink("capture failed".into()))
        }
    }

    fn template() -> Template {
        let mut t = Template::with_id("t1", "report");
        t.insert(
            TemplateElement::new(ElementKind::Text, "{{patientName}}").with_rect(Rect::new(10.0, 10.0, 50.0, 5.0)),
            None,
        )
        .unwrap();
        t.design_canvas_width_px = Some(620.0);
        t
    }

    fn pipeline() -> ExportPipeline<JsonSink> {
        ExportPipeline::new(ExportConfig::default(), JsonSink).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_template_is_rejected() {
        let p = pipeline();
        let err = p.export(None, &ReportData::default(), ExportFormat::Pdf).await.unwrap_err();
        assert!(matches!(err, ExportError::NoTemplateSelected));
        assert!(!p.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pdf_export_waits_for_settle_delay() {
        let p = pipeline();
        let start = tokio::time::Instant::now();
        let artifact = p.export(Some(&template()), &ReportData::default(), ExportFormat::Pdf).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));

        let ExportArtifact::Document { file_name, bytes } = artifact else {
            panic!("expected a document");
        };
        assert_eq!(file_name, "report.pdf");
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["tree"]["target"]["canvas"]["width"], 2480.0);
        assert!(!p.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_print_reports_node_count() {
        let p = pipeline();
        let artifact = p.export(Some(&template()), &ReportData::default(), ExportFormat::Print).await.unwrap();
        assert_eq!(artifact, ExportArtifact::Printed { nodes: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_request_is_busy() {
        let p = pipeline();
        let t = template();
        let data = ReportData::default();
        let (first, second) = tokio::join!(
            p.export(Some(&t), &data, ExportFormat::Pdf),
            p.export(Some(&t), &data, ExportFormat::Print),
        );
        assert!(first.is_ok());
        assert!(matches!(second, Err(ExportError::Busy)));
        assert!(!p.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_resets_busy() {
        let p = ExportPipeline::new(ExportConfig::default(), FailingSink).unwrap();
        let err = p.export(Some(&template()), &ReportData::default(), ExportFormat::Print).await.unwrap_err();
        assert!(matches!(err, ExportError::Sink(_)));
        assert!(!p.is_busy());
        // a new request is accepted afterwards
        let again = p.export(Some(&template()), &ReportData::default(), ExportFormat::Pdf).await;
        assert!(matches!(again, Err(ExportError::Sink(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_export_resets_busy() {
        let p = pipeline();
        let t = template();
        let data = ReportData::default();
        let timed_out = tokio::time::timeout(
            Duration::from_millis(100),
            p.export(Some(&t), &data, ExportFormat::Pdf),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!p.is_busy());
    }

    #[test]
    fn test_prepare_is_fresh_per_call() {
        let p = pipeline();
        let t = template();
        let data = ReportData::default();
        let first = p.prepare(&t, &data).unwrap();
        let second = p.prepare(&t, &data).unwrap();
        assert_eq!(first, second);
    }
}
