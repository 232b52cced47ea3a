//! Report Designer - command line front end
//!
//! Renders a stored template against a report record and writes the laid
//! out page as JSON, or lists what a template contains.
//!
//! ```text
//! report-designer render --template t.json --data report.json --out page.json
//! report-designer render --template t.json --data report.json --preview
//! report-designer inspect --template t.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doc_model::Template;
use edit_engine::A4_WIDTH_PX_96DPI;
use export::{ExportArtifact, ExportFormat, ExportPipeline, JsonSink};
use mail_merge::{MergeEngine, ReportData};
use render_model::{RenderEngine, RenderTarget};
use std::path::{Path, PathBuf};
use store::SettingsManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A4 height / width
const A4_ASPECT: f64 = 297.0 / 210.0;

/// Report Designer - template rendering for medical reports
#[derive(Parser, Debug)]
#[command(name = "report-designer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template against report data
    Render {
        /// Template JSON file
        #[arg(long, value_name = "FILE")]
        template: PathBuf,

        /// Report data JSON file
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Export format: pdf or print
        #[arg(long, default_value = "pdf")]
        format: ExportFormat,

        /// Output file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Directory holding settings.json
        #[arg(long, value_name = "DIR")]
        settings: Option<PathBuf>,

        /// Render at the design canvas without export scaling or reflow
        #[arg(long)]
        preview: bool,
    },
    /// List a template's elements and the tokens it leaves unresolved
    Inspect {
        /// Template JSON file
        #[arg(long, value_name = "FILE")]
        template: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render { template, data, format, out, settings, preview } => {
            let template = load_template(&template)?;
            let data = load_report_data(&data)?;
            if preview {
                render_preview(&template, &data, out.as_deref())
            } else {
                render_export(&template, &data, format, out.as_deref(), settings).await
            }
        }
        Commands::Inspect { template } => inspect(&load_template(&template)?),
    }
}

fn load_template(path: &Path) -> Result<Template> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading template {}", path.display()))?;
    let mut template: Template = serde_json::from_str(&content)
        .with_context(|| format!("parsing template {}", path.display()))?;
    template.normalize().context("validating template")?;
    Ok(template)
}

fn load_report_data(path: &Path) -> Result<ReportData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading report data {}", path.display()))?;
    ReportData::from_json(&content).with_context(|| format!("parsing report data {}", path.display()))
}

fn write_output(out: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "output written");
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn render_preview(template: &Template, data: &ReportData, out: Option<&Path>) -> Result<()> {
    let width = template.design_canvas_width_px.filter(|w| *w > 0.0).unwrap_or(A4_WIDTH_PX_96DPI);
    let target = RenderTarget::preview(width, width * A4_ASPECT);
    let tree = RenderEngine::new()?.render(Some(template), data, &target)?;
    write_output(out, &serde_json::to_vec_pretty(&tree)?)
}

async fn render_export(
    template: &Template,
    data: &ReportData,
    format: ExportFormat,
    out: Option<&Path>,
    settings_dir: Option<PathBuf>,
) -> Result<()> {
    let settings = match settings_dir {
        Some(dir) => {
            let mut manager = SettingsManager::new(dir);
            manager.load().await.context("loading settings")?;
            manager.get().clone()
        }
        None => Default::default(),
    };

    let pipeline = ExportPipeline::new(settings.export, JsonSink)?;
    match pipeline.export(Some(template), data, format).await? {
        ExportArtifact::Printed { nodes } => {
            println!("Sent {} elements to the printer", nodes);
            Ok(())
        }
        ExportArtifact::Document { file_name, bytes } => {
            tracing::debug!(%file_name, "document captured");
            write_output(out, &bytes)
        }
    }
}

fn inspect(template: &Template) -> Result<()> {
    let merge = MergeEngine::new()?;
    println!("{} ({}), {} elements", template.name, template.id, template.len());
    if let Some(width) = template.design_canvas_width_px {
        println!("design canvas width: {width}px");
    }
    for element in template.elements() {
        let rect = element.rect();
        println!(
            "  {:<12} {:?} right={:.1}% top={:.1}% {:.1}%x{:.1}%",
            element.id.to_string(),
            element.kind,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        if element.is_text() {
            let fields: Vec<&str> = merge.fields_in(&element.content).iter().map(|f| f.token_name()).collect();
            if !fields.is_empty() {
                println!("    fields: {}", fields.join(", "));
            }
            let unknown = merge.unknown_tokens(&element.content);
            if !unknown.is_empty() {
                println!("    unresolved tokens: {}", unknown.join(", "));
            }
        }
    }
    Ok(())
}
