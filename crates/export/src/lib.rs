//! Report Export
//!
//! This crate drives a report from a finished template to an external
//! printer or document capture: it enforces a single running export,
//! waits for layout to settle, renders a fresh tree at the export canvas,
//! reflows it exactly once and hands it to an [`ExportSink`].

mod busy;
mod config;
mod error;
mod pipeline;
mod sink;

pub use busy::*;
pub use config::*;
pub use error::*;
pub use pipeline::*;
pub use sink::*;
