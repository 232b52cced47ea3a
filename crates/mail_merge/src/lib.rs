//! Report Data and Placeholder Substitution
//!
//! This crate holds the values a template is rendered against and the
//! `{{token}}` substitution that merges them into template text.
//!
//! # Example
//!
//! ```rust
//! use mail_merge::{MergeEngine, ReportData};
//!
//! let data = ReportData::default().with_patient("سارة");
//! let engine = MergeEngine::new().unwrap();
//! assert_eq!(engine.substitute("{{patientName}}", &data), "سارة");
//! assert_eq!(engine.substitute("{{other}}", &data), "{{other}}");
//! ```

mod error;
mod records;
mod report_data;
pub mod merge_engine;
pub mod merge_field;

pub use error::{MailMergeError, Result};
pub use merge_engine::MergeEngine;
pub use merge_field::{PlaceholderPreset, ReportField, NOT_SPECIFIED, PLACEHOLDER_PRESETS};
pub use records::{diagnoses_for, Diagnosis, Doctor};
pub use report_data::{AgeGroup, DiagnosisSlot, Gender, ReportData, DIAGNOSIS_SEPARATOR, NO_DIAGNOSES};
