//! Store - persistence boundary and settings
//!
//! Records (diagnoses, doctors, templates) are kept as JSON arrays in a
//! [`KeyValueStore`] keyed by collection name. The core crates only see the
//! value objects; this crate owns how they reach disk. Application settings
//! are handled by [`SettingsManager`].

mod collections;
mod error;
mod kv;
mod settings;

pub use collections::*;
pub use error::*;
pub use kv::*;
pub use settings::*;
