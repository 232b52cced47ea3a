//! Element ID generation and management

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element within a template.
///
/// Freshly created elements get a UUID v4 string. Identifiers read from
/// stored records are kept verbatim; `Template::normalize` rejects empty ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new random ElementId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
