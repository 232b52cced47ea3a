//! Command system for template editing

use crate::Result;
use doc_model::{ElementSelection, Template};

/// Result of applying a command
#[derive(Debug)]
pub struct CommandResult {
    /// The template after the command
    pub template: Template,
    /// The selection after the command
    pub selection: ElementSelection,
    /// The inverse command (for undo)
    pub inverse: Box<dyn Command>,
}

/// Trait for all editing commands.
///
/// Commands never mutate their input; they return a fresh template snapshot.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Apply this command to a template
    fn apply(&self, template: &Template, selection: &ElementSelection) -> Result<CommandResult>;

    /// Get a display name for this command
    fn display_name(&self) -> &str;

    /// Clone this command into a box
    fn clone_box(&self) -> Box<dyn Command>;
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
