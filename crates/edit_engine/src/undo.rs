//! Undo/redo manager

use crate::{Command, EditError, Result};

/// An entry in the undo stack
struct UndoEntry {
    /// The original command
    command: Box<dyn Command>,
    /// The inverse command (for undo)
    inverse: Box<dyn Command>,
}

/// Manages undo and redo stacks
pub struct UndoManager {
    /// Stack of commands that can be undone
    undo_stack: Vec<UndoEntry>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Box<dyn Command>>,
    /// Maximum number of undo entries
    max_entries: usize,
}

impl UndoManager {
    /// Create a new undo manager
    pub fn new() -> Self {
        Self::with_limit(100)
    }

    /// Create with a custom depth
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new change; clears the redo stack
    pub fn push(&mut self, command: Box<dyn Command>, inverse: Box<dyn Command>) {
        self.redo_stack.clear();
        self.record(command, inverse);
    }

    /// Record a redone change without touching the remaining redo stack
    pub fn push_redone(&mut self, command: Box<dyn Command>, inverse: Box<dyn Command>) {
        self.record(command, inverse);
    }

    fn record(&mut self, command: Box<dyn Command>, inverse: Box<dyn Command>) {
        self.undo_stack.push(UndoEntry { command, inverse });

        // Enforce max entries
        while self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the last command for undo
    pub fn pop_undo(&mut self) -> Result<Box<dyn Command>> {
        let entry = self.undo_stack.pop().ok_or(EditError::UndoStackEmpty)?;

        // Push to redo stack
        self.redo_stack.push(entry.command);

        Ok(entry.inverse)
    }

    /// Pop a command for redo
    pub fn pop_redo(&mut self) -> Result<Box<dyn Command>> {
        self.redo_stack.pop().ok_or(EditError::RedoStackEmpty)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name of the change the next undo reverts
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|entry| entry.command.display_name())
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReorderElement;

    fn cmd(index: usize) -> Box<dyn Command> {
        Box::new(ReorderElement { id: "a".into(), index })
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut undo = UndoManager::with_limit(2);
        for i in 0..5 {
            undo.push(cmd(i), cmd(0));
        }
        assert!(undo.pop_undo().is_ok());
        assert!(undo.pop_undo().is_ok());
        assert!(!undo.can_undo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut undo = UndoManager::new();
        undo.push(cmd(1), cmd(0));
        undo.pop_undo().unwrap();
        assert!(undo.can_redo());
        undo.push(cmd(2), cmd(0));
        assert!(!undo.can_redo());
        assert!(matches!(undo.pop_redo(), Err(EditError::RedoStackEmpty)));
    }

    #[test]
    fn test_empty_undo() {
        let mut undo = UndoManager::new();
        assert!(matches!(undo.pop_undo(), Err(EditError::UndoStackEmpty)));
        assert_eq!(undo.undo_label(), None);
    }
}
