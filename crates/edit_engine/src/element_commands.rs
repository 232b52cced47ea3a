//! Element commands: insert, remove, patch, replace, move/resize and z-order

use crate::{Command, CommandResult, EditError, Result};
use doc_model::{DocModelError, ElementId, ElementPatch, ElementSelection, Rect, Template, TemplateElement};

fn kept_selection(template: &Template, selection: &ElementSelection) -> ElementSelection {
    let mut selection = selection.clone();
    selection.retain_existing(template);
    selection
}

// ============================================================================
// Insert / Remove
// ============================================================================

/// Insert elements at the given z-indices.
///
/// Entries are applied in ascending index order, so the output of
/// [`RemoveElements`] restores every element to its former slot. The inserted
/// elements become the selection.
#[derive(Debug, Clone)]
pub struct InsertElements {
    pub elements: Vec<(usize, TemplateElement)>,
}

impl InsertElements {
    /// Insert one element on top of the stack
    pub fn on_top(template: &Template, element: TemplateElement) -> Self {
        Self {
            elements: vec![(template.len(), element)],
        }
    }
}

impl Command for InsertElements {
    fn apply(&self, template: &Template, _selection: &ElementSelection) -> Result<CommandResult> {
        let mut next = template.clone();
        let mut entries = self.elements.clone();
        entries.sort_by_key(|(index, _)| *index);

        let mut ids = Vec::with_capacity(entries.len());
        for (index, element) in entries {
            ids.push(element.id.clone());
            let index = index.min(next.len());
            next.insert(element, Some(index))?;
        }

        Ok(CommandResult {
            template: next,
            selection: ids.iter().cloned().collect(),
            inverse: Box::new(RemoveElements { ids }),
        })
    }

    fn display_name(&self) -> &str {
        "Add Element"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Remove elements by id
#[derive(Debug, Clone)]
pub struct RemoveElements {
    pub ids: Vec<ElementId>,
}

impl Command for RemoveElements {
    fn apply(&self, template: &Template, selection: &ElementSelection) -> Result<CommandResult> {
        let mut next = template.clone();
        let removed = next.remove(&self.ids);
        if removed.is_empty() {
            return Err(EditError::InvalidCommand("no listed element exists".to_string()));
        }

        let selection = kept_selection(&next, selection);
        Ok(CommandResult {
            template: next,
            selection,
            inverse: Box::new(InsertElements { elements: removed }),
        })
    }

    fn display_name(&self) -> &str {
        "Delete"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// ============================================================================
// Attribute changes
// ============================================================================

/// Apply a partial patch to every listed element
#[derive(Debug, Clone)]
pub struct UpdateElements {
    pub ids: Vec<ElementId>,
    pub patch: ElementPatch,
}

impl Command for UpdateElements {
    fn apply(&self, template: &Template, selection: &ElementSelection) -> Result<CommandResult> {
        let before: Vec<TemplateElement> = template
            .elements()
            .iter()
            .filter(|el| self.ids.contains(&el.id))
            .cloned()
            .collect();
        if before.is_empty() {
            return Err(EditError::InvalidCommand("no listed element exists".to_string()));
        }

        let mut next = template.clone();
        next.update(&self.ids, &self.patch);

        Ok(CommandResult {
            template: next,
            selection: selection.clone(),
            inverse: Box::new(ReplaceElements { elements: before }),
        })
    }

    fn display_name(&self) -> &str {
        "Format"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Replace elements wholesale, matched by id
#[derive(Debug, Clone)]
pub struct ReplaceElements {
    pub elements: Vec<TemplateElement>,
}

impl Command for ReplaceElements {
    fn apply(&self, template: &Template, selection: &ElementSelection) -> Result<CommandResult> {
        let mut next = template.clone();
        let mut previous = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            previous.push(next.replace(element.clone())?);
        }

        Ok(CommandResult {
            template: next,
            selection: selection.clone(),
            inverse: Box::new(ReplaceElements { elements: previous }),
        })
    }

    fn display_name(&self) -> &str {
        "Edit Element"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Set the rectangle of each listed element (move, resize, zoom)
#[derive(Debug, Clone)]
pub struct SetGeometry {
    pub rects: Vec<(ElementId, Rect)>,
    pub name: &'static str,
}

impl SetGeometry {
    pub fn new(rects: Vec<(ElementId, Rect)>, name: &'static str) -> Self {
        Self { rects, name }
    }
}

impl Command for SetGeometry {
    fn apply(&self, template: &Template, selection: &ElementSelection) -> Result<CommandResult> {
        let mut next = template.clone();
        let mut previous = Vec::with_capacity(self.rects.len());
        for (id, rect) in &self.rects {
            let before = template
                .get(id)
                .map(|el| el.rect())
                .ok_or_else(|| DocModelError::ElementNotFound(id.clone()))?;
            next.set_rect(id, *rect)?;
            previous.push((id.clone(), before));
        }

        Ok(CommandResult {
            template: next,
            selection: selection.clone(),
            inverse: Box::new(SetGeometry::new(previous, self.name)),
        })
    }

    fn display_name(&self) -> &str {
        self.name
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// ============================================================================
// Z-order
// ============================================================================

/// Move one element to a z-index
#[derive(Debug, Clone)]
pub struct ReorderElement {
    pub id: ElementId,
    pub index: usize,
}

impl Command for ReorderElement {
    fn apply(&self, template: &Template, selection: &ElementSelection) -> Result<CommandResult> {
        let mut next = template.clone();
        let from = next.move_to_index(&self.id, self.index)?;

        Ok(CommandResult {
            template: next,
            selection: selection.clone(),
            inverse: Box::new(ReorderElement {
                id: self.id.clone(),
                index: from,
            }),
        })
    }

    fn display_name(&self) -> &str {
        "Arrange"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}
