//! Template: an ordered collection of elements over a page canvas
//!
//! Array order is z-order: later elements draw on top and win hit tests.

use crate::{DocModelError, ElementId, ElementKind, ElementPatch, Point, Rect, Result, TemplateElement,
    DEFAULT_TEXT_CONTENT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A document template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    elements: Vec<TemplateElement>,
    /// Pixel width of the design canvas when the template was authored
    #[serde(
        default,
        rename = "designCanvasWidthPx",
        alias = "designerCanvasWidth",
        skip_serializing_if = "Option::is_none"
    )]
    pub design_canvas_width_px: Option<f64>,
}

impl Template {
    /// Create an empty template with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Create an empty template with a known id
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            elements: Vec::new(),
            design_canvas_width_px: None,
        }
    }

    /// Build a template from stored elements, validating ids and geometry
    pub fn from_elements(
        id: impl Into<String>,
        name: impl Into<String>,
        elements: Vec<TemplateElement>,
    ) -> Result<Self> {
        let mut template = Self::with_id(id, name);
        template.elements = elements;
        template.normalize()?;
        Ok(template)
    }

    /// Elements in z-order (bottom first)
    pub fn elements(&self) -> &[TemplateElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &ElementId) -> Option<&TemplateElement> {
        self.elements.iter().find(|el| &el.id == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|el| &el.id == id)
    }

    /// Ids of all elements in z-order
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|el| el.id.clone()).collect()
    }

    /// Append a new element with default geometry and style; returns its id.
    ///
    /// Text without initial content gets [`DEFAULT_TEXT_CONTENT`].
    pub fn add(&mut self, kind: ElementKind, content: Option<String>) -> ElementId {
        let content = content.unwrap_or_else(|| match kind {
            ElementKind::Text => DEFAULT_TEXT_CONTENT.to_string(),
            ElementKind::Image => String::new(),
        });
        let element = TemplateElement::new(kind, content);
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Insert an element at `index` (or on top when `None`)
    pub fn insert(&mut self, mut element: TemplateElement, index: Option<usize>) -> Result<()> {
        if self.contains(&element.id) {
            return Err(DocModelError::DuplicateElement(element.id));
        }
        let index = index.unwrap_or(self.elements.len());
        if index > self.elements.len() {
            return Err(DocModelError::InvalidIndex {
                index,
                len: self.elements.len(),
            });
        }
        element.enforce_floor();
        self.elements.insert(index, element);
        Ok(())
    }

    /// Apply `patch` to every element whose id is in `ids`; returns how many
    /// elements were touched
    pub fn update(&mut self, ids: &[ElementId], patch: &ElementPatch) -> usize {
        let mut touched = 0;
        for element in self.elements.iter_mut().filter(|el| ids.contains(&el.id)) {
            patch.apply_to(element);
            touched += 1;
        }
        touched
    }

    /// Replace an element wholesale, keeping its z-position
    pub fn replace(&mut self, mut element: TemplateElement) -> Result<TemplateElement> {
        let index = self
            .index_of(&element.id)
            .ok_or_else(|| DocModelError::ElementNotFound(element.id.clone()))?;
        element.enforce_floor();
        Ok(std::mem::replace(&mut self.elements[index], element))
    }

    /// Set position and size of one element (floored)
    pub fn set_rect(&mut self, id: &ElementId, rect: Rect) -> Result<()> {
        let element = self
            .elements
            .iter_mut()
            .find(|el| &el.id == id)
            .ok_or_else(|| DocModelError::ElementNotFound(id.clone()))?;
        element.set_rect(rect);
        Ok(())
    }

    /// Remove the listed elements; returns them with their former indices,
    /// in ascending index order
    pub fn remove(&mut self, ids: &[ElementId]) -> Vec<(usize, TemplateElement)> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.elements.len());
        for (index, element) in self.elements.drain(..).enumerate() {
            if ids.contains(&element.id) {
                removed.push((index, element));
            } else {
                kept.push(element);
            }
        }
        self.elements = kept;
        removed
    }

    /// Topmost element whose rectangle contains `point`
    pub fn element_at(&self, point: Point) -> Option<&TemplateElement> {
        self.elements.iter().rev().find(|el| el.rect().contains(point))
    }

    /// Move an element to `index` in z-order; returns its previous index
    pub fn move_to_index(&mut self, id: &ElementId, index: usize) -> Result<usize> {
        let from = self
            .index_of(id)
            .ok_or_else(|| DocModelError::ElementNotFound(id.clone()))?;
        if index >= self.elements.len() {
            return Err(DocModelError::InvalidIndex {
                index,
                len: self.elements.len(),
            });
        }
        let element = self.elements.remove(from);
        self.elements.insert(index, element);
        Ok(from)
    }

    pub fn bring_to_front(&mut self, id: &ElementId) -> Result<usize> {
        let top = self.elements.len().saturating_sub(1);
        self.move_to_index(id, top)
    }

    pub fn send_to_back(&mut self, id: &ElementId) -> Result<usize> {
        self.move_to_index(id, 0)
    }

    /// Validate a template read from storage: ids must be non-empty and
    /// unique, and every element is raised to the dimension floor
    pub fn normalize(&mut self) -> Result<()> {
        let mut seen = HashSet::new();
        for element in &mut self.elements {
            if element.id.as_str().is_empty() {
                return Err(DocModelError::EmptyElementId);
            }
            if !seen.insert(element.id.clone()) {
                return Err(DocModelError::DuplicateElement(element.id.clone()));
            }
            element.enforce_floor();
        }
        Ok(())
    }
}
