//! Render description of the designer

use crate::{GestureKind, InteractionState};
use doc_model::{ElementId, ElementKind, ElementSelection, Point, Rect, ResizeHandle, Template};

#[derive(Debug, Clone, PartialEq)]
pub struct ElementView {
    pub id: ElementId,
    pub kind: ElementKind,
    pub rect: Rect,
    pub selected: bool,
    pub editing: bool,
    /// Grip positions; present only on selected elements
    pub handles: Vec<(ResizeHandle, Point)>,
}

/// Everything a host needs to draw the design canvas
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerView {
    /// Elements in z-order
    pub elements: Vec<ElementView>,
    pub marquee: Option<Rect>,
    pub gesture: GestureKind,
}

/// Pure projection of the session state into a view
pub fn designer_view(
    template: &Template,
    selection: &ElementSelection,
    state: &InteractionState,
    editing: Option<&ElementId>,
) -> DesignerView {
    let elements = template
        .elements()
        .iter()
        .map(|el| {
            let rect = el.rect();
            let selected = selection.contains(&el.id);
            let handles = if selected {
                ResizeHandle::ALL.iter().map(|h| (*h, h.position_on(&rect))).collect()
            } else {
                Vec::new()
            };
            ElementView {
                id: el.id.clone(),
                kind: el.kind,
                rect,
                selected,
                editing: editing == Some(&el.id),
                handles,
            }
        })
        .collect();

    DesignerView {
        elements,
        marquee: state.marquee(),
        gesture: state.kind(),
    }
}
