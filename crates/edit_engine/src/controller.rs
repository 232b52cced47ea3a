//! Designer session: the interaction controller
//!
//! Owns the edited template, the selection and the gesture state machine.
//! Every handler returns the [`Action`]s the host must perform, so input
//! capture and redraws are driven explicitly instead of by ambient state.

use crate::{
    designer_view, handle_tolerance, hit_test, Command, DesignerConfig, DesignerView, EditError, GestureContext,
    HitTarget, InputEvent, InsertElements, InteractionState, Key, KeyFocus, RemoveElements, ReorderElement,
    ReplaceElements, Result, SetGeometry, UndoManager, UpdateElements,
};
use doc_model::{
    rect_overlap, resize_from_handle, scale_around_center, CanvasBounds, ElementId, ElementKind, ElementPatch,
    ElementSelection, Rect, Template, TemplateElement, DEFAULT_TEXT_CONTENT,
};

/// Effects the host must carry out after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start routing move/release events from all input sources to the session
    CaptureInput,
    /// Stop routing move/release events; emitted exactly once per gesture
    ReleaseInput,
    SelectionChanged,
    TemplateChanged,
    RenderNeeded,
}

#[derive(Debug, Clone)]
struct TextEdit {
    id: ElementId,
    original: TemplateElement,
}

/// An authoring session over one template
pub struct DesignerSession {
    template: Template,
    selection: ElementSelection,
    state: InteractionState,
    canvas: CanvasBounds,
    editing: Option<TextEdit>,
    undo: UndoManager,
    config: DesignerConfig,
}

impl DesignerSession {
    pub fn new(template: Template, config: DesignerConfig) -> Self {
        Self {
            template,
            selection: ElementSelection::new(),
            state: InteractionState::Idle,
            canvas: CanvasBounds::default(),
            editing: None,
            undo: UndoManager::with_limit(config.undo_depth),
            config,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn selection(&self) -> &ElementSelection {
        &self.selection
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn editing(&self) -> Option<&ElementId> {
        self.editing.as_ref().map(|edit| &edit.id)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Record where the canvas currently sits on screen
    pub fn set_canvas_bounds(&mut self, canvas: CanvasBounds) {
        self.canvas = canvas;
    }

    /// Switch to another template, resetting selection, gesture and history
    pub fn load_template(&mut self, template: Template) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.state.is_idle() {
            tracing::debug!(gesture = ?self.state.kind(), "abandoning gesture on template switch");
            actions.push(Action::ReleaseInput);
        }
        self.state = InteractionState::Idle;
        self.editing = None;
        self.selection.clear();
        self.undo.clear();
        self.template = template;
        tracing::debug!(template = %self.template.id, "template loaded");
        actions.extend([Action::TemplateChanged, Action::SelectionChanged, Action::RenderNeeded]);
        actions
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Pointer or touch press
    pub fn press(&mut self, event: InputEvent) -> Vec<Action> {
        if !self.state.is_idle() {
            tracing::debug!(gesture = ?self.state.kind(), "press ignored while a gesture is active");
            return Vec::new();
        }
        if self.canvas.is_empty() {
            tracing::debug!("press ignored before the canvas is laid out");
            return Vec::new();
        }

        let mut actions = self.end_text_edit();
        let point = self.canvas.to_percent(event.client);
        let tolerance = handle_tolerance(&self.canvas, self.config.handle_radius_px);
        let ctx = GestureContext {
            start: event.client,
            canvas: self.canvas,
            source: event.source,
            shift_at_press: event.shift,
            selection_before: self.selection.clone(),
        };

        self.state = match hit_test(&self.template, &self.selection, point, tolerance) {
            HitTarget::Handle { id, handle } => match self.template.get(&id) {
                Some(element) => {
                    let snapshot = element.rect();
                    let aspect_ratio = element.kind.supports_aspect_lock().then(|| snapshot.aspect_ratio());
                    InteractionState::Resizing { ctx, id, handle, snapshot, aspect_ratio }
                }
                None => return actions,
            },
            HitTarget::Element(id) => {
                if event.shift {
                    self.selection.insert(id);
                } else if !self.selection.contains(&id) {
                    self.selection = ElementSelection::single(id);
                }
                let snapshot = self.selected_rects();
                InteractionState::Dragging { ctx, snapshot }
            }
            HitTarget::Canvas => {
                self.selection.clear();
                InteractionState::MarqueeSelecting {
                    ctx,
                    anchor: point,
                    marquee: Rect::from_corners(point, point),
                }
            }
        };

        tracing::debug!(gesture = ?self.state.kind(), x = point.x, y = point.y, "gesture started");
        actions.push(Action::CaptureInput);
        if self.state.context().map(|ctx| &ctx.selection_before) != Some(&self.selection) {
            actions.push(Action::SelectionChanged);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer or touch move while a gesture is active
    pub fn move_to(&mut self, event: InputEvent) -> Vec<Action> {
        let updates: Vec<(ElementId, Rect)> = match &mut self.state {
            InteractionState::Idle => return Vec::new(),
            InteractionState::Dragging { ctx, snapshot } => {
                let (dx, dy) = ctx.delta(event.client);
                snapshot
                    .iter()
                    .map(|(id, rect)| (id.clone(), Rect { x: rect.x - dx, y: rect.y + dy, ..*rect }))
                    .collect()
            }
            InteractionState::Resizing { ctx, id, handle, snapshot, aspect_ratio } => {
                let (dx, dy) = ctx.delta(event.client);
                let lock = aspect_ratio.filter(|_| ctx.shift_at_press || event.shift);
                vec![(id.clone(), resize_from_handle(snapshot, *handle, dx, dy, lock))]
            }
            InteractionState::MarqueeSelecting { ctx, anchor, marquee } => {
                *marquee = Rect::from_corners(*anchor, ctx.canvas.to_percent(event.client));
                Vec::new()
            }
        };

        self.apply_live(&updates);
        vec![Action::RenderNeeded]
    }

    /// Pointer or touch release; ends the active gesture
    pub fn release(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.state);
        let mut actions = vec![Action::ReleaseInput];
        match state {
            InteractionState::Idle => return Vec::new(),
            InteractionState::Dragging { snapshot, .. } => {
                if self.record_geometry(snapshot, "Move") {
                    actions.push(Action::TemplateChanged);
                }
            }
            InteractionState::Resizing { id, snapshot, .. } => {
                if self.record_geometry(vec![(id, snapshot)], "Resize") {
                    actions.push(Action::TemplateChanged);
                }
            }
            InteractionState::MarqueeSelecting { marquee, .. } => {
                self.selection = self
                    .template
                    .elements()
                    .iter()
                    .filter(|el| rect_overlap(&el.rect(), &marquee))
                    .map(|el| el.id.clone())
                    .collect();
                tracing::debug!(selected = self.selection.len(), "marquee selection");
                actions.push(Action::SelectionChanged);
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Abort the active gesture, restoring its start state
    pub fn cancel(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.state);
        let ctx = match state.context() {
            Some(ctx) => ctx.clone(),
            None => return Vec::new(),
        };
        match state {
            InteractionState::Dragging { snapshot, .. } => self.apply_live(&snapshot),
            InteractionState::Resizing { id, snapshot, .. } => self.apply_live(&[(id, snapshot)]),
            _ => {}
        }
        self.selection = ctx.selection_before;
        self.selection.retain_existing(&self.template);
        tracing::debug!("gesture cancelled");
        vec![Action::ReleaseInput, Action::SelectionChanged, Action::RenderNeeded]
    }

    fn selected_rects(&self) -> Vec<(ElementId, Rect)> {
        self.template
            .elements()
            .iter()
            .filter(|el| self.selection.contains(&el.id))
            .map(|el| (el.id.clone(), el.rect()))
            .collect()
    }

    fn apply_live(&mut self, rects: &[(ElementId, Rect)]) {
        for (id, rect) in rects {
            if let Err(err) = self.template.set_rect(id, *rect) {
                tracing::warn!(%err, "gesture target missing");
            }
        }
    }

    /// Record a finished gesture as one undoable change; the geometry is
    /// already applied. Returns whether anything moved.
    fn record_geometry(&mut self, before: Vec<(ElementId, Rect)>, name: &'static str) -> bool {
        let after: Vec<(ElementId, Rect)> = before
            .iter()
            .filter_map(|(id, _)| self.template.get(id).map(|el| (id.clone(), el.rect())))
            .collect();
        if after.iter().zip(&before).all(|(a, b)| a.1 == b.1) {
            return false;
        }
        self.undo.push(Box::new(SetGeometry::new(after, name)), Box::new(SetGeometry::new(before, name)));
        true
    }

    // ========================================================================
    // Discrete actions
    // ========================================================================

    fn execute(&mut self, command: Box<dyn Command>) -> Result<()> {
        let result = command.apply(&self.template, &self.selection)?;
        tracing::debug!(command = command.display_name(), "executed");
        self.undo.push(command, result.inverse);
        self.template = result.template;
        self.selection = result.selection;
        self.selection.retain_existing(&self.template);
        Ok(())
    }

    /// Discrete commands wait for the active gesture to end
    fn gesture_active(&self, command: &str) -> bool {
        if self.state.is_idle() {
            return false;
        }
        tracing::debug!(gesture = ?self.state.kind(), command, "command ignored while a gesture is active");
        true
    }

    fn changed() -> Vec<Action> {
        vec![Action::TemplateChanged, Action::SelectionChanged, Action::RenderNeeded]
    }

    /// Add a text element (default content when `None`); it becomes the selection
    pub fn add_text(&mut self, content: Option<String>) -> Result<Vec<Action>> {
        let content = content.unwrap_or_else(|| DEFAULT_TEXT_CONTENT.to_string());
        self.add_element(TemplateElement::new(ElementKind::Text, content))
    }

    /// Add an image element holding `payload`; it becomes the selection
    pub fn add_image(&mut self, payload: impl Into<String>) -> Result<Vec<Action>> {
        self.add_element(TemplateElement::new(ElementKind::Image, payload))
    }

    fn add_element(&mut self, element: TemplateElement) -> Result<Vec<Action>> {
        if self.gesture_active("add") {
            return Ok(Vec::new());
        }
        let command = InsertElements::on_top(&self.template, element);
        self.execute(Box::new(command))?;
        Ok(Self::changed())
    }

    /// Apply a partial patch to every selected element
    pub fn update_selected(&mut self, patch: ElementPatch) -> Result<Vec<Action>> {
        if self.gesture_active("update") || self.selection.is_empty() || patch.is_empty() {
            return Ok(Vec::new());
        }
        self.execute(Box::new(UpdateElements { ids: self.selection.to_vec(), patch }))?;
        Ok(vec![Action::TemplateChanged, Action::RenderNeeded])
    }

    /// Scale every selected element around its center
    pub fn zoom_selected(&mut self, factor: f64) -> Result<Vec<Action>> {
        if self.gesture_active("zoom") {
            return Ok(Vec::new());
        }
        let rects: Vec<(ElementId, Rect)> = self
            .template
            .elements()
            .iter()
            .filter(|el| self.selection.contains(&el.id))
            .map(|el| (el.id.clone(), scale_around_center(&el.rect(), factor, el.kind.scales_proportionally())))
            .collect();
        if rects.is_empty() {
            return Ok(Vec::new());
        }
        self.execute(Box::new(SetGeometry::new(rects, "Zoom")))?;
        Ok(vec![Action::TemplateChanged, Action::RenderNeeded])
    }

    pub fn zoom_in(&mut self) -> Result<Vec<Action>> {
        self.zoom_selected(self.config.zoom_in_factor)
    }

    pub fn zoom_out(&mut self) -> Result<Vec<Action>> {
        self.zoom_selected(self.config.zoom_out_factor)
    }

    /// Remove every selected element and clear the selection
    pub fn delete_selected(&mut self) -> Result<Vec<Action>> {
        if self.gesture_active("delete") || self.selection.is_empty() {
            return Ok(Vec::new());
        }
        let ids = self.selection.to_vec();
        if self.editing.as_ref().is_some_and(|edit| ids.contains(&edit.id)) {
            self.editing = None;
        }
        self.execute(Box::new(RemoveElements { ids }))?;
        self.selection.clear();
        Ok(Self::changed())
    }

    /// Keyboard input. Delete/Backspace delete the selection unless a text
    /// field has focus or an element is being edited; Escape cancels a gesture.
    pub fn handle_key(&mut self, key: Key, focus: KeyFocus) -> Result<Vec<Action>> {
        match key {
            Key::Delete | Key::Backspace => {
                if focus == KeyFocus::TextField || self.editing.is_some() {
                    return Ok(Vec::new());
                }
                self.delete_selected()
            }
            Key::Escape => Ok(self.cancel()),
            Key::Other => Ok(Vec::new()),
        }
    }

    pub fn bring_to_front(&mut self, id: &ElementId) -> Result<Vec<Action>> {
        let top = self.template.len().saturating_sub(1);
        self.reorder(id, top)
    }

    pub fn send_to_back(&mut self, id: &ElementId) -> Result<Vec<Action>> {
        self.reorder(id, 0)
    }

    fn reorder(&mut self, id: &ElementId, index: usize) -> Result<Vec<Action>> {
        if self.gesture_active("reorder") || self.template.index_of(id) == Some(index) {
            return Ok(Vec::new());
        }
        self.execute(Box::new(ReorderElement { id: id.clone(), index }))?;
        Ok(vec![Action::TemplateChanged, Action::RenderNeeded])
    }

    // ========================================================================
    // Text editing
    // ========================================================================

    /// Start editing a text element in place (double-click)
    pub fn begin_text_edit(&mut self, id: &ElementId) -> Result<Vec<Action>> {
        if self.gesture_active("edit") {
            return Ok(Vec::new());
        }
        let mut actions = self.end_text_edit();
        let element = self
            .template
            .get(id)
            .ok_or_else(|| doc_model::DocModelError::ElementNotFound(id.clone()))?;
        if !element.is_text() {
            return Err(EditError::NotATextElement(id.clone()));
        }
        self.editing = Some(TextEdit { id: id.clone(), original: element.clone() });
        self.selection = ElementSelection::single(id.clone());
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        Ok(actions)
    }

    /// Live content update while editing
    pub fn set_editing_text(&mut self, content: impl Into<String>) -> Vec<Action> {
        let Some(edit) = &self.editing else {
            return Vec::new();
        };
        let patch = ElementPatch::new().with_content(content);
        self.template.update(&[edit.id.clone()], &patch);
        vec![Action::RenderNeeded]
    }

    /// Finish in-place editing (blur); records one undoable change
    pub fn end_text_edit(&mut self) -> Vec<Action> {
        let Some(edit) = self.editing.take() else {
            return Vec::new();
        };
        let Some(current) = self.template.get(&edit.id).cloned() else {
            return Vec::new();
        };
        if current == edit.original {
            return Vec::new();
        }
        self.undo.push(
            Box::new(ReplaceElements { elements: vec![current] }),
            Box::new(ReplaceElements { elements: vec![edit.original] }),
        );
        vec![Action::TemplateChanged, Action::RenderNeeded]
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn undo(&mut self) -> Result<Vec<Action>> {
        if self.gesture_active("undo") {
            return Ok(Vec::new());
        }
        let mut actions = self.end_text_edit();
        tracing::debug!(change = ?self.undo.undo_label(), "undo");
        let inverse = self.undo.pop_undo()?;
        let result = inverse.apply(&self.template, &self.selection)?;
        self.template = result.template;
        self.selection = result.selection;
        self.selection.retain_existing(&self.template);
        actions.extend(Self::changed());
        Ok(actions)
    }

    pub fn redo(&mut self) -> Result<Vec<Action>> {
        if self.gesture_active("redo") {
            return Ok(Vec::new());
        }
        let command = self.undo.pop_redo()?;
        let result = command.apply(&self.template, &self.selection)?;
        self.undo.push_redone(command, result.inverse);
        self.template = result.template;
        self.selection = result.selection;
        self.selection.retain_existing(&self.template);
        Ok(Self::changed())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// The template to persist under `name`, stamped with the design width
    pub fn finish(&mut self, name: &str) -> Result<Template> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::MissingTemplateName);
        }
        self.end_text_edit();
        let mut template = self.template.clone();
        template.name = name.to_string();
        template.design_canvas_width_px = Some(if self.canvas.width > 0.0 {
            self.canvas.width
        } else {
            self.config.fallback_canvas_width_px
        });
        Ok(template)
    }

    pub fn view(&self) -> DesignerView {
        designer_view(&self.template, &self.selection, &self.state, self.editing())
    }
}
