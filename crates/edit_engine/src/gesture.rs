//! Gesture state machine states

use crate::InputSource;
use doc_model::{CanvasBounds, ElementId, ElementSelection, PixelPoint, Point, Rect, ResizeHandle};

/// Everything captured when a gesture starts; dropped when it ends.
///
/// Move deltas are always measured against `start` and applied to the
/// snapshots held by the state, never to the live geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureContext {
    pub start: PixelPoint,
    /// Canvas placement at gesture start; used for every conversion until
    /// the gesture ends
    pub canvas: CanvasBounds,
    pub source: InputSource,
    pub shift_at_press: bool,
    /// Selection before the press, restored on cancel
    pub selection_before: ElementSelection,
}

impl GestureContext {
    /// Pointer delta since gesture start in percent units, screen direction
    pub fn delta(&self, client: PixelPoint) -> (f64, f64) {
        self.canvas.delta_to_percent(client.x - self.start.x, client.y - self.start.y)
    }
}

/// The interaction controller's state. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        ctx: GestureContext,
        /// Gesture-start rectangles of every moved element
        snapshot: Vec<(ElementId, Rect)>,
    },
    Resizing {
        ctx: GestureContext,
        id: ElementId,
        handle: ResizeHandle,
        snapshot: Rect,
        /// Width/height at gesture start, for elements that support a lock
        aspect_ratio: Option<f64>,
    },
    MarqueeSelecting {
        ctx: GestureContext,
        anchor: Point,
        marquee: Rect,
    },
}

/// State discriminant, for display and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    Dragging,
    Resizing,
    MarqueeSelecting,
}

impl InteractionState {
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Idle => GestureKind::Idle,
            Self::Dragging { .. } => GestureKind::Dragging,
            Self::Resizing { .. } => GestureKind::Resizing,
            Self::MarqueeSelecting { .. } => GestureKind::MarqueeSelecting,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn context(&self) -> Option<&GestureContext> {
        match self {
            Self::Idle => None,
            Self::Dragging { ctx, .. } | Self::Resizing { ctx, .. } | Self::MarqueeSelecting { ctx, .. } => Some(ctx),
        }
    }

    /// The live marquee rectangle, if a marquee is being drawn
    pub fn marquee(&self) -> Option<Rect> {
        match self {
            Self::MarqueeSelecting { marquee, .. } => Some(*marquee),
            _ => None,
        }
    }
}
