//! Input normalization
//!
//! Mouse and touch events are reduced to one [`InputEvent`] shape so every
//! gesture runs the same code regardless of where it came from.

use doc_model::PixelPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// A pointer position in client pixels plus the modifier state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub client: PixelPoint,
    pub shift: bool,
    pub source: InputSource,
}

impl InputEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            client: PixelPoint::new(x, y),
            shift: false,
            source: InputSource::Mouse,
        }
    }

    /// Build an event from a touch sample.
    ///
    /// Uses the first active touch, falling back to the first changed touch
    /// (touch-end carries no active touches). Returns `None` when neither
    /// list has a point.
    pub fn touch(touches: &[PixelPoint], changed_touches: &[PixelPoint]) -> Option<Self> {
        let client = touches.first().or_else(|| changed_touches.first())?;
        Some(Self {
            client: *client,
            shift: false,
            source: InputSource::Touch,
        })
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }
}

/// Keys the designer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other,
}

/// Where keyboard focus was when a key arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFocus {
    Canvas,
    /// A text input or text area; editing keys belong to it
    TextField,
}
