//! Control events synthesized from pointer deltas.
//!
//! The host only exposes a polled [`PointerState`]. Each tick the window
//! manager compares it with the previous snapshot and derives at most one
//! [`Event`], which is then delivered to the control under the pointer.

use trellis_render::Point;

use crate::pointer::{PointerButton, PointerState};

/// The kind of a control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDownLeft,
    MouseDownRight,
    MouseUpLeft,
    MouseUpRight,
    MouseMove,
    MouseScroll,
    KeyDown,
    KeyUp,
    MouseHover,
}

impl EventKind {
    /// Whether this is a button press.
    pub fn is_press(self) -> bool {
        matches!(self, EventKind::MouseDownLeft | EventKind::MouseDownRight)
    }

    /// Whether this is a button release.
    pub fn is_release(self) -> bool {
        matches!(self, EventKind::MouseUpLeft | EventKind::MouseUpRight)
    }
}

/// An event delivered to a control.
///
/// `x` and `y` are in the coordinate space of the receiver: screen space when
/// synthesized, frame-interior space once dispatched to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub x: i32,
    pub y: i32,
    /// Key code for keyboard events.
    pub key: Option<u32>,
    /// Scroll delta for scroll events.
    pub scroll: i32,
}

impl Event {
    /// Create a pointer event at `(x, y)`.
    pub fn new(kind: EventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            key: None,
            scroll: 0,
        }
    }

    /// Event position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Return a copy moved into another coordinate space.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Derive the event for one tick from two pointer snapshots.
    ///
    /// A press edge wins over a release edge, which wins over motion.
    /// Returns `None` when nothing changed.
    pub fn from_pointer_delta(previous: &PointerState, current: &PointerState) -> Option<Self> {
        let kind = if current.button != previous.button {
            match (previous.button, current.button) {
                (_, PointerButton::Left) => Some(EventKind::MouseDownLeft),
                (_, PointerButton::Right) => Some(EventKind::MouseDownRight),
                (PointerButton::Left, _) => Some(EventKind::MouseUpLeft),
                (PointerButton::Right, _) => Some(EventKind::MouseUpRight),
                _ => None,
            }
        } else {
            None
        };

        let kind = kind.or_else(|| {
            (current.position() != previous.position()).then_some(EventKind::MouseMove)
        })?;
        Some(Self::new(kind, current.x, current.y))
    }
}
