//! Pointer state polled once per tick.

use trellis_render::Point;

/// The pointer button currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    None,
    Left,
    Right,
    Middle,
}

impl PointerButton {
    /// Whether this is the primary (left) button.
    pub fn is_primary(self) -> bool {
        matches!(self, PointerButton::Left)
    }
}

/// Snapshot of the pointer, written by the host before each input pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub button: PointerButton,
}

impl PointerState {
    /// Create a pointer snapshot.
    pub fn new(x: i32, y: i32, button: PointerButton) -> Self {
        Self { x, y, button }
    }

    /// A pointer at `(x, y)` with no button held.
    pub fn released(x: i32, y: i32) -> Self {
        Self::new(x, y, PointerButton::None)
    }

    /// A pointer at `(x, y)` with the left button held.
    pub fn pressed(x: i32, y: i32) -> Self {
        Self::new(x, y, PointerButton::Left)
    }

    /// Pointer position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
