//! Controls: drawable, event-receiving regions inside a frame.
//!
//! A control is built completely first and then handed to
//! [`Frame::register_control`](crate::Frame::register_control), which sets
//! its owner. Positions are relative to the owning frame's interior.
//!
//! # Key Types
//!
//! - [`Control`] - the trait every control implements
//! - [`ControlBase`] - shared state (visibility, geometry, owner)
//! - [`FramePainter`] - interior-clipped drawing handed to [`Control::draw`]
//! - [`Panel`] - a filled, optionally outlined and labelled rectangle
//!
//! # Example
//!
//! ```
//! use trellis::{Control, Frame, Panel};
//! use trellis_render::Color;
//!
//! let mut frame = Frame::new("Tools", 10, 10, 200, 150, true);
//! let panel = Panel::new(4, 4, 60, 20)
//!     .with_color(Color::LIGHT_GRAY)
//!     .with_label("OK");
//! frame.register_control(Box::new(panel));
//! assert_eq!(frame.controls().len(), 1);
//! ```

use std::sync::Arc;

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Bitmap, Color, DrawingSurface, Font, Point, Rect, Size};

use crate::event::{Event, EventKind};
use crate::manager::FrameId;

// ============================================================================
// Control Base
// ============================================================================

/// State shared by every control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBase {
    visible: bool,
    position: Point,
    size: Size,
    owner: Option<FrameId>,
}

impl ControlBase {
    /// Create a visible control base at an interior-relative position.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            visible: true,
            position: Point::new(x, y),
            size: Size::new(width, height),
            owner: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Bounds relative to the owning frame's interior.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// The frame this control is registered with.
    pub fn owner(&self) -> Option<FrameId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<FrameId>) {
        self.owner = owner;
    }
}

// ============================================================================
// Control Trait
// ============================================================================

/// A drawable, event-receiving region inside a frame.
pub trait Control {
    // =========================================================================
    // Required Methods
    // =========================================================================

    /// Get a reference to the control's base.
    fn control_base(&self) -> &ControlBase;

    /// Get a mutable reference to the control's base.
    fn control_base_mut(&mut self) -> &mut ControlBase;

    /// Draw the control. The painter's origin is the control's top-left
    /// corner and everything is clipped to the frame interior.
    fn draw(&self, painter: &mut FramePainter<'_>);

    /// Handle an event in frame-interior coordinates.
    ///
    /// Returns `true` if the event was consumed.
    fn on_event(&mut self, event: &Event) -> bool;

    // =========================================================================
    // Provided Methods
    // =========================================================================

    fn is_visible(&self) -> bool {
        self.control_base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.control_base_mut().set_visible(visible);
    }

    fn position(&self) -> Point {
        self.control_base().position()
    }

    fn set_position(&mut self, position: Point) {
        self.control_base_mut().set_position(position);
    }

    fn size(&self) -> Size {
        self.control_base().size()
    }

    fn set_size(&mut self, size: Size) {
        self.control_base_mut().set_size(size);
    }

    fn bounds(&self) -> Rect {
        self.control_base().bounds()
    }

    fn owner(&self) -> Option<FrameId> {
        self.control_base().owner()
    }
}

// ============================================================================
// Frame Painter
// ============================================================================

/// A surface adapter that drops everything outside a clip rectangle.
struct Clipped<'a> {
    inner: &'a mut dyn DrawingSurface,
    clip: Rect,
}

impl DrawingSurface for Clipped<'_> {
    fn size(&self) -> Size {
        self.inner.size()
    }

    fn clear(&mut self, color: Color) {
        self.inner.fill_rect(self.clip, color);
    }

    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        if self.clip.contains(Point::new(x, y)) {
            self.inner.draw_point(x, y, color);
        }
    }

    fn present(&mut self) {}

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(clipped) = rect.intersect(&self.clip) {
            self.inner.fill_rect(clipped, color);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        if self.clip.contains_rect(&rect) {
            self.inner.stroke_rect(rect, color);
            return;
        }
        let (left, top) = (rect.left(), rect.top());
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        let clip = self.clip;
        for x in left.max(clip.left())..=right.min(clip.right().saturating_sub(1)) {
            self.draw_point(x, top, color);
            self.draw_point(x, bottom, color);
        }
        for y in top.max(clip.top())..=bottom.min(clip.bottom().saturating_sub(1)) {
            self.draw_point(left, y, color);
            self.draw_point(right, y, color);
        }
    }

    fn draw_text(&mut self, text: &str, font: &Font, color: Color, x: i32, y: i32) {
        let extent = Rect::new(x, y, font.text_width(text), font.cell_height() as i32);
        if self.clip.contains_rect(&extent) {
            self.inner.draw_text(text, font, color, x, y);
            return;
        }
        // Partially visible text goes through the point-based default so
        // every glyph pixel is clipped.
        let mut glyphs = GlyphClip { surface: self };
        glyphs.draw_text(text, font, color, x, y);
    }

    fn draw_image_alpha(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        for (px, py, color) in bitmap.pixels() {
            if !color.is_transparent() {
                self.draw_point(x.saturating_add(px as i32), y.saturating_add(py as i32), color);
            }
        }
    }
}

/// Routes the default text rasterizer through [`Clipped::draw_point`].
struct GlyphClip<'a, 'b> {
    surface: &'a mut Clipped<'b>,
}

impl DrawingSurface for GlyphClip<'_, '_> {
    fn size(&self) -> Size {
        self.surface.size()
    }

    fn clear(&mut self, _color: Color) {}

    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.surface.draw_point(x, y, color);
    }

    fn present(&mut self) {}
}

/// Drawing handle passed to [`Control::draw`].
///
/// Coordinates are relative to the control's top-left corner. Everything is
/// clipped to the owning frame's interior.
pub struct FramePainter<'a> {
    target: Clipped<'a>,
    origin: Point,
    size: Size,
    font: &'a Font,
}

impl<'a> FramePainter<'a> {
    /// Create a painter for a control at screen position `origin`, clipped
    /// to `clip` (the frame interior in screen space).
    pub fn new(
        surface: &'a mut dyn DrawingSurface,
        clip: Rect,
        origin: Point,
        size: Size,
        font: &'a Font,
    ) -> Self {
        Self {
            target: Clipped { inner: surface, clip },
            origin,
            size,
            font,
        }
    }

    /// The control's local rectangle (origin at 0,0).
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    /// The font frames use for titles.
    pub fn font(&self) -> &Font {
        self.font
    }

    /// Draw a single pixel.
    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        let p = self.origin.offset(x, y);
        self.target.draw_point(p.x, p.y, color);
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.target
            .fill_rect(rect.offset(self.origin.x, self.origin.y), color);
    }

    /// Draw a 1px rectangle outline.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.target
            .stroke_rect(rect.offset(self.origin.x, self.origin.y), color);
    }

    /// Draw text with the frame font.
    pub fn draw_text(&mut self, text: &str, color: Color, x: i32, y: i32) {
        let p = self.origin.offset(x, y);
        self.target.draw_text(text, self.font, color, p.x, p.y);
    }

    /// Draw a bitmap, skipping transparent pixels.
    pub fn draw_image_alpha(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        let p = self.origin.offset(x, y);
        self.target.draw_image_alpha(bitmap, p.x, p.y);
    }
}

// ============================================================================
// Panel
// ============================================================================

/// A filled rectangle with an optional outline and centered label.
///
/// Emits [`clicked`](Panel::clicked) with the interior-relative press
/// position when pressed with the left button.
pub struct Panel {
    base: ControlBase,
    color: Color,
    outline: Option<Color>,
    label: Option<String>,
    label_color: Color,
    pressed: bool,
    /// Signal emitted on a left-button press inside the panel.
    pub clicked: Arc<Signal<Point>>,
}

impl Panel {
    /// Create a panel at an interior-relative position.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            base: ControlBase::new(x, y, width, height),
            color: Color::LIGHT_GRAY,
            outline: None,
            label: None,
            label_color: Color::BLACK,
            pressed: false,
            clicked: Arc::new(Signal::new()),
        }
    }

    /// Set the fill color using builder pattern.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set an outline color using builder pattern.
    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = Some(color);
        self
    }

    /// Set a label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the label color using builder pattern.
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether the left button is currently held on this panel.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("base", &self.base)
            .field("color", &self.color)
            .field("label", &self.label)
            .field("pressed", &self.pressed)
            .finish()
    }
}

impl Control for Panel {
    fn control_base(&self) -> &ControlBase {
        &self.base
    }

    fn control_base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn draw(&self, painter: &mut FramePainter<'_>) {
        let rect = painter.rect();
        painter.fill_rect(rect, self.color);
        if let Some(outline) = self.outline {
            painter.stroke_rect(rect, outline);
        }
        if let Some(label) = &self.label {
            let font = painter.font();
            let x = rect.width().saturating_sub(font.text_width(label)) / 2;
            let y = rect.height().saturating_sub(font.cell_height() as i32) / 2;
            painter.draw_text(label, self.label_color, x, y);
        }
    }

    fn on_event(&mut self, event: &Event) -> bool {
        match event.kind {
            EventKind::MouseDownLeft => {
                self.pressed = true;
                let local = event.position() - self.base.position();
                tracing::trace!(target: targets::CONTROL, x = local.x, y = local.y, "panel clicked");
                self.clicked.emit(local);
                true
            }
            EventKind::MouseUpLeft => {
                self.pressed = false;
                true
            }
            _ => false,
        }
    }
}
