//! Frames: top-level windows composited onto the desktop surface.
//!
//! A [`Frame`] owns its screen-space geometry, its decoration flags, its
//! child controls and the pointer interaction state machine that drives
//! drag-to-move, edge-snap-to-fullscreen, restore and close.
//!
//! # Geometry
//!
//! A bordered frame has a 1px border, a 20px titlebar whose first row is the
//! top border, and a 1px bottom border. The interior (the area controls and
//! [`Frame::plot_pixel`] draw into) therefore starts at `(1, 21)` and is
//! `(max(0, w - 2), max(0, h - 22))` large. A borderless frame's interior is
//! the whole frame.
//!
//! # Interaction
//!
//! [`Frame::handle_mouse`] runs once per tick with the polled pointer. It
//! evaluates, in order: drag start, snap preview, drag end (snap, restore or
//! move), drag feedback, close box, and finally stores the pointer button
//! for edge detection on the next tick.

use trellis_core::logging::targets;
use trellis_render::{Color, DrawingSurface, Font, Point, Rect, Size};

use crate::config::FrameStyle;
use crate::control::{Control, FramePainter};
use crate::event::Event;
use crate::manager::{FrameId, ManagerId};
use crate::pointer::{PointerButton, PointerState};

/// Width of the side and bottom borders.
pub const BORDER_WIDTH: i32 = 1;
/// Height of the titlebar, including the top border row.
pub const TITLEBAR_HEIGHT: i32 = 20;
/// Width of the close box hotzone at the right end of the titlebar.
pub const CLOSE_HOTZONE_WIDTH: i32 = 24;

/// Offset of the interior from the frame origin when bordered.
const INTERIOR_INSET: Point = Point::new(BORDER_WIDTH, TITLEBAR_HEIGHT + BORDER_WIDTH);

// ============================================================================
// Interaction State
// ============================================================================

/// Whether a frame is being dragged by its titlebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingTitlebar,
}

/// Whether a frame is snapped to fill the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    #[default]
    Normal,
    /// Maximized to the screen with the previous geometry saved for restore.
    WindowedFullscreen,
}

/// Transient outline produced by the input pass and drawn after all frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Full-screen outline shown while a drag hovers the snap zone.
    SnapPreview(Rect),
    /// Outline following the pointer during a drag.
    DragOutline(Rect),
}

impl Overlay {
    pub fn rect(&self) -> Rect {
        match *self {
            Overlay::SnapPreview(rect) | Overlay::DragOutline(rect) => rect,
        }
    }
}

/// Per-pass input context shared by all frames in one tick.
///
/// Carries the polled pointer, the global drag token and the overlays
/// produced so far. The manager sets [`occluded`](Self::set_occluded) before
/// handing the context to each frame.
#[derive(Debug)]
pub struct InputContext<'a> {
    pointer: &'a PointerState,
    screen: Rect,
    snap_threshold: i32,
    occluded: bool,
    drag_in_progress: bool,
    overlays: Vec<Overlay>,
}

impl<'a> InputContext<'a> {
    pub fn new(pointer: &'a PointerState, screen: Rect, snap_threshold: i32) -> Self {
        Self {
            pointer,
            screen,
            snap_threshold,
            occluded: false,
            drag_in_progress: false,
            overlays: Vec::new(),
        }
    }

    /// Start the pass with the drag token already held.
    pub fn with_drag_in_progress(mut self, drag_in_progress: bool) -> Self {
        self.drag_in_progress = drag_in_progress;
        self
    }

    pub fn set_occluded(&mut self, occluded: bool) {
        self.occluded = occluded;
    }

    pub fn pointer(&self) -> &PointerState {
        self.pointer
    }

    pub fn drag_in_progress(&self) -> bool {
        self.drag_in_progress
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn into_overlays(self) -> Vec<Overlay> {
        self.overlays
    }

    fn in_snap_zone(&self) -> bool {
        self.pointer.y < self.snap_threshold
    }
}

/// What a frame asks of its manager after an input pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameResponse {
    /// The frame started a drag and wants to become active.
    pub activate: bool,
    /// The close box was clicked.
    pub close: bool,
}

// ============================================================================
// Frame
// ============================================================================

/// A top-level window.
pub struct Frame {
    id: Option<FrameId>,
    owner: Option<ManagerId>,
    title: String,
    geometry: Rect,
    interior: Size,
    has_border: bool,
    background: Color,
    visible: bool,
    active: bool,
    disposed: bool,

    drag_state: DragState,
    fullscreen_state: FullscreenState,
    restore_geometry: Option<Rect>,
    drag_anchor: Point,
    moving_size: Size,
    last_button: PointerButton,

    controls: Vec<Box<dyn Control>>,
}

impl Frame {
    /// Create a visible frame with screen-space geometry.
    pub fn new(title: impl Into<String>, x: i32, y: i32, width: i32, height: i32, has_border: bool) -> Self {
        let geometry = Rect::new(x, y, width, height);
        Self {
            id: None,
            owner: None,
            title: title.into(),
            geometry,
            interior: interior_size(geometry.size, has_border),
            has_border,
            background: FrameStyle::default().background,
            visible: true,
            active: false,
            disposed: false,
            drag_state: DragState::Idle,
            fullscreen_state: FullscreenState::Normal,
            restore_geometry: None,
            drag_anchor: Point::ZERO,
            moving_size: Size::ZERO,
            last_button: PointerButton::None,
            controls: Vec::new(),
        }
    }

    /// Create a bordered frame.
    pub fn bordered(title: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(title, x, y, width, height, true)
    }

    /// Set the background color using builder pattern.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set visibility using builder pattern.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    // =========================================================================
    // Identity & Lifecycle
    // =========================================================================

    /// The id assigned by the manager this frame is registered with.
    pub fn id(&self) -> Option<FrameId> {
        self.id
    }

    /// The manager this frame is registered with.
    pub fn owner(&self) -> Option<ManagerId> {
        self.owner
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Make the frame inert. Idempotent.
    ///
    /// Releases the controls; afterwards every mutation is ignored, nothing
    /// is drawn, no input is handled and geometry queries return zero. The
    /// frame stays in its manager's list until removed.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::debug!(target: targets::FRAME, title = %self.title, "frame disposed");
        self.disposed = true;
        self.controls.clear();
        self.drag_state = DragState::Idle;
    }

    pub(crate) fn attach(&mut self, id: FrameId, owner: ManagerId) {
        self.id = Some(id);
        self.owner = Some(owner);
        for control in &mut self.controls {
            control.control_base_mut().set_owner(Some(id));
        }
    }

    pub(crate) fn detach(&mut self) {
        self.id = None;
        self.owner = None;
        self.active = false;
        self.drag_state = DragState::Idle;
        for control in &mut self.controls {
            control.control_base_mut().set_owner(None);
        }
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Full frame rectangle in screen space.
    pub fn geometry(&self) -> Rect {
        if self.disposed { Rect::ZERO } else { self.geometry }
    }

    pub fn position(&self) -> Point {
        self.geometry().origin
    }

    pub fn size(&self) -> Size {
        self.geometry().size
    }

    /// Size of the drawable interior.
    pub fn interior_size(&self) -> Size {
        if self.disposed { Size::ZERO } else { self.interior }
    }

    /// Interior rectangle in screen space.
    pub fn interior_rect(&self) -> Rect {
        let geometry = self.geometry();
        Rect::from_origin_size(geometry.origin + self.inset(), self.interior_size())
    }

    /// Titlebar rectangle in screen space, if the frame is bordered.
    pub fn titlebar_rect(&self) -> Option<Rect> {
        if !self.has_border || self.disposed {
            return None;
        }
        let g = self.geometry;
        Some(Rect::new(g.left(), g.top(), g.width(), TITLEBAR_HEIGHT))
    }

    /// Close box hotzone in screen space, if the frame is bordered.
    pub fn close_box_rect(&self) -> Option<Rect> {
        let titlebar = self.titlebar_rect()?;
        let width = CLOSE_HOTZONE_WIDTH.min(titlebar.width());
        Some(Rect::new(titlebar.right().saturating_sub(width), titlebar.top(), width, TITLEBAR_HEIGHT))
    }

    /// Whether `point` is on the titlebar but not on the close box.
    pub fn is_in_drag_area(&self, point: Point) -> bool {
        let Some(titlebar) = self.titlebar_rect() else {
            return false;
        };
        titlebar.contains(point) && !self.close_box_rect().is_some_and(|r| r.contains(point))
    }

    /// Move the frame's origin.
    ///
    /// Like [`resize`](Self::resize) and [`set_geometry`](Self::set_geometry),
    /// this takes a snapped frame out of fullscreen and forgets its restore
    /// geometry.
    pub fn move_to(&mut self, x: i32, y: i32) {
        if self.disposed {
            return;
        }
        self.leave_fullscreen();
        self.geometry.origin = Point::new(x, y);
    }

    /// Resize the frame and recompute its interior.
    pub fn resize(&mut self, width: i32, height: i32) {
        if self.disposed {
            return;
        }
        self.leave_fullscreen();
        self.apply_geometry(Rect::from_origin_size(self.geometry.origin, Size::new(width, height)));
    }

    /// Set position and size at once.
    pub fn set_geometry(&mut self, geometry: Rect) {
        if self.disposed {
            return;
        }
        self.leave_fullscreen();
        self.apply_geometry(geometry);
    }

    fn apply_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
        self.interior = interior_size(geometry.size, self.has_border);
    }

    fn leave_fullscreen(&mut self) {
        if self.fullscreen_state == FullscreenState::WindowedFullscreen {
            self.fullscreen_state = FullscreenState::Normal;
            self.restore_geometry = None;
            tracing::debug!(target: targets::FRAME, title = %self.title, "left fullscreen by explicit geometry change");
        }
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.title = title.into();
    }

    pub fn has_border(&self) -> bool {
        self.has_border
    }

    /// Toggle the border and titlebar. The interior is recomputed.
    pub fn set_border(&mut self, has_border: bool) {
        if self.disposed {
            return;
        }
        self.has_border = has_border;
        self.interior = interior_size(self.geometry.size, has_border);
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        if self.disposed {
            return;
        }
        self.background = color;
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.disposed
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.disposed {
            return;
        }
        self.visible = visible;
    }

    // =========================================================================
    // Interaction State
    // =========================================================================

    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_state == DragState::DraggingTitlebar
    }

    pub fn fullscreen_state(&self) -> FullscreenState {
        self.fullscreen_state
    }

    /// Geometry saved when the frame snapped to fullscreen.
    pub fn restore_geometry(&self) -> Option<Rect> {
        self.restore_geometry
    }

    /// Pointer-to-origin offset captured at drag start.
    pub fn drag_anchor(&self) -> Point {
        self.drag_anchor
    }

    /// Outline size used while dragging.
    pub fn moving_size(&self) -> Size {
        self.moving_size
    }

    /// Pointer button seen at the end of the previous input pass.
    pub fn last_button(&self) -> PointerButton {
        self.last_button
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Add a fully built control. Its position is relative to the interior.
    pub fn register_control(&mut self, mut control: Box<dyn Control>) {
        if self.disposed {
            return;
        }
        control.control_base_mut().set_owner(self.id);
        self.controls.push(control);
    }

    /// Controls in registration order.
    pub fn controls(&self) -> &[Box<dyn Control>] {
        &self.controls
    }

    pub fn control_mut(&mut self, index: usize) -> Option<&mut (dyn Control + 'static)> {
        self.controls.get_mut(index).map(|c| c.as_mut())
    }

    /// Deliver an interior-local event to the first visible control that
    /// contains it. Returns whether a control consumed the event.
    pub fn dispatch_event(&mut self, event: &Event) -> bool {
        if self.disposed || !self.visible {
            return false;
        }
        let point = event.position();
        let Some(control) = self
            .controls
            .iter_mut()
            .find(|c| c.is_visible() && c.bounds().contains(point))
        else {
            return false;
        };
        let handled = control.on_event(event);
        tracing::trace!(target: targets::CONTROL, kind = ?event.kind, x = point.x, y = point.y, handled, "event dispatched");
        handled
    }

    // =========================================================================
    // Coordinate Transforms
    // =========================================================================

    fn inset(&self) -> Point {
        if self.has_border { INTERIOR_INSET } else { Point::ZERO }
    }

    /// Convert a screen point to interior-local coordinates.
    ///
    /// Returns `None` when the point is outside the full frame rectangle.
    /// Points on the titlebar or border map to negative or out-of-interior
    /// local coordinates.
    pub fn to_local(&self, screen: Point) -> Option<Point> {
        if self.disposed || !self.geometry.contains(screen) {
            return None;
        }
        Some(screen - self.geometry.origin - self.inset())
    }

    /// Convert an interior-local point to screen coordinates. No bounds check.
    pub fn to_global(&self, local: Point) -> Point {
        local + self.position() + self.inset()
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw one pixel in interior-local coordinates. Points outside the
    /// interior are dropped.
    pub fn plot_pixel(&self, surface: &mut dyn DrawingSurface, x: i32, y: i32, color: Color) {
        if self.disposed {
            return;
        }
        let local = Point::new(x, y);
        if !Rect::from_origin_size(Point::ZERO, self.interior).contains(local) {
            return;
        }
        let screen = self.to_global(local);
        surface.draw_point(screen.x, screen.y, color);
    }

    /// Fill the interior with a color.
    pub fn fill_interior(&self, surface: &mut dyn DrawingSurface, color: Color) {
        if self.disposed {
            return;
        }
        surface.fill_rect(self.interior_rect(), color);
    }

    /// Draw decorations, background and visible controls.
    pub fn draw(&self, surface: &mut dyn DrawingSurface, style: &FrameStyle, font: &Font) {
        if self.disposed || !self.visible {
            return;
        }

        if let Some(titlebar) = self.titlebar_rect() {
            surface.fill_rect(titlebar, style.titlebar);
            surface.stroke_rect(titlebar, style.titlebar_outline);
            surface.stroke_rect(self.geometry, style.border);
            let text = titlebar.origin.offset(2, 2);
            surface.draw_text(&self.title, font, style.title_text, text.x, text.y);
            if let Some(hotzone) = self.close_box_rect() {
                draw_close_glyph(surface, hotzone, style.close_box);
            }
        }

        let interior = self.interior_rect();
        surface.fill_rect(interior, self.background);

        for control in self.controls.iter().filter(|c| c.is_visible()) {
            let mut painter = FramePainter::new(
                surface,
                interior,
                interior.origin + control.position(),
                control.size(),
                font,
            );
            control.draw(&mut painter);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Run one tick of the interaction state machine.
    pub fn handle_mouse(&mut self, ctx: &mut InputContext<'_>) -> FrameResponse {
        let mut response = FrameResponse::default();
        if self.disposed {
            return response;
        }

        let pointer = *ctx.pointer;
        let pos = pointer.position();
        let left_held = pointer.button.is_primary();
        let pressed_now = left_held && !self.last_button.is_primary();
        let interactive = self.visible && self.has_border && !ctx.occluded;

        // Drag start.
        if self.drag_state == DragState::Idle
            && interactive
            && pressed_now
            && !ctx.drag_in_progress
            && self.is_in_drag_area(pos)
        {
            self.drag_anchor = pos - self.geometry.origin;
            self.moving_size = match (self.fullscreen_state, self.restore_geometry) {
                (FullscreenState::WindowedFullscreen, Some(saved)) => saved.size,
                _ => self.geometry.size,
            };
            self.drag_state = DragState::DraggingTitlebar;
            ctx.drag_in_progress = true;
            response.activate = !self.active;
            tracing::debug!(
                target: targets::FRAME,
                title = %self.title,
                anchor_x = self.drag_anchor.x,
                anchor_y = self.drag_anchor.y,
                "drag started"
            );
        }

        // Snap preview.
        if self.is_dragging() && left_held && ctx.in_snap_zone() {
            ctx.overlays.push(Overlay::SnapPreview(ctx.screen));
        }

        // Drag end.
        if self.is_dragging() && !left_held {
            self.drag_state = DragState::Idle;
            ctx.drag_in_progress = false;
            if ctx.in_snap_zone() {
                self.snap_to(ctx.screen);
            } else if self.fullscreen_state == FullscreenState::WindowedFullscreen {
                self.restore();
            } else {
                let origin = pos - self.drag_anchor;
                self.geometry.origin = origin;
                tracing::debug!(target: targets::FRAME, title = %self.title, x = origin.x, y = origin.y, "drag ended");
            }
        }

        // Drag feedback.
        if self.is_dragging() {
            let outline = Rect::from_origin_size(pos - self.drag_anchor, self.moving_size);
            ctx.overlays.push(Overlay::DragOutline(outline));
        }

        // Close box.
        if interactive && pressed_now && self.close_box_rect().is_some_and(|r| r.contains(pos)) {
            tracing::debug!(target: targets::FRAME, title = %self.title, "close requested");
            response.close = true;
        }

        self.last_button = pointer.button;
        response
    }

    fn snap_to(&mut self, screen: Rect) {
        // Snapping again while snapped keeps the original restore geometry.
        if self.fullscreen_state == FullscreenState::Normal {
            self.restore_geometry = Some(self.geometry);
        }
        self.apply_geometry(screen);
        self.fullscreen_state = FullscreenState::WindowedFullscreen;
        tracing::debug!(target: targets::FRAME, title = %self.title, "snapped to fullscreen");
    }

    fn restore(&mut self) {
        self.fullscreen_state = FullscreenState::Normal;
        if let Some(saved) = self.restore_geometry.take() {
            self.apply_geometry(saved);
        }
        tracing::debug!(target: targets::FRAME, title = %self.title, "restored from fullscreen");
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("geometry", &self.geometry)
            .field("has_border", &self.has_border)
            .field("visible", &self.visible)
            .field("active", &self.active)
            .field("disposed", &self.disposed)
            .field("drag_state", &self.drag_state)
            .field("fullscreen_state", &self.fullscreen_state)
            .field("controls", &self.controls.len())
            .finish()
    }
}

/// Interior size for a frame of `size`.
pub fn interior_size(size: Size, has_border: bool) -> Size {
    if has_border {
        Size::new(
            size.width.saturating_sub(2 * BORDER_WIDTH).max(0),
            size.height.saturating_sub(TITLEBAR_HEIGHT + 2 * BORDER_WIDTH).max(0),
        )
    } else {
        size
    }
}

/// An "x" in a 12px box centered vertically in the hotzone.
fn draw_close_glyph(surface: &mut dyn DrawingSurface, hotzone: Rect, color: Color) {
    let side = 12.min(hotzone.width().saturating_sub(2)).min(TITLEBAR_HEIGHT - 4);
    if side <= 4 {
        return;
    }
    let left = hotzone.left().saturating_add((hotzone.width() - side) / 2);
    let top = hotzone.top().saturating_add((TITLEBAR_HEIGHT - side) / 2);
    surface.stroke_rect(Rect::new(left, top, side, side), color);
    for i in 3..side - 3 {
        let y = top.saturating_add(i);
        surface.draw_point(left.saturating_add(i), y, color);
        surface.draw_point(left.saturating_add(side - 1 - i), y, color);
    }
}

#[cfg(test)]
mod tests {
    use trellis_render::{DrawCommand, RecordingSurface};

    use super::*;
    use crate::control::Panel;

    const SCREEN: Rect = Rect::new(0, 0, 1024, 768);

    fn tick(frame: &mut Frame, pointer: PointerState) -> (FrameResponse, Vec<Overlay>) {
        let mut ctx = InputContext::new(&pointer, SCREEN, 3);
        let response = frame.handle_mouse(&mut ctx);
        (response, ctx.into_overlays())
    }

    #[test]
    fn test_interior_size_bordered() {
        let frame = Frame::bordered("A", 10, 10, 500, 500);
        assert_eq!(frame.interior_size(), Size::new(498, 478));
        assert_eq!(frame.interior_rect(), Rect::new(11, 31, 498, 478));
    }

    #[test]
    fn test_interior_size_borderless_and_degenerate() {
        let mut frame = Frame::new("B", 0, 0, 50, 40, false);
        assert_eq!(frame.interior_size(), Size::new(50, 40));

        frame.set_border(true);
        assert_eq!(frame.interior_size(), Size::new(48, 18));

        frame.resize(1, 10);
        assert_eq!(frame.interior_size(), Size::ZERO);

        frame.set_border(false);
        assert_eq!(frame.interior_size(), Size::new(1, 10));
    }

    #[test]
    fn test_to_local_round_trip() {
        let frame = Frame::bordered("A", 10, 10, 500, 500);
        for (x, y) in [(11, 31), (250, 250), (508, 508), (10, 10), (400, 20)] {
            let screen = Point::new(x, y);
            let local = frame.to_local(screen).unwrap();
            assert_eq!(frame.to_global(local), screen);
        }
        assert_eq!(frame.to_local(Point::new(11, 31)), Some(Point::ZERO));
        assert_eq!(frame.to_local(Point::new(9, 50)), None);
        assert_eq!(frame.to_local(Point::new(510, 50)), None);
    }

    #[test]
    fn test_plot_pixel_bounds() {
        let frame = Frame::bordered("A", 10, 10, 100, 100);
        let mut surface = RecordingSurface::new(200, 200);
        frame.plot_pixel(&mut surface, 0, 0, Color::RED);
        frame.plot_pixel(&mut surface, 98, 0, Color::RED);
        frame.plot_pixel(&mut surface, -1, 0, Color::RED);
        frame.plot_pixel(&mut surface, 97, 77, Color::RED);
        frame.plot_pixel(&mut surface, 0, 78, Color::RED);

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Point { x: 11, y: 31, color: Color::RED },
                DrawCommand::Point { x: 108, y: 108, color: Color::RED },
            ]
        );
    }

    #[test]
    fn test_titlebar_and_close_box() {
        let frame = Frame::bordered("A", 10, 10, 500, 500);
        assert_eq!(frame.titlebar_rect(), Some(Rect::new(10, 10, 500, 20)));
        assert_eq!(frame.close_box_rect(), Some(Rect::new(486, 10, 24, 20)));
        assert!(frame.is_in_drag_area(Point::new(20, 15)));
        assert!(!frame.is_in_drag_area(Point::new(490, 15)));
        assert!(!frame.is_in_drag_area(Point::new(20, 35)));

        let borderless = Frame::new("B", 0, 0, 10, 10, false);
        assert_eq!(borderless.titlebar_rect(), None);
        assert_eq!(borderless.close_box_rect(), None);
    }

    #[test]
    fn test_drag_move() {
        let mut frame = Frame::bordered("A", 10, 10, 500, 500);

        let (response, _) = tick(&mut frame, PointerState::pressed(20, 15));
        assert!(frame.is_dragging());
        assert!(response.activate);
        assert_eq!(frame.drag_anchor(), Point::new(10, 5));

        let (_, overlays) = tick(&mut frame, PointerState::pressed(100, 100));
        assert_eq!(overlays, vec![Overlay::DragOutline(Rect::new(90, 95, 500, 500))]);

        let (_, overlays) = tick(&mut frame, PointerState::released(100, 100));
        assert!(overlays.is_empty());
        assert_eq!(frame.drag_state(), DragState::Idle);
        assert_eq!(frame.geometry(), Rect::new(90, 95, 500, 500));
    }

    #[test]
    fn test_held_button_does_not_start_drag() {
        let mut frame = Frame::bordered("A", 10, 10, 500, 500);
        tick(&mut frame, PointerState::pressed(600, 600));
        tick(&mut frame, PointerState::pressed(20, 15));
        assert!(!frame.is_dragging());
    }

    #[test]
    fn test_right_button_does_not_drag() {
        let mut frame = Frame::bordered("A", 10, 10, 500, 500);
        tick(&mut frame, PointerState::new(20, 15, PointerButton::Right));
        assert!(!frame.is_dragging());
    }

    #[test]
    fn test_occluded_and_token_block_drag() {
        let mut frame = Frame::bordered("A", 10, 10, 500, 500);
        let pointer = PointerState::pressed(20, 15);

        let mut ctx = InputContext::new(&pointer, SCREEN, 3);
        ctx.set_occluded(true);
        frame.handle_mouse(&mut ctx);
        assert!(!frame.is_dragging());

        let mut frame = Frame::bordered("A", 10, 10, 500, 500);
        let mut ctx = InputContext::new(&pointer, SCREEN, 3).with_drag_in_progress(true);
        frame.handle_mouse(&mut ctx);
        assert!(!frame.is_dragging());
    }

    #[test]
    fn test_snap_and_restore() {
        let mut frame = Frame::bordered("A", 10, 10, 500, 500);
        tick(&mut frame, PointerState::pressed(20, 15));
        let (_, overlays) = tick(&mut frame, PointerState::pressed(200, 1));
        assert!(overlays.contains(&Overlay::SnapPreview(SCREEN)));

        tick(&mut frame, PointerState::released(200, 1));
        assert_eq!(frame.geometry(), SCREEN);
        assert_eq!(frame.fullscreen_state(), FullscreenState::WindowedFullscreen);
        assert_eq!(frame.restore_geometry(), Some(Rect::new(10, 10, 500, 500)));
        assert_eq!(frame.interior_size(), Size::new(1022, 746));

        tick(&mut frame, PointerState::pressed(300, 5));
        assert_eq!(frame.moving_size(), Size::new(500, 500));
        tick(&mut frame, PointerState::released(400, 300));
        assert_eq!(frame.geometry(), Rect::new(10, 10, 500, 500));
        assert_eq!(frame.fullscreen_state(), FullscreenState::Normal);
        assert_eq!(frame.restore_geometry(), None);
    }

    #[test]
    fn test_resnap_keeps_first_restore_geometry() {
        let mut frame = Frame::bordered("A", 10, 10, 500, 500);
        tick(&mut frame, PointerState::pressed(20, 15));
        tick(&mut frame, PointerState::released(200, 1));
        tick(&mut frame, PointerState::pressed(300, 5));
        tick(&mut frame, PointerState::released(600, 0));

        assert_eq!(frame.geometry(), SCREEN);
        assert_eq!(frame.restore_geometry(), Some(Rect::new(10, 10, 500, 500)));
    }

    #[test]
    fn test_explicit_geometry_leaves_fullscreen() {
        let snapped = || {
            let mut frame = Frame::bordered("A", 10, 10, 500, 500);
            tick(&mut frame, PointerState::pressed(20, 15));
            tick(&mut frame, PointerState::released(200, 1));
            assert_eq!(frame.fullscreen_state(), FullscreenState::WindowedFullscreen);
            frame
        };

        let mut moved = snapped();
        moved.move_to(40, 40);
        let mut resized = snapped();
        resized.resize(400, 300);
        let mut placed = snapped();
        placed.set_geometry(Rect::new(5, 5, 50, 50));

        for frame in [&moved, &resized, &placed] {
            assert_eq!(frame.fullscreen_state(), FullscreenState::Normal);
            assert_eq!(frame.restore_geometry(), None);
        }
        assert_eq!(resized.geometry(), Rect::new(0, 0, 400, 300));
        assert_eq!(resized.interior_size(), Size::new(398, 278));

        // A later drag moves by the anchor instead of jumping back.
        tick(&mut resized, PointerState::pressed(100, 10));
        assert_eq!(resized.moving_size(), Size::new(400, 300));
        tick(&mut resized, PointerState::released(300, 300));
        assert_eq!(resized.geometry(), Rect::new(200, 290, 400, 300));
    }

    #[test]
    fn test_extreme_sizes_saturate() {
        let mut frame = Frame::bordered("A", 0, 0, 100, 100);
        frame.resize(i32::MIN, 30);
        assert_eq!(frame.interior_size(), Size::new(0, 8));
        assert_eq!(frame.to_local(Point::new(1, 21)), None);
        assert!(frame.close_box_rect().is_some());

        frame.set_geometry(Rect::new(i32::MAX - 5, i32::MAX - 5, i32::MAX, i32::MAX));
        assert_eq!(frame.geometry().right(), i32::MAX);
        assert_eq!(frame.interior_size(), Size::new(i32::MAX - 2, i32::MAX - 22));
        assert!(!frame.is_in_drag_area(Point::new(i32::MIN, i32::MIN)));

        let mut surface = RecordingSurface::new(64, 64);
        frame.draw(&mut surface, &FrameStyle::default(), &Font::default());
        tick(&mut frame, PointerState::pressed(i32::MAX, i32::MAX));
    }

    #[test]
    fn test_close_box_needs_fresh_press() {
        let mut frame = Frame::bordered("A", 10, 10, 500, 500);
        let (response, _) = tick(&mut frame, PointerState::pressed(495, 15));
        assert!(response.close);
        assert!(!frame.is_dragging());

        let (response, _) = tick(&mut frame, PointerState::pressed(495, 15));
        assert!(!response.close);
    }

    #[test]
    fn test_dispose_is_idempotent_and_inert() {
        let mut frame = Frame::bordered("A", 10, 10, 100, 100);
        frame.register_control(Box::new(Panel::new(0, 0, 10, 10)));
        frame.dispose();
        frame.dispose();

        assert!(frame.is_disposed());
        assert_eq!(frame.geometry(), Rect::ZERO);
        assert_eq!(frame.interior_size(), Size::ZERO);
        assert!(frame.controls().is_empty());

        frame.move_to(50, 50);
        frame.resize(300, 300);
        frame.set_title("B");
        assert_eq!(frame.geometry(), Rect::ZERO);
        assert_eq!(frame.title(), "A");

        let mut surface = RecordingSurface::new(200, 200);
        frame.draw(&mut surface, &FrameStyle::default(), &Font::default());
        frame.plot_pixel(&mut surface, 1, 1, Color::RED);
        assert!(surface.commands().is_empty());

        let (response, _) = tick(&mut frame, PointerState::pressed(20, 15));
        assert_eq!(response, FrameResponse::default());
        assert!(!frame.is_dragging());
    }

    #[test]
    fn test_draw_order() {
        let mut frame = Frame::bordered("Hi", 10, 10, 100, 60).with_background(Color::GREEN);
        frame.register_control(Box::new(Panel::new(2, 2, 10, 10).with_color(Color::RED)));
        let style = FrameStyle::default();
        let mut surface = RecordingSurface::new(200, 200);
        frame.draw(&mut surface, &style, &Font::default());

        let fills: Vec<_> = surface.fills().collect();
        assert_eq!(
            fills,
            vec![
                (Rect::new(10, 10, 100, 20), style.titlebar),
                (Rect::new(11, 31, 98, 38), Color::GREEN),
                (Rect::new(13, 33, 10, 10), Color::RED),
            ]
        );
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["Hi"]);
        assert!(surface.commands().contains(&DrawCommand::StrokeRect {
            rect: Rect::new(10, 10, 100, 60),
            color: style.border,
        }));
    }

    #[test]
    fn test_hidden_frame_draws_nothing() {
        let frame = Frame::bordered("A", 0, 0, 50, 50).with_visible(false);
        let mut surface = RecordingSurface::new(100, 100);
        frame.draw(&mut surface, &FrameStyle::default(), &Font::default());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_dispatch_first_hit_in_registration_order() {
        let mut frame = Frame::bordered("A", 0, 0, 200, 200);
        let hidden = {
            let mut p = Panel::new(0, 0, 50, 50);
            p.set_visible(false);
            p
        };
        frame.register_control(Box::new(hidden));
        frame.register_control(Box::new(Panel::new(0, 0, 50, 50)));
        frame.register_control(Box::new(Panel::new(0, 0, 50, 50)));

        let event = Event::new(crate::event::EventKind::MouseDownLeft, 5, 5);
        assert!(frame.dispatch_event(&event));
        assert!(!frame.dispatch_event(&Event::new(crate::event::EventKind::MouseDownLeft, 150, 150)));
    }
}
