//! Window manager for tracking frames, z-order and the active frame.
//!
//! The `WindowManager` owns every frame on the desktop and exposes the two
//! per-tick entry points the host calls in order:
//! [`handle_input`](WindowManager::handle_input) then
//! [`draw_frames`](WindowManager::draw_frames).
//!
//! Frames live in an arena keyed by [`FrameId`]; a separate list holds the
//! z-order, last element topmost. Creation and registration append to the
//! list and make the new frame active. Activation alone does not reorder
//! unless [`DesktopConfig::with_raise_on_activate`] is set.
//!
//! # Example
//!
//! ```
//! use trellis::{DesktopConfig, PointerState, WindowManager};
//! use trellis_render::RecordingSurface;
//!
//! let mut wm = WindowManager::new(DesktopConfig::default());
//! let a = wm.create_bordered_frame("A", 10, 10, 500, 500);
//! assert_eq!(wm.active(), Some(a));
//!
//! // Click the close box.
//! let outcome = wm.handle_input(&PointerState::pressed(495, 15));
//! assert_eq!(outcome.closed, vec![a]);
//! assert!(wm.is_empty());
//!
//! let mut surface = RecordingSurface::new(1024, 768);
//! wm.draw_frames(&mut surface);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::SlotMap;
use trellis_core::Signal;
use trellis_core::logging::{span_names, targets};
use trellis_render::{DrawingSurface, Font, Point};

use crate::config::DesktopConfig;
use crate::event::Event;
use crate::frame::{Frame, InputContext, Overlay};
use crate::pointer::PointerState;

slotmap::new_key_type! {
    /// Stable handle to a frame owned by a [`WindowManager`].
    pub struct FrameId;
}

/// Unique identity of a window manager, used as a frame's owner reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManagerId(u64);

impl ManagerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// What happened during one input pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// Frames removed because their close box was clicked, in z-order.
    pub closed: Vec<FrameId>,
    /// Frame activated by a drag start.
    pub activated: Option<FrameId>,
    /// Event synthesized from the pointer delta, in screen coordinates.
    pub event: Option<Event>,
    /// Frame the event was dispatched to.
    pub event_target: Option<FrameId>,
    /// Whether a control consumed the event.
    pub event_handled: bool,
}

/// Manager for the frames on one desktop.
pub struct WindowManager {
    id: ManagerId,
    config: DesktopConfig,
    font: Font,
    frames: SlotMap<FrameId, Frame>,
    /// Z-order, last is topmost.
    order: Vec<FrameId>,
    active: Option<FrameId>,
    drag_in_progress: bool,
    overlays: Vec<Overlay>,
    last_pointer: PointerState,
    frame_created: Signal<FrameId>,
    frame_removed: Signal<FrameId>,
    active_changed: Signal<Option<FrameId>>,
}

impl WindowManager {
    /// Create an empty window manager.
    pub fn new(config: DesktopConfig) -> Self {
        let id = ManagerId::next();
        tracing::debug!(target: targets::MANAGER, manager = id.0, "window manager created");
        Self {
            id,
            config,
            font: Font::default(),
            frames: SlotMap::with_key(),
            order: Vec::new(),
            active: None,
            drag_in_progress: false,
            overlays: Vec::new(),
            last_pointer: PointerState::default(),
            frame_created: Signal::new(),
            frame_removed: Signal::new(),
            active_changed: Signal::new(),
        }
    }

    /// Set the font used for titles and controls using builder pattern.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn id(&self) -> ManagerId {
        self.id
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a frame, put it on top and make it active.
    pub fn create_frame(
        &mut self,
        title: impl Into<String>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        has_border: bool,
    ) -> FrameId {
        let frame = Frame::new(title, x, y, width, height, has_border)
            .with_background(self.config.style().background);
        self.register_frame(frame)
    }

    /// Create a bordered frame.
    pub fn create_bordered_frame(
        &mut self,
        title: impl Into<String>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> FrameId {
        self.create_frame(title, x, y, width, height, true)
    }

    /// Adopt an externally built frame: put it on top and make it active.
    ///
    /// A frame that was registered with another manager is re-owned.
    pub fn register_frame(&mut self, mut frame: Frame) -> FrameId {
        if let Some(previous) = frame.owner().filter(|owner| *owner != self.id) {
            tracing::debug!(
                target: targets::MANAGER,
                previous = previous.0,
                manager = self.id.0,
                "re-owning frame from another manager"
            );
        }
        frame.detach();

        let owner = self.id;
        let id = self.frames.insert_with_key(|id| {
            frame.attach(id, owner);
            frame
        });
        self.order.push(id);

        if let Some(frame) = self.frames.get(id) {
            tracing::debug!(
                target: targets::MANAGER,
                ?id,
                title = frame.title(),
                geometry = ?frame.geometry(),
                "frame registered"
            );
        }
        self.frame_created.emit(id);
        self.set_active_frame(Some(id));
        id
    }

    /// Remove a frame. Returns `false` if it is not managed here.
    ///
    /// If the removed frame was active, the new topmost frame becomes active.
    pub fn remove_frame(&mut self, id: FrameId) -> bool {
        self.detach_frame(id).is_some()
    }

    /// Remove a frame and hand it back, unlinked from this manager.
    pub fn detach_frame(&mut self, id: FrameId) -> Option<Frame> {
        let Some(index) = self.order.iter().position(|&f| f == id) else {
            tracing::trace!(target: targets::MANAGER, ?id, "remove of unknown frame ignored");
            return None;
        };
        self.order.remove(index);
        let mut frame = self.frames.remove(id)?;

        if frame.is_dragging() {
            self.drag_in_progress = false;
        }
        frame.detach();
        tracing::debug!(target: targets::MANAGER, ?id, title = frame.title(), "frame removed");
        self.frame_removed.emit(id);

        if self.active == Some(id) {
            self.set_active_frame(self.order.last().copied());
        }
        Some(frame)
    }

    /// Remove every frame, topmost first. Returns how many were removed.
    pub fn close_all(&mut self) -> usize {
        let ids: Vec<_> = self.order.iter().rev().copied().collect();
        ids.into_iter().filter(|&id| self.remove_frame(id)).count()
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Make a frame active. Returns `false` if it is not managed here.
    ///
    /// Raises the frame when the desktop is configured to raise on activate.
    pub fn activate(&mut self, id: FrameId) -> bool {
        if !self.frames.contains_key(id) {
            return false;
        }
        if self.config.raise_on_activate() {
            self.raise(id);
        }
        self.set_active_frame(Some(id));
        true
    }

    /// Move a frame to the top of the z-order without changing activation.
    pub fn raise(&mut self, id: FrameId) -> bool {
        let Some(index) = self.order.iter().position(|&f| f == id) else {
            return false;
        };
        let id = self.order.remove(index);
        self.order.push(id);
        tracing::trace!(target: targets::MANAGER, ?id, "frame raised");
        true
    }

    fn set_active_frame(&mut self, id: Option<FrameId>) {
        if self.active == id {
            return;
        }
        if let Some(frame) = self.active.and_then(|prev| self.frames.get_mut(prev)) {
            frame.set_active(false);
        }
        if let Some(frame) = id.and_then(|next| self.frames.get_mut(next)) {
            frame.set_active(true);
        }
        self.active = id;
        tracing::debug!(target: targets::MANAGER, active = ?id, "active frame changed");
        self.active_changed.emit(id);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id)
    }

    pub fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.get_mut(id)
    }

    pub fn active(&self) -> Option<FrameId> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: FrameId) -> bool {
        self.frames.contains_key(id)
    }

    /// Frame ids in z-order, bottom first.
    pub fn frame_ids(&self) -> &[FrameId] {
        &self.order
    }

    /// Frames in z-order, bottom first.
    pub fn frames(&self) -> impl Iterator<Item = (FrameId, &Frame)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.frames.get(id).map(|frame| (id, frame)))
    }

    /// Whether a frame is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.drag_in_progress
    }

    /// The topmost visible frame containing a screen point.
    pub fn topmost_at(&self, point: Point) -> Option<FrameId> {
        self.order.iter().rev().copied().find(|&id| {
            self.frames
                .get(id)
                .is_some_and(|f| f.is_visible() && f.geometry().contains(point))
        })
    }

    /// Outlines produced by the last input pass.
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Arrange frames in a cascade, each offset from the previous.
    pub fn cascade_frames(&mut self, start_x: i32, start_y: i32, offset: i32) {
        for (i, id) in self.order.iter().enumerate() {
            if let Some(frame) = self.frames.get_mut(*id) {
                let step = (i as i32).saturating_mul(offset);
                frame.move_to(start_x.saturating_add(step), start_y.saturating_add(step));
            }
        }
    }

    /// Arrange frames side by side across the screen.
    pub fn tile_frames_horizontal(&mut self) {
        let count = self.order.len() as i32;
        if count == 0 {
            return;
        }
        let screen = self.config.screen_rect();
        let width = screen.width() / count;
        for (i, id) in self.order.iter().enumerate() {
            if let Some(frame) = self.frames.get_mut(*id) {
                frame.move_to(i as i32 * width, 0);
                frame.resize(width, screen.height());
            }
        }
    }

    /// Arrange frames stacked down the screen.
    pub fn tile_frames_vertical(&mut self) {
        let count = self.order.len() as i32;
        if count == 0 {
            return;
        }
        let screen = self.config.screen_rect();
        let height = screen.height() / count;
        for (i, id) in self.order.iter().enumerate() {
            if let Some(frame) = self.frames.get_mut(*id) {
                frame.move_to(0, i as i32 * height);
                frame.resize(screen.width(), height);
            }
        }
    }

    // =========================================================================
    // Per-tick Passes
    // =========================================================================

    /// Run one input pass over all frames in z-order.
    ///
    /// Close requests are applied after the pass. Afterwards one control
    /// event is synthesized from the pointer delta and dispatched to the
    /// topmost frame whose interior contains the pointer.
    // The attribute needs literals: these are targets::MANAGER and span_names::INPUT_PASS.
    #[tracing::instrument(skip_all, target = "trellis::manager", level = "trace", name = "trellis::input_pass")]
    pub fn handle_input(&mut self, pointer: &PointerState) -> InputOutcome {
        let mut outcome = InputOutcome::default();

        // Resync the token in case a dragging frame was disposed externally.
        let any_dragging = self.frames.values().any(Frame::is_dragging);
        if self.drag_in_progress != any_dragging {
            tracing::trace!(target: targets::MANAGER, any_dragging, "drag token resynced");
            self.drag_in_progress = any_dragging;
        }

        let mut ctx = InputContext::new(pointer, self.config.screen_rect(), self.config.snap_threshold())
            .with_drag_in_progress(self.drag_in_progress);
        let mut to_close = Vec::new();

        for (index, &id) in self.order.iter().enumerate() {
            let occluded = self.is_occluded(index);
            let Some(frame) = self.frames.get_mut(id) else {
                continue;
            };
            ctx.set_occluded(occluded);
            let response = frame.handle_mouse(&mut ctx);
            if response.activate && outcome.activated.is_none() {
                outcome.activated = Some(id);
            }
            if response.close {
                to_close.push(id);
            }
        }

        self.drag_in_progress = ctx.drag_in_progress();
        self.overlays = ctx.into_overlays();

        if let Some(id) = outcome.activated {
            self.activate(id);
        }
        for id in to_close {
            if self.remove_frame(id) {
                outcome.closed.push(id);
            }
        }

        if let Some(event) = Event::from_pointer_delta(&self.last_pointer, pointer) {
            outcome.event = Some(event);
            if let Some((id, handled)) = self.dispatch_event(&event) {
                outcome.event_target = Some(id);
                outcome.event_handled = handled;
            }
        }
        self.last_pointer = *pointer;

        outcome
    }

    /// Whether the frame at `index` is fully covered by a frame above it.
    fn is_occluded(&self, index: usize) -> bool {
        let Some(rect) = self.order.get(index).and_then(|&id| self.frames.get(id)).map(Frame::geometry) else {
            return false;
        };
        self.order[index + 1..].iter().any(|&above| {
            self.frames
                .get(above)
                .is_some_and(|f| f.is_visible() && f.geometry().contains_rect(&rect))
        })
    }

    fn dispatch_event(&mut self, event: &Event) -> Option<(FrameId, bool)> {
        let point = event.position();
        let id = self.order.iter().rev().copied().find(|&id| {
            self.frames
                .get(id)
                .is_some_and(|f| f.is_visible() && f.interior_rect().contains(point))
        })?;
        let frame = self.frames.get_mut(id)?;
        let origin = frame.interior_rect().origin;
        let handled = frame.dispatch_event(&event.translated(origin.x.saturating_neg(), origin.y.saturating_neg()));
        Some((id, handled))
    }

    /// Draw every visible frame in z-order, then the overlays of the last
    /// input pass.
    pub fn draw_frames(&self, surface: &mut dyn DrawingSurface) {
        let _span = tracing::trace_span!(target: targets::MANAGER, span_names::DRAW_PASS).entered();
        let style = self.config.style();
        for (_, frame) in self.frames() {
            frame.draw(surface, style, &self.font);
        }
        for overlay in &self.overlays {
            surface.stroke_rect(overlay.rect(), style.overlay);
        }
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal emitted after a frame is created or registered.
    pub fn frame_created(&self) -> &Signal<FrameId> {
        &self.frame_created
    }

    /// Signal emitted after a frame is removed.
    pub fn frame_removed(&self) -> &Signal<FrameId> {
        &self.frame_removed
    }

    /// Signal emitted when the active frame changes.
    pub fn active_changed(&self) -> &Signal<Option<FrameId>> {
        &self.active_changed
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("id", &self.id)
            .field("frames", &self.order.len())
            .field("active", &self.active)
            .field("drag_in_progress", &self.drag_in_progress)
            .finish()
    }
}
