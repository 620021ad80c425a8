//! End-to-end window manager behavior driven through the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use trellis::render::{Color, DrawCommand, Point, RecordingSurface, Rect, Size};
use trellis::{
    Desktop, DesktopConfig, DragState, EventKind, Frame, FullscreenState, Overlay, Panel,
    PointerState, WindowManager,
};

fn manager() -> WindowManager {
    WindowManager::new(DesktopConfig::default())
}

/// Press, hold through `path`, release at the last point.
fn drag(wm: &mut WindowManager, from: (i32, i32), path: &[(i32, i32)]) {
    wm.handle_input(&PointerState::released(from.0, from.1));
    wm.handle_input(&PointerState::pressed(from.0, from.1));
    for &(x, y) in path {
        wm.handle_input(&PointerState::pressed(x, y));
    }
    let (x, y) = path.last().copied().unwrap_or(from);
    wm.handle_input(&PointerState::released(x, y));
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn bordered_frame_interior_size() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 10, 10, 500, 500);
    assert_eq!(wm.frame(a).unwrap().interior_size(), Size::new(498, 478));
}

#[test]
fn titlebar_drag_moves_frame() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 10, 10, 500, 500);

    wm.handle_input(&PointerState::pressed(20, 15));
    let frame = wm.frame(a).unwrap();
    assert_eq!(frame.drag_state(), DragState::DraggingTitlebar);
    assert_eq!(frame.drag_anchor(), Point::new(10, 5));
    assert!(wm.is_dragging());

    wm.handle_input(&PointerState::pressed(100, 100));
    assert_eq!(
        wm.overlays(),
        &[Overlay::DragOutline(Rect::new(90, 95, 500, 500))]
    );
    // The frame itself stays put until release.
    assert_eq!(wm.frame(a).unwrap().position(), Point::new(10, 10));

    let mut surface = RecordingSurface::new(1024, 768);
    wm.draw_frames(&mut surface);
    assert!(surface.commands().iter().any(|c| matches!(
        c,
        DrawCommand::StrokeRect { rect, color } if *rect == Rect::new(90, 95, 500, 500) && *color == Color::WHITE
    )));

    wm.handle_input(&PointerState::released(100, 100));
    let frame = wm.frame(a).unwrap();
    assert_eq!(frame.position(), Point::new(90, 95));
    assert_eq!(frame.drag_state(), DragState::Idle);
    assert!(!wm.is_dragging());
    assert!(wm.overlays().is_empty());
}

#[test]
fn snap_to_top_edge_then_restore() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 10, 10, 500, 500);
    let before = wm.frame(a).unwrap().geometry();

    wm.handle_input(&PointerState::pressed(20, 15));
    wm.handle_input(&PointerState::pressed(300, 1));
    assert!(wm.overlays().contains(&Overlay::SnapPreview(Rect::new(0, 0, 1024, 768))));
    wm.handle_input(&PointerState::released(300, 1));

    let frame = wm.frame(a).unwrap();
    assert_eq!(frame.geometry(), Rect::new(0, 0, 1024, 768));
    assert_eq!(frame.fullscreen_state(), FullscreenState::WindowedFullscreen);
    assert_eq!(frame.restore_geometry(), Some(before));
    assert_eq!(frame.interior_size(), Size::new(1022, 746));

    drag(&mut wm, (200, 10), &[(400, 300)]);
    let frame = wm.frame(a).unwrap();
    assert_eq!(frame.geometry(), before);
    assert_eq!(frame.fullscreen_state(), FullscreenState::Normal);
    assert_eq!(frame.restore_geometry(), None);
}

#[test]
fn remove_topmost_promotes_next() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 50, 50, 200, 200);
    let b = wm.create_bordered_frame("B", 50, 50, 200, 200);
    assert_eq!(wm.active(), Some(b));

    assert!(wm.remove_frame(b));
    assert_eq!(wm.active(), Some(a));
    assert!(wm.frame(a).unwrap().is_active());
    assert!(!wm.remove_frame(b));
    assert_eq!(wm.len(), 1);
}

#[test]
fn close_box_removes_after_pass() {
    let mut wm = manager();
    let removed = Arc::new(AtomicUsize::new(0));
    let counter = removed.clone();
    wm.frame_removed().connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let a = wm.create_bordered_frame("A", 100, 100, 300, 200);
    let b = wm.create_bordered_frame("B", 120, 120, 300, 200);

    // Close box of B: rightmost 24px of its titlebar.
    let outcome = wm.handle_input(&PointerState::pressed(410, 125));
    assert_eq!(outcome.closed, vec![b]);
    assert_eq!(removed.load(Ordering::SeqCst), 1);
    assert_eq!(wm.active(), Some(a));

    // Holding the button does not produce another press edge.
    let outcome = wm.handle_input(&PointerState::pressed(390, 105));
    assert!(outcome.closed.is_empty());
    assert!(wm.contains(a));
}

// =========================================================================
// Invariants
// =========================================================================

#[test]
fn at_most_one_active_frame() {
    let mut wm = manager();
    let mut ids = Vec::new();
    let mut seed: u32 = 0x2545_f491;

    for step in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let roll = (seed >> 16) % 4;
        if roll == 0 && !ids.is_empty() {
            let index = (seed as usize >> 3) % ids.len();
            let id = ids.swap_remove(index);
            assert!(wm.remove_frame(id));
        } else if roll == 1 && !ids.is_empty() {
            let index = (seed as usize >> 5) % ids.len();
            wm.activate(ids[index]);
        } else {
            let offset = (step % 40) as i32;
            ids.push(wm.create_bordered_frame(format!("F{step}"), offset, offset, 120, 90));
        }

        let active: Vec<_> = wm.frames().filter(|(_, f)| f.is_active()).map(|(id, _)| id).collect();
        if wm.is_empty() {
            assert!(active.is_empty());
            assert_eq!(wm.active(), None);
        } else {
            assert_eq!(active.len(), 1);
            assert_eq!(wm.active(), active.first().copied());
        }
    }
}

#[test]
fn interior_follows_border_formula() {
    for (w, h) in [(500, 500), (2, 22), (1, 1), (640, 21)] {
        let bordered = Frame::bordered("b", 0, 0, w, h);
        assert_eq!(
            bordered.interior_size(),
            Size::new((w - 2).max(0), (h - 22).max(0))
        );
        let plain = Frame::new("p", 0, 0, w, h, false);
        assert_eq!(plain.interior_size(), Size::new(w, h));
    }
}

#[test]
fn local_global_round_trip() {
    let frame = Frame::bordered("A", 37, 91, 300, 200);
    let interior = frame.interior_rect();
    for local in [Point::new(0, 0), Point::new(5, 7), Point::new(297, 177)] {
        let screen = frame.to_global(local);
        assert!(interior.contains(screen));
        assert_eq!(frame.to_local(screen), Some(local));
    }
    assert_eq!(frame.to_local(Point::new(0, 0)), None);

    // Titlebar and border points map to out-of-interior locals and back.
    for screen in [Point::new(38, 92), Point::new(200, 100), Point::new(336, 290)] {
        let local = frame.to_local(screen).unwrap();
        assert_eq!(frame.to_global(local), screen);
    }
}

#[test]
fn dispose_is_idempotent() {
    let mut frame = Frame::bordered("A", 0, 0, 100, 100);
    frame.register_control(Box::new(Panel::new(0, 0, 10, 10)));
    frame.dispose();
    frame.dispose();
    assert!(frame.is_disposed());
    assert!(frame.controls().is_empty());
    assert_eq!(frame.geometry(), Rect::ZERO);
    assert_eq!(frame.interior_size(), Size::ZERO);
}

#[test]
fn only_one_frame_drags_at_a_time() {
    let mut wm = manager();
    // Titlebars overlap, neither fully contains the other.
    let a = wm.create_bordered_frame("A", 100, 100, 300, 200);
    let b = wm.create_bordered_frame("B", 150, 100, 300, 200);

    wm.handle_input(&PointerState::pressed(200, 110));
    let dragging: Vec<_> = wm.frames().filter(|(_, f)| f.is_dragging()).map(|(id, _)| id).collect();
    assert_eq!(dragging.len(), 1);
    // Bottom-to-top pass: the lower frame claims the drag first.
    assert_eq!(dragging, vec![a]);
    assert_eq!(wm.active(), Some(a));
    assert!(!wm.frame(b).unwrap().is_dragging());

    wm.handle_input(&PointerState::released(200, 110));
    assert!(!wm.is_dragging());
}

#[test]
fn occluded_frame_ignores_titlebar() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 100, 100, 200, 100);
    let b = wm.create_bordered_frame("B", 50, 50, 400, 300);

    wm.handle_input(&PointerState::pressed(150, 105));
    assert!(!wm.frame(a).unwrap().is_dragging());
    assert!(!wm.frame(b).unwrap().is_dragging());
    assert_eq!(wm.active(), Some(b));
}

#[test]
fn frame_disposed_mid_drag_releases_token() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 10, 10, 200, 200);
    let b = wm.create_bordered_frame("B", 300, 300, 200, 200);

    wm.handle_input(&PointerState::pressed(20, 15));
    assert!(wm.is_dragging());
    wm.frame_mut(a).unwrap().dispose();
    wm.handle_input(&PointerState::released(20, 15));
    assert!(!wm.is_dragging());

    wm.handle_input(&PointerState::pressed(310, 305));
    assert!(wm.frame(b).unwrap().is_dragging());
}

// =========================================================================
// Events
// =========================================================================

#[test]
fn click_reaches_panel_in_local_coordinates() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 100, 100, 300, 200);
    let panel = Panel::new(10, 10, 50, 30);
    let clicked_at = Arc::new(AtomicI32::new(-1));
    let recorded = clicked_at.clone();
    panel.clicked.connect(move |p| recorded.store(p.x * 1000 + p.y, Ordering::SeqCst));
    wm.frame_mut(a).unwrap().register_control(Box::new(panel));

    // Interior origin is (101, 121); panel origin (111, 131).
    wm.handle_input(&PointerState::released(120, 140));
    let outcome = wm.handle_input(&PointerState::pressed(120, 140));

    let event = outcome.event.unwrap();
    assert_eq!(event.kind, EventKind::MouseDownLeft);
    assert_eq!(outcome.event_target, Some(a));
    assert!(outcome.event_handled);
    assert_eq!(clicked_at.load(Ordering::SeqCst), 9 * 1000 + 9);
}

#[test]
fn titlebar_press_is_not_dispatched() {
    let mut wm = manager();
    wm.create_bordered_frame("A", 100, 100, 300, 200);
    let outcome = wm.handle_input(&PointerState::pressed(150, 105));
    assert_eq!(outcome.event.map(|e| e.kind), Some(EventKind::MouseDownLeft));
    assert_eq!(outcome.event_target, None);
    assert!(!outcome.event_handled);
}

// =========================================================================
// Software Desktop
// =========================================================================

#[test]
fn software_desktop_pixels() {
    let config = DesktopConfig::default().with_show_cursor(false);
    let mut desktop = Desktop::software(config).unwrap();
    let a = desktop.manager_mut().create_bordered_frame("A", 10, 10, 500, 500);
    desktop.tick(&PointerState::released(900, 700));

    let surface = desktop.surface();
    // Desktop background, titlebar fill, outline and interior.
    assert_eq!(surface.presented_pixel(800, 600), Some(Color::BLACK));
    assert_eq!(surface.presented_pixel(200, 15), Some(Color::WHITE));
    assert_eq!(surface.presented_pixel(200, 10), Some(Color::GRAY));
    assert_eq!(surface.presented_pixel(200, 200), Some(Color::BLUE));

    // Close through the desktop and check the frame is gone from the next frame.
    let outcome = desktop.tick(&PointerState::pressed(500, 15));
    assert_eq!(outcome.closed, vec![a]);
    assert_eq!(desktop.surface().presented_pixel(200, 200), Some(Color::BLACK));
}

#[test]
fn tiling_a_snapped_frame_then_dragging_keeps_new_geometry() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 10, 10, 500, 500);
    drag(&mut wm, (20, 15), &[(200, 1)]);
    assert_eq!(wm.frame(a).unwrap().fullscreen_state(), FullscreenState::WindowedFullscreen);

    wm.tile_frames_vertical();
    wm.frame_mut(a).unwrap().resize(400, 300);
    let frame = wm.frame(a).unwrap();
    assert_eq!(frame.fullscreen_state(), FullscreenState::Normal);
    assert_eq!(frame.restore_geometry(), None);
    assert_eq!(frame.geometry(), Rect::new(0, 0, 400, 300));

    drag(&mut wm, (100, 10), &[(300, 300)]);
    let frame = wm.frame(a).unwrap();
    assert_eq!(frame.geometry(), Rect::new(200, 290, 400, 300));
    assert_eq!(frame.fullscreen_state(), FullscreenState::Normal);
}

#[test]
fn extreme_resize_keeps_manager_usable() {
    let mut wm = manager();
    let a = wm.create_bordered_frame("A", 0, 0, 100, 100);
    wm.frame_mut(a).unwrap().resize(i32::MIN, 30);
    assert_eq!(wm.frame(a).unwrap().interior_size(), Size::new(0, 8));

    wm.handle_input(&PointerState::pressed(5, 5));
    wm.handle_input(&PointerState::released(5, 5));
    let mut surface = RecordingSurface::new(1024, 768);
    wm.draw_frames(&mut surface);
    assert!(wm.contains(a));
}
