//! Headless desktop example.
//!
//! Drives a software desktop with a scripted pointer: drags one frame,
//! snaps another to fullscreen and back, closes a third, then writes the
//! last presented frame to a PNG.
//!
//! Run with: cargo run -p trellis --example headless_desktop [output.png]
//! Set `RUST_LOG=trellis=debug` to see the state machine transitions.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use trellis::render::Color;
use trellis::{Desktop, DesktopConfig, DesktopTreeDebug, Panel, PointerState, WmResult};

fn main() -> WmResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=info")))
        .init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("trellis-desktop.png"));

    let mut desktop = Desktop::software(DesktopConfig::default())?;
    let wm = desktop.manager_mut();
    let notes = wm.create_bordered_frame("Notes", 40, 40, 320, 240);
    let viewer = wm.create_bordered_frame("Viewer", 420, 80, 360, 280);
    let scratch = wm.create_bordered_frame("Scratch", 600, 420, 300, 200);

    if let Some(frame) = wm.frame_mut(notes) {
        let button = Panel::new(12, 12, 96, 28)
            .with_color(Color::LIGHT_GRAY)
            .with_outline(Color::DARK_GRAY)
            .with_label("Press");
        button.clicked.connect(|at| tracing::info!(x = at.x, y = at.y, "button clicked"));
        frame.register_control(Box::new(button));
    }

    let script = [
        // Drag Notes by its titlebar.
        PointerState::released(60, 50),
        PointerState::pressed(60, 50),
        PointerState::pressed(140, 120),
        PointerState::pressed(200, 160),
        PointerState::released(200, 160),
        // Click the button inside Notes (interior origin is now 181,171).
        PointerState::released(220, 200),
        PointerState::pressed(220, 200),
        PointerState::released(220, 200),
        // Snap Viewer to fullscreen, then drag it back down to restore.
        PointerState::released(450, 90),
        PointerState::pressed(450, 90),
        PointerState::pressed(500, 1),
        PointerState::released(500, 1),
        PointerState::pressed(500, 10),
        PointerState::pressed(500, 300),
        PointerState::released(500, 300),
        // Close Scratch.
        PointerState::released(890, 430),
        PointerState::pressed(890, 430),
        PointerState::released(890, 430),
    ];

    for pointer in &script {
        let outcome = desktop.tick(pointer);
        for id in &outcome.closed {
            tracing::info!(?id, "frame closed");
        }
    }

    debug_assert!(!desktop.manager().contains(scratch));
    debug_assert!(desktop.manager().contains(viewer));
    print!("{}", DesktopTreeDebug::new(desktop.manager()));

    desktop.surface().save_png(&output)?;
    println!("wrote {}", output.display());
    Ok(())
}
