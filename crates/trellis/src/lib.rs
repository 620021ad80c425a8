//! Trellis - a minimal framebuffer window manager.
//!
//! Trellis manages rectangular frames on a single software-rendered screen:
//! titlebars, z-order, one active frame, titlebar dragging with an outline
//! preview, edge snapping, and a close box. The host polls the pointer and
//! calls [`Desktop::tick`] (or [`WindowManager::handle_input`] followed by
//! [`WindowManager::draw_frames`]) once per iteration.
//!
//! # Example
//!
//! ```
//! use trellis::{Desktop, DesktopConfig, PointerState};
//!
//! fn main() -> trellis::WmResult<()> {
//!     let mut desktop = Desktop::software(DesktopConfig::default())?;
//!     let editor = desktop.manager_mut().create_bordered_frame("Editor", 100, 100, 400, 300);
//!
//!     // Grab the titlebar, drag, release.
//!     desktop.tick(&PointerState::pressed(150, 110));
//!     desktop.tick(&PointerState::pressed(250, 160));
//!     desktop.tick(&PointerState::released(250, 160));
//!
//!     let frame = desktop.manager().frame(editor).unwrap();
//!     assert_eq!((frame.geometry().left(), frame.geometry().top()), (200, 150));
//!     Ok(())
//! }
//! ```

mod config;
mod control;
mod debug;
mod desktop;
mod error;
mod event;
mod frame;
mod manager;
mod pointer;

pub use config::{DEFAULT_SNAP_THRESHOLD, DesktopConfig, FrameStyle};
pub use control::{Control, ControlBase, FramePainter, Panel};
pub use debug::{DesktopTreeDebug, TreeFormatOptions, TreeStyle};
pub use desktop::Desktop;
pub use error::{WmError, WmResult};
pub use event::{Event, EventKind};
pub use frame::{
    BORDER_WIDTH, CLOSE_HOTZONE_WIDTH, DragState, Frame, FrameResponse, FullscreenState,
    InputContext, Overlay, TITLEBAR_HEIGHT, interior_size,
};
pub use manager::{FrameId, InputOutcome, ManagerId, WindowManager};
pub use pointer::{PointerButton, PointerState};

pub use trellis_core::{ConnectionGuard, ConnectionId, Signal};

/// Drawing surfaces, geometry and bitmaps.
pub mod render {
    pub use trellis_render::*;
}
