//! Core systems for Trellis.
//!
//! This crate provides the small amount of infrastructure shared by the
//! rendering layer and the window manager:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Logging**: Tracing targets and span names used across the workspace
//!
//! # Signal Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let frame_closed = Signal::<u32>::new();
//!
//! let conn_id = frame_closed.connect(|id| {
//!     println!("frame {} closed", id);
//! });
//!
//! frame_closed.emit(7);
//! frame_closed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
