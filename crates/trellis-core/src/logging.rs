//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in the host:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis::manager=debug")
//!     .init();
//! ```
//!
//! The per-tick input pass runs inside a span named
//! [`span_names::INPUT_PASS`]; frame lifecycle and interaction transitions are
//! logged at `debug` level, per-tick detail at `trace` level.

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// Per-tick input handling pass.
    pub const INPUT_PASS: &str = "trellis::input_pass";
    /// Per-tick draw pass.
    pub const DRAW_PASS: &str = "trellis::draw_pass";
    /// Full host tick (clear, input, draw, present).
    pub const TICK: &str = "trellis::tick";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Window manager (frame list, z-order, active frame).
    pub const MANAGER: &str = "trellis::manager";
    /// Frame interaction state machine (drag, snap, restore, close).
    pub const FRAME: &str = "trellis::frame";
    /// Control event dispatch.
    pub const CONTROL: &str = "trellis::control";
    /// Host tick driver.
    pub const DESKTOP: &str = "trellis::desktop";
    /// Software framebuffer and surfaces.
    pub const SURFACE: &str = "trellis_render::surface";
    /// Performance spans.
    pub const PERF: &str = "trellis::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
