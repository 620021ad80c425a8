//! Raster surface layer for Trellis.
//!
//! This crate provides the pixel-level side of the window manager: integer
//! geometry, straight-alpha colors, bitmap fonts and cursors, and the
//! [`DrawingSurface`] trait every paint pass draws through.
//!
//! # Drawing Surfaces
//!
//! Two surfaces ship with the crate:
//!
//! - [`SoftwareSurface`]: a double-buffered in-memory framebuffer that can be
//!   exported as an image or written to PNG.
//! - [`RecordingSurface`]: records every call as a [`DrawCommand`] for tests.
//!
//! ```
//! use trellis_render::{Color, DrawingSurface, Rect, SoftwareSurface, SurfaceConfig};
//!
//! # fn example() -> trellis_render::RenderResult<()> {
//! let mut surface = SoftwareSurface::new(SurfaceConfig::new(320, 240))?;
//! surface.clear(Color::BLACK);
//! surface.stroke_rect(Rect::new(10, 10, 100, 60), Color::WHITE);
//! surface.present();
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Edge Handling
//!
//! Points outside the drawable area follow the surface's [`EdgePolicy`].
//! The default rejects a 1px band around the screen edge.

mod bitmap;
mod error;
mod font;
mod glyphs;
mod recording;
mod software;
mod surface;
mod types;

pub use bitmap::Bitmap;
pub use error::{RenderError, RenderResult};
pub use font::{Font, MAX_CELL_WIDTH};
pub use recording::{DrawCommand, RecordingSurface};
pub use software::{SoftwareSurface, SurfaceConfig};
pub use surface::{DrawingSurface, EdgePolicy};
pub use types::{Color, Point, Rect, Size};

// Re-export image for hosts that hand us decoded images.
pub use image;
