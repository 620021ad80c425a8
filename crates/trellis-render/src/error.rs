//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while creating surfaces or handling bitmaps.
///
/// Drawing itself never fails: out-of-bounds and transparent writes are
/// dropped silently by the surfaces.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid surface or bitmap dimensions (zero width or height).
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A raw pixel buffer does not match its declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Failed to decode bitmap data.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// Failed to encode or write an image.
    #[error("failed to encode image: {0}")]
    ImageEncode(#[source] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
