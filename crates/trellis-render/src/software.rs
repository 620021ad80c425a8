//! Software framebuffer surface.
//!
//! [`SoftwareSurface`] keeps two pixel buffers: drawing goes to the back
//! buffer and [`present`](DrawingSurface::present) copies it to the front
//! buffer, which is what a host would scan out. Partially transparent colors
//! are blended source-over onto the back buffer.
//!
//! # Edge Policy
//!
//! Single points follow the configured [`EdgePolicy`]: `Reject` drops points
//! inside the margin band, `Clamp` moves them onto the nearest edge pixel.
//! Rectangles, text and bitmaps are always clipped to the drawable area.
//!
//! ```
//! use trellis_render::{Color, DrawingSurface, Rect, SoftwareSurface, SurfaceConfig};
//!
//! let mut surface = SoftwareSurface::new(SurfaceConfig::new(64, 48)).unwrap();
//! surface.clear(Color::BLACK);
//! surface.fill_rect(Rect::new(8, 8, 16, 16), Color::BLUE);
//! surface.present();
//! assert_eq!(surface.presented_pixel(10, 10), Some(Color::BLUE));
//! ```

use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use trellis_core::logging::targets;

use crate::bitmap::Bitmap;
use crate::error::{RenderError, RenderResult};
use crate::surface::{DrawingSurface, EdgePolicy};
use crate::types::{Color, Rect, Size};

/// Configuration for a [`SoftwareSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// How out-of-bounds points are handled.
    pub edge_policy: EdgePolicy,
}

impl SurfaceConfig {
    /// Create a configuration with the given size and the default edge policy.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            edge_policy: EdgePolicy::default(),
        }
    }

    /// Set the edge policy.
    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

/// A double-buffered in-memory framebuffer.
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    edge_policy: EdgePolicy,
    back: Vec<Color>,
    front: Vec<Color>,
    presented_frames: u64,
}

impl SoftwareSurface {
    /// Create a surface. Both buffers start fully transparent.
    pub fn new(config: SurfaceConfig) -> RenderResult<Self> {
        let SurfaceConfig {
            width,
            height,
            edge_policy,
        } = config;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let len = width as usize * height as usize;
        tracing::debug!(target: targets::SURFACE, width, height, ?edge_policy, "created software surface");
        Ok(Self {
            width,
            height,
            edge_policy,
            back: vec![Color::TRANSPARENT; len],
            front: vec![Color::TRANSPARENT; len],
            presented_frames: 0,
        })
    }

    /// The configured edge policy.
    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Change the edge policy.
    pub fn set_edge_policy(&mut self, policy: EdgePolicy) {
        self.edge_policy = policy;
    }

    /// Number of frames presented so far.
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// Read a pixel from the back buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.back[i])
    }

    /// Read a pixel from the last presented frame.
    pub fn presented_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.front[i])
    }

    /// Export the last presented frame.
    pub fn front_image(&self) -> RgbaImage {
        let bytes: &[u8] = bytemuck::cast_slice(&self.front);
        RgbaImage::from_raw(self.width, self.height, bytes.to_vec())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Write the last presented frame to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.front_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(RenderError::ImageEncode)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// The area single points and clipped primitives may touch.
    fn drawable(&self) -> Rect {
        let (w, h) = (self.width as i32, self.height as i32);
        match self.edge_policy {
            EdgePolicy::Reject { margin } => {
                let m = margin as i32;
                Rect::new(m, m, (w - 2 * m).max(0), (h - 2 * m).max(0))
            }
            EdgePolicy::Clamp => Rect::new(0, 0, w, h),
        }
    }

    /// Blend a color into the back buffer; callers have already clipped.
    fn blend(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.back[i] = color.over(self.back[i]);
        }
    }

    fn put_clipped(&mut self, clip: &Rect, x: i32, y: i32, color: Color) {
        if clip.contains(crate::types::Point::new(x, y)) {
            self.blend(x, y, color);
        }
    }
}

impl DrawingSurface for SoftwareSurface {
    fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    fn clear(&mut self, color: Color) {
        self.back.fill(color);
    }

    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        if color.is_transparent() {
            return;
        }
        let drawable = self.drawable();
        if drawable.is_empty() {
            return;
        }
        match self.edge_policy {
            EdgePolicy::Reject { .. } => self.put_clipped(&drawable, x, y, color),
            EdgePolicy::Clamp => {
                let cx = x.clamp(drawable.left(), drawable.right() - 1);
                let cy = y.clamp(drawable.top(), drawable.bottom() - 1);
                self.blend(cx, cy, color);
            }
        }
    }

    fn present(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.presented_frames += 1;
        tracing::trace!(target: targets::SURFACE, frame = self.presented_frames, "presented");
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.is_transparent() {
            return;
        }
        let Some(clipped) = rect.intersect(&self.drawable()) else {
            return;
        };
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                self.blend(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        let clip = self.drawable();
        let (left, top) = (rect.left(), rect.top());
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        for x in left.max(clip.left())..=right.min(clip.right() - 1) {
            self.put_clipped(&clip, x, top, color);
            if bottom != top {
                self.put_clipped(&clip, x, bottom, color);
            }
        }
        for y in top.saturating_add(1).max(clip.top())..bottom.min(clip.bottom()) {
            self.put_clipped(&clip, left, y, color);
            if right != left {
                self.put_clipped(&clip, right, y, color);
            }
        }
    }

    fn draw_image_alpha(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        let clip = self.drawable();
        for (px, py, color) in bitmap.pixels() {
            if !color.is_transparent() {
                self.put_clipped(&clip, x.saturating_add(px as i32), y.saturating_add(py as i32), color);
            }
        }
    }
}
