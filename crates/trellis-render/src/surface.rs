//! The drawing surface contract.
//!
//! [`DrawingSurface`] is the only way the window manager touches pixels. All
//! coordinates are absolute screen-space integers. Implementations must never
//! write a color whose alpha is zero.
//!
//! Only [`size`](DrawingSurface::size), [`clear`](DrawingSurface::clear),
//! [`draw_point`](DrawingSurface::draw_point) and
//! [`present`](DrawingSurface::present) are required; the remaining
//! primitives have point-based default implementations that a backend may
//! override with faster versions.

use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::font::Font;
use crate::types::{Color, Rect, Size};

/// What a surface does with a point that falls outside its drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Drop points closer than `margin` pixels to any edge.
    Reject { margin: u32 },
    /// Move points onto the nearest edge pixel.
    Clamp,
}

impl Default for EdgePolicy {
    fn default() -> Self {
        Self::Reject { margin: 1 }
    }
}

/// A raster target the window manager draws into.
pub trait DrawingSurface {
    /// Size of the surface in pixels.
    fn size(&self) -> Size;

    /// Fill the whole surface with a color.
    fn clear(&mut self, color: Color);

    /// Draw a single pixel.
    fn draw_point(&mut self, x: i32, y: i32, color: Color);

    /// Show the finished frame (flip the back buffer).
    fn present(&mut self);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                self.draw_point(x, y, color);
            }
        }
    }

    /// Draw a 1px rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        let (left, top) = (rect.left(), rect.top());
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        for x in left..=right {
            self.draw_point(x, top, color);
            if bottom != top {
                self.draw_point(x, bottom, color);
            }
        }
        for y in top.saturating_add(1)..bottom {
            self.draw_point(left, y, color);
            if right != left {
                self.draw_point(right, y, color);
            }
        }
    }

    /// Draw a single line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, font: &Font, color: Color, x: i32, y: i32) {
        if color.is_transparent() {
            return;
        }
        let cell_w = font.cell_width() as i32;
        let cell_h = font.cell_height() as i32;
        for (i, ch) in text.chars().enumerate() {
            let cx = x.saturating_add(i as i32 * cell_w);
            if ch == ' ' {
                continue;
            }
            match font.glyph(ch) {
                Some(rows) => {
                    for (row, bits) in rows.iter().enumerate() {
                        for col in 0..cell_w {
                            if bits & (0x80 >> col) != 0 {
                                self.draw_point(cx.saturating_add(col), y.saturating_add(row as i32), color);
                            }
                        }
                    }
                }
                None => {
                    self.stroke_rect(
                        Rect::new(cx.saturating_add(1), y.saturating_add(2), cell_w - 2, cell_h - 4),
                        color,
                    );
                }
            }
        }
    }

    /// Draw a bitmap with its top-left corner at `(x, y)`, skipping fully
    /// transparent pixels.
    fn draw_image_alpha(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        for (px, py, color) in bitmap.pixels() {
            if !color.is_transparent() {
                self.draw_point(x.saturating_add(px as i32), y.saturating_add(py as i32), color);
            }
        }
    }
}
