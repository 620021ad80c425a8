//! A surface that records draw calls instead of rasterizing them.
//!
//! Useful for asserting on draw order and on exactly which primitives a
//! paint pass issued without comparing pixels.

use crate::bitmap::Bitmap;
use crate::font::Font;
use crate::surface::DrawingSurface;
use crate::types::{Color, Point, Rect, Size};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Point { x: i32, y: i32, color: Color },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color },
    Text { text: String, color: Color, origin: Point },
    ImageAlpha { size: Size, origin: Point },
    Present,
}

/// Records every call made against it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create a recording surface reporting the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            commands: Vec::new(),
        }
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take and clear the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded filled rectangles, in order.
    pub fn fills(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }

    /// Recorded text runs, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        if !color.is_transparent() {
            self.commands.push(DrawCommand::Point { x, y, color });
        }
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !color.is_transparent() {
            self.commands.push(DrawCommand::FillRect { rect, color });
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        if !color.is_transparent() {
            self.commands.push(DrawCommand::StrokeRect { rect, color });
        }
    }

    fn draw_text(&mut self, text: &str, _font: &Font, color: Color, x: i32, y: i32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            color,
            origin: Point::new(x, y),
        });
    }

    fn draw_image_alpha(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        self.commands.push(DrawCommand::ImageAlpha {
            size: bitmap.size(),
            origin: Point::new(x, y),
        });
    }
}
