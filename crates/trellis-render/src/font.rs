//! Monospaced bitmap fonts.
//!
//! A [`Font`] is a fixed grid of glyph cells. Each glyph is stored as one
//! byte per row; bit `0x80 >> col` set means the pixel at `col` is painted,
//! so cells are at most eight pixels wide.
//!
//! [`Font::default`] covers printable ASCII with a built-in 8x16 table. Hosts
//! can add glyphs or build their own font, typically from a PSF file they
//! already loaded. Characters without a glyph are drawn as a hollow box so
//! missing coverage stays visible instead of silently vanishing.
//!
//! ```
//! use trellis_render::Font;
//!
//! let font = Font::new("tiny", 3, 3).with_glyph('+', vec![0x40, 0xE0, 0x40]);
//! assert!(font.glyph('+').is_some());
//! assert_eq!(font.text_width("++"), 6);
//! ```

use std::collections::HashMap;

use crate::glyphs::{ASCII_8X8, FIRST_CHAR};

/// Widest glyph cell representable with one byte per row.
pub const MAX_CELL_WIDTH: u32 = 8;

/// A monospaced bitmap font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    name: String,
    cell_width: u32,
    cell_height: u32,
    glyphs: HashMap<char, Vec<u8>>,
}

impl Font {
    /// Create an empty font with the given cell size.
    ///
    /// The cell width is clamped to [`MAX_CELL_WIDTH`].
    pub fn new(name: impl Into<String>, cell_width: u32, cell_height: u32) -> Self {
        Self {
            name: name.into(),
            cell_width: cell_width.min(MAX_CELL_WIDTH),
            cell_height,
            glyphs: HashMap::new(),
        }
    }

    /// The built-in ASCII table in 8x8 cells.
    pub fn ascii_8x8() -> Self {
        let mut font = Self::new("ascii-8x8", 8, 8);
        for (ch, rows) in builtin_glyphs() {
            font.glyphs.insert(ch, rows.to_vec());
        }
        font
    }

    /// The built-in ASCII table with every row doubled into 8x16 cells.
    pub fn pc_screen() -> Self {
        let mut font = Self::new("pc-screen", 8, 16);
        for (ch, rows) in builtin_glyphs() {
            font.glyphs
                .insert(ch, rows.iter().flat_map(|&row| [row, row]).collect());
        }
        font
    }

    /// Add a glyph using builder pattern.
    pub fn with_glyph(mut self, ch: char, rows: Vec<u8>) -> Self {
        self.set_glyph(ch, rows);
        self
    }

    /// Add or replace a glyph.
    ///
    /// Rows beyond the cell height are ignored; missing rows are blank.
    pub fn set_glyph(&mut self, ch: char, mut rows: Vec<u8>) {
        rows.resize(self.cell_height as usize, 0);
        self.glyphs.insert(ch, rows);
    }

    /// The font name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of one glyph cell in pixels.
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Height of one glyph cell in pixels.
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Look up the rows of a glyph.
    pub fn glyph(&self, ch: char) -> Option<&[u8]> {
        self.glyphs.get(&ch).map(Vec::as_slice)
    }

    /// Number of glyphs defined.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Width of a single line of text in pixels.
    pub fn text_width(&self, text: &str) -> i32 {
        (text.chars().count() as u32 * self.cell_width) as i32
    }
}

impl Default for Font {
    /// [`Font::pc_screen`].
    fn default() -> Self {
        Self::pc_screen()
    }
}

fn builtin_glyphs() -> impl Iterator<Item = (char, &'static [u8; 8])> {
    ASCII_8X8
        .iter()
        .enumerate()
        .filter_map(|(i, rows)| char::from_u32(FIRST_CHAR as u32 + i as u32).map(|ch| (ch, rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rows_are_padded_to_cell_height() {
        let font = Font::new("t", 4, 4).with_glyph('a', vec![0xF0]);
        assert_eq!(font.glyph('a'), Some(&[0xF0, 0, 0, 0][..]));
        assert_eq!(font.glyph('b'), None);
    }

    #[test]
    fn test_cell_width_is_clamped() {
        let font = Font::new("wide", 12, 16);
        assert_eq!(font.cell_width(), MAX_CELL_WIDTH);
    }

    #[test]
    fn test_default_font_covers_printable_ascii() {
        let font = Font::default();
        assert_eq!((font.cell_width(), font.cell_height()), (8, 16));
        assert_eq!(font.glyph_count(), 95);
        assert!((' '..='~').all(|ch| font.glyph(ch).is_some()));
        assert_eq!(font.glyph('\u{e9}'), None);
        assert_eq!(font.text_width("Hello"), 40);
    }

    #[test]
    fn test_default_font_doubles_rows() {
        let tall = Font::default();
        let short = Font::ascii_8x8();
        let a16 = tall.glyph('A').unwrap();
        let a8 = short.glyph('A').unwrap();
        assert_eq!(a16.len(), 16);
        for (row, &bits) in a8.iter().enumerate() {
            assert_eq!((a16[row * 2], a16[row * 2 + 1]), (bits, bits));
        }
        // Apex of the 'A' sits in the middle columns.
        assert_eq!(a8[0], 0x18);
    }
}
