//! RGBA bitmaps for cursors and decorations.
//!
//! [`Bitmap`] wraps an `image::RgbaImage`. Decoding (BMP, PNG, ...) is
//! delegated to the `image` crate; the surfaces only ever see straight-alpha
//! RGBA pixels.

use image::RgbaImage;

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, Size};

/// The default arrow cursor.
///
/// `B` is the outline, `O` the fill, `.` transparent.
const ARROW_CURSOR: [&str; 17] = [
    "B...........",
    "BB..........",
    "BOB.........",
    "BOOB........",
    "BOOOB.......",
    "BOOOOB......",
    "BOOOOOB.....",
    "BOOOOOOB....",
    "BOOOOOOOB...",
    "BOOOOOOOOB..",
    "BOOOOOOOOOB.",
    "BOOOOOOBBBBB",
    "BOOOBOOB....",
    "BOOB.BOOB...",
    "BOB..BOOB...",
    "BB....BOOB..",
    "......BBB...",
];

/// A straight-alpha RGBA bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    /// Wrap an already decoded image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode a bitmap from encoded bytes (BMP, PNG, ...).
    pub fn from_bytes(bytes: &[u8]) -> RenderResult<Self> {
        let decoded = image::load_from_memory(bytes).map_err(RenderError::ImageDecode)?;
        Ok(Self::from_image(decoded.to_rgba8()))
    }

    /// Build a bitmap from raw RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        let actual = bytes.len();
        RgbaImage::from_raw(width, height, bytes)
            .map(Self::from_image)
            .ok_or(RenderError::BufferSizeMismatch { expected, actual })
    }

    /// Build a solid-color bitmap.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let pixel = image::Rgba([color.r, color.g, color.b, color.a]);
        Self::from_image(RgbaImage::from_pixel(width, height, pixel))
    }

    /// The built-in arrow cursor (black outline, white fill).
    pub fn arrow_cursor() -> Self {
        let width = ARROW_CURSOR[0].len() as u32;
        let height = ARROW_CURSOR.len() as u32;
        let image = RgbaImage::from_fn(width, height, |x, y| {
            let color = match ARROW_CURSOR[y as usize].as_bytes()[x as usize] {
                b'B' => Color::BLACK,
                b'O' => Color::WHITE,
                _ => Color::TRANSPARENT,
            };
            image::Rgba([color.r, color.g, color.b, color.a])
        });
        Self::from_image(image)
    }

    /// Bitmap width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Bitmap height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Bitmap size.
    pub fn size(&self) -> Size {
        Size::from((self.width(), self.height()))
    }

    /// Read a pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color::from_rgba8(p[0], p[1], p[2], p[3]))
    }

    /// Iterate over all pixels as `(x, y, color)`.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        self.image
            .enumerate_pixels()
            .map(|(x, y, p)| (x, y, Color::from_rgba8(p[0], p[1], p[2], p[3])))
    }

    /// Borrow the underlying image.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_cursor_shape() {
        let cursor = Bitmap::arrow_cursor();
        assert_eq!(cursor.size(), Size::new(12, 17));
        assert_eq!(cursor.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(cursor.pixel(1, 2), Some(Color::WHITE));
        assert_eq!(cursor.pixel(11, 0), Some(Color::TRANSPARENT));
        assert_eq!(cursor.pixel(12, 0), None);
    }

    #[test]
    fn test_from_rgba_validates_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Bitmap::from_rgba(2, 2, vec![0; 15]),
            Err(RenderError::BufferSizeMismatch { expected: 16, actual: 15 })
        ));
        assert!(matches!(
            Bitmap::from_rgba(0, 2, Vec::new()),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            Bitmap::from_bytes(b"not an image"),
            Err(RenderError::ImageDecode(_))
        ));
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let source = Bitmap::filled(3, 2, Color::BLUE);
        let mut encoded = Vec::new();
        source
            .as_image()
            .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
            .unwrap();

        let decoded = Bitmap::from_bytes(&encoded).unwrap();
        assert_eq!(decoded.size(), Size::new(3, 2));
        assert_eq!(decoded.pixel(2, 1), Some(Color::BLUE));
    }
}
