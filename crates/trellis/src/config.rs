//! Desktop configuration and builder.
//!
//! [`DesktopConfig`] gathers everything a desktop needs before the first
//! tick: screen size, the snap threshold for edge-snap-to-fullscreen, the
//! activation policy and frame colors. It can be built in code or loaded from
//! TOML.
//!
//! # Example
//!
//! ```
//! use trellis::DesktopConfig;
//!
//! let config = DesktopConfig::new()
//!     .with_screen_size(800, 600)
//!     .with_raise_on_activate(true);
//! assert_eq!(config.screen_rect().width(), 800);
//!
//! let from_file = DesktopConfig::from_toml_str(r##"
//!     screen_width = 640
//!     screen_height = 480
//!
//!     [style]
//!     titlebar = "#C0C0C0"
//! "##).unwrap();
//! assert_eq!(from_file.screen_height(), 480);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_render::{Color, EdgePolicy, Rect, SurfaceConfig};

use crate::error::{WmError, WmResult};

/// Pointer rows at the top of the screen that trigger snap-to-fullscreen.
pub const DEFAULT_SNAP_THRESHOLD: i32 = 3;

/// Colors used to draw frame decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    /// Titlebar fill.
    pub titlebar: Color,
    /// Titlebar outline.
    pub titlebar_outline: Color,
    /// Full-frame outline.
    pub border: Color,
    /// Title text.
    pub title_text: Color,
    /// Close box glyph.
    pub close_box: Color,
    /// Interior background for newly created frames.
    pub background: Color,
    /// Drag outline and snap preview.
    pub overlay: Color,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            titlebar: Color::WHITE,
            titlebar_outline: Color::GRAY,
            border: Color::GRAY,
            title_text: Color::BLACK,
            close_box: Color::BLACK,
            background: Color::BLUE,
            overlay: Color::WHITE,
        }
    }
}

/// Configuration for a desktop and its window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    screen_width: u32,
    screen_height: u32,
    snap_threshold: i32,
    raise_on_activate: bool,
    desktop_color: Color,
    show_cursor: bool,
    edge_policy: EdgePolicy,
    style: FrameStyle,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            screen_width: 1024,
            screen_height: 768,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            raise_on_activate: false,
            desktop_color: Color::BLACK,
            show_cursor: true,
            edge_policy: EdgePolicy::default(),
            style: FrameStyle::default(),
        }
    }
}

impl DesktopConfig {
    /// Create a configuration with the default 1024x768 screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> WmResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> WmResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WmError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that the configuration describes a usable desktop.
    pub fn validate(&self) -> WmResult<()> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(WmError::InvalidConfig {
                reason: format!(
                    "screen size must be non-zero, got {}x{}",
                    self.screen_width, self.screen_height
                ),
            });
        }
        if self.snap_threshold < 0 {
            return Err(WmError::InvalidConfig {
                reason: format!("snap threshold must not be negative, got {}", self.snap_threshold),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set the screen size in pixels.
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set how many pixel rows at the top of the screen trigger a snap.
    pub fn with_snap_threshold(mut self, threshold: i32) -> Self {
        self.snap_threshold = threshold;
        self
    }

    /// Raise frames to the top of the z-order when they are activated.
    pub fn with_raise_on_activate(mut self, raise: bool) -> Self {
        self.raise_on_activate = raise;
        self
    }

    /// Set the color the desktop is cleared to each tick.
    pub fn with_desktop_color(mut self, color: Color) -> Self {
        self.desktop_color = color;
        self
    }

    /// Show or hide the pointer cursor.
    pub fn with_show_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }

    /// Set the edge policy for the software surface.
    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    /// Set the frame decoration colors.
    pub fn with_style(mut self, style: FrameStyle) -> Self {
        self.style = style;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Screen width in pixels.
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Screen height in pixels.
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// The full screen rectangle, which is also the snapped geometry.
    pub fn screen_rect(&self) -> Rect {
        Rect::new(0, 0, self.screen_width as i32, self.screen_height as i32)
    }

    /// Snap threshold in pixel rows.
    pub fn snap_threshold(&self) -> i32 {
        self.snap_threshold
    }

    /// Whether activation also raises.
    pub fn raise_on_activate(&self) -> bool {
        self.raise_on_activate
    }

    /// Desktop clear color.
    pub fn desktop_color(&self) -> Color {
        self.desktop_color
    }

    /// Whether the cursor is drawn.
    pub fn show_cursor(&self) -> bool {
        self.show_cursor
    }

    /// Frame decoration colors.
    pub fn style(&self) -> &FrameStyle {
        &self.style
    }

    /// Software surface configuration matching this desktop.
    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig::new(self.screen_width, self.screen_height).with_edge_policy(self.edge_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DesktopConfig::default();
        assert_eq!(config.screen_rect(), Rect::new(0, 0, 1024, 768));
        assert_eq!(config.snap_threshold(), 3);
        assert!(!config.raise_on_activate());
        assert!(config.show_cursor());
        assert_eq!(config.style().titlebar, Color::WHITE);
    }

    #[test]
    fn test_builder() {
        let config = DesktopConfig::new()
            .with_screen_size(320, 200)
            .with_snap_threshold(8)
            .with_raise_on_activate(true)
            .with_desktop_color(Color::DARK_GRAY)
            .with_edge_policy(EdgePolicy::Clamp);

        assert_eq!(config.screen_rect(), Rect::new(0, 0, 320, 200));
        assert_eq!(config.snap_threshold(), 8);
        assert!(config.raise_on_activate());
        assert_eq!(config.desktop_color(), Color::DARK_GRAY);
        assert_eq!(config.surface_config().edge_policy, EdgePolicy::Clamp);
    }

    #[test]
    fn test_toml_partial() {
        let config = DesktopConfig::from_toml_str(
            r##"
            raise_on_activate = true
            desktop_color = "#102030"
            edge_policy = "clamp"

            [style]
            overlay = "#FF0000FF"
            "##,
        )
        .unwrap();

        assert!(config.raise_on_activate());
        assert_eq!(config.desktop_color(), Color::from_rgb8(0x10, 0x20, 0x30));
        assert_eq!(config.style().overlay, Color::RED);
        assert_eq!(config.style().titlebar, Color::WHITE);
        assert_eq!(config.screen_width(), 1024);
        assert_eq!(config.surface_config().edge_policy, EdgePolicy::Clamp);
    }

    #[test]
    fn test_toml_reject_margin() {
        let config = DesktopConfig::from_toml_str("edge_policy = { reject = { margin = 4 } }").unwrap();
        assert_eq!(config.surface_config().edge_policy, EdgePolicy::Reject { margin: 4 });
    }

    #[test]
    fn test_toml_errors() {
        assert!(matches!(
            DesktopConfig::from_toml_str("screen_width = \"wide\""),
            Err(WmError::Config(_))
        ));
        assert!(matches!(
            DesktopConfig::from_toml_str("desktop_color = \"not-a-color\""),
            Err(WmError::Config(_))
        ));
        assert!(matches!(
            DesktopConfig::from_toml_str("screen_width = 0"),
            Err(WmError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desktop.toml");
        std::fs::write(&path, "screen_width = 800\nscreen_height = 600\n").unwrap();

        let config = DesktopConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.screen_rect(), Rect::new(0, 0, 800, 600));

        let missing = DesktopConfig::from_toml_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(WmError::Io { .. })));
    }
}
