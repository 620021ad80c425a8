//! Human-readable dumps of the desktop for diagnostics.
//!
//! ```
//! use trellis::{DesktopConfig, DesktopTreeDebug, WindowManager};
//!
//! let mut wm = WindowManager::new(DesktopConfig::default());
//! wm.create_bordered_frame("Editor", 10, 10, 300, 200);
//! let dump = DesktopTreeDebug::new(&wm).format_tree();
//! assert!(dump.contains("Editor"));
//! ```

use std::fmt;

use crate::control::Control;
use crate::frame::{Frame, FullscreenState};
use crate::manager::WindowManager;

/// Branch characters used when drawing the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for desktop tree output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Show frame ids.
    pub show_ids: bool,
    /// Show geometry and interior size.
    pub show_geometry: bool,
    /// List each frame's controls.
    pub show_controls: bool,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_geometry: true,
            show_controls: false,
        }
    }
}

impl TreeFormatOptions {
    /// Everything, including controls.
    pub fn detailed() -> Self {
        Self {
            show_controls: true,
            ..Default::default()
        }
    }

    /// Titles and flags only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_geometry: false,
            show_controls: false,
            ..Default::default()
        }
    }
}

/// Formats a window manager's frames in z-order, bottom first.
pub struct DesktopTreeDebug<'a> {
    manager: &'a WindowManager,
    options: TreeFormatOptions,
}

impl<'a> DesktopTreeDebug<'a> {
    pub fn new(manager: &'a WindowManager) -> Self {
        Self {
            manager,
            options: TreeFormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TreeFormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Render the tree into a string.
    pub fn format_tree(&self) -> String {
        self.to_string()
    }

    fn connectors(&self) -> (&'static str, &'static str, &'static str) {
        match self.options.style {
            TreeStyle::Ascii => ("+-- ", "`-- ", "|   "),
            TreeStyle::Unicode => ("\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} ", "\u{2502}   "),
        }
    }

    fn write_frame(&self, f: &mut fmt::Formatter<'_>, frame: &Frame, is_last: bool) -> fmt::Result {
        let (branch, last, pipe) = self.connectors();
        f.write_str(if is_last { last } else { branch })?;
        write!(f, "\"{}\"", frame.title())?;
        if self.options.show_ids {
            if let Some(id) = frame.id() {
                write!(f, " [{id:?}]")?;
            }
        }
        if self.options.show_geometry {
            let g = frame.geometry();
            let interior = frame.interior_size();
            write!(
                f,
                " {}x{}+{}+{} interior {}x{}",
                g.width(),
                g.height(),
                g.left(),
                g.top(),
                interior.width,
                interior.height
            )?;
        }

        let mut flags = Vec::new();
        if frame.is_active() {
            flags.push("active");
        }
        if !frame.is_visible() {
            flags.push("hidden");
        }
        if !frame.has_border() {
            flags.push("borderless");
        }
        if frame.is_dragging() {
            flags.push("dragging");
        }
        if frame.fullscreen_state() == FullscreenState::WindowedFullscreen {
            flags.push("fullscreen");
        }
        if frame.is_disposed() {
            flags.push("disposed");
        }
        if !flags.is_empty() {
            write!(f, " ({})", flags.join(", "))?;
        }
        writeln!(f)?;

        if self.options.show_controls {
            let indent = if is_last { "    " } else { pipe };
            let count = frame.controls().len();
            for (i, control) in frame.controls().iter().enumerate() {
                let b = control.bounds();
                let connector = if i + 1 == count { last } else { branch };
                writeln!(
                    f,
                    "{indent}{connector}control {}x{}+{}+{}{}",
                    b.width(),
                    b.height(),
                    b.left(),
                    b.top(),
                    if control.is_visible() { "" } else { " (hidden)" }
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DesktopTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wm = self.manager;
        writeln!(
            f,
            "Desktop {}x{} ({} frames{}):",
            wm.config().screen_width(),
            wm.config().screen_height(),
            wm.len(),
            if wm.is_dragging() { ", dragging" } else { "" }
        )?;
        if wm.is_empty() {
            return writeln!(f, "  (empty)");
        }
        let count = wm.len();
        for (i, (_, frame)) in wm.frames().enumerate() {
            self.write_frame(f, frame, i + 1 == count)?;
        }
        Ok(())
    }
}
