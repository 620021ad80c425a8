//! Host tick driver.
//!
//! A [`Desktop`] owns a [`WindowManager`], the surface it draws into and the
//! pointer bitmap. Each call to [`tick`](Desktop::tick) runs one full cycle:
//! clear to the desktop color, handle input, draw frames and overlays, draw
//! the cursor, present.
//!
//! ```
//! use trellis::{Desktop, DesktopConfig, PointerState};
//!
//! let mut desktop = Desktop::software(DesktopConfig::default().with_screen_size(320, 240))?;
//! let id = desktop.manager_mut().create_bordered_frame("Notes", 20, 20, 120, 80);
//!
//! desktop.tick(&PointerState::released(0, 0));
//! assert_eq!(desktop.manager().active(), Some(id));
//! assert_eq!(desktop.surface().presented_frames(), 1);
//! # Ok::<(), trellis::WmError>(())
//! ```

use trellis_core::PerfSpan;
use trellis_core::logging::{span_names, targets};
use trellis_render::{Bitmap, DrawingSurface, SoftwareSurface};

use crate::config::DesktopConfig;
use crate::error::WmResult;
use crate::manager::{InputOutcome, WindowManager};
use crate::pointer::PointerState;

/// A window manager bound to a surface.
pub struct Desktop<S: DrawingSurface> {
    manager: WindowManager,
    surface: S,
    cursor: Bitmap,
    ticks: u64,
}

impl Desktop<SoftwareSurface> {
    /// Create a desktop backed by a software framebuffer sized from the config.
    pub fn software(config: DesktopConfig) -> WmResult<Self> {
        config.validate()?;
        let surface = SoftwareSurface::new(config.surface_config())?;
        Ok(Self::new(config, surface))
    }
}

impl<S: DrawingSurface> Desktop<S> {
    /// Create a desktop drawing into an existing surface.
    pub fn new(config: DesktopConfig, surface: S) -> Self {
        let size = surface.size();
        if size.width != config.screen_width() as i32 || size.height != config.screen_height() as i32 {
            tracing::warn!(
                target: targets::DESKTOP,
                surface_width = size.width,
                surface_height = size.height,
                screen_width = config.screen_width(),
                screen_height = config.screen_height(),
                "surface size differs from configured screen size"
            );
        }
        Self {
            manager: WindowManager::new(config),
            surface,
            cursor: Bitmap::arrow_cursor(),
            ticks: 0,
        }
    }

    /// Replace the pointer bitmap using builder pattern.
    pub fn with_cursor(mut self, cursor: Bitmap) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut WindowManager {
        &mut self.manager
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn cursor(&self) -> &Bitmap {
        &self.cursor
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Split into the manager and the surface.
    pub fn into_parts(self) -> (WindowManager, S) {
        (self.manager, self.surface)
    }

    /// Run one host cycle for the given pointer snapshot.
    pub fn tick(&mut self, pointer: &PointerState) -> InputOutcome {
        let _perf = PerfSpan::new(span_names::TICK);
        let config = self.manager.config();
        let (background, show_cursor) = (config.desktop_color(), config.show_cursor());

        self.surface.clear(background);
        let outcome = self.manager.handle_input(pointer);
        self.manager.draw_frames(&mut self.surface);
        if show_cursor {
            self.surface.draw_image_alpha(&self.cursor, pointer.x, pointer.y);
        }
        self.surface.present();
        self.ticks += 1;

        if !outcome.closed.is_empty() || outcome.activated.is_some() {
            tracing::debug!(
                target: targets::DESKTOP,
                tick = self.ticks,
                closed = outcome.closed.len(),
                activated = outcome.activated.is_some(),
                "tick changed the desktop"
            );
        } else {
            tracing::trace!(target: targets::DESKTOP, tick = self.ticks, "tick");
        }
        outcome
    }
}

impl<S: DrawingSurface> std::fmt::Debug for Desktop<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("manager", &self.manager)
            .field("surface_size", &self.surface.size())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_render::{Color, DrawCommand, RecordingSurface};

    fn recording_desktop() -> Desktop<RecordingSurface> {
        Desktop::new(DesktopConfig::default(), RecordingSurface::new(1024, 768))
    }

    #[test]
    fn test_tick_order() {
        let mut desktop = recording_desktop();
        desktop.manager_mut().create_bordered_frame("A", 10, 10, 100, 100);
        desktop.tick(&PointerState::released(500, 500));

        let commands = desktop.surface().commands();
        assert_eq!(commands.first(), Some(&DrawCommand::Clear(Color::BLACK)));
        assert_eq!(commands.last(), Some(&DrawCommand::Present));
        assert!(
            commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "A"))
        );
        assert_eq!(desktop.ticks(), 1);
    }

    #[test]
    fn test_cursor_hidden_by_config() {
        let config = DesktopConfig::default().with_show_cursor(false);
        let mut desktop = Desktop::new(config, RecordingSurface::new(1024, 768));
        desktop.tick(&PointerState::released(5, 5));
        // Clear then present, nothing in between on an empty desktop.
        assert_eq!(desktop.surface().commands().len(), 2);
    }

    #[test]
    fn test_cursor_drawn_at_pointer() {
        let config = DesktopConfig::default().with_screen_size(64, 64);
        let mut desktop = Desktop::software(config)
            .unwrap()
            .with_cursor(Bitmap::filled(2, 2, Color::RED));
        desktop.tick(&PointerState::released(30, 40));

        let surface = desktop.surface();
        assert_eq!(surface.presented_pixel(31, 41), Some(Color::RED));
        assert_eq!(surface.presented_pixel(32, 42), Some(Color::BLACK));
    }

    #[test]
    fn test_software_rejects_invalid_config() {
        let config = DesktopConfig::default().with_screen_size(0, 10);
        assert!(Desktop::software(config).is_err());
    }

    #[test]
    fn test_tick_reports_close() {
        let mut desktop = recording_desktop();
        let id = desktop.manager_mut().create_bordered_frame("A", 10, 10, 500, 500);
        let outcome = desktop.tick(&PointerState::pressed(495, 15));
        assert_eq!(outcome.closed, vec![id]);
        assert!(desktop.manager().is_empty());
    }
}
