//! Error types for the window manager.
//!
//! The steady-state window manager never fails: out-of-range writes, inert
//! frames and blocked drags are silent no-ops. Errors only come from the
//! edges: loading a configuration and creating surfaces.

use std::path::PathBuf;

use thiserror::Error;
use trellis_render::RenderError;

/// Errors raised while setting up a desktop.
#[derive(Debug, Error)]
pub enum WmError {
    /// The configuration text is not valid TOML or has the wrong shape.
    #[error("invalid desktop configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parsed but describes an unusable desktop.
    #[error("invalid desktop configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Surface creation or export failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type for window manager setup.
pub type WmResult<T> = std::result::Result<T, WmError>;
