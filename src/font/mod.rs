//! Font loading and glyph rasterization
//!
//! Handles:
//! - Font file resolution from the configured directory
//! - TTF/OTF loading (fontdue)
//! - Rendering one character onto a fixed-size cell canvas
//! - Memoizing rendered cells per character

pub mod loader;
pub mod rasterizer;

pub use loader::{load_font_file, resolve_font_path};
pub use rasterizer::{FontdueSource, GlyphSource, Rasterizer};

use std::path::PathBuf;
use thiserror::Error;

/// Fatal font initialization errors
#[derive(Debug, Error)]
pub enum FontError {
    /// No font directory configured anywhere
    #[error("Font directory not set. Set FONT_DIRECTORY or pass --font-dir")]
    DirectoryUnset,

    /// Configured directory does not exist
    #[error("Font directory not found: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Font file could not be read
    #[error("Failed to read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// fontdue rejected the font data
    #[error("Failed to load font: {0}")]
    Parse(String),

    /// Font carries no horizontal line metrics
    #[error("Cannot get line metrics at size {0}")]
    NoLineMetrics(f32),
}
