//! Debug previews of matrices
//!
//! Previews are an out-of-band side channel: a sink receives a matrix
//! and shows it somewhere, but nothing it does flows back into scoring.

pub mod terminal;

pub use terminal::{PreviewStyle, TerminalPreview};

use crate::matrix::GlyphMatrix;
use anyhow::Result;

/// Destination for matrix previews
pub trait PreviewSink {
    /// Show `matrix` under a short title
    fn show(&mut self, title: &str, matrix: &GlyphMatrix) -> Result<()>;
}

/// Sink that discards everything (previews disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPreview;

impl PreviewSink for NoPreview {
    fn show(&mut self, _title: &str, _matrix: &GlyphMatrix) -> Result<()> {
        Ok(())
    }
}

/// Show a preview, logging (not propagating) sink failures
pub fn show_or_warn(sink: &mut dyn PreviewSink, title: &str, matrix: &GlyphMatrix) {
    if let Err(e) = sink.show(title, matrix) {
        log::warn!("Preview failed ({}): {}", title, e);
    }
}
