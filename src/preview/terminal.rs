//! Terminal preview sink
//!
//! Draws each matrix cell as a two-column block, either with a 24-bit
//! grayscale background (ANSI) or an ASCII intensity ramp.

use super::PreviewSink;
use crate::matrix::GlyphMatrix;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// ASCII ramp, darkest to brightest
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// How cells are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStyle {
    /// ESC[48;2;v;v;vm background per cell
    #[default]
    Ansi,
    /// Plain ASCII characters
    Ascii,
}

/// Quantize intensity (0.0-1.0) to an 8-bit gray level
#[inline]
fn gray_level(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pick the ramp character for an intensity
#[inline]
fn ramp_char(v: f32) -> char {
    let idx = (v.clamp(0.0, 1.0) * (ASCII_RAMP.len() - 1) as f32).round() as usize;
    ASCII_RAMP[idx] as char
}

/// Preview sink writing to any `Write` (stderr by default)
pub struct TerminalPreview<W: Write> {
    out: W,
    style: PreviewStyle,
}

impl TerminalPreview<std::io::Stderr> {
    pub fn stderr(style: PreviewStyle) -> Self {
        Self::new(std::io::stderr(), style)
    }
}

impl<W: Write> TerminalPreview<W> {
    pub fn new(out: W, style: PreviewStyle) -> Self {
        Self { out, style }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PreviewSink for TerminalPreview<W> {
    fn show(&mut self, title: &str, matrix: &GlyphMatrix) -> Result<()> {
        let mut buf = String::new();
        buf.push_str(&format!(
            "-- {} ({}x{}) --\n",
            title,
            matrix.width(),
            matrix.height()
        ));

        for row in matrix.rows() {
            for &v in row {
                match self.style {
                    PreviewStyle::Ansi => {
                        let g = gray_level(v);
                        buf.push_str(&format!("\x1b[48;2;{g};{g};{g}m  "));
                    }
                    PreviewStyle::Ascii => {
                        let c = ramp_char(v);
                        buf.push(c);
                        buf.push(c);
                    }
                }
            }
            if self.style == PreviewStyle::Ansi {
                buf.push_str("\x1b[0m");
            }
            buf.push('\n');
        }

        self.out
            .write_all(buf.as_bytes())
            .and_then(|_| self.out.flush())
            .context("Failed to write preview")
    }
}
