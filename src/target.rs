//! Synthetic target matrices
//!
//! Idealized partial block shapes (the eighth-block family) at an
//! arbitrary fill ratio. The boundary row/column carries the fractional
//! remainder so that sub-pixel fills still score differently.

use crate::matrix::GlyphMatrix;
use serde::Serialize;

/// Which edge a partial block grows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Filled from the top edge downward
    Top,
    /// Filled from the right edge leftward
    Right,
}

impl BlockKind {
    /// Build the target matrix for this kind
    pub fn generate(self, ratio: f64, width: usize, height: usize) -> GlyphMatrix {
        match self {
            BlockKind::Top => top_block(ratio, width, height),
            BlockKind::Right => right_block(ratio, width, height),
        }
    }

    /// Display label used in reports ("Top", "Right")
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Top => "Top",
            BlockKind::Right => "Right",
        }
    }
}

/// Clamp ratio into [0, 1]; NaN becomes 0
#[inline]
fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Top-aligned partial block
///
/// Rows `0..floor(height * ratio)` are 1.0, the next row holds the
/// fractional remainder, everything below stays 0.0.
pub fn top_block(ratio: f64, width: usize, height: usize) -> GlyphMatrix {
    let ratio = clamp_ratio(ratio);
    let mut m = GlyphMatrix::zeros(width, height);

    let extent = height as f64 * ratio;
    let full = (extent.floor() as usize).min(height);
    for row in 0..full {
        m.fill_row(row, 1.0);
    }

    if ratio < 1.0 && full < height {
        m.fill_row(full, (extent % 1.0) as f32);
    }
    m
}

/// Right-aligned partial block
///
/// Columns from `width - 1 - floor(width * ratio)` to the right edge are
/// 1.0, except the first of them, which is overwritten with the
/// fractional remainder.
pub fn right_block(ratio: f64, width: usize, height: usize) -> GlyphMatrix {
    let ratio = clamp_ratio(ratio);
    let mut m = GlyphMatrix::zeros(width, height);
    if width == 0 {
        return m;
    }

    let extent = width as f64 * ratio;
    let full = extent.floor() as usize;
    let boundary = (width - 1).saturating_sub(full);
    for col in boundary..width {
        m.fill_col(col, 1.0);
    }

    if ratio < 1.0 {
        m.fill_col(boundary, (extent % 1.0) as f32);
    }
    m
}

/// `count` evenly spaced ratios from 1/8 to 7/8 inclusive
pub fn demo_ratios(count: usize) -> Vec<f64> {
    let (start, end) = (1.0 / 8.0, 7.0 / 8.0);
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
