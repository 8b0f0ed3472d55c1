//! Grayscale intensity matrix
//!
//! Fixed-size, row-major grid of f32 intensities in [0.0, 1.0],
//! origin at the top-left. Used for both rasterized glyphs and
//! synthesized targets.

use serde::Serialize;

/// Row-major intensity matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphMatrix {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl GlyphMatrix {
    /// All-zero matrix (blank canvas)
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Matrix with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.width + col] = value;
    }

    /// Set every cell of one row
    pub fn fill_row(&mut self, row: usize, value: f32) {
        let start = row * self.width;
        self.data[start..start + self.width].fill(value);
    }

    /// Set every cell of one column
    pub fn fill_col(&mut self, col: usize, value: f32) {
        for row in 0..self.height {
            self.set(row, col, value);
        }
    }

    /// Flat row-major view
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks(self.width.max(1))
    }

    /// Total intensity
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// True when nothing was drawn (total intensity exactly zero)
    pub fn is_blank(&self) -> bool {
        self.sum() == 0.0
    }
}
