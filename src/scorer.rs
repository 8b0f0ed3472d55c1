//! Pixel dissimilarity between two equal-shaped matrices
//!
//! Lower is more similar; identical matrices score 0.

use crate::matrix::GlyphMatrix;
use serde::{Deserialize, Serialize};

/// Scoring strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Sum of absolute differences
    #[default]
    #[serde(alias = "abs", alias = "sad")]
    Absolute,
    /// Sum of squared differences
    #[serde(alias = "ssd")]
    Squared,
}

impl Metric {
    /// Score `a` against `b`
    pub fn score(self, a: &GlyphMatrix, b: &GlyphMatrix) -> f32 {
        match self {
            Metric::Absolute => difference(a, b),
            Metric::Squared => squared_difference(a, b),
        }
    }

    /// Parse "absolute" / "squared" (and short aliases)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "absolute" | "abs" | "sad" => Some(Metric::Absolute),
            "squared" | "ssd" => Some(Metric::Squared),
            _ => None,
        }
    }
}

#[inline]
fn check_shape(a: &GlyphMatrix, b: &GlyphMatrix) {
    assert_eq!(
        a.shape(),
        b.shape(),
        "matrix shape mismatch: {:?} vs {:?}",
        a.shape(),
        b.shape()
    );
}

/// Sum over all cells of |a - b|
pub fn difference(a: &GlyphMatrix, b: &GlyphMatrix) -> f32 {
    check_shape(a, b);
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y).abs())
        .sum()
}

/// Sum over all cells of (a - b)^2
pub fn squared_difference(a: &GlyphMatrix, b: &GlyphMatrix) -> f32 {
    check_shape(a, b);
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{right_block, top_block};

    #[test]
    fn test_difference_identity() {
        let a = top_block(0.375, 9, 19);
        assert_eq!(difference(&a, &a), 0.0);
        assert_eq!(squared_difference(&a, &a), 0.0);
    }

    #[test]
    fn test_difference_symmetric() {
        let a = top_block(0.3, 9, 19);
        let b = right_block(0.6, 9, 19);
        assert_eq!(difference(&a, &b), difference(&b, &a));
        assert!(difference(&a, &b) > 0.0);
    }

    #[test]
    fn test_difference_full_vs_empty() {
        let full = GlyphMatrix::filled(9, 19, 1.0);
        let empty = GlyphMatrix::zeros(9, 19);
        assert!((difference(&full, &empty) - 171.0).abs() < 1e-3);
    }

    #[test]
    fn test_squared_penalizes_large_errors() {
        let base = GlyphMatrix::zeros(2, 1);
        let mut half = GlyphMatrix::zeros(2, 1);
        half.set(0, 0, 0.5);
        half.set(0, 1, 0.5);
        assert!((Metric::Absolute.score(&base, &half) - 1.0).abs() < 1e-6);
        assert!((Metric::Squared.score(&base, &half) - 0.5).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_shape_mismatch_panics() {
        difference(&GlyphMatrix::zeros(9, 19), &GlyphMatrix::zeros(19, 9));
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!(Metric::parse("absolute"), Some(Metric::Absolute));
        assert_eq!(Metric::parse("SSD"), Some(Metric::Squared));
        assert_eq!(Metric::parse("cosine"), None);
        assert_eq!(Metric::default(), Metric::Absolute);
    }
}
