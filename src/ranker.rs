//! Exhaustive best-match search over a code point range
//!
//! Every code point is rasterized (through the rasterizer's cache),
//! blank renders are skipped, the rest are scored against the target
//! and the lowest scores win.

use crate::font::{GlyphSource, Rasterizer};
use crate::matrix::GlyphMatrix;
use crate::scorer::Metric;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Half-open code point range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn iter(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }
}

impl Default for CodepointRange {
    /// The Basic Multilingual Plane
    fn default() -> Self {
        Self::new(0, crate::constants::UNICODE_RANGE)
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}..U+{:04X}", self.start, self.end)
    }
}

/// Parse one bound: "0x2580", "U+2580" or decimal
pub fn parse_codepoint(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Some(hex) = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix("U+"))
        .or_else(|| s.strip_prefix("u+"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

impl FromStr for CodepointRange {
    type Err = String;

    /// "START..END" (end exclusive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| format!("expected START..END, got \"{}\"", s))?;
        let start =
            parse_codepoint(start).ok_or_else(|| format!("invalid start: \"{}\"", start))?;
        let end = parse_codepoint(end).ok_or_else(|| format!("invalid end: \"{}\"", end))?;
        if end <= start {
            return Err(format!("empty range: {}..{}", start, end));
        }
        Ok(Self::new(start, end))
    }
}

/// One ranked candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Match {
    #[serde(rename = "char")]
    pub ch: char,
    pub score: f32,
}

impl Match {
    pub fn codepoint(&self) -> u32 {
        self.ch as u32
    }
}

/// Scan statistics for one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Code points visited
    pub scanned: usize,
    /// Skipped as blank (or not a scalar value)
    pub blank: usize,
    /// Scored
    pub scored: usize,
}

/// Lowest-scoring `limit` characters in `range`, ascending by score
///
/// Ties keep code point order.
pub fn best_matches<S: GlyphSource>(
    rasterizer: &mut Rasterizer<S>,
    target: &GlyphMatrix,
    range: CodepointRange,
    limit: usize,
    metric: Metric,
) -> Vec<Match> {
    best_matches_with_stats(rasterizer, target, range, limit, metric).0
}

/// `best_matches` plus scan statistics
pub fn best_matches_with_stats<S: GlyphSource>(
    rasterizer: &mut Rasterizer<S>,
    target: &GlyphMatrix,
    range: CodepointRange,
    limit: usize,
    metric: Metric,
) -> (Vec<Match>, ScanStats) {
    let mut stats = ScanStats::default();
    let mut scores: Vec<Match> = Vec::with_capacity(range.len());

    for cp in range.iter() {
        stats.scanned += 1;
        let Some(ch) = char::from_u32(cp) else {
            stats.blank += 1;
            continue;
        };
        let glyph = rasterizer.rasterize(ch);
        if glyph.is_blank() {
            stats.blank += 1;
            continue;
        }
        scores.push(Match {
            ch,
            score: metric.score(glyph, target),
        });
    }
    stats.scored = scores.len();

    // Stable sort: equal scores stay in code point order
    scores.sort_by(|a, b| a.score.total_cmp(&b.score));
    scores.truncate(limit);

    debug!(
        "Scanned {}: {} code points, {} blank, {} scored, cache={}",
        range,
        stats.scanned,
        stats.blank,
        stats.scored,
        rasterizer.cached_len()
    );

    (scores, stats)
}
