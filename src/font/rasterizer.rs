//! Cell rasterizer
//!
//! Renders one character at a fixed pixel size onto a blank cell canvas
//! anchored at the top-left, and memoizes the result per character.
//! Font and size are fixed for the lifetime of a `Rasterizer`.

use super::FontError;
use crate::matrix::GlyphMatrix;
use fontdue::{Font, FontSettings};
use log::{debug, info, trace};
use std::collections::HashMap;
use std::path::Path;

/// Something that can draw a character onto a zeroed canvas
pub trait GlyphSource {
    /// Draw `ch` onto `canvas`, writing intensities in 0.0-1.0
    ///
    /// Pixels falling outside the canvas are clipped.
    fn render(&self, ch: char, canvas: &mut GlyphMatrix);
}

/// fontdue-backed glyph source
pub struct FontdueSource {
    font: Font,
    /// Rasterize size (pixels)
    size: f32,
    /// Baseline Y position (distance from canvas top)
    baseline: i32,
}

impl FontdueSource {
    /// Load font from raw TTF/OTF bytes
    pub fn new(font_data: &[u8], size: f32) -> Result<Self, FontError> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::Parse(e.to_string()))?;

        let metrics = font
            .horizontal_line_metrics(size)
            .ok_or(FontError::NoLineMetrics(size))?;

        // Text drawn at (0, 0) puts the ascender line on the top edge
        let baseline = metrics.ascent.round() as i32;

        info!(
            "Font metrics: size={:.1}, ascent={:.1}, descent={:.1}, baseline={}",
            size, metrics.ascent, metrics.descent, baseline
        );

        Ok(Self {
            font,
            size,
            baseline,
        })
    }

    /// Read and load a font file
    pub fn from_path(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = super::load_font_file(path)?;
        Self::new(&data, size)
    }

    /// Get rasterize size
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl GlyphSource for FontdueSource {
    fn render(&self, ch: char, canvas: &mut GlyphMatrix) {
        let (metrics, bitmap) = self.font.rasterize(ch, self.size);
        let bw = metrics.width;
        let bh = metrics.height;
        if bw == 0 || bh == 0 {
            return;
        }

        // fontdue's ymin is the bitmap bottom relative to the baseline (up = positive)
        let top = self.baseline - (metrics.ymin + bh as i32);
        let left = metrics.xmin;
        let (cell_w, cell_h) = (canvas.width() as i32, canvas.height() as i32);

        for y in 0..bh {
            let cy = top + y as i32;
            if cy < 0 || cy >= cell_h {
                continue;
            }
            for x in 0..bw {
                let cx = left + x as i32;
                if cx < 0 || cx >= cell_w {
                    continue;
                }
                let v = bitmap[y * bw + x];
                canvas.set(
                    cy as usize,
                    cx as usize,
                    v as f32 / crate::constants::MAX_INTENSITY,
                );
            }
        }
    }
}

/// Memoizing rasterizer: character -> cell matrix
///
/// The cache lives as long as the rasterizer and is never evicted;
/// it is bounded by the number of distinct characters requested.
pub struct Rasterizer<S: GlyphSource = FontdueSource> {
    source: S,
    width: usize,
    height: usize,
    /// Character -> rendered cell
    cache: HashMap<char, GlyphMatrix>,
}

impl<S: GlyphSource> Rasterizer<S> {
    pub fn new(source: S, width: usize, height: usize) -> Self {
        debug!("Rasterizer created: cell={}x{}", width, height);
        Self {
            source,
            width,
            height,
            cache: HashMap::new(),
        }
    }

    /// Cell matrix for `ch`, rendering on first request
    pub fn rasterize(&mut self, ch: char) -> &GlyphMatrix {
        let (width, height) = (self.width, self.height);
        let source = &self.source;
        self.cache.entry(ch).or_insert_with(|| {
            let mut canvas = GlyphMatrix::zeros(width, height);
            source.render(ch, &mut canvas);
            if canvas.is_blank() {
                trace!("Blank render: U+{:04X}", ch as u32);
            }
            canvas
        })
    }

    /// (width, height) of every matrix this rasterizer produces
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of memoized characters
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::font::loader::find_system_monospace;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Test source: fixed patterns per character, counts render calls
    pub(crate) struct FakeSource {
        pub patterns: HashMap<char, Vec<(usize, usize, f32)>>,
        pub renders: Cell<usize>,
    }

    impl FakeSource {
        pub fn new(patterns: &[(char, Vec<(usize, usize, f32)>)]) -> Self {
            Self {
                patterns: patterns.iter().cloned().collect(),
                renders: Cell::new(0),
            }
        }
    }

    impl GlyphSource for FakeSource {
        fn render(&self, ch: char, canvas: &mut GlyphMatrix) {
            self.renders.set(self.renders.get() + 1);
            if let Some(pixels) = self.patterns.get(&ch) {
                for &(row, col, v) in pixels {
                    canvas.set(row, col, v);
                }
            }
        }
    }

    #[test]
    fn test_rasterize_is_cached() {
        let source = FakeSource::new(&[('a', vec![(0, 0, 1.0)])]);
        let mut r = Rasterizer::new(source, 9, 19);

        let first = r.rasterize('a').clone();
        let second = r.rasterize('a').clone();
        assert_eq!(first, second);
        assert_eq!(r.source.renders.get(), 1);
        assert_eq!(r.cached_len(), 1);

        r.rasterize('b');
        assert_eq!(r.source.renders.get(), 2);
        assert_eq!(r.cached_len(), 2);
    }

    #[test]
    fn test_rasterize_shape() {
        let mut r = Rasterizer::new(FakeSource::new(&[]), 9, 19);
        let m = r.rasterize('x');
        assert_eq!(m.shape(), (9, 19));
        assert!(m.is_blank());
    }

    #[test]
    fn test_fontdue_rejects_garbage() {
        let err = FontdueSource::new(b"not a font", 16.0);
        assert!(matches!(err, Err(FontError::Parse(_))));
    }

    #[test]
    fn test_fontdue_render_system_font() {
        let Some(data) = find_system_monospace() else {
            eprintln!("[SKIP] no system monospace font found");
            return;
        };
        let source = FontdueSource::new(&data, 16.0).unwrap();
        let mut r = Rasterizer::new(source, 9, 19);

        let block = r.rasterize('\u{2588}').clone();
        assert!(!block.is_blank());
        assert!(block.as_slice().iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(r.rasterize(' ').is_blank());

        // Cached copy and a fresh render are bit-identical
        let fresh = {
            let mut canvas = GlyphMatrix::zeros(9, 19);
            r.source.render('\u{2588}', &mut canvas);
            canvas
        };
        assert_eq!(block, fresh);
    }
}
