//! Run driver
//!
//! Owns the rasterizer (and with it the glyph cache) for the whole run,
//! plus the preview sink, and sequences targets -> ranking -> reports.

use crate::config::Config;
use crate::constants::{DEMO_RATIO_COUNT, DEMO_SAMPLE_CHAR};
use crate::font::{FontdueSource, GlyphSource, Rasterizer};
use crate::preview::{self, NoPreview, PreviewSink, TerminalPreview};
use crate::ranker::{self, CodepointRange, Match};
use crate::report::{self, MatchReport, OutputFormat};
use crate::scorer::Metric;
use crate::target::{demo_ratios, BlockKind};
use anyhow::{Context, Result};
use log::{info, warn};
use std::io::Write;

/// One configured run
pub struct App<S: GlyphSource = FontdueSource> {
    rasterizer: Rasterizer<S>,
    preview: Box<dyn PreviewSink>,
    range: CodepointRange,
    limit: usize,
    metric: Metric,
    format: OutputFormat,
}

impl App<FontdueSource> {
    /// Load the configured font; failure here is fatal for the run
    pub fn from_config(config: &Config, format: OutputFormat) -> Result<Self> {
        let path = config.font.font_path()?;
        let source = FontdueSource::from_path(&path, config.font.size)
            .with_context(|| format!("Cannot use font {}", path.display()))?;
        info!("Rasterizing at {:.1}px", source.size());

        let preview: Box<dyn PreviewSink> = if config.preview.enabled {
            Box::new(TerminalPreview::stderr(config.preview.style))
        } else {
            Box::new(NoPreview)
        };

        Ok(Self::with_source(config, source, preview, format))
    }
}

impl<S: GlyphSource> App<S> {
    pub fn with_source(
        config: &Config,
        source: S,
        preview: Box<dyn PreviewSink>,
        format: OutputFormat,
    ) -> Self {
        Self {
            rasterizer: Rasterizer::new(source, config.grid.width, config.grid.height),
            preview,
            range: config.search.range(),
            limit: config.search.limit,
            metric: config.search.metric,
            format,
        }
    }

    fn rank(&mut self, target: &crate::matrix::GlyphMatrix) -> Vec<Match> {
        ranker::best_matches(&mut self.rasterizer, target, self.range, self.limit, self.metric)
    }

    /// Rank one partial block target and report it
    pub fn run_block<W: Write>(&mut self, out: &mut W, kind: BlockKind, ratio: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&ratio) {
            warn!("Ratio {} outside [0, 1], clamping", ratio);
        }
        let (width, height) = self.rasterizer.shape();
        let target = kind.generate(ratio, width, height);
        preview::show_or_warn(
            self.preview.as_mut(),
            &format!("{} block {}", kind.label(), ratio),
            &target,
        );

        let matches = self.rank(&target);
        let report = MatchReport::new(
            format!("{} block ratio: {}", kind.label(), ratio),
            Some(ratio),
            matches,
        );
        report::write_report(out, self.format, &report)
    }

    /// Reference demonstration: sample render, then top and right
    /// targets at evenly spaced ratios
    pub fn run_demo<W: Write>(&mut self, out: &mut W) -> Result<()> {
        // Render size check
        let sample = self.rasterizer.rasterize(DEMO_SAMPLE_CHAR).clone();
        preview::show_or_warn(
            self.preview.as_mut(),
            &format!("U+{:04X}", DEMO_SAMPLE_CHAR as u32),
            &sample,
        );

        let ratios = demo_ratios(DEMO_RATIO_COUNT);
        for kind in [BlockKind::Top, BlockKind::Right] {
            for &ratio in &ratios {
                self.run_block(out, kind, ratio)?;
            }
        }
        info!("Demo complete: {} glyphs cached", self.rasterizer.cached_len());
        Ok(())
    }

    /// Use a character's own rendering as the target
    pub fn run_like<W: Write>(&mut self, out: &mut W, ch: char) -> Result<()> {
        let target = self.rasterizer.rasterize(ch).clone();
        if target.is_blank() {
            warn!("U+{:04X} renders blank; every candidate scores its own ink", ch as u32);
        }
        preview::show_or_warn(self.preview.as_mut(), &format!("U+{:04X}", ch as u32), &target);

        let matches = self.rank(&target);
        let report = MatchReport::new(format!("Like U+{:04X}:", ch as u32), None, matches);
        report::write_report(out, self.format, &report)
    }

    /// Rasterize one character, preview it and print its total intensity
    pub fn run_show<W: Write>(&mut self, out: &mut W, ch: char) -> Result<()> {
        let matrix = self.rasterizer.rasterize(ch).clone();
        preview::show_or_warn(self.preview.as_mut(), &format!("U+{:04X}", ch as u32), &matrix);
        match self.format {
            OutputFormat::Text => writeln!(
                out,
                "U+{:04X} sum={:.4}{}",
                ch as u32,
                matrix.sum(),
                if matrix.is_blank() { " (blank)" } else { "" }
            )?,
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "codepoint": format!("U+{:04X}", ch as u32),
                    "sum": matrix.sum(),
                    "matrix": matrix,
                });
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::rasterizer::tests::FakeSource;
    use crate::matrix::GlyphMatrix;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records preview titles
    struct RecordingSink(Rc<RefCell<Vec<String>>>);

    impl PreviewSink for RecordingSink {
        fn show(&mut self, title: &str, _matrix: &GlyphMatrix) -> Result<()> {
            self.0.borrow_mut().push(title.to_string());
            Ok(())
        }
    }

    fn full_rows(rows: std::ops::Range<usize>) -> Vec<(usize, usize, f32)> {
        rows.flat_map(|r| (0..9).map(move |c| (r, c, 1.0))).collect()
    }

    fn app(format: OutputFormat) -> (App<FakeSource>, Rc<RefCell<Vec<String>>>) {
        let mut config = Config::default();
        config.search.set_range(CodepointRange::new(0x2580, 0x25A0));
        config.search.limit = 3;
        let source = FakeSource::new(&[
            ('\u{2580}', full_rows(0..9)),
            ('\u{2588}', full_rows(0..19)),
            ('\u{2582}', full_rows(14..19)),
        ]);
        let titles = Rc::new(RefCell::new(Vec::new()));
        let sink = Box::new(RecordingSink(titles.clone()));
        (App::with_source(&config, source, sink, format), titles)
    }

    #[test]
    fn test_demo_sequence() {
        let (mut app, titles) = app(OutputFormat::Text);
        let mut out = Vec::new();
        app.run_demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let headers: Vec<&str> = text.lines().filter(|l| l.contains("block ratio")).collect();
        assert_eq!(headers.len(), 14);
        assert_eq!(headers[0], "Top block ratio: 0.125");
        assert_eq!(headers[3], "Top block ratio: 0.5");
        assert_eq!(headers[7], "Right block ratio: 0.125");
        assert_eq!(headers[13], "Right block ratio: 0.875");

        // Sample render first, then one preview per target
        let titles = titles.borrow();
        assert_eq!(titles.len(), 15);
        assert_eq!(titles[0], "U+2588");
    }

    #[test]
    fn test_top_half_prefers_upper_half_block() {
        let (mut app, _) = app(OutputFormat::Text);
        let mut out = Vec::new();
        app.run_block(&mut out, BlockKind::Top, 0.5).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().nth(1).unwrap();
        assert!(first.contains("U+2580"), "{}", first);
    }

    #[test]
    fn test_like_returns_self_first() {
        let (mut app, _) = app(OutputFormat::Json);
        let mut out = Vec::new();
        app.run_like(&mut out, '\u{2582}').unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["matches"][0]["codepoint"], "U+2582");
        assert_eq!(v["matches"][0]["score"], 0.0);
        assert_eq!(v["matches"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_show_reports_blank() {
        let (mut app, _) = app(OutputFormat::Text);
        let mut out = Vec::new();
        app.run_show(&mut out, ' ').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "U+0020 sum=0.0000 (blank)\n");
    }
}
