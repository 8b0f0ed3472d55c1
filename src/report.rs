//! Match list reporting
//!
//! Text (human-readable, one match per line) or JSON (one object per report).

use crate::ranker::Match;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use unicode_width::UnicodeWidthChar;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// JSON Lines: one object per ranked target
    Json,
}

/// One JSON match entry
#[derive(Debug, Serialize)]
struct MatchEntry {
    codepoint: String,
    #[serde(rename = "char")]
    ch: char,
    score: f32,
}

/// One ranked target and its matches
#[derive(Debug, Serialize)]
pub struct MatchReport {
    /// Header, e.g. "Top block ratio: 0.125"
    pub label: String,
    /// Fill ratio for block targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(serialize_with = "serialize_matches")]
    pub matches: Vec<Match>,
}

fn serialize_matches<S: serde::Serializer>(matches: &[Match], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(matches.iter().map(|m| MatchEntry {
        codepoint: format!("U+{:04X}", m.codepoint()),
        ch: m.ch,
        score: m.score,
    }))
}

impl MatchReport {
    pub fn new(label: impl Into<String>, ratio: Option<f64>, matches: Vec<Match>) -> Self {
        Self {
            label: label.into(),
            ratio,
            matches,
        }
    }
}

/// Printable form of a character padded to two terminal columns
///
/// Control characters are escaped, zero-width marks get a dotted circle base.
fn display_char(ch: char) -> String {
    if ch.is_control() {
        return format!("{:<2}", ch.escape_unicode().to_string());
    }
    match UnicodeWidthChar::width(ch) {
        Some(0) | None => format!("\u{25CC}{} ", ch),
        Some(1) => format!("{} ", ch),
        Some(_) => ch.to_string(),
    }
}

/// Text rendering of one report (trailing blank line included)
pub fn render_text(report: &MatchReport) -> String {
    let mut out = String::new();
    out.push_str(&report.label);
    out.push('\n');
    for (i, m) in report.matches.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {}  U+{:04X}  {:.4}\n",
            i + 1,
            display_char(m.ch),
            m.codepoint(),
            m.score
        ));
    }
    out.push('\n');
    out
}

/// Write one report in the chosen format
pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &MatchReport,
) -> Result<()> {
    match format {
        OutputFormat::Text => out.write_all(render_text(report).as_bytes())?,
        OutputFormat::Json => {
            let line = serde_json::to_string(report).context("Failed to serialize report")?;
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
