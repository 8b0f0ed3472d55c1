//! glyphfit - find the font glyphs that best approximate partial block cells
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        Config (TOML + env + CLI)         │
//! ├──────────────────────────────────────────┤
//! │  Rasterizer (fontdue, cached per char)   │
//! │        ↓                    ↓            │
//! │  Glyph matrices      Target generator    │
//! │        └──────→ Scorer ←─────┘           │
//! │                   ↓                      │
//! │        Ranker (top-N lowest score)       │
//! │                   ↓                      │
//! │        Report (text / JSON)              │
//! └──────────────────────────────────────────┘
//! ```

mod app;
mod config;
mod constants;
mod font;
mod matrix;
mod preview;
mod ranker;
mod report;
mod scorer;
mod target;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::preview::PreviewStyle;
use crate::ranker::CodepointRange;
use crate::report::OutputFormat;
use crate::scorer::Metric;
use crate::target::BlockKind;

#[derive(Parser, Debug)]
#[command(name = "glyphfit", version)]
#[command(about = "Rank font glyphs by pixel similarity to partial block cells")]
struct Cli {
    /// Directory containing the font file (overrides FONT_DIRECTORY)
    #[arg(long, global = true, value_name = "DIR")]
    font_dir: Option<PathBuf>,

    /// Font file name inside the font directory
    #[arg(long, global = true, value_name = "FILE")]
    font_file: Option<String>,

    /// Rasterize size in pixels
    #[arg(long, global = true)]
    size: Option<f32>,

    /// Number of matches per target
    #[arg(short = 'n', long, global = true)]
    limit: Option<usize>,

    /// Code point range START..END, end exclusive (e.g. 0x2500..0x2600)
    #[arg(long, global = true, value_name = "START..END")]
    range: Option<CodepointRange>,

    /// Scoring: absolute | squared
    #[arg(long, global = true, value_parser = parse_metric)]
    metric: Option<Metric>,

    /// Show rasterizations and targets on stderr (on by default for demo)
    #[arg(long, global = true)]
    preview: bool,

    /// Never show previews, not even for demo
    #[arg(long, global = true, conflicts_with = "preview")]
    no_preview: bool,

    /// Draw previews with ASCII instead of ANSI colors
    #[arg(long, global = true)]
    ascii: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample render, then top and right blocks at 1/8..7/8 (default)
    Demo,
    /// Rank against a top-aligned block filled to RATIO (0.0-1.0)
    Top {
        #[arg(allow_negative_numbers = true)]
        ratio: f64,
    },
    /// Rank against a right-aligned block filled to RATIO (0.0-1.0)
    Right {
        #[arg(allow_negative_numbers = true)]
        ratio: f64,
    },
    /// Rank against the rendering of CHAR (a character, U+XXXX or 0xXXXX)
    Like {
        #[arg(value_parser = parse_char)]
        ch: char,
    },
    /// Rasterize CHAR and print its total intensity
    Show {
        #[arg(value_parser = parse_char)]
        ch: char,
    },
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    Metric::parse(s).ok_or_else(|| format!("unknown metric \"{}\" (absolute, squared)", s))
}

/// A literal character, or a code point as U+XXXX / 0xXXXX
fn parse_char(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c);
    }
    ranker::parse_codepoint(s)
        .filter(|_| s.starts_with("U+") || s.starts_with("u+") || s.starts_with("0x"))
        .and_then(char::from_u32)
        .ok_or_else(|| format!("expected one character or U+XXXX, got \"{}\"", s))
}

impl Cli {
    /// Command-line flags win over config file and environment
    fn apply(&self, cfg: &mut config::Config) -> Result<()> {
        if let Some(dir) = &self.font_dir {
            cfg.font.directory = dir
                .to_str()
                .ok_or_else(|| anyhow!("Font directory is not valid UTF-8: {}", dir.display()))?
                .to_string();
        }
        if let Some(file) = &self.font_file {
            cfg.font.file = file.clone();
        }
        if let Some(size) = self.size {
            cfg.font.size = size;
        }
        if let Some(limit) = self.limit {
            cfg.search.limit = limit;
        }
        if let Some(range) = self.range {
            cfg.search.set_range(range);
        }
        if let Some(metric) = self.metric {
            cfg.search.metric = metric;
        }
        let is_demo = matches!(self.command, None | Some(Command::Demo));
        if self.preview || is_demo {
            cfg.preview.enabled = true;
        }
        if self.no_preview {
            cfg.preview.enabled = false;
        }
        if self.ascii {
            cfg.preview.style = PreviewStyle::Ascii;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(Command::InitConfig { force }) = cli.command {
        let path = config::Config::write_default_config(force)?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let mut cfg = config::Config::load();
    cli.apply(&mut cfg)?;
    cfg.validate()?;

    info!(
        "glyphfit {}: cell={}x{}, range={}, limit={}, metric={:?}",
        env!("CARGO_PKG_VERSION"),
        cfg.grid.width,
        cfg.grid.height,
        cfg.search.range(),
        cfg.search.limit,
        cfg.search.metric
    );

    // Fatal before any rasterization if the font is missing or unusable
    let mut app = app::App::from_config(&cfg, cli.format)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => app.run_demo(&mut out),
        Command::Top { ratio } => app.run_block(&mut out, BlockKind::Top, ratio),
        Command::Right { ratio } => app.run_block(&mut out, BlockKind::Right, ratio),
        Command::Like { ch } => app.run_like(&mut out, ch),
        Command::Show { ch } => app.run_show(&mut out, ch),
        Command::InitConfig { .. } => Ok(()),
    }
}
