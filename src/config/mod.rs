//! Configuration file management
//!
//! Loads TOML configuration files and provides run settings.
//! Default config path: ~/.config/glyphfit/config.toml
//!
//! Font, cell size and search range are fixed for a run: they are read
//! once at startup and handed to the rasterizer and ranker explicitly.

use crate::constants::{
    FONT_DIRECTORY_ENV, FONT_FILE, FONT_SIZE, HEIGHT, N_MATCHES, UNICODE_RANGE, WIDTH,
};
use crate::font::FontError;
use crate::preview::PreviewStyle;
use crate::ranker::CodepointRange;
use crate::scorer::Metric;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Invalid settings
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Cell size must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("Match limit must be at least 1")]
    ZeroLimit,

    #[error("Empty code point range: {start:#X}..{end:#X}")]
    EmptyRange { start: u32, end: u32 },

    #[error("Code point range end {0:#X} exceeds 0x10000 (Basic Multilingual Plane)")]
    RangeTooLarge(u32),

    #[error("Font size must be positive, got {0}")]
    InvalidFontSize(f32),
}

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub font: FontConfig,
    /// Cell (matrix) size
    pub grid: GridConfig,
    /// Search settings
    pub search: SearchConfig,
    /// Debug preview settings
    pub preview: PreviewConfig,
}

/// Font settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Directory containing the font file (empty = unset; FONT_DIRECTORY overrides)
    pub directory: String,
    /// Font file name inside the directory
    pub file: String,
    /// Rasterize size (pixels)
    pub size: f32,
}

/// Cell size settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Cell width in pixels
    pub width: usize,
    /// Cell height in pixels
    pub height: usize,
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// First code point scanned
    pub range_start: u32,
    /// One past the last code point scanned
    pub range_end: u32,
    /// Matches reported per target
    pub limit: usize,
    /// Scoring: "absolute" (default) or "squared"
    pub metric: Metric,
}

/// Debug preview settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Show rasterizations and targets on stderr
    pub enabled: bool,
    /// "ansi" (24-bit gray background) or "ascii"
    pub style: PreviewStyle,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            file: FONT_FILE.to_string(),
            size: FONT_SIZE,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            range_start: 0,
            range_end: UNICODE_RANGE,
            limit: N_MATCHES,
            metric: Metric::default(),
        }
    }
}

impl FontConfig {
    /// Full path of the font file
    pub fn font_path(&self) -> Result<PathBuf, FontError> {
        crate::font::resolve_font_path(&self.directory, &self.file)
    }
}

impl SearchConfig {
    pub fn range(&self) -> CodepointRange {
        CodepointRange::new(self.range_start, self.range_end)
    }

    pub fn set_range(&mut self, range: CodepointRange) {
        self.range_start = range.start;
        self.range_end = range.end;
    }
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/glyphfit/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. GLYPHFIT_CONFIG environment variable
        if let Ok(path) = std::env::var("GLYPHFIT_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
            warn!("GLYPHFIT_CONFIG points to a missing file: {}", path);
        }

        // 2. User config: ~/.config/glyphfit/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/glyphfit/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. GLYPHFIT_CONFIG environment variable
    /// 2. ~/.config/glyphfit/config.toml (user config)
    /// 3. /etc/glyphfit/config.toml (system config)
    /// 4. Built-in defaults
    ///
    /// FONT_DIRECTORY is applied on top of whichever source won.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                    Self::default()
                }
            },
            None => {
                info!("Using built-in default config");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load settings from specified path
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(FONT_DIRECTORY_ENV).filter(|d| !d.is_empty()) {
            debug!("{} override: {}", FONT_DIRECTORY_ENV, dir);
            self.font.directory = dir;
        }
    }

    /// Check settings before anything is rasterized
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid.width, self.grid.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if !(self.font.size.is_finite() && self.font.size > 0.0) {
            return Err(ConfigError::InvalidFontSize(self.font.size));
        }
        if self.search.limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        let range = self.search.range();
        if range.is_empty() {
            return Err(ConfigError::EmptyRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > UNICODE_RANGE {
            return Err(ConfigError::RangeTooLarge(range.end));
        }
        Ok(())
    }

    /// Write built-in defaults to the user config path
    ///
    /// Refuses to replace an existing file unless `force` is set.
    pub fn write_default_config(force: bool) -> Result<PathBuf> {
        let path = default_config_path().context("Config directory not found")?;
        if path.exists() && !force {
            anyhow::bail!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, Self::default_template()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Built-in defaults as commented TOML
    pub fn default_template() -> Result<String> {
        let body =
            toml::to_string_pretty(&Self::default()).context("Failed to serialize config")?;
        Ok(format!(
            "# glyphfit configuration\n\
             #\n\
             # font.directory may be left empty and supplied via {} instead.\n\
             # search.range_end is exclusive. search.metric: \"absolute\" | \"squared\".\n\
             # preview.style: \"ansi\" | \"ascii\".\n\n{}",
            FONT_DIRECTORY_ENV, body
        ))
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("glyphfit").join("config.toml"))
}
