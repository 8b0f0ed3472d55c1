//! Global constants for glyphfit
//!
//! Consolidates grid, font and search defaults
//! to eliminate magic numbers throughout the codebase.

// ============================================================================
// Grid Constants
// ============================================================================

/// Glyph matrix width in pixels (one terminal cell)
pub const WIDTH: usize = 9;

/// Glyph matrix height in pixels (one terminal cell)
pub const HEIGHT: usize = 19;

// ============================================================================
// Font Constants
// ============================================================================

/// Rasterization size in pixels
pub const FONT_SIZE: f32 = 16.0;

/// Font file looked up inside the font directory
pub const FONT_FILE: &str = "CascadiaCode.ttf";

/// Environment variable naming the directory that holds the font file
pub const FONT_DIRECTORY_ENV: &str = "FONT_DIRECTORY";

/// Maximum channel value of the rasterizer's grayscale output
pub const MAX_INTENSITY: f32 = 255.0;

// ============================================================================
// Search Constants
// ============================================================================

/// End of the default scan range (exclusive): the Basic Multilingual Plane
pub const UNICODE_RANGE: u32 = 0x10000;

/// Default number of matches reported per target
pub const N_MATCHES: usize = 20;

/// Number of evenly spaced ratios in [1/8, 7/8] used by the demo
pub const DEMO_RATIO_COUNT: usize = 7;

/// Character rasterized by the demo to check render size (FULL BLOCK)
pub const DEMO_SAMPLE_CHAR: char = '\u{2588}';
