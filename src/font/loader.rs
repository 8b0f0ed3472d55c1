//! Font file resolution and loading
//!
//! The font is a single file inside a configured directory. A missing
//! directory setting or unreadable file is fatal at startup.

use super::FontError;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Join font directory and file name
///
/// An empty directory means the directory was never configured
/// (neither config file, FONT_DIRECTORY nor --font-dir).
pub fn resolve_font_path(directory: &str, file: &str) -> Result<PathBuf, FontError> {
    if directory.trim().is_empty() {
        return Err(FontError::DirectoryUnset);
    }
    let dir = Path::new(directory);
    if !dir.is_dir() {
        return Err(FontError::NotADirectory(dir.to_path_buf()));
    }
    Ok(dir.join(file))
}

/// Read font file bytes
pub fn load_font_file(path: &Path) -> Result<Vec<u8>, FontError> {
    debug!("Reading font: {}", path.display());
    let data = std::fs::read(path).map_err(|source| FontError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Font loaded: {} ({} bytes)", path.display(), data.len());
    Ok(data)
}

/// Well-known monospace font locations, used by tests that need a real font
#[cfg(test)]
pub(crate) fn find_system_monospace() -> Option<Vec<u8>> {
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
        "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
        "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
    ];
    candidates.iter().find_map(|p| std::fs::read(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unset_directory() {
        assert!(matches!(
            resolve_font_path("", "CascadiaCode.ttf"),
            Err(FontError::DirectoryUnset)
        ));
        assert!(matches!(
            resolve_font_path("   ", "CascadiaCode.ttf"),
            Err(FontError::DirectoryUnset)
        ));
    }

    #[test]
    fn test_resolve_missing_directory() {
        let err = resolve_font_path("/nonexistent/glyphfit/fonts", "a.ttf").unwrap_err();
        assert!(matches!(err, FontError::NotADirectory(_)));
    }

    #[test]
    fn test_resolve_joins_file() {
        let dir = std::env::temp_dir();
        let path = resolve_font_path(dir.to_str().unwrap(), "CascadiaCode.ttf").unwrap();
        assert_eq!(path, dir.join("CascadiaCode.ttf"));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("glyphfit-missing-font.ttf");
        let err = load_font_file(&path).unwrap_err();
        assert!(matches!(err, FontError::Read { .. }));
        assert!(err.to_string().contains("glyphfit-missing-font.ttf"));
    }
}
