//! Font discovery for card text

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Locations probed, in order, when no font is configured
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font {} is not a valid TrueType/OpenType file", .0.display())]
    Invalid(PathBuf),

    #[error("No usable font found; set export.font_path in the config file")]
    NotFound,
}

/// Load the configured font, or the first system candidate that exists
pub fn load_font(configured: Option<&Path>) -> Result<FontVec, FontError> {
    if let Some(path) = configured {
        return load_font_file(path);
    }

    let path = SYSTEM_FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .ok_or(FontError::NotFound)?;
    load_font_file(path)
}

fn load_font_file(path: &Path) -> Result<FontVec, FontError> {
    let bytes = std::fs::read(path).map_err(|source| FontError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let font = FontVec::try_from_vec(bytes).map_err(|_| FontError::Invalid(path.to_path_buf()))?;
    debug!("Loaded font {}", path.display());
    Ok(font)
}

/// Drop characters the font has no glyph for (emoji in most text faces),
/// so they are not drawn as empty boxes
pub fn drawable_text<F: Font>(font: &F, text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_whitespace() || font.glyph_id(*c).0 != 0)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Advance width of a single line
pub fn line_width<F: Font>(font: &F, size: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut previous = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_configured_font() {
        let err = load_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, FontError::Read { .. }));
    }

    #[test]
    fn test_invalid_font_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let err = load_font(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, FontError::Invalid(_)));
        assert!(err.to_string().contains("broken.ttf"));
    }
}
