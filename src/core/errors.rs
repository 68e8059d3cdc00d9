//! Error types surfaced while building and driving the orrery scene.
use std::fmt;

/// Failure categories raised by scene construction and asset handling.
#[derive(Debug, Clone, PartialEq)]
pub enum OrreryError {
    /// The off-screen canvas backing an info panel could not be allocated.
    CanvasUnavailable { width: u32, height: u32 },
    /// A selection named a section with no content record.
    UnknownSection { key: String },
    /// An asset handle reported a failed load.
    AssetLoadFailed { path: String, reason: String },
    /// The remote label font could not be fetched or parsed.
    FontFetch { url: String, reason: String },
    /// The section content override file was unreadable or malformed.
    SectionTable { path: String, reason: String },
}

impl OrreryError {
    pub fn canvas_unavailable(width: u32, height: u32) -> Self {
        Self::CanvasUnavailable { width, height }
    }

    pub fn unknown_section(key: impl Into<String>) -> Self {
        Self::UnknownSection { key: key.into() }
    }

    pub fn asset_load_failed(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::AssetLoadFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn font_fetch(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::FontFetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn section_table(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::SectionTable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for OrreryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanvasUnavailable { width, height } => write!(
                f,
                "panel canvas {}x{} could not be allocated",
                width, height
            ),
            Self::UnknownSection { key } => write!(f, "no section content for '{}'", key),
            Self::AssetLoadFailed { path, reason } => {
                write!(f, "asset {} failed to load: {}", path, reason)
            }
            Self::FontFetch { url, reason } => {
                write!(f, "label font {} unavailable: {}", url, reason)
            }
            Self::SectionTable { path, reason } => {
                write!(f, "section table {} rejected: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for OrreryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_input() {
        let canvas = OrreryError::canvas_unavailable(0, 512);
        assert_eq!(
            canvas.to_string(),
            "panel canvas 0x512 could not be allocated"
        );

        let section = OrreryError::unknown_section("pluto");
        assert!(section.to_string().contains("'pluto'"));

        let asset = OrreryError::asset_load_failed("textures/mars.jpg", "not found");
        assert!(matches!(asset, OrreryError::AssetLoadFailed { .. }));
        assert!(asset.to_string().contains("textures/mars.jpg"));

        let font = OrreryError::font_fetch("https://example.invalid/font.ttf", "timeout");
        assert!(font.to_string().ends_with("timeout"));
    }

    #[test]
    fn converts_into_boxed_error() {
        let boxed: Box<dyn std::error::Error + Send + Sync> =
            Box::new(OrreryError::section_table("config/sections.json", "eof"));
        assert!(boxed.to_string().contains("config/sections.json"));
    }
}
