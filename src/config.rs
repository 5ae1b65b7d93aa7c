use std::path::PathBuf;

use image::Rgba;

use crate::error::GlyphError;

pub const DEFAULT_INPUT_PATH: &str = "./kanji.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_FONT_SIZE: u32 = 100;
pub const DEFAULT_PADDING: u32 = 5;
/// Upper bound accepted on the command line for font size and padding.
pub const MAX_DIMENSION: u32 = 8192;
pub const DEFAULT_FOREGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Where glyph outlines come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontSource {
    /// The platform's sans-serif face, with CJK-capable families preferred.
    #[default]
    System,
    /// A TrueType/OpenType file; `index` selects a face inside a collection.
    File { path: PathBuf, index: u32 },
}

/// Everything a render run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct GlyphConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Keep only the first N tokens of the list.
    pub max_count: Option<usize>,
    pub font_size: u32,
    /// Added to `font_size` to get the canvas side length.
    pub padding: u32,
    pub font: FontSource,
    pub foreground: Rgba<u8>,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_count: None,
            font_size: DEFAULT_FONT_SIZE,
            padding: DEFAULT_PADDING,
            font: FontSource::System,
            foreground: DEFAULT_FOREGROUND,
        }
    }
}

impl GlyphConfig {
    /// Side length of the square canvas in pixels.
    pub fn canvas_side(&self) -> u32 {
        self.font_size.saturating_add(self.padding).max(1)
    }

    /// Reject sizes that cannot produce a usable canvas.
    pub fn validate(&self) -> Result<(), GlyphError> {
        if self.font_size == 0 || self.font_size > MAX_DIMENSION || self.padding > MAX_DIMENSION {
            return Err(GlyphError::InvalidSize {
                font_size: self.font_size,
                padding: self.padding,
            });
        }
        Ok(())
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional) into an RGBA color.
pub fn parse_hex_color(input: &str) -> Result<Rgba<u8>, String> {
    let hex = input.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(format!("color '{}' must look like #rrggbb or #rrggbbaa", input));
    }
    let channel = |idx: usize| {
        u8::from_str_radix(&hex[idx..idx + 2], 16)
            .map_err(|_| format!("color '{}' contains non-hex digits", input))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}
