use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::config::FontSource;
use crate::error::{GlyphError, Result};

/// Vertical extent of a face at a given pixel size, relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline up to the top of the em box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the em box; zero or negative.
    pub descent: f32,
}

/// A rasterized glyph: 8-bit coverage, row-major, `width * height` long.
#[derive(Debug, Clone, Default)]
pub struct RasterGlyph {
    pub advance: f32,
    /// Left edge of the bitmap relative to the pen position.
    pub xmin: i32,
    /// Bottom edge of the bitmap above the baseline.
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// Source of glyph bitmaps.
pub trait GlyphFace {
    fn name(&self) -> &str;
    fn line_metrics(&self, px: f32) -> LineMetrics;
    fn rasterize(&self, ch: char, px: f32) -> RasterGlyph;
}

/// Build the face described by `source`.
pub fn load_face(source: &FontSource) -> Result<Box<dyn GlyphFace>> {
    let face = match source {
        FontSource::System => super::system::load_sans_serif()?,
        FontSource::File { path, index } => OutlineFace::load(path, *index)?,
    };
    Ok(Box::new(face))
}

/// Parse font bytes with fontdue, selecting face `index` of a collection.
pub(crate) fn parse_font(data: &[u8], index: u32) -> std::result::Result<Font, &'static str> {
    let settings = FontSettings {
        collection_index: index,
        ..FontSettings::default()
    };
    Font::from_bytes(data, settings)
}

/// Outline fonts rasterized with fontdue.
///
/// Characters missing from the primary font are taken from the first
/// fallback that maps them; line metrics always come from the primary.
pub struct OutlineFace {
    name: String,
    primary: Font,
    fallbacks: Vec<Font>,
}

impl OutlineFace {
    pub fn new(name: String, primary: Font, fallbacks: Vec<Font>) -> Self {
        Self {
            name,
            primary,
            fallbacks,
        }
    }

    /// Load a TrueType/OpenType file or one face of a collection.
    pub fn load(path: &Path, index: u32) -> Result<Self> {
        let data = fs::read(path).map_err(|err| GlyphError::FontLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let font = parse_font(&data, index).map_err(|reason| GlyphError::FontLoad {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })?;
        let name = font
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        log::debug!("loaded font '{}' from {}", name, path.display());
        Ok(Self::new(name, font, Vec::new()))
    }

    /// Whether any font in the chain maps `ch` to a real glyph.
    pub fn covers(&self, ch: char) -> bool {
        self.fonts().any(|font| font.lookup_glyph_index(ch) != 0)
    }

    fn fonts(&self) -> impl Iterator<Item = &Font> {
        std::iter::once(&self.primary).chain(self.fallbacks.iter())
    }

    fn font_for(&self, ch: char) -> &Font {
        self.fonts()
            .find(|font| font.lookup_glyph_index(ch) != 0)
            .unwrap_or(&self.primary)
    }
}

impl GlyphFace for OutlineFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn line_metrics(&self, px: f32) -> LineMetrics {
        match self.primary.horizontal_line_metrics(px) {
            Some(metrics) => LineMetrics {
                ascent: metrics.ascent,
                descent: metrics.descent,
            },
            None => LineMetrics {
                ascent: px * 0.8,
                descent: -px * 0.2,
            },
        }
    }

    fn rasterize(&self, ch: char, px: f32) -> RasterGlyph {
        let font = self.font_for(ch);
        if !ch.is_whitespace() && font.lookup_glyph_index(ch) == 0 {
            log::warn!("no font covers '{}' (U+{:04X}); drawing .notdef", ch, ch as u32);
        }
        let (metrics, coverage) = font.rasterize(ch, px);
        RasterGlyph {
            advance: metrics.advance_width,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            coverage,
        }
    }
}
