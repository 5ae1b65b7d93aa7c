//! Glyph rasterization and the reusable PNG canvas.

mod face;
mod paint;
mod system;

pub use face::{GlyphFace, LineMetrics, OutlineFace, RasterGlyph, load_face};
pub use paint::GlyphCanvas;
pub use system::{SANS_SERIF_FAMILIES, load_sans_serif};

#[cfg(test)]
pub(crate) use face::tests::fixture_face;
