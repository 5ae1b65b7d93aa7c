//! Render a character list into one centered PNG glyph image per character.

mod charlist;
mod config;
mod error;
mod export;
mod graphics;
mod output;
mod similarity;

pub use charlist::{CharList, load_char_list};
pub use config::{
    DEFAULT_FONT_SIZE, DEFAULT_FOREGROUND, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR,
    DEFAULT_PADDING, FontSource, GlyphConfig, MAX_DIMENSION, parse_hex_color,
};
pub use error::{GlyphError, Result};
pub use export::{ExportReport, GlyphExporter, WriteFailure, export_glyphs};
pub use graphics::{
    GlyphCanvas, GlyphFace, LineMetrics, OutlineFace, RasterGlyph, SANS_SERIF_FAMILIES, load_face,
    load_sans_serif,
};
pub use output::{decode_file_stem, glyph_path, prepare_output_dir, sanitize_file_stem};
pub use similarity::{
    GlyphHash, HashedGlyphs, LARGEST_DIFFERENCE_KEY, SimilarityScores, average_hash, compute_scores, hash_distance,
    hash_glyph_dir, write_scores,
};
