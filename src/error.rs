use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while preparing or running a glyph export.
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("failed to read character list {path}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("output path {path} exists but is not a directory")]
    InvalidOutputPath { path: PathBuf },
    #[error("failed to create output directory {path}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("font size {font_size} with padding {padding} does not fit a canvas")]
    InvalidSize { font_size: u32, padding: u32 },
    #[error("failed to load font {path}: {reason}")]
    FontLoad { path: PathBuf, reason: String },
    #[error("failed to encode glyph image")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to list glyph directory {path}")]
    ReadGlyphDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize similarity scores")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = GlyphError> = std::result::Result<T, E>;
