//! Perceptual similarity between exported glyph images.
//!
//! Each glyph gets an 8x8 average hash; the distance between two glyphs is
//! the Hamming distance of their hashes, normalized by the largest distance
//! seen across every pair.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::DynamicImage;
use image::imageops::{self, FilterType};
use serde::Serialize;

use crate::error::{GlyphError, Result};
use crate::output::{GLYPH_EXTENSION, decode_file_stem};

const HASH_SIDE: u32 = 8;

/// JSON key holding the largest pairwise distance. Shares the top-level
/// object with the per-token rows, so a glyph with this token is not scored.
pub const LARGEST_DIFFERENCE_KEY: &str = "largestDifference";

/// Average hash of one exported glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphHash {
    pub token: String,
    pub hash: u64,
}

/// Hashes collected from a glyph directory.
#[derive(Debug, Default)]
pub struct HashedGlyphs {
    /// Sorted by token.
    pub hashes: Vec<GlyphHash>,
    /// Files that looked like glyphs but could not be decoded.
    pub skipped: usize,
}

/// Normalized pairwise distances, serialized as
/// `{ "<a>": { "<b>": score }, "largestDifference": n }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityScores {
    #[serde(flatten)]
    pub scores: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(rename = "largestDifference")]
    pub largest_difference: u32,
}

/// Grayscale, shrink to 8x8, set a bit for every pixel brighter than the mean.
/// Bits are laid out row-major from the most significant end.
pub fn average_hash(image: &DynamicImage) -> u64 {
    let gray = image.to_luma8();
    let small = imageops::resize(&gray, HASH_SIDE, HASH_SIDE, FilterType::Lanczos3);
    let total: u32 = small.pixels().map(|p| p[0] as u32).sum();
    let mean = total as f64 / (HASH_SIDE * HASH_SIDE) as f64;
    small
        .pixels()
        .fold(0u64, |hash, p| (hash << 1) | u64::from(p[0] as f64 > mean))
}

pub fn hash_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Hash every `*.png` in `dir`. The token is recovered from the file stem.
pub fn hash_glyph_dir(dir: &Path) -> Result<HashedGlyphs> {
    let entries = fs::read_dir(dir).map_err(|source| GlyphError::ReadGlyphDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut hashed = HashedGlyphs::default();
    for entry in entries {
        let entry = entry.map_err(|source| GlyphError::ReadGlyphDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_glyph = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(GLYPH_EXTENSION))
            .unwrap_or(false);
        if !is_glyph || !path.is_file() {
            continue;
        }
        let Some(token) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(decode_file_stem)
        else {
            log::warn!("skipping {}: file name is not a glyph token", path.display());
            hashed.skipped += 1;
            continue;
        };
        match image::open(&path) {
            Ok(image) => hashed.hashes.push(GlyphHash {
                token,
                hash: average_hash(&image),
            }),
            Err(err) => {
                log::warn!("skipping {}: {}", path.display(), err);
                hashed.skipped += 1;
            }
        }
    }
    hashed.hashes.sort_by(|a, b| a.token.cmp(&b.token));
    Ok(hashed)
}

/// Score every ordered pair, including each glyph against itself.
///
/// A glyph whose token is [`LARGEST_DIFFERENCE_KEY`] is left out.
pub fn compute_scores(hashes: &[GlyphHash]) -> SimilarityScores {
    let hashes: Vec<&GlyphHash> = hashes
        .iter()
        .filter(|glyph| {
            let reserved = glyph.token == LARGEST_DIFFERENCE_KEY;
            if reserved {
                log::warn!(
                    "not scoring glyph '{}': token collides with the summary key",
                    glyph.token
                );
            }
            !reserved
        })
        .collect();
    let largest_difference = hashes
        .iter()
        .flat_map(|a| hashes.iter().map(move |b| hash_distance(a.hash, b.hash)))
        .max()
        .unwrap_or(0);

    let scores = hashes
        .iter()
        .map(|a| {
            let row = hashes
                .iter()
                .map(|b| {
                    let distance = hash_distance(a.hash, b.hash);
                    let score = if largest_difference == 0 {
                        0.0
                    } else {
                        distance as f64 / largest_difference as f64
                    };
                    (b.token.clone(), score)
                })
                .collect();
            (a.token.clone(), row)
        })
        .collect();

    SimilarityScores {
        scores,
        largest_difference,
    }
}

/// Write the scores as JSON to `path`, replacing any existing file.
pub fn write_scores(path: &Path, scores: &SimilarityScores) -> Result<()> {
    let io_error = |source| GlyphError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, scores)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}
