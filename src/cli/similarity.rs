//! `kanji-glyphs similarity`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use kanji_glyphs::{DEFAULT_OUTPUT_DIR, compute_scores, hash_glyph_dir, write_scores};

/// Args for `kanji-glyphs similarity`.
#[derive(Args, Debug)]
pub struct SimilarityArgs {
    /// Directory of rendered glyph images.
    #[arg(short = 'g', long = "glyphs", default_value = DEFAULT_OUTPUT_DIR)]
    pub glyphs: PathBuf,
    /// JSON file receiving the normalized scores.
    #[arg(short = 'o', long = "output", default_value = "./scores.json")]
    pub output: PathBuf,
}

/// Hash every glyph and write the pairwise scores.
pub fn handle(args: SimilarityArgs) -> Result<()> {
    let hashed = hash_glyph_dir(&args.glyphs)
        .with_context(|| format!("failed to hash glyphs in {}", args.glyphs.display()))?;
    let scores = compute_scores(&hashed.hashes);
    write_scores(&args.output, &scores)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!(
        "scored {} glyph(s), skipped {}, largest difference {}",
        hashed.hashes.len(),
        hashed.skipped,
        scores.largest_difference
    );
    println!(
        "Wrote similarity scores for {} glyph(s) to {}",
        hashed.hashes.len(),
        args.output.display()
    );
    Ok(())
}
