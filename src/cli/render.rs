//! `kanji-glyphs render`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use image::Rgba;
use kanji_glyphs::{
    DEFAULT_FONT_SIZE, DEFAULT_FOREGROUND, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR,
    DEFAULT_PADDING, FontSource, GlyphConfig, MAX_DIMENSION, export_glyphs, parse_hex_color,
};

/// Args for `kanji-glyphs render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Character list, one token per line.
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,
    /// Directory receiving `<token>.png` files; created if missing.
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,
    /// Only render the first N lines.
    #[arg(short = 'n', long = "max-count")]
    pub max_count: Option<usize>,
    /// Font size in pixels.
    #[arg(
        long = "font-size",
        default_value_t = DEFAULT_FONT_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64)
    )]
    pub font_size: u32,
    /// Extra pixels added to the font size to get the canvas side.
    #[arg(
        long,
        default_value_t = DEFAULT_PADDING,
        value_parser = clap::value_parser!(u32).range(0..=MAX_DIMENSION as i64)
    )]
    pub padding: u32,
    /// TrueType/OpenType font file; the system sans-serif is used when absent.
    #[arg(long)]
    pub font: Option<PathBuf>,
    /// Face index inside a font collection.
    #[arg(long = "font-index", default_value_t = 0, requires = "font")]
    pub font_index: u32,
    /// Glyph color as #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "#ffffff", value_parser = parse_hex_color)]
    pub color: Rgba<u8>,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_count: None,
            font_size: DEFAULT_FONT_SIZE,
            padding: DEFAULT_PADDING,
            font: None,
            font_index: 0,
            color: DEFAULT_FOREGROUND,
        }
    }
}

impl From<RenderArgs> for GlyphConfig {
    fn from(args: RenderArgs) -> GlyphConfig {
        let font = match args.font {
            Some(path) => FontSource::File {
                path,
                index: args.font_index,
            },
            None => FontSource::System,
        };
        GlyphConfig {
            input_path: args.input,
            output_dir: args.output,
            max_count: args.max_count,
            font_size: args.font_size,
            padding: args.padding,
            font,
            foreground: args.color,
        }
    }
}

/// Execute a render run.
pub fn handle(args: RenderArgs) -> Result<()> {
    let config = GlyphConfig::from(args);
    let report = export_glyphs(&config).with_context(|| {
        format!(
            "failed to render {} into {}",
            config.input_path.display(),
            config.output_dir.display()
        )
    })?;

    if !report.is_complete() {
        for failure in &report.failures {
            eprintln!(
                "  {} -> {}: {}",
                failure.token,
                failure.path.display(),
                failure.error
            );
        }
        bail!(
            "{} of {} glyph(s) could not be written: {}",
            report.failures.len(),
            report.failures.len() + report.written.len(),
            report.failed_tokens().join(" ")
        );
    }
    Ok(())
}
