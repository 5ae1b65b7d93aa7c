//! The render-and-export loop.

use std::fs;
use std::path::{Path, PathBuf};

use crate::charlist::{CharList, load_char_list};
use crate::config::GlyphConfig;
use crate::error::{GlyphError, Result};
use crate::graphics::{GlyphCanvas, GlyphFace, load_face};
use crate::output::{glyph_path, prepare_output_dir};

/// A token whose image could not be produced.
#[derive(Debug)]
pub struct WriteFailure {
    pub token: String,
    pub path: PathBuf,
    pub error: GlyphError,
}

/// Outcome of one export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, in input order.
    pub written: Vec<PathBuf>,
    /// Number of empty tokens that were skipped.
    pub skipped_empty: usize,
    pub failures: Vec<WriteFailure>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_tokens(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.token.as_str()).collect()
    }
}

/// Renders tokens one at a time onto a single owned canvas.
pub struct GlyphExporter {
    canvas: GlyphCanvas,
    face: Box<dyn GlyphFace>,
    font_size: f32,
    output_dir: PathBuf,
}

impl GlyphExporter {
    pub fn new(config: &GlyphConfig, face: Box<dyn GlyphFace>) -> Self {
        Self {
            canvas: GlyphCanvas::new(config.canvas_side(), config.foreground),
            face,
            font_size: config.font_size as f32,
            output_dir: config.output_dir.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn canvas(&self) -> &GlyphCanvas {
        &self.canvas
    }

    /// Draw, encode and persist one token, then clear the canvas.
    ///
    /// The canvas is blank again when this returns, whether or not the write
    /// succeeded.
    pub fn export_token(&mut self, token: &str) -> Result<PathBuf> {
        let path = glyph_path(&self.output_dir, token);
        self.canvas.draw_centered(self.face.as_ref(), token, self.font_size);
        let outcome = self.canvas.encode_png().and_then(|bytes| {
            fs::write(&path, bytes).map_err(|source| GlyphError::Write {
                path: path.clone(),
                source,
            })
        });
        self.canvas.clear();
        outcome.map(|()| path)
    }

    /// Export every non-empty token in order.
    pub fn export_all(&mut self, list: &CharList) -> ExportReport {
        let mut report = ExportReport::default();
        for token in list.iter() {
            if token.is_empty() {
                log::debug!("skipping empty token");
                report.skipped_empty += 1;
                continue;
            }
            match self.export_token(token) {
                Ok(path) => {
                    log::debug!("wrote {}", path.display());
                    report.written.push(path);
                }
                Err(error) => {
                    log::warn!("failed to export '{}': {}", token, error);
                    report.failures.push(WriteFailure {
                        token: token.to_string(),
                        path: glyph_path(&self.output_dir, token),
                        error,
                    });
                }
            }
        }
        report
    }
}

/// Load the list, prepare the directory and font, then export every glyph.
///
/// Setup failures are returned before any file is written; per-token failures
/// are collected in the report.
pub fn export_glyphs(config: &GlyphConfig) -> Result<ExportReport> {
    config.validate()?;
    let list = load_char_list(&config.input_path, config.max_count)?;
    prepare_output_dir(&config.output_dir)?;
    let face = load_face(&config.font)?;
    log::info!(
        "rendering {} token(s) from {} with {} at {}px",
        list.len(),
        config.input_path.display(),
        face.name(),
        config.font_size
    );

    let mut exporter = GlyphExporter::new(config, face);
    let report = exporter.export_all(&list);
    log::info!(
        "wrote {} glyph(s) to {}, skipped {} empty, {} failed",
        report.written.len(),
        config.output_dir.display(),
        report.skipped_empty,
        report.failures.len()
    );
    Ok(report)
}
