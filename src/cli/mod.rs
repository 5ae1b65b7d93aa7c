//! Command-line interface wiring for the `kanji-glyphs` binary.
//!
//! This module owns the clap definitions and delegates execution to the
//! submodule for each command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod render;
pub mod similarity;

/// Parsed CLI entrypoint for the `kanji-glyphs` binary.
#[derive(Parser, Debug)]
#[command(
    name = "kanji-glyphs",
    version,
    about = "Render each line of a character list into its own PNG glyph image"
)]
pub struct Cli {
    /// Command to execute; defaults to `render` with default settings.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one PNG per line of the character list.
    Render(render::RenderArgs),
    /// Score pairwise visual similarity of rendered glyphs.
    Similarity(similarity::SimilarityArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Render(args)) => render::handle(args),
        Some(Command::Similarity(args)) => similarity::handle(args),
        None => render::handle(render::RenderArgs::default()),
    }
}
