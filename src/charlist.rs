use std::fs;
use std::path::Path;

use crate::error::{GlyphError, Result};

/// Ordered tokens read from a character list, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharList {
    tokens: Vec<String>,
}

impl CharList {
    /// Split text on `\n`, dropping a `\r` that precedes it.
    ///
    /// Every line is kept, including a trailing empty one after the final
    /// terminator, so the token count always equals the line count.
    pub fn from_text(text: &str) -> Self {
        let tokens = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { tokens }
    }

    /// Read and split a character list file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GlyphError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    /// Keep at most the first `max` tokens. Shorter lists are left alone.
    pub fn truncate(&mut self, max: usize) {
        self.tokens.truncate(max);
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

/// Load a list and apply the optional truncation in one step.
pub fn load_char_list(path: &Path, max_count: Option<usize>) -> Result<CharList> {
    let mut list = CharList::load(path)?;
    if let Some(max) = max_count {
        list.truncate(max);
    }
    Ok(list)
}
