//! Output directory preparation and token-to-filename mapping.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GlyphError, Result};

pub const GLYPH_EXTENSION: &str = "png";

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '%'];

/// Make sure `dir` exists and is a directory. Only the last path component is
/// created; its parent must already exist.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(GlyphError::InvalidOutputPath {
            path: dir.to_path_buf(),
        }),
        Err(_) => {
            fs::create_dir(dir).map_err(|source| GlyphError::CreateOutputDir {
                path: dir.to_path_buf(),
                source,
            })?;
            log::info!("created output directory {}", dir.display());
            Ok(())
        }
    }
}

/// Turn a token into a file stem that is safe on common filesystems.
///
/// Path separators, characters Windows reserves, control characters and `%`
/// itself become `%XX` escapes of their UTF-8 bytes. `.` and `..` are fully
/// escaped so they never name a directory.
pub fn sanitize_file_stem(token: &str) -> String {
    if token == "." || token == ".." {
        return "%2E".repeat(token.len());
    }
    let mut stem = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch.is_control() || RESERVED.contains(&ch) {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                stem.push_str(&format!("%{:02X}", byte));
            }
        } else {
            stem.push(ch);
        }
    }
    stem
}

/// Inverse of [`sanitize_file_stem`]. Returns `None` for malformed escapes.
pub fn decode_file_stem(stem: &str) -> Option<String> {
    let raw = stem.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut idx = 0;
    while idx < raw.len() {
        if raw[idx] == b'%' {
            let hex = stem.get(idx + 1..idx + 3)?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            idx += 3;
        } else {
            bytes.push(raw[idx]);
            idx += 1;
        }
    }
    String::from_utf8(bytes).ok()
}

/// Location of the image written for `token`.
pub fn glyph_path(dir: &Path, token: &str) -> PathBuf {
    dir.join(format!("{}.{}", sanitize_file_stem(token), GLYPH_EXTENSION))
}
