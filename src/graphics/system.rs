//! Resolve the platform's sans-serif face through fontdb.

use std::path::PathBuf;

use fontdb::{Database, Family, ID, Query, Stretch, Style, Weight};

use super::face::{OutlineFace, parse_font};
use crate::error::{GlyphError, Result};

/// Sans-serif families tried in order. CJK families lead so kanji resolve to
/// a real glyph; Latin families follow for systems without CJK fonts.
pub const SANS_SERIF_FAMILIES: &[&str] = &[
    "Noto Sans CJK JP",
    "Noto Sans JP",
    "Source Han Sans JP",
    "Hiragino Sans",
    "Hiragino Kaku Gothic ProN",
    "Yu Gothic",
    "Meiryo",
    "Noto Sans CJK SC",
    "Microsoft YaHei",
    "WenQuanYi Micro Hei",
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Helvetica",
    "Arial",
];

/// Primary face plus at most this many fallbacks.
const MAX_FALLBACKS: usize = 2;

/// Load the first installed sans-serif families into one fallback chain.
pub fn load_sans_serif() -> Result<OutlineFace> {
    let mut db = Database::new();
    db.load_system_fonts();
    log::debug!("fontdb found {} system face(s)", db.len());
    resolve_sans_serif(&db)
}

pub(crate) fn resolve_sans_serif(db: &Database) -> Result<OutlineFace> {
    let families = SANS_SERIF_FAMILIES
        .iter()
        .map(|name| Family::Name(*name))
        .chain(std::iter::once(Family::SansSerif));

    let mut picked: Vec<ID> = Vec::new();
    let mut loaded = Vec::new();
    for family in families {
        if loaded.len() > MAX_FALLBACKS {
            break;
        }
        let wanted = [family];
        let query = Query {
            families: &wanted,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let Some(id) = db.query(&query) else {
            continue;
        };
        if picked.contains(&id) {
            continue;
        }
        picked.push(id);

        let family_name = db
            .face(id)
            .and_then(|info| info.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| format!("{:?}", wanted[0]));
        match db.with_face_data(id, parse_font) {
            Some(Ok(font)) => {
                log::debug!("using system font '{}'", family_name);
                loaded.push((family_name, font));
            }
            Some(Err(reason)) => log::warn!("skipping system font '{}': {}", family_name, reason),
            None => log::warn!("system font '{}' could not be read", family_name),
        }
    }

    let mut chain = loaded.into_iter();
    let Some((name, primary)) = chain.next() else {
        return Err(GlyphError::FontLoad {
            path: PathBuf::from("<system sans-serif>"),
            reason: "no sans-serif font installed; pass --font".to_string(),
        });
    };
    let fallbacks = chain.map(|(_, font)| font).collect();
    Ok(OutlineFace::new(name, primary, fallbacks))
}
