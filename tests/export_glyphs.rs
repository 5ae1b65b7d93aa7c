// tests/export_glyphs.rs
// End-to-end runs of the glyph export against scratch directories.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use kanji_glyphs::{
    FontSource, GlyphConfig, GlyphError, compute_scores, export_glyphs, hash_glyph_dir,
    write_scores,
};
use pretty_assertions::assert_eq;

struct Scratch {
    root: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "kanji-glyphs-it-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn write_list(&self, text: &str) -> PathBuf {
        let path = self.root.join("kanji.csv");
        fs::write(&path, text).unwrap();
        path
    }

    fn config(&self, input: PathBuf) -> GlyphConfig {
        GlyphConfig {
            input_path: input,
            output_dir: self.root.join("output"),
            font_size: 32,
            padding: 5,
            font: fixture_font(),
            ..GlyphConfig::default()
        }
    }
}

/// Rectangle-outline TrueType face covering 水 火 木 A a I L.
fn fixture_font() -> FontSource {
    FontSource::File {
        path: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/glyph-test.ttf"),
        index: 0,
    }
}

fn open_glyph(config: &GlyphConfig, token: &str) -> RgbaImage {
    image::open(config.output_dir.join(format!("{token}.png")))
        .unwrap()
        .to_rgba8()
}

fn ink_bounds(image: &RgbaImage) -> (u32, u32, u32, u32) {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| p[3] > 0)
        .fold(None::<(u32, u32, u32, u32)>, |bounds, (x, y, _)| {
            Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            })
        })
        .expect("glyph has ink")
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn trailing_empty_line_is_skipped() {
    let scratch = Scratch::new("trailing");
    let config = scratch.config(scratch.write_list("水\n火\n"));

    let report = export_glyphs(&config).unwrap();

    assert_eq!(file_names(&config.output_dir), names(&["水.png", "火.png"]));
    assert!(!config.output_dir.join(".png").exists());
    assert_eq!(report.skipped_empty, 1);
    assert!(report.is_complete());
}

#[test]
fn crlf_list_produces_clean_names() {
    let scratch = Scratch::new("crlf");
    let config = scratch.config(scratch.write_list("水\r\n火\r\n"));

    export_glyphs(&config).unwrap();

    assert_eq!(file_names(&config.output_dir), names(&["水.png", "火.png"]));
}

#[test]
fn max_count_keeps_first_lines_in_order() {
    let scratch = Scratch::new("truncate");
    let lines = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    let mut config = scratch.config(scratch.write_list(&lines.join("\n")));
    config.max_count = Some(5);

    let report = export_glyphs(&config).unwrap();

    let expected: Vec<PathBuf> = lines[..5]
        .iter()
        .map(|l| config.output_dir.join(format!("{l}.png")))
        .collect();
    assert_eq!(report.written, expected);
    assert_eq!(
        file_names(&config.output_dir),
        names(&["0.png", "1.png", "2.png", "3.png", "4.png"])
    );
}

#[test]
fn max_count_larger_than_list_renders_everything() {
    let scratch = Scratch::new("truncate-large");
    let mut config = scratch.config(scratch.write_list("A\nB"));
    config.max_count = Some(50);

    let report = export_glyphs(&config).unwrap();

    assert_eq!(report.written.len(), 2);
}

#[test]
fn second_run_overwrites_instead_of_duplicating() {
    let scratch = Scratch::new("idempotent");
    let config = scratch.config(scratch.write_list("水\n火\n木"));

    export_glyphs(&config).unwrap();
    let first = file_names(&config.output_dir);
    let first_bytes = fs::read(config.output_dir.join("木.png")).unwrap();
    export_glyphs(&config).unwrap();

    assert_eq!(file_names(&config.output_dir), first);
    assert_eq!(fs::read(config.output_dir.join("木.png")).unwrap(), first_bytes);
}

#[test]
fn missing_output_directory_is_created() {
    let scratch = Scratch::new("mkdir");
    let config = scratch.config(scratch.write_list("A\nB\nC"));
    assert!(!config.output_dir.exists());

    export_glyphs(&config).unwrap();

    assert!(config.output_dir.is_dir());
    assert_eq!(file_names(&config.output_dir).len(), 3);
}

#[test]
fn output_path_that_is_a_file_aborts_before_rendering() {
    let scratch = Scratch::new("not-a-dir");
    let config = scratch.config(scratch.write_list("A"));
    fs::write(&config.output_dir, b"occupied").unwrap();

    let err = export_glyphs(&config).unwrap_err();

    assert!(matches!(err, GlyphError::InvalidOutputPath { ref path } if *path == config.output_dir));
    assert_eq!(fs::read(&config.output_dir).unwrap(), b"occupied");
}

#[test]
fn missing_input_aborts_without_creating_output() {
    let scratch = Scratch::new("no-input");
    let config = scratch.config(scratch.root.join("absent.csv"));

    let err = export_glyphs(&config).unwrap_err();

    assert!(matches!(err, GlyphError::ReadInput { .. }));
    assert!(!config.output_dir.exists());
}

#[test]
fn images_have_canvas_dimensions_and_ink() {
    let scratch = Scratch::new("dimensions");
    let config = scratch.config(scratch.write_list("水"));

    export_glyphs(&config).unwrap();

    let image = open_glyph(&config, "水");
    assert_eq!(image.dimensions(), (37, 37));
    assert!(image.pixels().any(|p| p[3] >= 250));
    assert_eq!(image.get_pixel(0, 0)[3], 0);
}

#[test]
fn unsafe_tokens_are_escaped_in_file_names() {
    let scratch = Scratch::new("escape");
    let config = scratch.config(scratch.write_list("a/b\n..\n"));

    export_glyphs(&config).unwrap();

    assert_eq!(
        file_names(&config.output_dir),
        names(&["a%2Fb.png", "%2E%2E.png"])
    );
}

#[test]
fn similarity_scores_rendered_glyphs() {
    let scratch = Scratch::new("similarity");
    let config = scratch.config(scratch.write_list("I\nL\nI"));
    export_glyphs(&config).unwrap();

    let hashed = hash_glyph_dir(&config.output_dir).unwrap();
    let tokens: Vec<&str> = hashed.hashes.iter().map(|h| h.token.as_str()).collect();
    assert_eq!(tokens, vec!["I", "L"]);
    assert_eq!(hashed.skipped, 0);

    let scores = compute_scores(&hashed.hashes);
    assert_eq!(scores.scores["I"]["I"], 0.0);
    assert_eq!(scores.scores["I"]["L"], scores.scores["L"]["I"]);

    let out = scratch.root.join("scores.json");
    write_scores(&out, &scores).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(json["largestDifference"], scores.largest_difference);
    assert!(json["I"]["L"].is_number());
}

#[test]
fn different_kanji_produce_different_images() {
    let scratch = Scratch::new("distinct");
    let config = scratch.config(scratch.write_list("水\n火\n木\n"));

    export_glyphs(&config).unwrap();

    let water = open_glyph(&config, "水");
    let fire = open_glyph(&config, "火");
    let tree = open_glyph(&config, "木");
    assert_ne!(water, fire);
    assert_ne!(water, tree);
    assert_ne!(fire, tree);
}

#[test]
fn letter_case_is_kept() {
    let scratch = Scratch::new("case");
    let config = scratch.config(scratch.write_list("a\nA\n"));

    export_glyphs(&config).unwrap();

    assert_ne!(open_glyph(&config, "a"), open_glyph(&config, "A"));
}

#[test]
fn kanji_ink_is_centered() {
    let scratch = Scratch::new("centered");
    let mut config = scratch.config(scratch.write_list("木"));
    config.font_size = 100;

    export_glyphs(&config).unwrap();

    // 木 is symmetric and spans the em box from 80 units below the baseline
    // to the ascender, so its ink sits 6px above the em box center.
    let image = open_glyph(&config, "木");
    assert_eq!(image.dimensions(), (105, 105));
    let (x0, y0, x1, y1) = ink_bounds(&image);
    let left = x0 as i32;
    let right = 104 - x1 as i32;
    assert!((left - right).abs() <= 2, "horizontal margins {left} vs {right}");
    let ink_center = (y0 + y1 + 1) as f32 / 2.0;
    assert!((ink_center - (52.5 - 6.0)).abs() <= 1.5, "ink center {ink_center}");
}

#[test]
fn oversized_font_is_rejected_before_any_output() {
    let scratch = Scratch::new("oversized");
    let mut config = scratch.config(scratch.write_list("水"));
    config.font_size = u32::MAX;

    let err = export_glyphs(&config).unwrap_err();

    assert!(matches!(err, GlyphError::InvalidSize { .. }));
    assert!(!config.output_dir.exists());
}
