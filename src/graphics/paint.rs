use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Pixel, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::face::{GlyphFace, RasterGlyph};
use crate::error::Result;

const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Square RGBA drawing surface reused for every glyph in a batch.
pub struct GlyphCanvas {
    pixels: RgbaImage,
    foreground: Rgba<u8>,
}

impl GlyphCanvas {
    /// A fully transparent canvas of `side` x `side` pixels.
    pub fn new(side: u32, foreground: Rgba<u8>) -> Self {
        Self {
            pixels: ImageBuffer::from_pixel(side, side, BLANK),
            foreground,
        }
    }

    pub fn side(&self) -> u32 {
        self.pixels.width()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Draw `text` so that its advance box is centered horizontally and its
    /// em box is centered vertically on the canvas midpoint.
    pub fn draw_centered(&mut self, face: &dyn GlyphFace, text: &str, px: f32) {
        let glyphs: Vec<RasterGlyph> = text.chars().map(|ch| face.rasterize(ch, px)).collect();
        let total_advance: f32 = glyphs.iter().map(|g| g.advance).sum();
        let center = self.side() as f32 / 2.0;
        let metrics = face.line_metrics(px);
        let baseline = center + (metrics.ascent + metrics.descent) / 2.0;

        let mut pen_x = center - total_advance / 2.0;
        for glyph in &glyphs {
            let left = (pen_x + glyph.xmin as f32).round() as i32;
            let top = (baseline - (glyph.ymin + glyph.height as i32) as f32).round() as i32;
            self.blit(glyph, left, top);
            pen_x += glyph.advance;
        }
    }

    fn blit(&mut self, glyph: &RasterGlyph, left: i32, top: i32) {
        let side = self.side() as i32;
        let Rgba([r, g, b, a]) = self.foreground;
        for (row, line) in glyph.coverage.chunks(glyph.width.max(1)).enumerate() {
            let y = top + row as i32;
            if y < 0 || y >= side {
                continue;
            }
            for (col, &coverage) in line.iter().enumerate() {
                let x = left + col as i32;
                if coverage == 0 || x < 0 || x >= side {
                    continue;
                }
                let alpha = (a as u32 * coverage as u32 / 255) as u8;
                self.pixels
                    .get_pixel_mut(x as u32, y as u32)
                    .blend(&Rgba([r, g, b, alpha]));
            }
        }
    }

    /// Encode the current contents as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        let side = self.side();
        draw_filled_rect_mut(&mut self.pixels, Rect::at(0, 0).of_size(side, side), BLANK);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| *p == BLANK)
    }
}
