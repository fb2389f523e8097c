use ab_glyph::{point, Font, FontVec, PxScale};
use anyhow::Result;
use gg_image::pixel::{PixelGrid, Rgb};

/// Side of the square monochrome grid a character is rendered into.
pub const GLYPH_SIZE: usize = 16;

/// K×K monochrome raster of one character. `true` = ink.
pub type GlyphRaster = [[bool; GLYPH_SIZE]; GLYPH_SIZE];

/// Renders a character into a fixed K×K monochrome grid.
///
/// Pure function of the character: the matcher calls it both when seeding a
/// set and when re-deriving a character's brightness on removal, and relies
/// on identical output each time.
pub trait GlyphRasterizer: Send + Sync {
    /// Rasterize `ch`. Unknown characters produce an empty (ink-free) grid.
    fn rasterize(&self, ch: char) -> GlyphRaster;
}

/// Scores a glyph raster with the shared brightness sampler.
///
/// The raster becomes a white-ink-on-black pixel grid, so the pipeline's one
/// luminance formula reduces to ink-cells / K².
///
/// # Example
/// ```
/// use gg_match::raster::{glyph_brightness, GLYPH_SIZE};
/// let empty = [[false; GLYPH_SIZE]; GLYPH_SIZE];
/// assert_eq!(glyph_brightness(&empty), 0.0);
/// let full = [[true; GLYPH_SIZE]; GLYPH_SIZE];
/// assert!((glyph_brightness(&full) - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn glyph_brightness(raster: &GlyphRaster) -> f64 {
    let mut pixels = Vec::with_capacity(GLYPH_SIZE * GLYPH_SIZE);
    for row in raster {
        for &ink in row {
            pixels.push(if ink { Rgb::WHITE } else { Rgb::BLACK });
        }
    }
    let grid = PixelGrid::from_pixels(pixels, GLYPH_SIZE as u32, GLYPH_SIZE as u32);
    grid.full_region().mean_luminance()
}

/// Built-in rasterizer: hardcoded 5×5 bitmaps for shape-bearing characters,
/// a per-character ink budget for the rest, upscaled to K×K.
///
/// Deterministic and font-free; the default when no `--font` is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapRasterizer;

impl GlyphRasterizer for BitmapRasterizer {
    fn rasterize(&self, ch: char) -> GlyphRaster {
        let bitmap = bitmap5(ch);
        let mut raster = [[false; GLYPH_SIZE]; GLYPH_SIZE];
        // Nearest-neighbor upscale 5×5 → K×K.
        for (y, row) in raster.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let sy = y * 5 / GLYPH_SIZE;
                let sx = x * 5 / GLYPH_SIZE;
                *cell = (bitmap >> (sy * 5 + sx)) & 1 == 1;
            }
        }
        raster
    }
}

/// 5×5 bitmap for a character, bit `row * 5 + col` = ink.
fn bitmap5(ch: char) -> u32 {
    match ch {
        ' ' => 0b00000_00000_00000_00000_00000,
        '.' => 0b00000_00100_00000_00000_00000,
        ',' => 0b00010_00100_00000_00000_00000,
        ':' => 0b00000_00100_00000_00100_00000,
        '-' => 0b00000_00000_11111_00000_00000,
        '|' => 0b00100_00100_00100_00100_00100,
        '+' => 0b00100_00100_11111_00100_00100,
        '/' => 0b10000_01000_00100_00010_00001,
        '\\' => 0b00001_00010_00100_01000_10000,
        'O' => 0b01110_10001_10001_10001_01110,
        '#' => 0b01010_11111_01010_11111_01010,
        '@' => 0b01110_10001_10111_10001_01110,
        'M' => 0b10001_10001_10101_11011_10001,
        'W' => 0b10001_11011_10101_10001_10001,
        _ => fill_by_budget(ink_budget(ch)),
    }
}

/// Crude density model for characters without a dedicated bitmap. Digits get
/// strictly increasing budgets so the historical default set spans a real
/// brightness range.
fn ink_budget(ch: char) -> u32 {
    let cp = ch as u32;
    match ch {
        '0'..='9' => 4 + (cp - '0' as u32) * 2,
        'a'..='z' => 10 + cp % 5,
        'A'..='Z' => 13 + cp % 5,
        _ => 3 + cp % 9,
    }
}

/// Centre-out fill: the first `budget` cells of this order are inked.
fn fill_by_budget(budget: u32) -> u32 {
    const ORDER: [u32; 25] = [
        12, 7, 17, 11, 13, 6, 8, 16, 18, 2, 22, 10, 14, 1, 3, 21, 23, 5, 9, 15, 19, 0, 4, 20, 24,
    ];
    let mut bitmap = 0u32;
    for &bit in ORDER.iter().take(budget.min(25) as usize) {
        bitmap |= 1 << bit;
    }
    bitmap
}

/// Font-backed rasterizer: renders each character with `ab_glyph` into a
/// K×K coverage buffer and thresholds at 50%.
pub struct FontRasterizer {
    font: FontVec,
    scale: PxScale,
}

impl FontRasterizer {
    /// Builds a rasterizer from raw TTF/OTF bytes.
    ///
    /// # Errors
    /// Returns an error if the font data is invalid.
    pub fn new(font_data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(font_data)?;
        Ok(Self {
            font,
            scale: PxScale::from(GLYPH_SIZE as f32),
        })
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char) -> GlyphRaster {
        let mut raster = [[false; GLYPH_SIZE]; GLYPH_SIZE];
        let gid = self.font.glyph_id(ch);
        // .notdef would score placeholder boxes; treat as ink-free instead.
        if gid.0 == 0 {
            log::debug!("font has no glyph for {ch:?}");
            return raster;
        }

        let ascent =
            self.font.ascent_unscaled() * self.scale.y / self.font.height_unscaled();
        let glyph = gid.with_scale_and_position(self.scale, point(0.0, ascent));
        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|x, y, coverage| {
                let px = (x as i32 + bounds.min.x as i32).max(0) as usize;
                let py = (y as i32 + bounds.min.y as i32).max(0) as usize;
                if px < GLYPH_SIZE && py < GLYPH_SIZE && coverage >= 0.5 {
                    raster[py][px] = true;
                }
            });
        }
        raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_has_zero_brightness() {
        let raster = BitmapRasterizer.rasterize(' ');
        assert_eq!(glyph_brightness(&raster), 0.0);
    }

    #[test]
    fn dot_has_less_ink_than_at_sign() {
        let dot = glyph_brightness(&BitmapRasterizer.rasterize('.'));
        let at = glyph_brightness(&BitmapRasterizer.rasterize('@'));
        assert!(dot > 0.0);
        assert!(at > dot);
    }

    #[test]
    fn digits_have_strictly_increasing_brightness() {
        let mut prev = -1.0;
        for d in '0'..='9' {
            let b = glyph_brightness(&BitmapRasterizer.rasterize(d));
            assert!(b > prev, "digit {d} not brighter than its predecessor");
            prev = b;
        }
    }

    #[test]
    fn rasterizer_is_deterministic() {
        for ch in [' ', '.', 'q', 'Z', '7', '~'] {
            assert_eq!(BitmapRasterizer.rasterize(ch), BitmapRasterizer.rasterize(ch));
        }
    }
}
