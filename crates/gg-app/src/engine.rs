use std::sync::Arc;

use gg_core::error::EngineError;
use gg_core::rounding::RoundMethod;
use gg_image::padding::{pad, tile_regions};
use gg_image::pixel::PixelGrid;
use gg_match::matcher::CharMatcher;

/// Conversion orchestrator: owns the source image, the active character
/// set, the current resolution and rounding policy, and wires the pipeline
/// stages together per run.
///
/// The padded canvas and tiling are cheap stateless derivations and are
/// recomputed on every [`Engine::run`] rather than cached across resolution
/// changes.
pub struct Engine {
    image: Arc<PixelGrid>,
    matcher: CharMatcher,
    resolution: u32,
    min_resolution: u32,
    max_resolution: u32,
    round: RoundMethod,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("resolution", &self.resolution)
            .field("min_resolution", &self.min_resolution)
            .field("max_resolution", &self.max_resolution)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Builds an engine around a decoded source image.
    ///
    /// Resolution bounds are fixed once per image: `max(1, width / height)`
    /// below (integer division), the source width above — not the padded
    /// width. The initial resolution is validated against the same bounds
    /// as [`Engine::set_resolution`]; an out-of-bounds value (a resolution
    /// above the width would tile at side zero) is rejected up front.
    ///
    /// # Errors
    /// Returns [`EngineError::ResolutionOutOfRange`] if `resolution` falls
    /// outside the image's bounds.
    pub fn new(
        image: Arc<PixelGrid>,
        matcher: CharMatcher,
        resolution: u32,
        round: RoundMethod,
    ) -> Result<Self, EngineError> {
        let min_resolution = (image.width() / image.height()).max(1);
        let max_resolution = image.width();
        if resolution < min_resolution || resolution > max_resolution {
            return Err(EngineError::ResolutionOutOfRange {
                requested: resolution,
                min: min_resolution,
                max: max_resolution,
            });
        }
        Ok(Self {
            image,
            matcher,
            resolution,
            min_resolution,
            max_resolution,
            round,
        })
    }

    /// Current resolution (tile-columns per conversion).
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Lower resolution bound, inclusive.
    #[must_use]
    pub fn min_resolution(&self) -> u32 {
        self.min_resolution
    }

    /// Upper resolution bound, inclusive.
    #[must_use]
    pub fn max_resolution(&self) -> u32 {
        self.max_resolution
    }

    /// Current rounding policy.
    #[must_use]
    pub fn round_method(&self) -> RoundMethod {
        self.round
    }

    /// Replaces the rounding policy.
    pub fn set_round_method(&mut self, round: RoundMethod) {
        self.round = round;
    }

    /// Sets the resolution, rejecting values outside the image's bounds.
    /// On rejection the previous resolution stays in effect.
    ///
    /// # Errors
    /// Returns [`EngineError::ResolutionOutOfRange`] for an out-of-bounds
    /// value.
    pub fn set_resolution(&mut self, resolution: u32) -> Result<(), EngineError> {
        if resolution < self.min_resolution || resolution > self.max_resolution {
            return Err(EngineError::ResolutionOutOfRange {
                requested: resolution,
                min: self.min_resolution,
                max: self.max_resolution,
            });
        }
        self.resolution = resolution;
        Ok(())
    }

    /// Adds a character to the active set.
    pub fn add_char(&mut self, ch: char) {
        self.matcher.add_char(ch);
    }

    /// Removes a character from the active set (no-op when absent).
    pub fn remove_char(&mut self, ch: char) {
        self.matcher.remove_char(ch);
    }

    /// The active characters, sorted by codepoint.
    #[must_use]
    pub fn chars(&self) -> Vec<char> {
        self.matcher.chars()
    }

    /// Runs one conversion: pad, tile, sample, match.
    ///
    /// Pure function of (image, resolution, active set, rounding policy) at
    /// call time; repeated calls with unchanged inputs produce identical
    /// grids. No partial output: the charset check happens before any work.
    ///
    /// # Errors
    /// Returns [`EngineError::CharsetTooSmall`] when fewer than two
    /// characters are active.
    pub fn run(&self) -> Result<Vec<Vec<char>>, EngineError> {
        let have = self.matcher.len();
        if have < 2 {
            return Err(EngineError::CharsetTooSmall { have });
        }

        let canvas = pad(&self.image);
        let tiles = tile_regions(&canvas, self.resolution);
        log::debug!(
            "converting at resolution {} ({} rows)",
            self.resolution,
            tiles.len()
        );

        let mut art = Vec::with_capacity(tiles.len());
        for tile_row in &tiles {
            let mut row = Vec::with_capacity(tile_row.len());
            for tile in tile_row {
                let brightness = tile.mean_luminance();
                row.push(self.matcher.char_by_brightness(brightness, self.round)?);
            }
            art.push(row);
        }
        Ok(art)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_image::pixel::Rgb;
    use gg_match::raster::{GlyphRaster, GlyphRasterizer, GLYPH_SIZE};

    /// Digits map to `16·(digit+1)` inked cells; everything else is empty.
    struct DigitInk;

    impl GlyphRasterizer for DigitInk {
        fn rasterize(&self, ch: char) -> GlyphRaster {
            let mut raster = [[false; GLYPH_SIZE]; GLYPH_SIZE];
            if let Some(d) = ch.to_digit(10) {
                let cells = 16 * (d as usize + 1);
                for i in 0..cells {
                    raster[i / GLYPH_SIZE][i % GLYPH_SIZE] = true;
                }
            }
            raster
        }
    }

    fn engine_with(image: PixelGrid, charset: &[char], resolution: u32) -> Engine {
        try_engine(image, charset, resolution).unwrap()
    }

    fn try_engine(
        image: PixelGrid,
        charset: &[char],
        resolution: u32,
    ) -> Result<Engine, EngineError> {
        let matcher = CharMatcher::new(charset, Box::new(DigitInk)).unwrap();
        Engine::new(Arc::new(image), matcher, resolution, RoundMethod::Nearest)
    }

    #[test]
    fn construction_rejects_resolution_beyond_width() {
        // A resolution above the width would tile at side zero; it must be
        // a typed failure, never reach the tiler.
        let err = try_engine(PixelGrid::filled(4, 4, Rgb::WHITE), &['0', '9'], 8).unwrap_err();
        assert_eq!(
            err,
            EngineError::ResolutionOutOfRange {
                requested: 8,
                min: 1,
                max: 4
            }
        );
    }

    #[test]
    fn construction_rejects_default_resolution_on_one_pixel_wide_image() {
        let err = try_engine(PixelGrid::filled(1, 4, Rgb::BLACK), &['0', '9'], 2).unwrap_err();
        assert_eq!(
            err,
            EngineError::ResolutionOutOfRange {
                requested: 2,
                min: 1,
                max: 1
            }
        );
        let engine = try_engine(PixelGrid::filled(1, 4, Rgb::BLACK), &['0', '9'], 1).unwrap();
        assert!(engine.run().is_ok());
    }

    #[test]
    fn bounds_from_a_64_by_32_image() {
        let engine = engine_with(PixelGrid::filled(64, 32, Rgb::WHITE), &['0', '9'], 2);
        assert_eq!(engine.min_resolution(), 2);
        assert_eq!(engine.max_resolution(), 64);
    }

    #[test]
    fn rejected_resolution_leaves_state_unchanged() {
        let mut engine = engine_with(PixelGrid::filled(64, 32, Rgb::WHITE), &['0', '9'], 2);
        let err = engine.set_resolution(128).unwrap_err();
        assert_eq!(
            err,
            EngineError::ResolutionOutOfRange {
                requested: 128,
                min: 2,
                max: 64
            }
        );
        assert_eq!(engine.resolution(), 2);
        assert!(engine.set_resolution(1).is_err());
        assert_eq!(engine.resolution(), 2);
        assert!(engine.set_resolution(64).is_ok());
        assert_eq!(engine.resolution(), 64);
    }

    #[test]
    fn tall_image_allows_resolution_one() {
        let mut engine = engine_with(PixelGrid::filled(8, 32, Rgb::WHITE), &['0', '9'], 2);
        assert_eq!(engine.min_resolution(), 1);
        assert!(engine.set_resolution(1).is_ok());
    }

    #[test]
    fn run_needs_at_least_two_chars() {
        let mut engine = engine_with(PixelGrid::filled(4, 4, Rgb::WHITE), &['5'], 2);
        assert_eq!(engine.run().unwrap_err(), EngineError::CharsetTooSmall { have: 1 });
        // Failed run mutates nothing.
        assert_eq!(engine.chars(), vec!['5']);
        assert_eq!(engine.resolution(), 2);
        engine.add_char('0');
        assert!(engine.run().is_ok());
    }

    #[test]
    fn uniform_image_maps_to_the_matching_extreme() {
        let white = engine_with(PixelGrid::filled(4, 4, Rgb::WHITE), &['0', '9'], 2);
        assert_eq!(white.run().unwrap(), vec![vec!['9', '9'], vec!['9', '9']]);

        let black = engine_with(PixelGrid::filled(4, 4, Rgb::BLACK), &['0', '9'], 2);
        assert_eq!(black.run().unwrap(), vec![vec!['0', '0'], vec!['0', '0']]);
    }

    #[test]
    fn output_dimensions_follow_the_tiling() {
        let engine = engine_with(PixelGrid::filled(16, 8, Rgb::WHITE), &['0', '9'], 4);
        let art = engine.run().unwrap();
        assert_eq!(art.len(), 2); // 8 / (16/4)
        assert_eq!(art[0].len(), 4);
    }

    #[test]
    fn run_is_deterministic() {
        let mut pixels = Vec::new();
        for i in 0..64u32 {
            let v = (i * 4) as u8;
            pixels.push(Rgb { r: v, g: 255 - v, b: v / 2 });
        }
        let engine = engine_with(
            PixelGrid::from_pixels(pixels, 8, 8),
            &['0', '3', '7', '9'],
            4,
        );
        assert_eq!(engine.run().unwrap(), engine.run().unwrap());
    }

    #[test]
    fn padded_conversion_covers_the_fill() {
        // 3×2 source pads to 4×2; at resolution 2 the tiles are 2×2 and the
        // whole canvas becomes a single output row.
        let engine = engine_with(PixelGrid::filled(3, 2, Rgb::BLACK), &['0', '9'], 2);
        let art = engine.run().unwrap();
        assert_eq!(art.len(), 1);
        assert_eq!(art[0].len(), 2);
        // Left tile is all source (black); right tile is half white fill.
        assert_eq!(art[0][0], '0');
    }
}
