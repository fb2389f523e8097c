/// Character brightness matching engine for glyphgrid.
///
/// `raster` scores a character's ink density through a pluggable glyph
/// rasterizer; `matcher` keeps the active character set keyed by brightness
/// and answers nearest-brightness queries under a rounding policy.
pub mod matcher;
pub mod raster;

pub use matcher::CharMatcher;
pub use raster::{
    glyph_brightness, BitmapRasterizer, FontRasterizer, GlyphRaster, GlyphRasterizer, GLYPH_SIZE,
};
