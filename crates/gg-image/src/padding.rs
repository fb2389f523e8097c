use std::sync::Arc;

use crate::pixel::{PixelGrid, PixelRegion, Rgb};

/// Smallest power of two ≥ `n`, with a floor of 1.
///
/// # Example
/// ```
/// use gg_image::padding::next_power_of_two;
/// assert_eq!(next_power_of_two(3), 4);
/// assert_eq!(next_power_of_two(64), 64);
/// assert_eq!(next_power_of_two(0), 1);
/// ```
#[must_use]
pub fn next_power_of_two(n: u32) -> u32 {
    n.max(1).next_power_of_two()
}

/// Pads a source image to power-of-two dimensions.
///
/// When both dimensions are already powers of two the source grid itself is
/// returned (same `Arc`, observable via `Arc::ptr_eq`) — callers rely on
/// this identity. Otherwise the source is centered with truncating offsets
/// `(padded − src) / 2` per axis and the remainder filled with white; an odd
/// padding delta leaves the image off-center by one pixel.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use gg_image::padding::pad;
/// use gg_image::pixel::{PixelGrid, Rgb};
/// let src = Arc::new(PixelGrid::filled(3, 2, Rgb::BLACK));
/// let padded = pad(&src);
/// assert_eq!((padded.width(), padded.height()), (4, 2));
/// ```
#[must_use]
pub fn pad(source: &Arc<PixelGrid>) -> Arc<PixelGrid> {
    let width = source.width();
    let height = source.height();
    let padded_width = next_power_of_two(width);
    let padded_height = next_power_of_two(height);

    if width == padded_width && height == padded_height {
        return Arc::clone(source);
    }

    let row_offset = (padded_height - height) / 2;
    let col_offset = (padded_width - width) / 2;
    log::debug!(
        "padding {width}×{height} → {padded_width}×{padded_height} (offset {col_offset},{row_offset})"
    );

    let mut pixels = vec![Rgb::WHITE; padded_width as usize * padded_height as usize];
    for row in 0..height {
        for col in 0..width {
            let idx = (row + row_offset) as usize * padded_width as usize
                + (col + col_offset) as usize;
            pixels[idx] = source.pixel(row, col);
        }
    }
    Arc::new(PixelGrid::from_pixels(pixels, padded_width, padded_height))
}

/// Partitions a padded canvas into square tile views.
///
/// Tile side = `canvas.width() / resolution` (the caller guarantees the
/// resolution divides the power-of-two width). Row count =
/// `canvas.height() / side`; a trailing strip shorter than one tile is
/// silently excluded. Returns `rows × resolution`, row-major.
#[must_use]
pub fn tile_regions(canvas: &PixelGrid, resolution: u32) -> Vec<Vec<PixelRegion<'_>>> {
    let side = canvas.width() / resolution;
    debug_assert!(side > 0, "resolution exceeds canvas width");
    let rows = canvas.height() / side;
    let mut tiles = Vec::with_capacity(rows as usize);
    for tile_row in 0..rows {
        let mut row = Vec::with_capacity(resolution as usize);
        for tile_col in 0..resolution {
            row.push(canvas.region(tile_row * side, tile_col * side, side, side));
        }
        tiles.push(row);
    }
    tiles
}
