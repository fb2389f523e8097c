use std::path::Path;

use anyhow::{Context, Result};

use crate::pixel::{PixelGrid, Rgb};

/// Decodes an image file into a [`PixelGrid`].
///
/// Decode failure is fatal for the owning session; the error carries the
/// offending path and is surfaced to the caller unchanged.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use gg_image::decode::decode_image;
/// let grid = decode_image("cat.jpeg".as_ref()).unwrap();
/// ```
pub fn decode_image(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::info!("decoded {} ({width}×{height})", path.display());

    let pixels = rgb
        .pixels()
        .map(|p| Rgb {
            r: p.0[0],
            g: p.0[1],
            b: p.0[2],
        })
        .collect();
    Ok(PixelGrid::from_pixels(pixels, width, height))
}
