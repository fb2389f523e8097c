/// Poids perceptuels BT.709 pour la luminance.
const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;
const MAX_CHANNEL: f64 = 255.0;

/// A single RGB pixel, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white, the padding fill color.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Pure black.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
}

/// Immutable 2-D grid of RGB pixels, row-major.
///
/// # Example
/// ```
/// use gg_image::pixel::{PixelGrid, Rgb};
/// let grid = PixelGrid::filled(4, 2, Rgb::WHITE);
/// assert_eq!(grid.width(), 4);
/// assert_eq!(grid.pixel(1, 3), Rgb::WHITE);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Vec<Rgb>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Builds a grid from a row-major pixel vector.
    ///
    /// # Panics
    /// Panics if dimensions are zero or do not match the vector length.
    #[must_use]
    pub fn from_pixels(pixels: Vec<Rgb>, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be nonzero");
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel vector length must match dimensions"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Builds a grid of uniform color.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self::from_pixels(
            vec![color; width as usize * height as usize],
            width,
            height,
        )
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (row, col).
    #[inline]
    #[must_use]
    pub fn pixel(&self, row: u32, col: u32) -> Rgb {
        debug_assert!(row < self.height && col < self.width, "pixel out of bounds");
        self.pixels[row as usize * self.width as usize + col as usize]
    }

    /// Borrowed view over a rectangular sub-region.
    ///
    /// # Panics
    /// Panics in debug builds if the rectangle exceeds the grid or is empty.
    #[must_use]
    pub fn region(&self, top: u32, left: u32, height: u32, width: u32) -> PixelRegion<'_> {
        debug_assert!(height > 0 && width > 0, "region must have at least one pixel");
        debug_assert!(
            top + height <= self.height && left + width <= self.width,
            "region exceeds grid bounds"
        );
        PixelRegion {
            grid: self,
            top,
            left,
            height,
            width,
        }
    }

    /// View covering the whole grid.
    #[must_use]
    pub fn full_region(&self) -> PixelRegion<'_> {
        self.region(0, 0, self.height, self.width)
    }
}

/// Borrowed rectangular view over a [`PixelGrid`]. Always ≥1 pixel.
///
/// Regions are derived on demand and never outlive a conversion; tiles are
/// regions, glyph rasters are scored through a region of their own grid.
#[derive(Clone, Copy)]
pub struct PixelRegion<'a> {
    grid: &'a PixelGrid,
    top: u32,
    left: u32,
    height: u32,
    width: u32,
}

impl PixelRegion<'_> {
    /// Height of the view in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width of the view in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel at (row, col) relative to the view's origin.
    #[inline]
    #[must_use]
    pub fn pixel(&self, row: u32, col: u32) -> Rgb {
        self.grid.pixel(self.top + row, self.left + col)
    }

    /// Mean perceptual luminance of the view, in [0, 1].
    ///
    /// This is the single brightness formula of the whole pipeline: image
    /// tiles and glyph rasters are both scored through it.
    ///
    /// # Example
    /// ```
    /// use gg_image::pixel::{PixelGrid, Rgb};
    /// let white = PixelGrid::filled(2, 2, Rgb::WHITE);
    /// assert!((white.full_region().mean_luminance() - 1.0).abs() < 1e-12);
    /// let black = PixelGrid::filled(2, 2, Rgb::BLACK);
    /// assert_eq!(black.full_region().mean_luminance(), 0.0);
    /// ```
    #[must_use]
    pub fn mean_luminance(&self) -> f64 {
        let mut sum = 0.0;
        for row in 0..self.height {
            for col in 0..self.width {
                let px = self.pixel(row, col);
                sum += f64::from(px.r) * RED_WEIGHT
                    + f64::from(px.g) * GREEN_WEIGHT
                    + f64::from(px.b) * BLUE_WEIGHT;
            }
        }
        sum / (f64::from(self.height) * f64::from(self.width) * MAX_CHANNEL)
    }
}
