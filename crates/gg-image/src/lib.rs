/// Pixel data model and image-side pipeline stages for glyphgrid.
///
/// Decoding, power-of-two padding, tiling, and the shared perceptual
/// brightness sampler all live here. Everything downstream of this crate
/// works on brightness scalars, never on pixels.
pub mod decode;
pub mod padding;
pub mod pixel;

pub use decode::decode_image;
pub use padding::{next_power_of_two, pad, tile_regions};
pub use pixel::{PixelGrid, PixelRegion, Rgb};
