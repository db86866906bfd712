//! The accumulating output image.
//!
//! A [`Canvas`] starts out opaque white and receives one paste per layer.
//! Pasting uses the layer's own alpha as a mask and blends every band,
//! alpha included, so fully transparent layer pixels leave the canvas alone
//! and fully opaque ones replace it.

use image::{Rgba, RgbaImage};

/// Fill color of a fresh canvas.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

// ============================================================================
// Canvas
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Creates an opaque white canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BACKGROUND),
        }
    }

    /// Creates a canvas sized to match `layer`.
    pub fn for_layer(layer: &RgbaImage) -> Self {
        Self::new(layer.width(), layer.height())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pastes `layer` at the origin, masked by its alpha channel.
    ///
    /// The canvas is never resized; parts of the layer outside it are dropped.
    pub fn paste(&mut self, layer: &RgbaImage) {
        let width = layer.width().min(self.image.width());
        let height = layer.height().min(self.image.height());

        for y in 0..height {
            for x in 0..width {
                let src = *layer.get_pixel(x, y);
                let dst = self.image.get_pixel_mut(x, y);
                *dst = mask_blend(*dst, src);
            }
        }
    }
}

// ============================================================================
// Blending
// ============================================================================

/// Divides by 255 with rounding, exact for products of two `u8`s.
fn div255(value: u32) -> u8 {
    let t = value + 128;
    (((t >> 8) + t) >> 8) as u8
}

/// Blends `src` over `dst` on every band using `src`'s alpha as the weight.
fn mask_blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let m = src[3] as u32;
    match m {
        0 => dst,
        255 => src,
        _ => {
            let blend = |d: u8, s: u8| div255(d as u32 * (255 - m) + s as u32 * m);
            Rgba([
                blend(dst[0], src[0]),
                blend(dst[1], src[1]),
                blend(dst[2], src[2]),
                blend(dst[3], src[3]),
            ])
        }
    }
}
