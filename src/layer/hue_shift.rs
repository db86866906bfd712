//! Hue replacement layer effect.

use image::{ImageBuffer, Pixel, RgbaImage};

use super::LayerEffect;
use crate::error::Result;
use crate::hsv::{hsv_to_rgb, rgb_to_hsv};

// ============================================================================
// HueShift
// ============================================================================

/// Replaces the hue of every pixel with a single target hue.
///
/// Unlike a rotation, the original hue is discarded: saturation and value
/// survive, so shading is kept while the whole layer takes on one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueShift {
    /// Target hue as a unit angle in `[0, 1)`.
    pub hue: f64,
}

impl HueShift {
    /// Creates a shift to the given unit hue, wrapped into `[0, 1)`.
    pub fn new(hue: f64) -> Self {
        Self {
            hue: hue.rem_euclid(1.0),
        }
    }

    /// Creates a shift from a hue in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees / 360.0)
    }

    /// Returns the target hue in degrees.
    pub fn degrees(&self) -> f64 {
        self.hue * 360.0
    }
}

impl LayerEffect for HueShift {
    fn name(&self) -> &'static str {
        "hue"
    }

    fn transform(&self, image: &mut RgbaImage) -> Result<()> {
        *image = shift_hue(image, self.hue)?;
        Ok(())
    }
}

/// Converts `image` to HSV, overwrites the hue channel with `hue`, and
/// converts back.
pub fn shift_hue<P>(image: &ImageBuffer<P, Vec<u8>>, hue: f64) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    let mut hsv = rgb_to_hsv(image)?;
    hsv.set_hue(hue);
    hsv_to_rgb(&hsv)
}
