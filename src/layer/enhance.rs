//! Saturation and brightness enhancement.
//!
//! Both adjustments interpolate between a degenerate reference image and the
//! original: `reference + factor * (original - reference)`. A factor of 1 is
//! the identity, 0 gives the reference, and values above 1 extrapolate away
//! from it. Results are clamped to `0..=255` and truncated. Alpha is never
//! touched.

use image::RgbaImage;

use super::LayerEffect;
use crate::error::Result;

// ============================================================================
// Effects
// ============================================================================

/// Scales color saturation relative to the pixel's grayscale luma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    pub factor: f64,
}

impl Saturation {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl LayerEffect for Saturation {
    fn name(&self) -> &'static str {
        "saturation"
    }

    fn transform(&self, image: &mut RgbaImage) -> Result<()> {
        enhance_saturation(image, self.factor);
        Ok(())
    }
}

/// Scales brightness relative to black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness {
    pub factor: f64,
}

impl Brightness {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl LayerEffect for Brightness {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn transform(&self, image: &mut RgbaImage) -> Result<()> {
        enhance_brightness(image, self.factor);
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// ITU-R 601-2 luma in fixed point, matching the usual 8-bit `L` conversion.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 0x8000) >> 16) as u8
}

fn blend(reference: u8, original: u8, factor: f64) -> u8 {
    let reference = f64::from(reference);
    let value = reference + factor * (f64::from(original) - reference);
    if value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value as u8
    }
}

/// Blends every pixel toward (or away from) its grayscale version.
pub fn enhance_saturation(image: &mut RgbaImage, factor: f64) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let gray = luma(r, g, b);
        pixel.0 = [
            blend(gray, r, factor),
            blend(gray, g, factor),
            blend(gray, b, factor),
            a,
        ];
    }
}

/// Blends every pixel toward (or away from) black.
pub fn enhance_brightness(image: &mut RgbaImage, factor: f64) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [blend(0, r, factor), blend(0, g, factor), blend(0, b, factor), a];
    }
}
