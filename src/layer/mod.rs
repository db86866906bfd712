//! Color adjustments applied to a single layer before compositing.
//!
//! Each adjustment implements [`LayerEffect`]. A [`LayerPipeline`] is built
//! from a slot's [`HslOverride`] and only ever contains the effects that
//! would change the image, so identity settings never touch pixel data.
//!
//! # Pipeline Order
//!
//! ```text
//! Decoded layer (RGBA)
//!     │
//!     ▼
//! ┌────────────┐
//! │    Hue     │ ◄── skipped when h == 360
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │ Saturation │ ◄── skipped when s == 1
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │ Brightness │ ◄── skipped when l == 1
//! └─────┬──────┘
//!       ▼
//!   Canvas paste
//! ```

pub mod enhance;
pub mod hue_shift;

pub use enhance::{Brightness, Saturation};
pub use hue_shift::HueShift;

use std::fmt;

use image::RgbaImage;

use crate::character::HslOverride;
use crate::error::Result;

// ============================================================================
// Layer Traits
// ============================================================================

/// A color adjustment that rewrites an RGBA layer in place.
pub trait LayerEffect {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Transforms the image. Alpha must be left untouched.
    fn transform(&self, image: &mut RgbaImage) -> Result<()>;
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// Ordered list of effects for one layer.
#[derive(Default)]
pub struct LayerPipeline {
    effects: Vec<Box<dyn LayerEffect>>,
}

impl LayerPipeline {
    /// Creates an empty (identity) pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an effect to the end of the pipeline.
    pub fn with_effect(mut self, effect: impl LayerEffect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    /// Builds the pipeline for an override, leaving out no-op adjustments.
    pub fn from_override(hsl: &HslOverride) -> Self {
        let mut pipeline = Self::new();
        if !hsl.keeps_hue() {
            pipeline = pipeline.with_effect(HueShift::from_degrees(hsl.h));
        }
        if !hsl.keeps_saturation() {
            pipeline = pipeline.with_effect(Saturation::new(hsl.s));
        }
        if !hsl.keeps_lightness() {
            pipeline = pipeline.with_effect(Brightness::new(hsl.l));
        }
        pipeline
    }

    /// True when rendering would return the input unchanged.
    pub fn is_identity(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn effect_names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    /// Runs every effect in order over `image`.
    pub fn render(&self, mut image: RgbaImage) -> Result<RgbaImage> {
        for effect in &self.effects {
            effect.transform(&mut image)?;
        }
        Ok(image)
    }
}

impl fmt::Debug for LayerPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.effect_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn identity_override_builds_empty_pipeline() {
        let pipeline = LayerPipeline::from_override(&HslOverride::IDENTITY);
        assert!(pipeline.is_identity());

        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
        assert_eq!(pipeline.render(img.clone()).unwrap(), img);
    }

    #[test]
    fn sentinel_hue_skips_hue_effect() {
        let pipeline = LayerPipeline::from_override(&HslOverride::new(360.0, 0.5, 1.0));
        assert_eq!(pipeline.effect_names(), vec!["saturation"]);
    }

    #[test]
    fn effects_are_ordered() {
        let pipeline = LayerPipeline::from_override(&HslOverride::new(0.0, 2.0, 0.5));
        assert_eq!(pipeline.effect_names(), vec!["hue", "saturation", "brightness"]);
        assert_eq!(format!("{pipeline:?}"), r#"["hue", "saturation", "brightness"]"#);
    }

    #[test]
    fn hue_zero_is_a_real_shift() {
        let pipeline = LayerPipeline::from_override(&HslOverride::new(0.0, 1.0, 1.0));
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255]));
        let out = pipeline.render(img).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn custom_effects_can_be_chained() {
        let pipeline = LayerPipeline::new()
            .with_effect(Brightness::new(0.5))
            .with_effect(Brightness::new(0.5));
        let img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 40, 255]));
        let out = pipeline.render(img).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [50, 25, 10, 255]);
    }
}
