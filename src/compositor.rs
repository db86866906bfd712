//! Layer compositing: turns a character sheet into a single image.

use image::RgbaImage;
use log::{debug, info};

use crate::canvas::Canvas;
use crate::character::{CharacterSheet, LayerSpec};
use crate::error::{Error, Result};
use crate::layer::LayerPipeline;

// ============================================================================
// LayerSource Trait
// ============================================================================

/// Somewhere layer image bytes can be fetched from.
///
/// The HTTP client implements this; tests use an in-memory map.
pub trait LayerSource {
    /// Returns the encoded image bytes behind `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<S: LayerSource + ?Sized> LayerSource for &S {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

// ============================================================================
// Compositor
// ============================================================================

/// Composes every equipped slot of a character onto one canvas.
///
/// Layers are painted in slot order, so later slots cover earlier ones. The
/// canvas is created from the first present layer's size and threaded
/// through the loop as a value. The first failure aborts the whole render.
///
/// # Example
///
/// ```no_run
/// use reroll_renderer::{CharacterSheet, Compositor, Config, HttpClient};
///
/// let client = HttpClient::new(&Config::default()).unwrap();
/// let sheet: CharacterSheet = client.character("ghostoftherain/29948").unwrap();
/// let image = Compositor::new(&client).compose(&sheet).unwrap();
/// ```
pub struct Compositor<S> {
    source: S,
}

impl<S: LayerSource> Compositor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Renders the full character.
    ///
    /// Returns [`Error::NoLayers`] if no slot is equipped.
    pub fn compose(&self, sheet: &CharacterSheet) -> Result<RgbaImage> {
        let layers = sheet.layers()?;
        debug!(
            "composing {} layer(s) for {}",
            layers.len(),
            sheet.name().unwrap_or("unnamed character")
        );

        let canvas = layers
            .iter()
            .try_fold(None, |canvas, layer| self.paint(canvas, layer).map(Some))?
            .ok_or(Error::NoLayers)?;

        let (width, height) = canvas.dimensions();
        info!("composed {} layer(s) into {width}x{height}", layers.len());
        Ok(canvas.into_image())
    }

    /// Fetches, decodes and color-adjusts a single layer.
    pub fn render_layer(&self, layer: &LayerSpec) -> Result<RgbaImage> {
        let bytes = self.source.fetch(&layer.image_url)?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|source| Error::Decode {
                slot: layer.slot,
                source,
            })?
            .to_rgba8();

        let pipeline = LayerPipeline::from_override(&layer.hsl);
        debug!(
            "{}: {}x{} from {}, effects {:?}",
            layer.slot,
            decoded.width(),
            decoded.height(),
            layer.image_url,
            pipeline
        );

        pipeline.render(decoded)
    }

    fn paint(&self, canvas: Option<Canvas>, layer: &LayerSpec) -> Result<Canvas> {
        let rendered = self.render_layer(layer)?;
        let mut canvas = canvas.unwrap_or_else(|| Canvas::for_layer(&rendered));
        canvas.paste(&rendered);
        Ok(canvas)
    }
}

// ============================================================================
// Tests
// ============================================================================
