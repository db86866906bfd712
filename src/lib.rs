//! reroll-renderer: renders a Reroll character's equipped cosmetics into one image.
//!
//! Every equipped slot contributes one layer image. Each layer is recolored
//! according to its HSL override (hue replacement, then saturation, then
//! brightness) and pasted onto an opaque white canvas in a fixed slot order.
//!
//! # Example
//!
//! ```no_run
//! use reroll_renderer::{Config, output};
//!
//! let config = Config::default().with_identity("linkian209/29736");
//! let image = reroll_renderer::render(&config).unwrap();
//! output::display(&image).unwrap();
//! ```
//!
//! # Offline Compositing
//!
//! The compositor only needs something that implements [`LayerSource`], so
//! character data and layer images can come from anywhere:
//!
//! ```
//! use reroll_renderer::{CharacterSheet, Compositor, LayerSource, Result};
//!
//! struct Nothing;
//!
//! impl LayerSource for Nothing {
//!     fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
//!         unreachable!("no slots are equipped")
//!     }
//! }
//!
//! let sheet = CharacterSheet::from_json(r#"{ "body": null }"#).unwrap();
//! assert!(Compositor::new(Nothing).compose(&sheet).is_err());
//! ```

mod canvas;
mod character;
mod compositor;
mod config;
mod error;
mod fetch;
pub mod hsv;
mod layer;
pub mod output;

use image::RgbaImage;
use log::info;

pub use canvas::{BACKGROUND, Canvas};
pub use character::{CharacterSheet, HslOverride, LayerSpec, Slot};
pub use compositor::{Compositor, LayerSource};
pub use config::{Config, DEFAULT_API_BASE, DEFAULT_IDENTITY, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use fetch::HttpClient;
pub use hsv::{HsvBuffer, hsv_to_rgb, rgb_to_hsv};
pub use layer::enhance::{enhance_brightness, enhance_saturation};
pub use layer::hue_shift::shift_hue;
pub use layer::{Brightness, HueShift, LayerEffect, LayerPipeline, Saturation};

/// Fetches the configured character and composes it.
pub fn render(config: &Config) -> Result<RgbaImage> {
    let client = HttpClient::new(config)?;
    let sheet = client.character(&config.identity)?;
    info!(
        "fetched {} from {}",
        sheet.name().unwrap_or(&config.identity),
        config.character_url()
    );
    Compositor::new(&client).compose(&sheet)
}
