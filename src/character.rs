//! Character data as returned by the character API.
//!
//! The API response is loosely shaped: each cosmetic slot is either `null` or
//! an object whose image URL and color override may live in one of two
//! places. [`CharacterSheet::layers`] normalizes all of that into a flat list
//! of [`LayerSpec`]s in paint order, so nothing downstream has to care.
//!
//! # Example
//!
//! ```
//! use reroll_renderer::{CharacterSheet, Slot};
//!
//! let sheet = CharacterSheet::from_json(r#"{
//!     "body": { "image_url": "https://example.com/body.png" },
//!     "body_hsl": { "h": 360, "s": 1, "l": 1 },
//!     "hair": null
//! }"#).unwrap();
//!
//! let layers = sheet.layers().unwrap();
//! assert_eq!(layers.len(), 1);
//! assert_eq!(layers[0].slot, Slot::Body);
//! assert!(layers[0].hsl.is_identity());
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ============================================================================
// Slot
// ============================================================================

/// A cosmetic equipment category. Declaration order is paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    MiniBase,
    Pet,
    Cloak,
    OffHand,
    Body,
    Hair,
    Face,
    Legs,
    Feet,
    Chest,
    Head,
    Waist,
    Hands,
    MainHand,
    Horns,
    Wings,
    Tattoo,
    Ears,
    Tail,
}

impl Slot {
    /// Every slot, bottom layer first.
    pub const ALL: [Slot; 19] = [
        Slot::MiniBase,
        Slot::Pet,
        Slot::Cloak,
        Slot::OffHand,
        Slot::Body,
        Slot::Hair,
        Slot::Face,
        Slot::Legs,
        Slot::Feet,
        Slot::Chest,
        Slot::Head,
        Slot::Waist,
        Slot::Hands,
        Slot::MainHand,
        Slot::Horns,
        Slot::Wings,
        Slot::Tattoo,
        Slot::Ears,
        Slot::Tail,
    ];

    /// The field name used by the API.
    pub fn key(self) -> &'static str {
        match self {
            Slot::MiniBase => "mini_base",
            Slot::Pet => "pet",
            Slot::Cloak => "cloak",
            Slot::OffHand => "off_hand",
            Slot::Body => "body",
            Slot::Hair => "hair",
            Slot::Face => "face",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
            Slot::Chest => "chest",
            Slot::Head => "head",
            Slot::Waist => "waist",
            Slot::Hands => "hands",
            Slot::MainHand => "main_hand",
            Slot::Horns => "horns",
            Slot::Wings => "wings",
            Slot::Tattoo => "tattoo",
            Slot::Ears => "ears",
            Slot::Tail => "tail",
        }
    }

    /// Name of the top-level field that holds this slot's override when it
    /// is not nested in the slot entry.
    pub fn hsl_key(self) -> String {
        format!("{}_hsl", self.key())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Slot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.key() == s)
            .ok_or_else(|| Error::missing(s, "slot"))
    }
}

// ============================================================================
// HslOverride
// ============================================================================

/// Per-layer color adjustment.
///
/// `h` is a hue in degrees; 360 means "keep the original hue" rather than
/// red. `s` and `l` are multiplicative factors where 1 means unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslOverride {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslOverride {
    /// An override that changes nothing.
    pub const IDENTITY: Self = Self {
        h: 360.0,
        s: 1.0,
        l: 1.0,
    };

    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// True when the hue carries the 360 "no shift" sentinel.
    ///
    /// Compared after truncation, so `360.4` also counts.
    pub fn keeps_hue(&self) -> bool {
        self.h.trunc() == 360.0
    }

    pub fn keeps_saturation(&self) -> bool {
        self.s == 1.0
    }

    pub fn keeps_lightness(&self) -> bool {
        self.l == 1.0
    }

    pub fn is_identity(&self) -> bool {
        self.keeps_hue() && self.keeps_saturation() && self.keeps_lightness()
    }
}

impl Default for HslOverride {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ============================================================================
// LayerSpec
// ============================================================================

/// One present slot, normalized: where to fetch its image and how to color it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub slot: Slot,
    pub image_url: String,
    pub hsl: HslOverride,
}

// ============================================================================
// Raw API shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawSlotEntry {
    #[serde(default)]
    asset: Option<RawAsset>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    hsl: Option<HslOverride>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    #[serde(default)]
    image_url: Option<String>,
}

// ============================================================================
// CharacterSheet
// ============================================================================

/// The top-level character object from the API.
#[derive(Debug, Clone, Default)]
pub struct CharacterSheet {
    fields: Map<String, Value>,
}

impl CharacterSheet {
    /// Parses a character from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Wraps an already-parsed JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(Error::missing("character", "<object>")),
        }
    }

    /// The character's display name, if the API sent one.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Returns the raw entry for a slot, treating `null` as absent.
    pub fn entry(&self, slot: Slot) -> Option<&Value> {
        self.fields.get(slot.key()).filter(|v| !v.is_null())
    }

    /// Normalizes a single slot. Returns `Ok(None)` for an empty slot.
    pub fn layer(&self, slot: Slot) -> Result<Option<LayerSpec>> {
        let Some(entry) = self.entry(slot) else {
            return Ok(None);
        };

        let raw = RawSlotEntry::deserialize(entry)?;

        let image_url = match raw.asset {
            Some(asset) => asset
                .image_url
                .ok_or_else(|| Error::missing(slot.key(), "asset.image_url"))?,
            None => raw
                .image_url
                .ok_or_else(|| Error::missing(slot.key(), "image_url"))?,
        };

        let hsl = match raw.hsl {
            Some(hsl) => hsl,
            None => {
                let key = slot.hsl_key();
                let value = self
                    .fields
                    .get(&key)
                    .filter(|v| !v.is_null())
                    .ok_or_else(|| Error::missing(slot.key(), key.as_str()))?;
                HslOverride::deserialize(value)?
            }
        };

        Ok(Some(LayerSpec {
            slot,
            image_url,
            hsl,
        }))
    }

    /// Normalizes every present slot, in paint order.
    pub fn layers(&self) -> Result<Vec<LayerSpec>> {
        let mut layers = Vec::new();
        for slot in Slot::ALL {
            match self.layer(slot)? {
                Some(layer) => layers.push(layer),
                None => debug!("{slot}: empty"),
            }
        }
        Ok(layers)
    }
}

// ============================================================================
// Tests
// ============================================================================
