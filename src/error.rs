//! Error type shared by every stage of a render.

use crate::character::Slot;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP request {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP request {url} failed. Error: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Missing field `{field}` for {slot}")]
    MissingField { slot: String, field: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode layer image for {slot}: {source}")]
    Decode {
        slot: Slot,
        #[source]
        source: image::ImageError,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: u8, actual: u8 },

    #[error("Character has no equipped layers")]
    NoLayers,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn missing(slot: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            slot: slot.into(),
            field: field.into(),
        }
    }
}
