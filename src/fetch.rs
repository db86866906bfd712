//! Blocking HTTP access to the character API and layer images.

use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::character::CharacterSheet;
use crate::compositor::LayerSource;
use crate::config::{Config, character_url};
use crate::error::{Error, Result};

/// Headers sent with every request.
pub fn headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("reroll-renderer/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers
}

/// HTTP client for one render. Any status other than 200 is an error.
pub struct HttpClient {
    client: Client,
    api_base: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .default_headers(headers())
            .timeout(config.timeout)
            .build()
            .map_err(|source| Error::Request {
                url: config.api_base.clone(),
                source,
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    /// Fetches the character `identity` (`<user>/<character id>`).
    pub fn character(&self, identity: &str) -> Result<CharacterSheet> {
        let url = character_url(&self.api_base, identity);
        let response = self.get(&url)?;
        let value: serde_json::Value = response
            .json()
            .map_err(|source| Error::Request { url, source })?;
        CharacterSheet::from_value(value)
    }

    fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl LayerSource for HttpClient {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .get(url)?
            .bytes()
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })?;
        debug!("{url}: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
