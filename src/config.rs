//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Character API endpoint; the identity is appended as a path.
pub const DEFAULT_API_BASE: &str = "https://api.reroll.co/api/characters";

/// Character rendered when none is given, as `<user>/<character id>`.
pub const DEFAULT_IDENTITY: &str = "ghostoftherain/29948";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a single render needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub identity: String,
    /// Per-request timeout for every HTTP call.
    pub timeout: Duration,
    /// Where to save the result, if anywhere.
    pub output: Option<PathBuf>,
    /// Whether to open the result in the system image viewer.
    pub display: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            identity: DEFAULT_IDENTITY.to_string(),
            timeout: DEFAULT_TIMEOUT,
            output: None,
            display: true,
        }
    }
}

impl Config {
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// URL of this config's character.
    pub fn character_url(&self) -> String {
        character_url(&self.api_base, &self.identity)
    }
}

/// Joins an API base and an identity with exactly one slash.
pub fn character_url(api_base: &str, identity: &str) -> String {
    format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        identity.trim_start_matches('/')
    )
}
