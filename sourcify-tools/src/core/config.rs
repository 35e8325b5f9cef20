// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Verification server used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
/// Public repository of verified contracts.
pub const DEFAULT_REPOSITORY_URL: &str = "https://contractrepo.verify.shardlabs.io/";

pub const SERVER_URL_ENV: &str = "SOURCIFY_SERVER_URL";
pub const REPOSITORY_URL_ENV: &str = "SOURCIFY_REPOSITORY_URL";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub server_url: String,
    pub repository_url: String,
    /// Per-request timeout in seconds. Requests wait indefinitely if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            repository_url: DEFAULT_REPOSITORY_URL.to_owned(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(@grey, "loading config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Applies `SOURCIFY_*` environment variables on top of this config.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SERVER_URL_ENV).filter(|url| !url.is_empty()) {
            self.server_url = url;
        }
        if let Some(url) = lookup(REPOSITORY_URL_ENV).filter(|url| !url.is_empty()) {
            self.repository_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
