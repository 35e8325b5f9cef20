// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Verified contracts as returned by the repository.

use serde::{Deserialize, Serialize};

/// Match level reported for a fetched contract.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum FetchStatus {
    /// Sources and metadata match the deployment exactly. Reported as `perfect` or `full`.
    Perfect,
    /// Sources match but the metadata differs.
    Partial,
    Unrecognized(String),
}

impl FetchStatus {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial)
    }
}

impl Default for FetchStatus {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<String> for FetchStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "perfect" | "full" => Self::Perfect,
            "partial" => Self::Partial,
            _ => Self::Unrecognized(status),
        }
    }
}

impl From<FetchStatus> for String {
    fn from(status: FetchStatus) -> Self {
        match status {
            FetchStatus::Perfect => "perfect".to_owned(),
            FetchStatus::Partial => "partial".to_owned(),
            FetchStatus::Unrecognized(status) => status,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    #[serde(default)]
    pub path: String,
    pub name: String,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    #[serde(default)]
    pub verification_status: FetchStatus,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub sources: Vec<Source>,
}
