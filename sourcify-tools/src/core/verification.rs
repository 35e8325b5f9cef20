// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Verification requests and their outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{core::compilation::ArtifactFile, Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum VerificationStatus {
    #[serde(rename = "perfect")]
    Perfect,
    #[serde(rename = "partial")]
    Partial,
    #[serde(rename = "no match")]
    NoMatch,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub address: String,
    pub status: VerificationStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_timestamp: Option<String>,
}

impl VerificationResult {
    /// Turns a `no match` outcome into [`Error::NoMatch`] carrying the server's message.
    pub fn check(self) -> Result<Self> {
        match self.status {
            VerificationStatus::NoMatch => Err(Error::NoMatch(self.message)),
            VerificationStatus::Perfect | VerificationStatus::Partial => Ok(self),
        }
    }

    /// Heading shown for a successful verification.
    pub fn success_heading(&self) -> String {
        if let Some(timestamp) = self.storage_timestamp.as_deref().filter(|t| !t.is_empty()) {
            return format!("Contract already verified on {}", format_utc(timestamp));
        }
        let match_string = match self.status {
            VerificationStatus::Perfect => "successfully",
            VerificationStatus::Partial | VerificationStatus::NoMatch => "only partially",
        };
        format!("Contract {match_string} verified")
    }
}

/// Formats an RFC 3339 timestamp as an HTTP date, e.g. `Fri, 01 Jan 2021 00:00:00 GMT`.
///
/// Timestamps that do not parse are returned unchanged.
fn format_utc(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(time) => time
            .with_timezone(&Utc)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
        Err(err) => {
            debug!(@grey, "unparsable storage timestamp {timestamp:?}: {err}");
            timestamp.to_owned()
        }
    }
}

/// Fields of a verification submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationForm {
    pub address: String,
    /// Decimal chain id.
    pub chain: String,
    pub files: Vec<ArtifactFile>,
}

impl VerificationForm {
    pub fn new(address: impl Into<String>, chain_id: u64, files: Vec<ArtifactFile>) -> Self {
        Self {
            address: address.into(),
            chain: chain_id.to_string(),
            files,
        }
    }
}
