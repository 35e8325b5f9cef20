// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml deserialize error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("no async runtime available: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("No contracts to verify")]
    NoFilesToVerify,
    #[error("No chain selected")]
    NoChainSelected,
    #[error("duplicate chain id {0} in chain list")]
    DuplicateChain(u64),

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{info}")]
    RemoteRejection { status: u16, info: String },
    /// The server processed the submission but found no matching deployment.
    #[error("{0}")]
    NoMatch(String),
    #[error("{0}")]
    Host(String),
}

impl Error {
    pub fn host(message: impl std::fmt::Display) -> Self {
        Self::Host(message.to_string())
    }
}
