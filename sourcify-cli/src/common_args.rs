// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use eyre::{eyre, Context};
use sourcify_tools::core::{
    chain::{Chain, ChainRegistry},
    config::Config,
};

use crate::error::SourcifyError;

#[derive(Debug, clap::Args)]
pub struct ServiceArgs {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Verification server URL, overrides the config file and environment
    #[arg(long)]
    server_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(flatten)]
    pub chains: ChainArgs,
}

impl ServiceArgs {
    pub fn config(&self) -> Result<Config, SourcifyError> {
        let config = match &self.config {
            Some(path) => Config::load(path)
                .wrap_err_with(|| format!("could not load config {}", path.display()))
                .map_err(SourcifyError::usage)?,
            None => Config::default(),
        };
        let mut config = config.with_env_overrides();
        if let Some(server_url) = &self.server_url {
            config.server_url = server_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = Some(timeout);
        }
        log::debug!("server url: {}", config.server_url);
        Ok(config)
    }

}

#[derive(Debug, clap::Args)]
pub struct ChainArgs {
    /// JSON file with the chains to offer instead of the built-in list
    #[arg(long)]
    chains: Option<PathBuf>,
}

impl ChainArgs {
    pub fn registry(&self) -> Result<ChainRegistry, SourcifyError> {
        let Some(path) = &self.chains else {
            return Ok(ChainRegistry::builtin());
        };
        fs::read_to_string(path)
            .map_err(eyre::Error::from)
            .and_then(|json| Ok(ChainRegistry::from_json(&json)?))
            .wrap_err_with(|| format!("could not load chain list {}", path.display()))
            .map_err(SourcifyError::usage)
    }
}

#[derive(Debug, clap::Args)]
pub struct ContractArgs {
    /// Chain id or name, defaults to the first known chain
    #[arg(long)]
    chain: Option<String>,
    /// Address of the deployed contract
    #[arg(long)]
    pub address: String,
}

impl ContractArgs {
    /// Chain picked with `--chain`, if any.
    pub fn chain(&self, chains: &ChainRegistry) -> Result<Option<Chain>, SourcifyError> {
        let Some(value) = &self.chain else {
            return Ok(None);
        };
        chains
            .resolve(value)
            .cloned()
            .map(Some)
            .ok_or_else(|| SourcifyError::usage(eyre!("unknown chain: {value}")))
    }
}
