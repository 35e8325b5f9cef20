// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, sync::Arc};

use sourcify_tools::core::plugin::Plugin;

use crate::{
    common_args::{ContractArgs, ServiceArgs},
    error::SourcifyResult,
    host::DirectoryHost,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Directory the fetched sources are written under
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    contract: ContractArgs,
    #[command(flatten)]
    service: ServiceArgs,
}

pub async fn exec(args: Args) -> SourcifyResult {
    let config = args.service.config()?;
    let chains = args.service.chains.registry()?;
    let chain = args.contract.chain(&chains)?;

    let host = Arc::new(DirectoryHost::new(&args.out));
    let plugin = Plugin::from_config(&config, host, chains)?;
    if let Some(chain) = chain {
        plugin.fetch.set_chain(chain);
    }
    plugin.fetch.set_address(&args.contract.address);

    plugin.fetch.submit().await;
    if let Some(result) = plugin.session.current().fetch_result {
        for source in &result.sources {
            log::debug!("fetched {}", source.path);
        }
    }
    super::report(plugin.fetch.alerts())
}
