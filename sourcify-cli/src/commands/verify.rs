// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, sync::Arc, time::Duration};

use eyre::eyre;
use sourcify_tools::core::plugin::Plugin;

use crate::{
    common_args::{ContractArgs, ServiceArgs},
    error::{SourcifyError, SourcifyResult},
    host::DirectoryHost,
    utils::style::LINK,
};

/// How long to wait for the artifacts to reach the workflow after a compilation event.
const ARTIFACT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Directory holding the compiler output (metadata and sources)
    #[arg(long)]
    artifacts: PathBuf,

    #[command(flatten)]
    contract: ContractArgs,
    #[command(flatten)]
    service: ServiceArgs,
}

pub async fn exec(args: Args) -> SourcifyResult {
    if !args.artifacts.is_dir() {
        return Err(SourcifyError::usage(eyre!(
            "artifact directory not found: {}",
            args.artifacts.display()
        )));
    }
    let config = args.service.config()?;
    let chains = args.service.chains.registry()?;
    let chain = args.contract.chain(&chains)?;

    let host = Arc::new(DirectoryHost::new(".").with_artifacts(&args.artifacts));
    let plugin = Plugin::from_config(&config, Arc::clone(&host), chains)?;
    if let Some(chain) = chain {
        plugin.verify.set_chain(chain);
    }
    plugin.verify.set_address(&args.contract.address);

    let mut state = plugin.verify.subscribe();
    if host.compilation_finished() > 0 {
        // the bridge task picks the artifacts up on this thread once we yield
        if tokio::time::timeout(ARTIFACT_TIMEOUT, state.changed())
            .await
            .is_err()
        {
            log::warn!("no artifacts received from {}", args.artifacts.display());
        }
    }

    let current = plugin.verify.state();
    if !current.contract_name.is_empty() {
        println!(
            "verifying {} ({} files)",
            current.contract_name,
            current.files.len()
        );
    }
    plugin.verify.submit().await;
    println!(
        "Search repository for verified contracts at {LINK}{}{LINK:#}",
        plugin.verify.repository_url()
    );
    super::report(plugin.verify.alerts())
}
