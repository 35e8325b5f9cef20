// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use eyre::eyre;
use sourcify_tools::core::workflow::{Alert, AlertKind};

use crate::{
    error::SourcifyResult,
    utils::style::{LINK, SUCCESS, WARNING},
};

mod chains;
mod fetch;
mod verify;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List the chains contracts can be fetched from and verified on
    Chains(chains::Args),
    /// Fetch verified sources of a deployed contract
    #[clap(visible_alias = "f")]
    Fetch(fetch::Args),
    /// Verify a deployed contract against local compilation artifacts
    #[clap(visible_alias = "v")]
    Verify(verify::Args),
}

pub async fn exec(cmd: Command) -> SourcifyResult {
    match cmd {
        Command::Chains(args) => chains::exec(args),
        Command::Fetch(args) => fetch::exec(args).await,
        Command::Verify(args) => verify::exec(args).await,
    }
}

/// Prints the workflow banners, failing on the first danger alert.
fn report(alerts: Vec<Alert>) -> SourcifyResult {
    for alert in alerts {
        let style = match alert.kind {
            AlertKind::Danger => return Err(eyre!(alert.heading).into()),
            AlertKind::Warning => WARNING,
            AlertKind::Success => SUCCESS,
        };
        println!("{style}{}{style:#}", alert.heading);
        if let Some(link) = alert.link {
            println!("  {LINK}{link}{LINK:#}");
        }
    }
    Ok(())
}
