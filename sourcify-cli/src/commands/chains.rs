// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{common_args::ChainArgs, error::SourcifyResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Print the list as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    chains: ChainArgs,
}

pub fn exec(args: Args) -> SourcifyResult {
    let chains = args.chains.registry()?;
    if args.json {
        let json = serde_json::to_string_pretty(chains.list_chains()).map_err(eyre::Error::from)?;
        println!("{json}");
        return Ok(());
    }
    for chain in chains.list_chains() {
        println!("{:>10}  {:<10}  {}", chain.id, chain.name, chain.label());
    }
    Ok(())
}
