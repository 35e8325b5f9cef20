// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::sync::Arc;

use crate::{
    core::{
        chain::ChainRegistry,
        client::{HttpClient, VerificationService},
        config::Config,
        host::Host,
        session::Session,
        workflow::{fetch::FetchWorkflow, verify::VerifyWorkflow},
    },
    Result,
};

/// Both workflows wired to one service, one host and one shared session.
pub struct Plugin<S, H> {
    pub chains: ChainRegistry,
    pub session: Session,
    pub fetch: FetchWorkflow<S, H>,
    pub verify: VerifyWorkflow<S>,
}

impl<S: VerificationService + Clone, H: Host> Plugin<S, H> {
    /// Must be called from within a tokio runtime.
    pub fn new(service: S, host: Arc<H>, chains: ChainRegistry) -> Result<Self> {
        let session = Session::new();
        let verify = VerifyWorkflow::new(
            service.clone(),
            Arc::clone(&host),
            session.clone(),
            &chains,
        )?;
        let fetch = FetchWorkflow::new(service, host, session.clone(), &chains);
        Ok(Self {
            chains,
            session,
            fetch,
            verify,
        })
    }
}

impl<H: Host> Plugin<HttpClient, H> {
    pub fn from_config(config: &Config, host: Arc<H>, chains: ChainRegistry) -> Result<Self> {
        info!(@grey, "using verification server {}", config.server_url);
        let mut plugin = Self::new(HttpClient::from_config(config), host, chains)?;
        plugin.verify = plugin.verify.with_repository_url(config.repository_url.as_str());
        Ok(plugin)
    }
}
