// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Seam to the development environment hosting the plugin.

use std::future::Future;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    core::{compilation::CompilationArtifacts, contract::FetchResult},
    Result,
};

/// Notification that the host finished a build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilationFinished {
    /// File the host compiled, when it reports one.
    pub target: Option<String>,
}

/// Environment the workflows run inside: file system, compiler and editor focus.
#[allow(async_fn_in_trait)]
pub trait Host: Send + Sync + 'static {
    /// Subscribes to compilation-finished events.
    ///
    /// The host delivers at most one event per compilation. Dropping the receiver ends the
    /// subscription.
    fn subscribe_compilation_finished(&self) -> UnboundedReceiver<CompilationFinished>;

    /// Queries the output of the most recent build.
    fn fetch_last_compilation(
        &self,
    ) -> impl Future<Output = Result<CompilationArtifacts>> + Send;

    /// Stores fetched sources and metadata where the user can open them.
    async fn save_fetched(&self, result: &FetchResult, address: &str) -> Result<()>;

    /// Brings the host's file browser to the front.
    async fn focus_file_manager(&self) -> Result<()>;
}
