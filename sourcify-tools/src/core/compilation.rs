// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Bridge from the host's compiler events to the verify workflow.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

use crate::{
    core::{
        host::Host,
        workflow::verify::{VerifyAction, VerifyState},
    },
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArtifactFile {
    pub name: String,
    pub content: String,
}

impl ArtifactFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Output of a host build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationArtifacts {
    pub contract_name: String,
    pub files: Vec<ArtifactFile>,
}

/// Live subscription to compiler events. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // aborting drops the receiver, which closes the host side of the channel
        self.task.abort();
    }
}

#[derive(Debug, Default)]
enum BridgeState {
    #[default]
    Unarmed,
    Armed(Subscription),
}

/// One-shot subscription feeding the latest build output into a verify workflow.
///
/// The bridge moves from unarmed to armed exactly once; there is no way back for the lifetime of
/// the instance.
#[derive(Debug, Default)]
pub struct CompilationBridge {
    state: BridgeState,
}

impl CompilationBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, BridgeState::Armed(_))
    }

    /// Subscribes to the host's compiler events, pushing each build's artifacts into `state`.
    ///
    /// Returns `Ok(false)` without subscribing again if the bridge is already armed. Must be called
    /// from within a tokio runtime.
    pub fn arm<H: Host>(
        &mut self,
        host: Arc<H>,
        state: Arc<watch::Sender<VerifyState>>,
    ) -> Result<bool> {
        if self.is_armed() {
            return Ok(false);
        }
        let runtime = Handle::try_current()?;

        let mut events = host.subscribe_compilation_finished();
        let listener = Arc::clone(&state);
        let task = runtime.spawn(async move {
            while let Some(event) = events.recv().await {
                debug!(@grey, "compilation finished: {:?}", event.target);
                match host.fetch_last_compilation().await {
                    Ok(artifacts) => {
                        info!(@grey,
                            "loaded {} artifact file(s) for {}",
                            artifacts.files.len(),
                            artifacts.contract_name
                        );
                        listener.send_modify(|state| {
                            *state = std::mem::take(state)
                                .reduce(VerifyAction::SetContractName(artifacts.contract_name))
                                .reduce(VerifyAction::SetFiles(artifacts.files))
                                .reduce(VerifyAction::ClearError);
                        });
                    }
                    Err(err) => warn!(@yellow, "failed to load compilation artifacts: {err}"),
                }
            }
            debug!(@grey, "compiler event stream closed");
        });

        state.send_modify(|state| {
            *state = std::mem::take(state).reduce(VerifyAction::SetListening(true));
        });
        self.state = BridgeState::Armed(Subscription { task });
        Ok(true)
    }
}
