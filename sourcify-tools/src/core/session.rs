// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Results shared between the fetch and verify workflows for the lifetime of the plugin.

use std::sync::Arc;

use tokio::sync::watch;

use crate::core::{contract::FetchResult, verification::VerificationResult};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub fetch_result: Option<FetchResult>,
    pub verification_result: Option<VerificationResult>,
}

/// Handle to the shared session cell.
///
/// Clones refer to the same cell. Writes are serialized by the underlying channel, and readers can
/// [`subscribe`](Session::subscribe) to be told about every change.
#[derive(Clone, Debug)]
pub struct Session {
    state: Arc<watch::Sender<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            state: Arc::new(state),
        }
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn set_fetch_result(&self, result: FetchResult) {
        self.state
            .send_modify(|state| state.fetch_result = Some(result));
    }

    pub fn set_verification_result(&self, result: VerificationResult) {
        self.state
            .send_modify(|state| state.verification_result = Some(result));
    }

    pub fn clear_verification_result(&self) {
        self.state
            .send_if_modified(|state| state.verification_result.take().is_some());
    }
}
