// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Submitting freshly compiled artifacts for verification.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Alert, Submission};
use crate::{
    core::{
        chain::{Chain, ChainRegistry},
        client::VerificationService,
        compilation::{ArtifactFile, CompilationBridge},
        config::DEFAULT_REPOSITORY_URL,
        host::Host,
        session::{Session, SessionState},
        verification::{VerificationForm, VerificationResult},
    },
    utils::address::is_address,
    Error, Result,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifyState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub chain: Option<Chain>,
    /// Always stored trimmed.
    pub address: String,
    /// Set from the latest compilation only.
    pub files: Vec<ArtifactFile>,
    pub contract_name: String,
    /// Latched once the compiler subscription is armed.
    pub is_listening: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyAction {
    SetLoading(bool),
    /// Setting an error, or clearing one, also ends loading.
    SetError(Option<String>),
    /// Drops the error without touching loading.
    ClearError,
    SetAddress(String),
    SetChain(Chain),
    SetFiles(Vec<ArtifactFile>),
    /// Can only raise the latch, never lower it.
    SetListening(bool),
    SetContractName(String),
}

impl VerifyState {
    pub fn new(chain: Option<Chain>) -> Self {
        Self {
            chain,
            ..Default::default()
        }
    }

    pub fn reduce(self, action: VerifyAction) -> Self {
        match action {
            VerifyAction::SetLoading(is_loading) => Self { is_loading, ..self },
            VerifyAction::SetError(error) => Self {
                is_loading: false,
                error,
                ..self
            },
            VerifyAction::ClearError => Self { error: None, ..self },
            VerifyAction::SetAddress(address) => Self {
                address: address.trim().to_owned(),
                ..self
            },
            VerifyAction::SetChain(chain) => Self {
                chain: Some(chain),
                ..self
            },
            VerifyAction::SetFiles(files) => Self { files, ..self },
            VerifyAction::SetListening(listening) => Self {
                is_listening: self.is_listening || listening,
                ..self
            },
            VerifyAction::SetContractName(contract_name) => Self {
                contract_name,
                ..self
            },
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.address.is_empty() && !self.is_loading
    }

    pub fn alerts(&self, session: &SessionState) -> Vec<Alert> {
        if let Some(error) = &self.error {
            return vec![Alert::danger(error.as_str())];
        }
        session
            .verification_result
            .iter()
            .map(|result| Alert::success(result.success_heading()).with_link(result.url.clone()))
            .collect()
    }
}

/// Drives the "verify compiled contract" form.
///
/// Construction arms a [`CompilationBridge`] so the latest build output flows into the state.
/// Dropping the workflow ends that subscription.
pub struct VerifyWorkflow<S> {
    service: S,
    session: Session,
    state: Arc<watch::Sender<VerifyState>>,
    bridge: CompilationBridge,
    repository_url: String,
}

impl<S: VerificationService> VerifyWorkflow<S> {
    /// Creates a workflow with the registry's first chain selected and subscribes to `host`'s
    /// compiler events. Must be called from within a tokio runtime.
    pub fn new<H: Host>(
        service: S,
        host: Arc<H>,
        session: Session,
        chains: &ChainRegistry,
    ) -> Result<Self> {
        let (state, _) = watch::channel(VerifyState::new(chains.default_chain().cloned()));
        let state = Arc::new(state);
        let mut bridge = CompilationBridge::new();
        if !state.borrow().is_listening {
            bridge.arm(host, Arc::clone(&state))?;
        }
        Ok(Self {
            service,
            session,
            state,
            bridge,
            repository_url: DEFAULT_REPOSITORY_URL.to_owned(),
        })
    }

    /// Sets the repository users are pointed at to browse verified contracts.
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = url.into();
        self
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn is_listening(&self) -> bool {
        self.bridge.is_armed()
    }

    pub fn state(&self) -> VerifyState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<VerifyState> {
        self.state.subscribe()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.state.borrow().alerts(&self.session.current())
    }

    pub fn dispatch(&self, action: VerifyAction) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).reduce(action));
    }

    pub fn set_address(&self, address: impl Into<String>) {
        self.dispatch(VerifyAction::SetAddress(address.into()));
    }

    pub fn set_chain(&self, chain: Chain) {
        self.dispatch(VerifyAction::SetChain(chain));
    }

    /// Submits the latest compilation artifacts for the current address and chain.
    ///
    /// Always starts from a clean slate: the previous error and the session's verification result
    /// are cleared first. Returns [`Submission::InFlight`] without side effects while a previous
    /// submission is running.
    pub async fn submit(&self) -> Submission {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            *state = std::mem::take(state)
                .reduce(VerifyAction::SetError(None))
                .reduce(VerifyAction::SetLoading(true));
            true
        });
        if !started {
            warn!(@yellow, "verification already in progress");
            return Submission::InFlight;
        }
        self.session.clear_verification_result();

        let state = self.state();
        match self.verify(state).await {
            Ok(result) => {
                info!(@mint, "{}", result.success_heading());
                self.session.set_verification_result(result);
            }
            Err(err) => {
                warn!(@yellow, "verification failed: {err}");
                self.dispatch(VerifyAction::SetError(Some(error_message(&err))));
            }
        }
        self.dispatch(VerifyAction::SetLoading(false));
        Submission::Completed
    }

    async fn verify(&self, state: VerifyState) -> Result<VerificationResult> {
        if !is_address(&state.address) {
            return Err(Error::InvalidAddress(state.address));
        }
        let chain = state.chain.ok_or(Error::NoChainSelected)?;
        if state.files.is_empty() {
            return Err(Error::NoFilesToVerify);
        }
        let form = VerificationForm::new(state.address, chain.id, state.files);
        self.service.submit_verification(&form).await?.check()
    }
}

/// Text shown for a failed verification.
fn error_message(err: &Error) -> String {
    match err {
        Error::InvalidAddress(_) => "Invalid address".to_owned(),
        err => err.to_string(),
    }
}
