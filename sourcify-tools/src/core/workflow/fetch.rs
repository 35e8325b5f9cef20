// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Looking up an already verified contract.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Alert, Submission};
use crate::{
    core::{
        chain::{Chain, ChainRegistry},
        client::VerificationService,
        contract::FetchResult,
        host::Host,
        session::{Session, SessionState},
    },
    utils::address::check_address,
    Error, Result,
};

pub const FETCHED_HEADING: &str = "Contract successfully fetched!";
pub const PARTIAL_MATCH_HEADING: &str = "This is a partially matched contract!";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub chain: Option<Chain>,
    /// Always stored trimmed.
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchAction {
    SetLoading(bool),
    /// Setting an error, or clearing one, also ends loading.
    SetError(Option<String>),
    SetAddress(String),
    SetChain(Chain),
}

impl FetchState {
    pub fn new(chain: Option<Chain>) -> Self {
        Self {
            chain,
            ..Default::default()
        }
    }

    pub fn reduce(self, action: FetchAction) -> Self {
        match action {
            FetchAction::SetLoading(is_loading) => Self { is_loading, ..self },
            FetchAction::SetError(error) => Self {
                is_loading: false,
                error,
                ..self
            },
            FetchAction::SetAddress(address) => Self {
                address: address.trim().to_owned(),
                ..self
            },
            FetchAction::SetChain(chain) => Self {
                chain: Some(chain),
                ..self
            },
        }
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.address.is_empty() && !self.is_loading
    }

    /// Banners to show for this state.
    ///
    /// Any fetched contract is reported as fetched; partial matches additionally get a warning.
    pub fn alerts(&self, session: &SessionState) -> Vec<Alert> {
        if let Some(error) = &self.error {
            return vec![Alert::danger(error.as_str())];
        }
        let Some(result) = &session.fetch_result else {
            return vec![];
        };
        let mut alerts = Vec::with_capacity(2);
        if result.verification_status.is_partial() {
            alerts.push(Alert::warning(PARTIAL_MATCH_HEADING));
        }
        alerts.push(Alert::success(FETCHED_HEADING));
        alerts
    }
}

/// Drives the "look up a verified contract" form.
pub struct FetchWorkflow<S, H> {
    service: S,
    host: Arc<H>,
    session: Session,
    state: watch::Sender<FetchState>,
}

impl<S: VerificationService, H: Host> FetchWorkflow<S, H> {
    /// Creates a workflow with the registry's first chain selected.
    pub fn new(service: S, host: Arc<H>, session: Session, chains: &ChainRegistry) -> Self {
        let (state, _) = watch::channel(FetchState::new(chains.default_chain().cloned()));
        Self {
            service,
            host,
            session,
            state,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.state.borrow().alerts(&self.session.current())
    }

    pub fn dispatch(&self, action: FetchAction) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).reduce(action));
    }

    pub fn set_address(&self, address: impl Into<String>) {
        self.dispatch(FetchAction::SetAddress(address.into()));
    }

    pub fn set_chain(&self, chain: Chain) {
        self.dispatch(FetchAction::SetChain(chain));
    }

    /// Fetches the contract for the current address and chain.
    ///
    /// Every call performs a full request; nothing is cached. Returns
    /// [`Submission::InFlight`] without side effects while a previous submission is running.
    pub async fn submit(&self) -> Submission {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            *state = std::mem::take(state)
                .reduce(FetchAction::SetError(None))
                .reduce(FetchAction::SetLoading(true));
            true
        });
        if !started {
            warn!(@yellow, "fetch already in progress");
            return Submission::InFlight;
        }

        let FetchState { address, chain, .. } = self.state();
        match self.fetch(&address, chain).await {
            Ok(result) => {
                info!(@mint, "fetched {} source file(s) for {address}", result.sources.len());
                self.session.set_fetch_result(result);
                self.dispatch(FetchAction::SetLoading(false));
                self.dispatch(FetchAction::SetError(None));
            }
            Err(err) => {
                warn!(@yellow, "fetch failed: {err}");
                self.dispatch(FetchAction::SetError(Some(err.to_string())));
                self.dispatch(FetchAction::SetLoading(false));
            }
        }
        Submission::Completed
    }

    async fn fetch(&self, address: &str, chain: Option<Chain>) -> Result<FetchResult> {
        check_address(address)?;
        let chain = chain.ok_or(Error::NoChainSelected)?;
        let result = self
            .service
            .fetch_by_address_and_network(address, chain.id)
            .await?;
        self.host.save_fetched(&result, address).await?;
        self.host.focus_file_manager().await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{contract::FetchStatus, workflow::AlertKind},
        utils::testing::{sample_fetch_result, MockHost, MockService, VALID_ADDRESS},
    };
    use pretty_assertions::assert_eq;

    fn workflow(
        service: &Arc<MockService>,
        host: &Arc<MockHost>,
        session: &Session,
    ) -> FetchWorkflow<Arc<MockService>, MockHost> {
        FetchWorkflow::new(
            Arc::clone(service),
            Arc::clone(host),
            session.clone(),
            &ChainRegistry::builtin(),
        )
    }

    #[test]
    fn reducer_trims_addresses_and_clears_loading_on_error() {
        let state = FetchState::default()
            .reduce(FetchAction::SetAddress("  0xabc \n".to_owned()))
            .reduce(FetchAction::SetLoading(true))
            .reduce(FetchAction::SetError(Some("boom".to_owned())));
        assert_eq!(state.address, "0xabc");
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn submit_needs_an_address() {
        let state = FetchState::default();
        assert!(!state.can_submit());
        let state = state.reduce(FetchAction::SetAddress(VALID_ADDRESS.to_owned()));
        assert!(state.can_submit());
        assert!(!state.reduce(FetchAction::SetLoading(true)).can_submit());
    }

    #[tokio::test]
    async fn malformed_address_never_reaches_the_service() {
        let service = Arc::new(MockService::default());
        let host = Arc::new(MockHost::default());
        let session = Session::new();
        let fetch = workflow(&service, &host, &session);

        for address in ["0x1234", "hello", "0xZZaeb6053f3e94c9b9a09f33669435e7ef1beaed"] {
            fetch.set_address(address);
            assert_eq!(fetch.submit().await, Submission::Completed);
            let state = fetch.state();
            assert_eq!(state.error, Some(format!("Invalid address: {address}")));
            assert!(!state.is_loading);
        }
        assert_eq!(service.fetch_calls(), 0);
        assert_eq!(session.current().fetch_result, None);
    }

    #[tokio::test]
    async fn partial_match_scenario() {
        let service = Arc::new(MockService::default());
        let mut result = sample_fetch_result();
        result.verification_status = FetchStatus::Partial;
        service.push_fetch(Ok(result.clone()));
        let host = Arc::new(MockHost::default());
        let session = Session::new();
        let fetch = workflow(&service, &host, &session);

        fetch.set_address(format!(" {VALID_ADDRESS} "));
        fetch.submit().await;

        let state = fetch.state();
        assert_eq!(state.error, None);
        assert!(!state.is_loading);
        assert_eq!(service.fetched(), vec![(VALID_ADDRESS.to_owned(), 1)]);
        assert_eq!(session.current().fetch_result, Some(result));
        assert_eq!(host.saved(), vec![VALID_ADDRESS.to_owned()]);
        assert_eq!(host.focus_count(), 1);

        let kinds: Vec<AlertKind> = fetch.alerts().into_iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::Warning, AlertKind::Success]);
    }

    #[tokio::test]
    async fn failure_keeps_previous_result() {
        let service = Arc::new(MockService::default());
        service.push_fetch(Err(Error::RemoteRejection {
            status: 404,
            info: "Files have not been found!".to_owned(),
        }));
        let host = Arc::new(MockHost::default());
        let session = Session::new();
        session.set_fetch_result(sample_fetch_result());
        let fetch = workflow(&service, &host, &session);

        fetch.set_address(VALID_ADDRESS);
        fetch.submit().await;

        let state = fetch.state();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Files have not been found!"));
        assert_eq!(session.current().fetch_result, Some(sample_fetch_result()));
        assert!(host.saved().is_empty());
        assert_eq!(fetch.alerts(), vec![Alert::danger("Files have not been found!")]);
    }

    #[tokio::test]
    async fn host_failure_is_reported() {
        let service = Arc::new(MockService::default());
        service.push_fetch(Ok(sample_fetch_result()));
        let host = Arc::new(MockHost::default());
        host.fail_saves();
        let session = Session::new();
        let fetch = workflow(&service, &host, &session);

        fetch.set_address(VALID_ADDRESS);
        fetch.submit().await;

        assert_eq!(fetch.state().error.as_deref(), Some("file system is read-only"));
        assert_eq!(session.current().fetch_result, None);
    }

    #[tokio::test]
    async fn identical_submissions_each_hit_the_service() {
        let service = Arc::new(MockService::default());
        service.push_fetch(Ok(sample_fetch_result()));
        service.push_fetch(Ok(sample_fetch_result()));
        let host = Arc::new(MockHost::default());
        let session = Session::new();
        let fetch = workflow(&service, &host, &session);

        fetch.set_address(VALID_ADDRESS);
        fetch.submit().await;
        fetch.submit().await;
        assert_eq!(service.fetch_calls(), 2);
        assert_eq!(fetch.state().error, None);
    }

    #[tokio::test]
    async fn new_submission_clears_previous_error() {
        let service = Arc::new(MockService::default());
        service.push_fetch(Ok(sample_fetch_result()));
        let host = Arc::new(MockHost::default());
        let session = Session::new();
        let fetch = workflow(&service, &host, &session);

        fetch.set_address("0x1");
        fetch.submit().await;
        assert!(fetch.state().error.is_some());

        fetch.set_address(VALID_ADDRESS);
        fetch.submit().await;
        assert_eq!(fetch.state().error, None);
    }

    #[tokio::test]
    async fn uses_selected_chain() {
        let service = Arc::new(MockService::default());
        service.push_fetch(Ok(sample_fetch_result()));
        let host = Arc::new(MockHost::default());
        let fetch = workflow(&service, &host, &Session::new());

        fetch.set_chain(Chain::new(42, "kovan"));
        fetch.set_address(VALID_ADDRESS);
        fetch.submit().await;
        assert_eq!(service.fetched(), vec![(VALID_ADDRESS.to_owned(), 42)]);
    }

    #[tokio::test]
    async fn empty_registry_is_a_validation_error() {
        let service = Arc::new(MockService::default());
        let host = Arc::new(MockHost::default());
        let fetch = FetchWorkflow::new(
            Arc::clone(&service),
            host,
            Session::new(),
            &ChainRegistry::new([]).unwrap(),
        );

        fetch.set_address(VALID_ADDRESS);
        fetch.submit().await;
        assert_eq!(fetch.state().error.as_deref(), Some("No chain selected"));
        assert_eq!(service.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn rejects_overlapping_submissions() {
        let service = Arc::new(MockService::default());
        let gate = service.gate();
        service.push_fetch(Ok(sample_fetch_result()));
        let host = Arc::new(MockHost::default());
        let fetch = workflow(&service, &host, &Session::new());
        fetch.set_address(VALID_ADDRESS);

        let mut rx = fetch.subscribe();
        let (first, second) = tokio::join!(fetch.submit(), async {
            rx.wait_for(|state| state.is_loading).await.unwrap();
            let second = fetch.submit().await;
            gate.notify_one();
            second
        });
        assert_eq!(first, Submission::Completed);
        assert_eq!(second, Submission::InFlight);
        assert_eq!(service.fetch_calls(), 1);
        assert!(!fetch.state().is_loading);
    }

    #[tokio::test]
    async fn error_is_gone_while_the_next_request_runs() {
        let service = Arc::new(MockService::default());
        let host = Arc::new(MockHost::default());
        let fetch = workflow(&service, &host, &Session::new());
        fetch.set_address("0x1");
        fetch.submit().await;
        assert!(fetch.state().error.is_some());

        let gate = service.gate();
        service.push_fetch(Ok(sample_fetch_result()));
        fetch.set_address(VALID_ADDRESS);
        let mut rx = fetch.subscribe();
        let (_, in_flight) = tokio::join!(fetch.submit(), async {
            rx.wait_for(|state| state.is_loading).await.unwrap();
            let in_flight = (fetch.state(), fetch.alerts());
            gate.notify_one();
            in_flight
        });
        let (state, alerts) = in_flight;
        assert_eq!(state.error, None);
        assert!(alerts.is_empty());
        assert_eq!(fetch.state().error, None);
    }
}
