// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Test doubles for the service and host seams.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    Notify,
};

use crate::{
    core::{
        client::VerificationService,
        compilation::{ArtifactFile, CompilationArtifacts},
        contract::{FetchResult, FetchStatus, Source},
        host::{CompilationFinished, Host},
        verification::{VerificationForm, VerificationResult, VerificationStatus},
    },
    Error, Result,
};

pub const VALID_ADDRESS: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

pub fn sample_fetch_result() -> FetchResult {
    FetchResult {
        verification_status: FetchStatus::Perfect,
        metadata: serde_json::json!({ "language": "Solidity" }),
        sources: vec![Source {
            path: "contracts/Token.sol".to_owned(),
            name: "Token.sol".to_owned(),
            content: "contract Token {}".to_owned(),
        }],
    }
}

pub fn sample_artifacts() -> CompilationArtifacts {
    CompilationArtifacts {
        contract_name: "Token".to_owned(),
        files: vec![ArtifactFile::new("metadata.json", "{}")],
    }
}

pub fn perfect_result(storage_timestamp: Option<&str>) -> VerificationResult {
    VerificationResult {
        address: VALID_ADDRESS.to_owned(),
        status: VerificationStatus::Perfect,
        message: String::new(),
        url: Some(format!(
            "https://contractrepo.verify.shardlabs.io/contracts/full_match/1/{VALID_ADDRESS}"
        )),
        storage_timestamp: storage_timestamp.map(ToOwned::to_owned),
    }
}

/// Verification service answering from queued responses.
#[derive(Default)]
pub struct MockService {
    fetch_responses: Mutex<VecDeque<Result<FetchResult>>>,
    verify_responses: Mutex<VecDeque<Result<VerificationResult>>>,
    fetched: Mutex<Vec<(String, u64)>>,
    verified: Mutex<Vec<VerificationForm>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockService {
    pub fn push_fetch(&self, response: Result<FetchResult>) {
        self.fetch_responses.lock().unwrap().push_back(response);
    }

    pub fn push_verification(&self, response: Result<VerificationResult>) {
        self.verify_responses.lock().unwrap().push_back(response);
    }

    /// Holds every subsequent response until the returned gate is notified.
    pub fn gate(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub fn fetched(&self) -> Vec<(String, u64)> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn verified(&self) -> Vec<VerificationForm> {
        self.verified.lock().unwrap().clone()
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

impl VerificationService for MockService {
    async fn fetch_by_address_and_network(
        &self,
        address: &str,
        chain_id: u64,
    ) -> Result<FetchResult> {
        self.fetched
            .lock()
            .unwrap()
            .push((address.to_owned(), chain_id));
        self.wait_for_gate().await;
        let response = self.fetch_responses.lock().unwrap().pop_front();
        response.unwrap_or_else(|| Err(Error::host("no fetch response queued")))
    }

    async fn submit_verification(&self, form: &VerificationForm) -> Result<VerificationResult> {
        self.verified.lock().unwrap().push(form.clone());
        self.wait_for_gate().await;
        let response = self.verify_responses.lock().unwrap().pop_front();
        response.unwrap_or_else(|| Err(Error::host("no verification response queued")))
    }
}

/// Host with a scriptable compiler and an in-memory file manager.
#[derive(Default)]
pub struct MockHost {
    listeners: Mutex<Vec<UnboundedSender<CompilationFinished>>>,
    subscriptions: AtomicUsize,
    artifacts: Mutex<Option<CompilationArtifacts>>,
    queried: Notify,
    saved: Mutex<Vec<String>>,
    fail_saves: Mutex<bool>,
    focus_count: AtomicUsize,
}

impl MockHost {
    pub fn set_artifacts(&self, artifacts: CompilationArtifacts) {
        *self.artifacts.lock().unwrap() = Some(artifacts);
    }

    /// Makes subsequent artifact queries fail.
    pub fn fail_artifacts(&self) {
        *self.artifacts.lock().unwrap() = None;
    }

    pub fn fail_saves(&self) {
        *self.fail_saves.lock().unwrap() = true;
    }

    /// Sends a compilation-finished event to every live subscriber, returning how many got it.
    pub fn emit(&self) -> usize {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.retain(|listener| listener.send(CompilationFinished::default()).is_ok());
        listeners.len()
    }

    /// Total number of subscriptions ever made.
    pub fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    pub fn live_subscriptions(&self) -> usize {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.retain(|listener| !listener.is_closed());
        listeners.len()
    }

    /// Resolves once the artifacts have been queried.
    pub async fn queried(&self) {
        self.queried.notified().await;
    }

    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.load(Ordering::SeqCst)
    }
}

impl Host for MockHost {
    fn subscribe_compilation_finished(&self) -> UnboundedReceiver<CompilationFinished> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.lock().unwrap().push(tx);
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        rx
    }

    async fn fetch_last_compilation(&self) -> Result<CompilationArtifacts> {
        let artifacts = self.artifacts.lock().unwrap().clone();
        self.queried.notify_one();
        artifacts.ok_or_else(|| Error::host("no compilation available"))
    }

    async fn save_fetched(&self, _result: &FetchResult, address: &str) -> Result<()> {
        if *self.fail_saves.lock().unwrap() {
            return Err(Error::host("file system is read-only"));
        }
        self.saved.lock().unwrap().push(address.to_owned());
        Ok(())
    }

    async fn focus_file_manager(&self) -> Result<()> {
        self.focus_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
