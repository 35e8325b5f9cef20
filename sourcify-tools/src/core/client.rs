// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Requests to the verification server.

use std::{sync::Arc, time::Duration};

use reqwest::{
    multipart::{Form, Part},
    RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use typed_builder::TypedBuilder;

use crate::{
    core::{
        config::Config,
        contract::FetchResult,
        verification::{VerificationForm, VerificationResult},
    },
    utils::address::check_address,
    Error, Result,
};

/// Operations offered by a verification server.
///
/// A `no match` verification outcome is a successful response; callers branch on
/// [`VerificationResult::status`].
#[allow(async_fn_in_trait)]
pub trait VerificationService {
    /// Fetches the verified sources and metadata of the contract at `address` on `chain_id`.
    async fn fetch_by_address_and_network(
        &self,
        address: &str,
        chain_id: u64,
    ) -> Result<FetchResult>;

    /// Submits compiled artifacts for verification against a deployment.
    async fn submit_verification(&self, form: &VerificationForm) -> Result<VerificationResult>;
}

impl<T: VerificationService> VerificationService for Arc<T> {
    async fn fetch_by_address_and_network(
        &self,
        address: &str,
        chain_id: u64,
    ) -> Result<FetchResult> {
        (**self)
            .fetch_by_address_and_network(address, chain_id)
            .await
    }

    async fn submit_verification(&self, form: &VerificationForm) -> Result<VerificationResult> {
        (**self).submit_verification(form).await
    }
}

/// [`VerificationService`] talking to a server over HTTP.
///
/// Holds no state between calls beyond the connection pool.
#[derive(Clone, Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct HttpClient {
    #[builder(!default)]
    server_url: String,
    timeout: Option<Duration>,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn from_config(config: &Config) -> Self {
        Self::builder()
            .server_url(config.server_url.as_str())
            .timeout(config.request_timeout())
            .build()
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.server_url.trim_end_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };
        Ok(request.send().await?)
    }
}

impl VerificationService for HttpClient {
    async fn fetch_by_address_and_network(
        &self,
        address: &str,
        chain_id: u64,
    ) -> Result<FetchResult> {
        check_address(address)?;
        let url = self.endpoint(&format!("files/{chain_id}/{address}"));
        debug!(@grey, "GET {url}");
        let response = self.send(self.http.get(&url)).await?;
        decode(response).await
    }

    async fn submit_verification(&self, form: &VerificationForm) -> Result<VerificationResult> {
        let url = self.endpoint("verify");
        debug!(@grey,
            "POST {url} ({} file(s) for {} on chain {})",
            form.files.len(),
            form.address,
            form.chain
        );
        let response = self.send(self.http.post(&url).multipart(multipart(form))).await?;
        decode(response).await
    }
}

fn multipart(form: &VerificationForm) -> Form {
    form.files.iter().fold(
        Form::new()
            .text("address", form.address.clone())
            .text("chain", form.chain.clone()),
        |parts, file| {
            parts.part(
                "files",
                Part::text(file.content.clone()).file_name(file.name.clone()),
            )
        },
    )
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }
    let info = rejection_info(&body).unwrap_or_else(|| status.to_string());
    Err(Error::RemoteRejection {
        status: status.as_u16(),
        info,
    })
}

/// Extracts the human readable reason from an error body.
fn rejection_info(body: &[u8]) -> Option<String> {
    let body: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["info", "error", "message"]
        .into_iter()
        .find_map(|key| body.get(key).and_then(serde_json::Value::as_str))
        .map(ToOwned::to_owned)
}
