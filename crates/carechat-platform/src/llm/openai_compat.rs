//! OpenAI-compatible completion adapter.
//!
//! Works with any provider exposing the OpenAI chat completions API.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use std::future::Future;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use carechat_core::completion::{read_response, CompletionRequest};
use carechat_core::ports::CompletionPort;
use carechat_types::{config::CompletionConfig, RemoteError, TransportError};

/// Client for one OpenAI-style `/chat/completions` endpoint.
/// Every call is a single system + user exchange; there are no retries.
pub struct OpenAiCompatClient {
    config: CompletionConfig,
}

impl OpenAiCompatClient {
    pub fn new(config: CompletionConfig) -> Self {
        if config.api_key.is_empty() {
            log::warn!("No API key configured; the endpoint will reject requests");
        }
        Self { config }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    async fn post(&self, body: &CompletionRequest) -> Result<String, RemoteError> {
        let response = Request::post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(body)
            .map_err(|e| TransportError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let text = response.text().await.map_err(|e| e.to_string());
        read_response(response.ok(), response.status(), text)
    }
}

#[async_trait(?Send)]
impl CompletionPort for OpenAiCompatClient {
    async fn complete(&self, user_text: &str) -> Result<String, RemoteError> {
        let body = CompletionRequest::single_turn(&self.config, user_text);
        match self.config.timeout_ms {
            Some(after_ms) => with_timeout(self.post(&body), after_ms).await,
            None => self.post(&body).await,
        }
    }
}

/// Race `fut` against a browser timer. The losing request is dropped,
/// which aborts nothing on the wire but discards its result.
pub async fn with_timeout<F>(fut: F, after_ms: u64) -> Result<String, RemoteError>
where
    F: Future<Output = Result<String, RemoteError>>,
{
    let timer = TimeoutFuture::new(u32::try_from(after_ms).unwrap_or(u32::MAX));
    futures::pin_mut!(fut);
    futures::pin_mut!(timer);

    match select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::warn!("Completion request timed out after {}ms", after_ms);
            Err(TransportError::Timeout { after_ms }.into())
        }
    }
}
