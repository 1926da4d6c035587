use thiserror::Error;

use docstore_protocol::{Batch, ErrorResponse, StateResponse, SubmitAck};
use docstore_types::StateAddress;

/// Transport boundary to the ledger's REST gateway.
///
/// Both operations are single synchronous request/response round trips.
/// No retry, backoff, or timeout policy lives behind this trait; those are
/// properties of the concrete transport and are configured there.
pub trait LedgerGateway: Send + Sync {
    /// Submit a signed batch to the ingress endpoint.
    ///
    /// A returned ack means the batch was accepted for processing, not
    /// that its effects are visible.
    fn submit_batch(&self, batch: &Batch) -> Result<SubmitAck, GatewayError>;

    /// Query the state endpoint for a single address.
    ///
    /// Returns `Ok(None)` when nothing is recorded there; absence is not
    /// an error.
    fn fetch_state(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, GatewayError>;
}

/// Errors raised by a gateway implementation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The transport itself failed (connection, timeout, TLS, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The gateway answered with a rejection.
    #[error("gateway rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The gateway answered with a body this client cannot interpret.
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),
}

/// Blocking HTTP implementation of [`LedgerGateway`].
pub struct HttpGateway {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpGateway {
    /// Gateway rooted at `base_url` (e.g. `http://localhost:8008`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Gateway with a caller-configured HTTP client (timeouts, TLS, proxy).
    pub fn with_client(base_url: impl Into<String>, http: reqwest::blocking::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn rejection(status: reqwest::StatusCode, body: &str) -> GatewayError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.to_string());
        GatewayError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

impl LedgerGateway for HttpGateway {
    fn submit_batch(&self, batch: &Batch) -> Result<SubmitAck, GatewayError> {
        let url = format!("{}/batches", self.base_url);
        tracing::debug!(%url, batch_id = %batch.id(), "submitting batch");
        let response = self
            .http
            .post(&url)
            .json(batch)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(Self::rejection(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    fn fetch_state(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, GatewayError> {
        let url = format!("{}/state/{}", self.base_url, address);
        tracing::debug!(%url, "querying state");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response
            .text()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(Self::rejection(status, &body));
        }
        let state: StateResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let data = state
            .decode_data()
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Ok(Some(data))
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .finish()
    }
}
