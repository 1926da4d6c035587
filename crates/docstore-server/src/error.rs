use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use docstore_processor::ApplyError;
use docstore_protocol::{ErrorResponse, ProtocolError};

/// Errors produced by the gateway.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Signature or wire-format verification failed at ingress.
    #[error("batch verification failed: {0}")]
    Verification(#[from] ProtocolError),

    /// A transaction named a family this gateway does not serve.
    #[error("unknown transaction family: {name} {version}")]
    UnknownFamily { name: String, version: String },

    /// A declared address lies outside the family namespace.
    #[error("address {address} is outside namespace {namespace}")]
    NamespaceMismatch { address: String, namespace: String },

    /// The handler rejected the transaction.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Malformed state address in a query.
    #[error("bad state address: {0}")]
    BadAddress(String),

    /// No value recorded at the queried address.
    #[error("no data at address {0}")]
    NotFound(String),

    /// Ledger-side fault while applying.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for gateway results.
pub type ServerResult<T> = Result<T, ServerError>;

impl From<ApplyError> for ServerError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::InvalidTransaction(msg) => Self::InvalidTransaction(msg),
            ApplyError::InternalError(msg) => Self::Internal(msg),
        }
    }
}

impl ServerError {
    /// The HTTP status this error maps to. Shared by the REST router and
    /// the loopback gateway so both surfaces agree.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Verification(_)
            | Self::UnknownFamily { .. }
            | Self::NamespaceMismatch { .. }
            | Self::InvalidTransaction(_)
            | Self::BadAddress(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
