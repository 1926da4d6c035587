use thiserror::Error;

/// Outcome of a failed `apply` call, surfaced to the submitter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    /// The transaction is at fault: malformed payload, unknown operation.
    /// The transaction is discarded with no state change; a corrected
    /// transaction must be resubmitted.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// The ledger side is at fault: the state-access capability did not
    /// confirm the write. Fatal for this transaction; not retried here.
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Errors raised by a state-access capability implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("state access failure: {0}")]
    Access(String),
}

impl From<ContextError> for ApplyError {
    fn from(err: ContextError) -> Self {
        ApplyError::InternalError(err.to_string())
    }
}
