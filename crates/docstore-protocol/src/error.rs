use thiserror::Error;

/// Errors produced while encoding, decoding, or verifying wire data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The payload does not split into exactly two delimited fields.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The operation tag is outside the closed set this family defines.
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid {scope} signature from {signer}")]
    InvalidSignature { scope: &'static str, signer: String },

    #[error("payload digest does not match the header")]
    PayloadDigestMismatch,

    #[error("batch transaction ids do not match its transactions")]
    TransactionIdMismatch,
}
