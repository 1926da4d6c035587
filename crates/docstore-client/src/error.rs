use thiserror::Error;

use docstore_protocol::ProtocolError;

use crate::gateway::GatewayError;

/// Errors surfaced by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Building or encoding the transaction failed before submission.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The transport or the gateway failed; propagated unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
