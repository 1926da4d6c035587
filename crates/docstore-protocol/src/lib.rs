//! Wire protocol for the docstore transaction family.
//!
//! Three surfaces live here:
//! - the payload codec ([`DocPayload`]) — the bytes the handler decodes
//! - signed transaction and batch envelopes ([`Transaction`], [`Batch`])
//! - the REST gateway message types ([`SubmitAck`], [`StateResponse`], ...)

pub mod error;
pub mod messages;
pub mod payload;
pub mod transaction;

pub use error::ProtocolError;
pub use messages::{ErrorResponse, StateResponse, StatusResponse, SubmitAck, SubmitStatus};
pub use payload::{DocPayload, OP_STORE, PAYLOAD_DELIMITER};
pub use transaction::{random_nonce, Batch, BatchHeader, Transaction, TransactionHeader};
