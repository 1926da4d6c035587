//! Client-side transaction construction and submission for the
//! `document_store` family.
//!
//! [`DocumentStoreClient`] builds and signs transactions, wraps them in
//! batches, and submits them through a [`LedgerGateway`]. Retrieval never
//! touches the handler: the client derives the same address the handler
//! would and queries the ledger's state endpoint directly.
//!
//! Submission is fire-and-forget by design: a returned acknowledgment
//! means the batch was accepted at the ingress boundary, not that the
//! state change is visible. Callers needing visibility poll `retrieve`.

pub mod client;
pub mod error;
pub mod gateway;

pub use client::DocumentStoreClient;
pub use error::ClientError;
pub use gateway::{GatewayError, HttpGateway, LedgerGateway};
