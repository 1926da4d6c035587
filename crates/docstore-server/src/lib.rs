//! REST gateway for the `document_store` family.
//!
//! Stands in for the ledger's ingress and state-query surface: it verifies
//! batch and transaction signatures (the stage the handler trusts), checks
//! namespace routing, runs the transaction handler against the shared
//! state store, and serves state reads.
//!
//! [`LoopbackGateway`] exposes the same pipeline in-process for embedding
//! and tests, implementing the client's `LedgerGateway` trait without HTTP.

pub mod config;
pub mod error;
pub mod loopback;
pub mod router;
pub mod server;
pub mod service;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use loopback::LoopbackGateway;
pub use server::GatewayServer;
pub use service::GatewayService;
