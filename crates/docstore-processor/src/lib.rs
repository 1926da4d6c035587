//! Ledger-side transaction handler for the `document_store` family.
//!
//! The handler validates a submitted transaction and applies its effect to
//! ledger state through the [`StateContext`] capability. It carries no
//! state of its own between invocations — every `apply` call is
//! independent, so concurrent calls for unrelated addresses are safe, and
//! serialization of writes to the same address is the state store's
//! responsibility.

pub mod context;
pub mod error;
pub mod handler;
pub mod memory;

pub use context::StateContext;
pub use error::{ApplyError, ContextError};
pub use handler::DocumentStoreHandler;
pub use memory::InMemoryStateStore;
