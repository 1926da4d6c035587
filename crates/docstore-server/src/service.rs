use docstore_processor::{DocumentStoreHandler, InMemoryStateStore};
use docstore_protocol::{Batch, StatusResponse, SubmitAck, SubmitStatus, Transaction};
use docstore_types::{FamilyConfig, StateAddress};

use crate::error::{ServerError, ServerResult};

/// The gateway's execution core, shared by the REST surface and the
/// loopback gateway.
///
/// Performs the stages the transaction handler takes on trust:
/// batch and transaction signature verification, then family and namespace
/// routing, before handing each transaction to the handler with the shared
/// state store as its state-access capability.
pub struct GatewayService {
    family: FamilyConfig,
    handler: DocumentStoreHandler,
    state: InMemoryStateStore,
}

impl GatewayService {
    /// Service for the standard `document_store` family over a fresh
    /// in-memory state store.
    pub fn new() -> Self {
        let family = FamilyConfig::document_store();
        Self {
            handler: DocumentStoreHandler::with_family(family.clone()),
            state: InMemoryStateStore::new(),
            family,
        }
    }

    /// Verify and apply a submitted batch.
    ///
    /// Transactions are applied in batch order. The first failure aborts
    /// processing and is surfaced to the submitter.
    pub fn submit(&self, batch: &Batch) -> ServerResult<SubmitAck> {
        batch.verify()?;
        for transaction in &batch.transactions {
            self.route(transaction)?;
            self.handler.apply(transaction, &self.state)?;
        }
        tracing::info!(batch_id = %batch.id(), transactions = batch.transactions.len(), "batch applied");
        Ok(SubmitAck {
            batch_id: batch.id(),
            status: SubmitStatus::Submitted,
        })
    }

    /// The bytes recorded at `address`, if any.
    pub fn state_bytes(&self, address: &StateAddress) -> Option<Vec<u8>> {
        self.state.get(address)
    }

    /// Gateway liveness and family metadata.
    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            family_name: self.family.name.clone(),
            family_version: self.family.version.clone(),
            namespace: self.family.namespace_prefix(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Check that a verified transaction routes to this handler: known
    /// family name and version, and every declared address inside the
    /// family namespace.
    fn route(&self, transaction: &Transaction) -> ServerResult<()> {
        let header = &transaction.header;
        if header.family_name != self.family.name
            || !self
                .handler
                .family_versions()
                .contains(&header.family_version)
        {
            return Err(ServerError::UnknownFamily {
                name: header.family_name.clone(),
                version: header.family_version.clone(),
            });
        }
        let namespace = self.family.namespace_prefix();
        for address in header.inputs.iter().chain(header.outputs.iter()) {
            if address.prefix() != namespace {
                return Err(ServerError::NamespaceMismatch {
                    address: address.to_string(),
                    namespace,
                });
            }
        }
        Ok(())
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GatewayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayService")
            .field("family", &self.family.name)
            .field("state", &self.state)
            .finish()
    }
}
