use std::sync::Arc;

use docstore_client::{GatewayError, LedgerGateway};
use docstore_protocol::{Batch, SubmitAck};
use docstore_types::StateAddress;

use crate::service::GatewayService;

/// In-process implementation of the client's `LedgerGateway`.
///
/// Runs the same verification and apply pipeline as the REST surface,
/// without HTTP. Used by the CLI's embedded mode and by integration tests;
/// rejection statuses match what the REST surface would return.
#[derive(Clone, Debug)]
pub struct LoopbackGateway {
    service: Arc<GatewayService>,
}

impl LoopbackGateway {
    /// Gateway over an existing service (e.g. one also served over HTTP).
    pub fn new(service: Arc<GatewayService>) -> Self {
        Self { service }
    }

    /// Gateway over a fresh, private in-memory service.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(GatewayService::new()))
    }

    /// The underlying service.
    pub fn service(&self) -> Arc<GatewayService> {
        self.service.clone()
    }
}

impl LedgerGateway for LoopbackGateway {
    fn submit_batch(&self, batch: &Batch) -> Result<SubmitAck, GatewayError> {
        self.service.submit(batch).map_err(|err| GatewayError::Rejected {
            status: err.status().as_u16(),
            message: err.to_string(),
        })
    }

    fn fetch_state(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, GatewayError> {
        Ok(self.service.state_bytes(address))
    }
}
