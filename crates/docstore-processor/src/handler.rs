use docstore_protocol::{DocPayload, ProtocolError, Transaction};
use docstore_types::{derive_address, FamilyConfig};

use crate::context::StateContext;
use crate::error::ApplyError;

/// Transaction handler for the `document_store` family.
///
/// Each identity owns exactly one state address, derived from its public
/// key; a `store` overwrites whatever was recorded there. The handler
/// never checks permissions beyond that derivation: an identity cannot
/// name another identity's address as its store target, so ownership is
/// structural.
pub struct DocumentStoreHandler {
    family: FamilyConfig,
}

impl DocumentStoreHandler {
    /// Handler for the standard `document_store` family.
    pub fn new() -> Self {
        Self::with_family(FamilyConfig::document_store())
    }

    /// Handler for an explicit family configuration.
    pub fn with_family(family: FamilyConfig) -> Self {
        Self { family }
    }

    /// The family name this handler serves.
    pub fn family_name(&self) -> &str {
        &self.family.name
    }

    /// The family versions this handler accepts.
    pub fn family_versions(&self) -> Vec<String> {
        vec![self.family.version.clone()]
    }

    /// The namespaces this handler claims; the ledger routes transactions
    /// whose declared namespace list equals this.
    pub fn namespaces(&self) -> Vec<String> {
        vec![self.family.namespace_prefix()]
    }

    /// Validate `transaction` and apply its effect through `context`.
    ///
    /// The signer public key in the header is trusted: signature
    /// verification happened at the ingress stage and is not repeated
    /// here. Failure paths are side-effect free — nothing is written
    /// unless the payload decoded into a known operation.
    pub fn apply(
        &self,
        transaction: &Transaction,
        context: &dyn StateContext,
    ) -> Result<(), ApplyError> {
        let signer = &transaction.header.signer_public_key;
        let payload = DocPayload::from_wire_bytes(&transaction.payload).map_err(|err| {
            if let ProtocolError::UnknownOperation(op) = &err {
                tracing::warn!(operation = %op, %signer, "rejecting unknown operation");
            }
            ApplyError::InvalidTransaction(err.to_string())
        })?;

        tracing::info!(operation = payload.operation(), %signer, "applying transaction");

        match payload {
            DocPayload::Store { hash_value } => self.apply_store(signer, &hash_value, context),
        }
    }

    fn apply_store(
        &self,
        signer: &str,
        hash_value: &str,
        context: &dyn StateContext,
    ) -> Result<(), ApplyError> {
        let address = derive_address(&self.family.name, signer);
        tracing::debug!(%signer, %address, "storing document hash");

        let written = context.set_state(&[(address, hash_value.as_bytes().to_vec())])?;
        if written.is_empty() {
            return Err(ApplyError::InternalError(
                "state store did not confirm the write".into(),
            ));
        }
        Ok(())
    }
}

impl Default for DocumentStoreHandler {
    fn default() -> Self {
        Self::new()
    }
}
