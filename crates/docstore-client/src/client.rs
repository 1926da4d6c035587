use docstore_crypto::SigningKey;
use docstore_protocol::{
    random_nonce, Batch, DocPayload, SubmitAck, Transaction, TransactionHeader,
};
use docstore_types::{derive_address, sha512_hex, FamilyConfig, StateAddress};

use crate::error::ClientError;
use crate::gateway::LedgerGateway;

/// Identity-side client for the `document_store` family.
///
/// Owns one signing identity for its lifetime. Every store it submits
/// targets the single state address derived from that identity's public
/// key, and every retrieve reads the same address back.
pub struct DocumentStoreClient<G: LedgerGateway> {
    gateway: G,
    signing_key: SigningKey,
    family: FamilyConfig,
}

impl<G: LedgerGateway> DocumentStoreClient<G> {
    /// Client for the standard family, signing as `signing_key`.
    pub fn new(gateway: G, signing_key: SigningKey) -> Self {
        Self::with_family(gateway, signing_key, FamilyConfig::document_store())
    }

    /// Client for an explicit family configuration.
    pub fn with_family(gateway: G, signing_key: SigningKey, family: FamilyConfig) -> Self {
        Self {
            gateway,
            signing_key,
            family,
        }
    }

    /// Hex public key of this client's identity.
    pub fn public_key_hex(&self) -> String {
        self.signing_key.public_key_hex()
    }

    /// The state address owned by this client's identity.
    pub fn address(&self) -> StateAddress {
        derive_address(&self.family.name, &self.public_key_hex())
    }

    /// Anchor `hash_value` at this identity's state address.
    ///
    /// Builds the payload, signs a single-transaction batch, and submits
    /// it. The returned ack is the gateway's verbatim acknowledgment; this
    /// call does not wait for the write to become visible.
    pub fn store(&self, hash_value: &str) -> Result<SubmitAck, ClientError> {
        let payload = DocPayload::store(hash_value).to_wire_bytes();
        let address = self.address();

        let header = TransactionHeader {
            family_name: self.family.name.clone(),
            family_version: self.family.version.clone(),
            signer_public_key: self.public_key_hex(),
            batcher_public_key: self.public_key_hex(),
            inputs: vec![address.clone()],
            outputs: vec![address],
            nonce: random_nonce(),
            payload_sha512: sha512_hex(&payload),
        };
        let transaction = Transaction::create(header, payload, &self.signing_key)?;
        let batch = Batch::create(vec![transaction], &self.signing_key)?;

        tracing::info!(batch_id = %batch.id(), "submitting store");
        Ok(self.gateway.submit_batch(&batch)?)
    }

    /// Read back the bytes recorded at this identity's address.
    ///
    /// `Ok(None)` means nothing was ever stored (or the store is not yet
    /// visible); it is not an error.
    pub fn retrieve(&self) -> Result<Option<Vec<u8>>, ClientError> {
        let address = self.address();
        tracing::debug!(%address, "retrieving stored hash");
        Ok(self.gateway.fetch_state(&address)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::gateway::GatewayError;
    use docstore_protocol::SubmitStatus;
    use docstore_types::{namespace_prefix, FAMILY_NAME};

    /// Gateway double that records submitted batches and serves canned
    /// state.
    #[derive(Default)]
    struct RecordingGateway {
        batches: Mutex<Vec<Batch>>,
        state: Mutex<Option<Vec<u8>>>,
        fail_transport: bool,
    }

    impl LedgerGateway for RecordingGateway {
        fn submit_batch(&self, batch: &Batch) -> Result<SubmitAck, GatewayError> {
            if self.fail_transport {
                return Err(GatewayError::Transport("connection refused".into()));
            }
            self.batches.lock().unwrap().push(batch.clone());
            Ok(SubmitAck {
                batch_id: batch.id(),
                status: SubmitStatus::Submitted,
            })
        }

        fn fetch_state(&self, _address: &StateAddress) -> Result<Option<Vec<u8>>, GatewayError> {
            if self.fail_transport {
                return Err(GatewayError::Transport("connection refused".into()));
            }
            Ok(self.state.lock().unwrap().clone())
        }
    }

    fn client_over(gateway: RecordingGateway) -> DocumentStoreClient<RecordingGateway> {
        DocumentStoreClient::new(gateway, SigningKey::generate())
    }

    #[test]
    fn store_submits_a_well_formed_batch() {
        let client = client_over(RecordingGateway::default());
        let ack = client.store("deadbeef").unwrap();
        assert_eq!(ack.status, SubmitStatus::Submitted);

        let batches = client.gateway.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        batch.verify().unwrap();
        assert_eq!(batch.id(), ack.batch_id);

        let txn = &batch.transactions[0];
        assert_eq!(txn.header.family_name, FAMILY_NAME);
        assert_eq!(txn.header.family_version, "1.0");
        assert_eq!(txn.header.signer_public_key, client.public_key_hex());
        assert_eq!(txn.header.batcher_public_key, client.public_key_hex());
        assert_eq!(txn.payload, b"store,deadbeef");
    }

    #[test]
    fn store_declares_only_its_own_address() {
        let client = client_over(RecordingGateway::default());
        client.store("deadbeef").unwrap();

        let batches = client.gateway.batches.lock().unwrap();
        let header = &batches[0].transactions[0].header;
        let own = client.address();
        assert_eq!(header.inputs, vec![own.clone()]);
        assert_eq!(header.outputs, vec![own.clone()]);
        assert_eq!(own.prefix(), namespace_prefix(FAMILY_NAME));
    }

    #[test]
    fn header_digest_binds_the_payload() {
        let client = client_over(RecordingGateway::default());
        client.store("deadbeef").unwrap();

        let batches = client.gateway.batches.lock().unwrap();
        let txn = &batches[0].transactions[0];
        assert_eq!(txn.header.payload_sha512, sha512_hex(&txn.payload));
    }

    #[test]
    fn successive_stores_produce_distinct_transactions() {
        let client = client_over(RecordingGateway::default());
        client.store("deadbeef").unwrap();
        client.store("deadbeef").unwrap();

        let batches = client.gateway.batches.lock().unwrap();
        // Same payload, but nonces keep the transaction ids distinct.
        assert_ne!(batches[0].transactions[0].id(), batches[1].transactions[0].id());
    }

    #[test]
    fn retrieve_returns_stored_bytes() {
        let gateway = RecordingGateway {
            state: Mutex::new(Some(b"deadbeef".to_vec())),
            ..Default::default()
        };
        let client = client_over(gateway);
        assert_eq!(client.retrieve().unwrap(), Some(b"deadbeef".to_vec()));
    }

    #[test]
    fn retrieve_absence_is_not_an_error() {
        let client = client_over(RecordingGateway::default());
        assert_eq!(client.retrieve().unwrap(), None);
    }

    #[test]
    fn transport_failure_propagates_unchanged() {
        let gateway = RecordingGateway {
            fail_transport: true,
            ..Default::default()
        };
        let client = client_over(gateway);
        let err = client.store("deadbeef").unwrap_err();
        assert!(matches!(
            err,
            ClientError::Gateway(GatewayError::Transport(_))
        ));
        let err = client.retrieve().unwrap_err();
        assert!(matches!(
            err,
            ClientError::Gateway(GatewayError::Transport(_))
        ));
    }

    #[test]
    fn address_is_stable_for_an_identity() {
        let client = client_over(RecordingGateway::default());
        assert_eq!(client.address(), client.address());
    }
}
