use rand::RngCore;
use serde::{Deserialize, Serialize};

use docstore_crypto::{Signature, SigningKey, VerifyingKey};
use docstore_types::{sha512_hex, StateAddress};

use crate::error::ProtocolError;

/// The signed portion of a transaction.
///
/// The header names everything the ledger needs to route and schedule the
/// transaction without decoding its payload: the family, the declared
/// input/output address sets, and a digest binding the payload to the
/// signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub family_name: String,
    pub family_version: String,
    /// Hex public key of the identity this transaction acts as.
    pub signer_public_key: String,
    /// Hex public key of the identity that signs the enclosing batch.
    pub batcher_public_key: String,
    /// Addresses this transaction may read.
    pub inputs: Vec<StateAddress>,
    /// Addresses this transaction may write.
    pub outputs: Vec<StateAddress>,
    /// Random hex nonce; makes otherwise identical transactions distinct.
    pub nonce: String,
    /// SHA-512 hex digest of the payload bytes.
    pub payload_sha512: String,
}

impl TransactionHeader {
    /// Canonical bytes the header signature covers.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        bincode::serialize(self).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }
}

/// A signed transaction: header, header signature, and opaque payload.
///
/// Immutable once created; the header signature doubles as the transaction
/// id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub header_signature: Signature,
    pub payload: Vec<u8>,
}

impl Transaction {
    /// Sign `header` over `payload` with the signer's key.
    ///
    /// The header's `payload_sha512` must already bind the payload; this is
    /// checked so a mismatched pair can never be signed.
    pub fn create(
        header: TransactionHeader,
        payload: Vec<u8>,
        signing_key: &SigningKey,
    ) -> Result<Self, ProtocolError> {
        if header.payload_sha512 != sha512_hex(&payload) {
            return Err(ProtocolError::PayloadDigestMismatch);
        }
        let header_signature = signing_key.sign(&header.signing_bytes()?);
        Ok(Self {
            header,
            header_signature,
            payload,
        })
    }

    /// The transaction id: the hex header signature.
    pub fn id(&self) -> String {
        self.header_signature.to_hex()
    }

    /// Verify the header signature and the payload digest.
    ///
    /// This is the gateway-side authentication stage; the transaction
    /// handler trusts headers that passed it.
    pub fn verify(&self) -> Result<(), ProtocolError> {
        if self.header.payload_sha512 != sha512_hex(&self.payload) {
            return Err(ProtocolError::PayloadDigestMismatch);
        }
        let signer = VerifyingKey::from_hex(&self.header.signer_public_key).map_err(|_| {
            ProtocolError::InvalidSignature {
                scope: "transaction",
                signer: self.header.signer_public_key.clone(),
            }
        })?;
        signer
            .verify(&self.header.signing_bytes()?, &self.header_signature)
            .map_err(|_| ProtocolError::InvalidSignature {
                scope: "transaction",
                signer: self.header.signer_public_key.clone(),
            })
    }
}

/// The signed portion of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    /// Hex public key of the batch submitter.
    pub signer_public_key: String,
    /// Ids of the member transactions, in order.
    pub transaction_ids: Vec<String>,
}

impl BatchHeader {
    /// Canonical bytes the batch signature covers.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        bincode::serialize(self).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }
}

/// One or more transactions signed and submitted as a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub header: BatchHeader,
    pub header_signature: Signature,
    pub transactions: Vec<Transaction>,
}

impl Batch {
    /// Wrap `transactions` in a batch signed by `signing_key`.
    pub fn create(
        transactions: Vec<Transaction>,
        signing_key: &SigningKey,
    ) -> Result<Self, ProtocolError> {
        let header = BatchHeader {
            signer_public_key: signing_key.public_key_hex(),
            transaction_ids: transactions.iter().map(Transaction::id).collect(),
        };
        let header_signature = signing_key.sign(&header.signing_bytes()?);
        Ok(Self {
            header,
            header_signature,
            transactions,
        })
    }

    /// The batch id: the hex batch header signature.
    pub fn id(&self) -> String {
        self.header_signature.to_hex()
    }

    /// Verify the batch signature, the member list, and every member
    /// transaction.
    pub fn verify(&self) -> Result<(), ProtocolError> {
        let ids: Vec<String> = self.transactions.iter().map(Transaction::id).collect();
        if ids != self.header.transaction_ids {
            return Err(ProtocolError::TransactionIdMismatch);
        }
        let signer = VerifyingKey::from_hex(&self.header.signer_public_key).map_err(|_| {
            ProtocolError::InvalidSignature {
                scope: "batch",
                signer: self.header.signer_public_key.clone(),
            }
        })?;
        signer
            .verify(&self.header.signing_bytes()?, &self.header_signature)
            .map_err(|_| ProtocolError::InvalidSignature {
                scope: "batch",
                signer: self.header.signer_public_key.clone(),
            })?;
        for transaction in &self.transactions {
            transaction.verify()?;
        }
        Ok(())
    }
}

/// A fresh random hex nonce for a transaction header.
pub fn random_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore_types::{derive_address, FAMILY_NAME, FAMILY_VERSION};

    fn signed_transaction(key: &SigningKey, payload: &[u8]) -> Transaction {
        let address = derive_address(FAMILY_NAME, &key.public_key_hex());
        let header = TransactionHeader {
            family_name: FAMILY_NAME.into(),
            family_version: FAMILY_VERSION.into(),
            signer_public_key: key.public_key_hex(),
            batcher_public_key: key.public_key_hex(),
            inputs: vec![address.clone()],
            outputs: vec![address],
            nonce: random_nonce(),
            payload_sha512: sha512_hex(payload),
        };
        Transaction::create(header, payload.to_vec(), key).unwrap()
    }

    #[test]
    fn created_transaction_verifies() {
        let key = SigningKey::generate();
        let txn = signed_transaction(&key, b"store,deadbeef");
        txn.verify().unwrap();
    }

    #[test]
    fn create_rejects_stale_payload_digest() {
        let key = SigningKey::generate();
        let header = TransactionHeader {
            family_name: FAMILY_NAME.into(),
            family_version: FAMILY_VERSION.into(),
            signer_public_key: key.public_key_hex(),
            batcher_public_key: key.public_key_hex(),
            inputs: vec![],
            outputs: vec![],
            nonce: random_nonce(),
            payload_sha512: sha512_hex(b"other payload"),
        };
        let err = Transaction::create(header, b"store,deadbeef".to_vec(), &key).unwrap_err();
        assert_eq!(err, ProtocolError::PayloadDigestMismatch);
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let key = SigningKey::generate();
        let mut txn = signed_transaction(&key, b"store,deadbeef");
        txn.payload = b"store,cafebabe".to_vec();
        assert_eq!(txn.verify(), Err(ProtocolError::PayloadDigestMismatch));
    }

    #[test]
    fn tampered_header_fails_verification() {
        let key = SigningKey::generate();
        let other = SigningKey::generate();
        let mut txn = signed_transaction(&key, b"store,deadbeef");
        // Re-point the header at another signer without re-signing.
        txn.header.signer_public_key = other.public_key_hex();
        assert!(matches!(
            txn.verify(),
            Err(ProtocolError::InvalidSignature { scope: "transaction", .. })
        ));
    }

    #[test]
    fn transaction_id_is_signature_hex() {
        let key = SigningKey::generate();
        let txn = signed_transaction(&key, b"store,deadbeef");
        assert_eq!(txn.id(), txn.header_signature.to_hex());
        assert_eq!(txn.id().len(), 128);
    }

    #[test]
    fn batch_create_and_verify() {
        let key = SigningKey::generate();
        let txn = signed_transaction(&key, b"store,deadbeef");
        let batch = Batch::create(vec![txn], &key).unwrap();
        batch.verify().unwrap();
        assert_eq!(batch.header.transaction_ids.len(), 1);
    }

    #[test]
    fn batch_rejects_swapped_member() {
        let key = SigningKey::generate();
        let txn = signed_transaction(&key, b"store,deadbeef");
        let mut batch = Batch::create(vec![txn], &key).unwrap();
        batch.transactions[0] = signed_transaction(&key, b"store,cafebabe");
        assert_eq!(batch.verify(), Err(ProtocolError::TransactionIdMismatch));
    }

    #[test]
    fn batch_rejects_foreign_batch_signature() {
        let key = SigningKey::generate();
        let txn = signed_transaction(&key, b"store,deadbeef");
        let mut batch = Batch::create(vec![txn.clone()], &key).unwrap();
        let forged = Batch::create(vec![txn], &SigningKey::generate()).unwrap();
        batch.header_signature = forged.header_signature;
        assert!(matches!(
            batch.verify(),
            Err(ProtocolError::InvalidSignature { scope: "batch", .. })
        ));
    }

    #[test]
    fn batch_verify_covers_member_transactions() {
        let key = SigningKey::generate();
        let mut txn = signed_transaction(&key, b"store,deadbeef");
        txn.payload = b"store,tampered".to_vec();
        // Batch ids still match (id is the header signature), so only the
        // per-transaction check can catch the tampering.
        let batch = Batch::create(vec![txn], &key).unwrap();
        assert_eq!(batch.verify(), Err(ProtocolError::PayloadDigestMismatch));
    }

    #[test]
    fn nonces_are_unique() {
        assert_ne!(random_nonce(), random_nonce());
    }

    #[test]
    fn transaction_json_roundtrip() {
        let key = SigningKey::generate();
        let txn = signed_transaction(&key, b"store,deadbeef");
        let json = serde_json::to_string(&txn).unwrap();
        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, txn);
        parsed.verify().unwrap();
    }
}
