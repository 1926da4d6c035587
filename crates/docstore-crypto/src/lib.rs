//! Signing primitives and the key provider for docstore.
//!
//! Provides Ed25519 signing/verification wrappers and the file-backed key
//! store that resolves a username to its keypair on disk. Public keys
//! travel as lowercase hex strings everywhere in the system; the address
//! scheme hashes that hex form, so the encoding is part of the contract.
//!
//! All crypto operations wrap established libraries — no custom
//! cryptography.

pub mod keyfile;
pub mod signer;

pub use keyfile::{FileKeyStore, KeyError};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
