use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::error::TypeError;

/// Length of a state address in hex characters: 6 prefix + 64 suffix.
pub const ADDRESS_LEN: usize = 70;

/// Length of the family namespace prefix in hex characters.
pub const PREFIX_LEN: usize = 6;

/// A fixed-length ledger state address.
///
/// Addresses are derived, never assigned: the same (family, public key)
/// pair always maps to the same address, on the client and on the handler
/// alike. There is no registry of identities — the mapping is recomputed
/// on every access. An identity therefore cannot name another identity's
/// address as a store target without signing as that identity.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateAddress(String);

impl StateAddress {
    /// Parse an address from a 70-hex-character string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        if s.len() != ADDRESS_LEN {
            return Err(TypeError::InvalidLength {
                expected: ADDRESS_LEN,
                actual: s.len(),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidHex(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The full hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 6-character family namespace prefix of this address.
    pub fn prefix(&self) -> &str {
        &self.0[..PREFIX_LEN]
    }
}

impl fmt::Display for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateAddress({}..{})", &self.0[..PREFIX_LEN], &self.0[ADDRESS_LEN - 8..])
    }
}

/// SHA-512 digest of `data`, hex encoded (128 characters).
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(Sha512::digest(data))
}

/// The namespace prefix for a family: the first 6 hex characters of the
/// SHA-512 digest of the family name. Pure function, computed on demand.
pub fn namespace_prefix(family_name: &str) -> String {
    sha512_hex(family_name.as_bytes())[..PREFIX_LEN].to_string()
}

/// Derive the state address owned by `signer_public_key` within a family.
///
/// The address is the family namespace prefix followed by the first 64 hex
/// characters of SHA-512 over the UTF-8 bytes of the hex-encoded public
/// key. Total over any non-empty input; no registry, no error conditions.
pub fn derive_address(family_name: &str, signer_public_key: &str) -> StateAddress {
    let prefix = namespace_prefix(family_name);
    let key_digest = sha512_hex(signer_public_key.as_bytes());
    let suffix = &key_digest[..ADDRESS_LEN - PREFIX_LEN];
    StateAddress(format!("{prefix}{suffix}"))
}
