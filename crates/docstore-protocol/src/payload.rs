use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Operation tag for the store operation.
pub const OP_STORE: &str = "store";

/// Field delimiter of the legacy text encoding.
pub const PAYLOAD_DELIMITER: char = ',';

/// A decoded transaction payload.
///
/// The operation set is closed: decoding any tag not enumerated here fails
/// with [`ProtocolError::UnknownOperation`] instead of silently passing an
/// arbitrary string through to the handler.
///
/// The wire form is the legacy two-field text encoding
/// `<operation>,<hash_value>`, kept for compatibility during migration.
/// That format has no schema version; adding a third field is a breaking
/// change. The enum itself derives serde so a versioned structured encoding
/// can replace the text form without touching call sites.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocPayload {
    /// Anchor `hash_value` at the signer's state address.
    Store { hash_value: String },
}

impl DocPayload {
    /// A store payload.
    pub fn store(hash_value: impl Into<String>) -> Self {
        Self::Store {
            hash_value: hash_value.into(),
        }
    }

    /// The operation tag of this payload.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Store { .. } => OP_STORE,
        }
    }

    /// Encode to the legacy wire form: `<operation>,<hash_value>` as UTF-8.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        match self {
            Self::Store { hash_value } => {
                format!("{OP_STORE}{PAYLOAD_DELIMITER}{hash_value}").into_bytes()
            }
        }
    }

    /// Decode from the legacy wire form.
    ///
    /// Splits on the FIRST delimiter into exactly two fields, so a hash
    /// value containing the delimiter survives a round trip.
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| ProtocolError::MalformedPayload("payload is not valid UTF-8".into()))?;
        let (operation, hash_value) = text.split_once(PAYLOAD_DELIMITER).ok_or_else(|| {
            ProtocolError::MalformedPayload(format!(
                "expected two {PAYLOAD_DELIMITER:?}-delimited fields, got {text:?}"
            ))
        })?;
        match operation {
            OP_STORE => Ok(Self::Store {
                hash_value: hash_value.to_string(),
            }),
            other => Err(ProtocolError::UnknownOperation(other.to_string())),
        }
    }
}
