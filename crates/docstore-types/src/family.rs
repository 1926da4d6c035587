use serde::{Deserialize, Serialize};

use crate::address::namespace_prefix;

/// Name of the transaction family this workspace implements.
pub const FAMILY_NAME: &str = "document_store";

/// The only family version currently defined.
pub const FAMILY_VERSION: &str = "1.0";

/// Transaction family configuration.
///
/// Held as an explicit value by the handler, the client, and the gateway
/// rather than as ambient module state. The namespace prefix is recomputed
/// on demand from the family name; it is a pure function, so every holder
/// observes the same prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    pub name: String,
    pub version: String,
}

impl FamilyConfig {
    /// Configuration for the `document_store` family, version `1.0`.
    pub fn document_store() -> Self {
        Self {
            name: FAMILY_NAME.to_string(),
            version: FAMILY_VERSION.to_string(),
        }
    }

    /// The 6-hex-character namespace prefix shared by every state address
    /// of this family.
    pub fn namespace_prefix(&self) -> String {
        namespace_prefix(&self.name)
    }
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self::document_store()
    }
}
