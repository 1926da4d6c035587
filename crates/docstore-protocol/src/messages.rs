use serde::{Deserialize, Serialize};

/// Disposition of a submitted batch at the ingress boundary.
///
/// `Submitted` acknowledges receipt only; it says nothing about whether
/// the state change is visible yet. Callers that need visibility must poll
/// the state endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Submitted,
}

/// Acknowledgment returned by the batch ingress endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    pub batch_id: String,
    pub status: SubmitStatus,
}

/// Response of the state query endpoint for a present address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    pub address: String,
    /// Hex-encoded stored bytes.
    pub data: String,
}

impl StateResponse {
    /// Decode the hex `data` field back into raw bytes.
    pub fn decode_data(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.data)
    }
}

/// Gateway liveness and family metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub family_name: String,
    pub family_version: String,
    pub namespace: String,
    pub version: String,
}

/// Error body returned by the gateway on any failure path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
