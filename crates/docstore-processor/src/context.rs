use docstore_types::StateAddress;

use crate::error::ContextError;

/// State-access capability handed to the handler for one `apply` call.
///
/// All durable state lives behind this boundary. Implementations must
/// treat each `set_state` call as a single all-or-nothing request: either
/// every entry is written and reported back, or the call fails. Concurrent
/// reads are safe; serialization of concurrent writes to the same address
/// is the implementation's concern, not the handler's.
pub trait StateContext: Send + Sync {
    /// Write `entries` and return the addresses actually written.
    ///
    /// A successful return listing fewer addresses than requested signals
    /// a storage fault to the caller.
    fn set_state(
        &self,
        entries: &[(StateAddress, Vec<u8>)],
    ) -> Result<Vec<StateAddress>, ContextError>;

    /// Read the values stored at `addresses`. Addresses with no recorded
    /// value are omitted from the result.
    fn get_state(
        &self,
        addresses: &[StateAddress],
    ) -> Result<Vec<(StateAddress, Vec<u8>)>, ContextError>;
}
