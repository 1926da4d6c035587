use std::collections::HashMap;
use std::sync::RwLock;

use docstore_types::StateAddress;

use crate::context::StateContext;
use crate::error::ContextError;

/// In-memory, HashMap-based state store.
///
/// Intended for tests and embedding. Entries are held behind a `RwLock`
/// for safe concurrent access and cloned on read.
pub struct InMemoryStateStore {
    entries: RwLock<HashMap<StateAddress, Vec<u8>>>,
}

impl InMemoryStateStore {
    /// Create a new empty state store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The value stored at `address`, if any.
    pub fn get(&self, address: &StateAddress) -> Option<Vec<u8>> {
        self.entries
            .read()
            .expect("lock poisoned")
            .get(address)
            .cloned()
    }

    /// Number of addresses with a recorded value.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no address has a recorded value.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateContext for InMemoryStateStore {
    fn set_state(
        &self,
        entries: &[(StateAddress, Vec<u8>)],
    ) -> Result<Vec<StateAddress>, ContextError> {
        let mut map = self.entries.write().expect("lock poisoned");
        let mut written = Vec::with_capacity(entries.len());
        for (address, value) in entries {
            map.insert(address.clone(), value.clone());
            written.push(address.clone());
        }
        Ok(written)
    }

    fn get_state(
        &self,
        addresses: &[StateAddress],
    ) -> Result<Vec<(StateAddress, Vec<u8>)>, ContextError> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(addresses
            .iter()
            .filter_map(|address| map.get(address).map(|value| (address.clone(), value.clone())))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStateStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
