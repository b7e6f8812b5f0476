//! # In-Memory Adapters
//!
//! Port implementations backed by process memory, used by the local
//! dev network and by tests. Production adapters would speak to the
//! real registrar contracts behind the same traits.

use crate::errors::RegistryError;
use crate::ports::{NameResolver, ReverseRegistrar};
use async_trait::async_trait;
use deployer_types::{Address, SignerContext, TxHash};
use ens_naming::Namehash;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// In-memory reverse registrar with scriptable failures.
#[derive(Debug, Default)]
pub struct InMemoryReverseRegistrar {
    /// Reverse records: address -> registered name.
    records: RwLock<HashMap<Address, String>>,
    /// Addresses whose bind calls are scripted to fail, with reasons.
    failing: RwLock<HashMap<Address, String>>,
    /// Reason to fail every call, when set.
    fail_all: RwLock<Option<String>>,
    /// Monotonic counter feeding synthetic transaction hashes.
    tx_counter: AtomicU64,
}

impl InMemoryReverseRegistrar {
    /// Creates an empty registrar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts bind calls for `address` to fail until [`Self::heal`].
    pub fn fail_address(&self, address: Address, reason: &str) {
        self.failing
            .write()
            .unwrap()
            .insert(address, reason.to_string());
    }

    /// Scripts every bind call to fail.
    pub fn fail_all(&self, reason: &str) {
        *self.fail_all.write().unwrap() = Some(reason.to_string());
    }

    /// Clears all scripted failures.
    pub fn heal(&self) {
        self.failing.write().unwrap().clear();
        *self.fail_all.write().unwrap() = None;
    }

    /// Returns the reverse record for an address, if bound.
    #[must_use]
    pub fn name_of(&self, address: Address) -> Option<String> {
        self.records.read().unwrap().get(&address).cloned()
    }

    /// Number of bound reverse records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.read().unwrap().len()
    }

    fn next_tx_hash(&self) -> TxHash {
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        TxHash::new(bytes)
    }
}

#[async_trait]
impl ReverseRegistrar for InMemoryReverseRegistrar {
    async fn set_name(
        &self,
        _signer: &SignerContext,
        address: Address,
        registered_name: &str,
    ) -> Result<TxHash, RegistryError> {
        if let Some(reason) = self.fail_all.read().unwrap().clone() {
            return Err(RegistryError::Unavailable(reason));
        }
        if let Some(reason) = self.failing.read().unwrap().get(&address).cloned() {
            return Err(RegistryError::Rejected(reason));
        }
        self.records
            .write()
            .unwrap()
            .insert(address, registered_name.to_string());
        Ok(self.next_tx_hash())
    }
}

/// In-memory forward resolver keyed by node identifier.
#[derive(Debug, Default)]
pub struct InMemoryNameResolver {
    records: RwLock<HashMap<Namehash, Address>>,
}

impl InMemoryNameResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address record for a node.
    pub fn set_record(&self, node: Namehash, address: Address) {
        self.records.write().unwrap().insert(node, address);
    }
}

#[async_trait]
impl NameResolver for InMemoryNameResolver {
    async fn resolve(&self, node: Namehash) -> Result<Option<Address>, RegistryError> {
        Ok(self.records.read().unwrap().get(&node).copied())
    }
}
