//! # Driven Ports (Outbound)
//!
//! Interfaces the registry client depends on. Adapters implement these
//! against the real name-registry service; tests use the in-memory
//! versions in `adapters`.

use crate::errors::RegistryError;
use async_trait::async_trait;
use deployer_types::{Address, SignerContext, TxHash};
use ens_naming::Namehash;

/// Write interface of the remote reverse registrar.
#[async_trait]
pub trait ReverseRegistrar: Send + Sync {
    /// Associates `address` with `registered_name` in the reverse
    /// registrar.
    ///
    /// # Returns
    ///
    /// The transaction reference of the write call.
    async fn set_name(
        &self,
        signer: &SignerContext,
        address: Address,
        registered_name: &str,
    ) -> Result<TxHash, RegistryError>;
}

/// Read interface of the name registry's resolver.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolves a node identifier to an address.
    ///
    /// # Returns
    ///
    /// * `Some(address)` - if the node has an address record
    /// * `None` - if the node is unknown or has no record
    async fn resolve(&self, node: Namehash) -> Result<Option<Address>, RegistryError>;
}
