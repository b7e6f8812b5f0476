//! # Driven Port (Outbound)
//!
//! The interface the orchestrator depends on to create and look up
//! contracts. Adapters implement it against the real chain; the dev
//! chain implements it in process.

use crate::errors::FactoryError;
use async_trait::async_trait;
use deployer_types::{Address, Deployment, SignerContext};

/// Boundary of the remote treasury contract.
#[async_trait]
pub trait EntityFactory: Send + Sync {
    /// One-shot deployment of the top-level registry contract.
    async fn deploy_registry(&self, signer: &SignerContext) -> Result<Deployment, FactoryError>;

    /// Asks the deployed registry to instantiate a sub-contract keyed
    /// by `display_name`.
    async fn create_entity(
        &self,
        signer: &SignerContext,
        display_name: &str,
    ) -> Result<Deployment, FactoryError>;

    /// Read-only lookup of a sub-contract's address by display name.
    ///
    /// Used immediately after creation instead of digging the address
    /// out of a receipt whose shape varies by backend.
    ///
    /// # Returns
    ///
    /// * `Some(address)` - sub-contract exists
    /// * `None` - no sub-contract registered under that name
    async fn resolve_entity_address(
        &self,
        display_name: &str,
    ) -> Result<Option<Address>, FactoryError>;
}
