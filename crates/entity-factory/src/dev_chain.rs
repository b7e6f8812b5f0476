//! # Dev-Chain Factory
//!
//! In-process simulated treasury used by the local network and by
//! tests. Addresses are derived CREATE-style from the deployer address
//! and a per-signer nonce, so a given roster deploys to the same
//! addresses on every fresh chain. Failures can be scripted per
//! display name to exercise the orchestrator's abort paths.

use crate::errors::FactoryError;
use crate::ports::EntityFactory;
use async_trait::async_trait;
use deployer_types::{Address, Deployment, SignerContext, TxHash};
use sha3::{Digest, Keccak256};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use tracing::{debug, info};

/// Simulated treasury chain.
#[derive(Debug, Default)]
pub struct DevChainFactory {
    /// Per-signer creation nonces.
    nonces: RwLock<HashMap<Address, u64>>,
    /// Deployed registry contract, if any.
    registry: RwLock<Option<Address>>,
    /// Sub-contracts keyed by display name.
    entities: RwLock<HashMap<String, Address>>,
    /// Display names scripted to fail creation.
    failing_names: RwLock<HashSet<String>>,
    /// When set, registry deployment fails with this reason.
    fail_registry: RwLock<Option<String>>,
}

impl DevChainFactory {
    /// Creates a fresh, empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts entity creation for `display_name` to fail.
    pub fn fail_creation_of(&self, display_name: &str) {
        self.failing_names
            .write()
            .unwrap()
            .insert(display_name.to_string());
    }

    /// Scripts the registry deployment itself to fail.
    pub fn fail_registry_deployment(&self, reason: &str) {
        *self.fail_registry.write().unwrap() = Some(reason.to_string());
    }

    /// Number of sub-contracts created so far.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.read().unwrap().len()
    }

    /// Derives the next CREATE-style address for a signer:
    /// `keccak256(sender ++ nonce)[12..]`.
    fn next_address(&self, signer: Address) -> Address {
        let mut nonces = self.nonces.write().unwrap();
        let nonce = nonces.entry(signer).or_insert(0);
        let mut hasher = Keccak256::new();
        hasher.update(signer.as_bytes());
        hasher.update(nonce.to_be_bytes());
        *nonce += 1;
        let hash = hasher.finalize();
        Address::from_slice(&hash[12..]).unwrap_or(Address::ZERO)
    }

    fn tx_hash_for(&self, signer: Address, payload: &str) -> TxHash {
        let nonce = self
            .nonces
            .read()
            .unwrap()
            .get(&signer)
            .copied()
            .unwrap_or(0);
        let mut hasher = Keccak256::new();
        hasher.update(signer.as_bytes());
        hasher.update(nonce.to_be_bytes());
        hasher.update(payload.as_bytes());
        TxHash::new(hasher.finalize().into())
    }
}

#[async_trait]
impl EntityFactory for DevChainFactory {
    async fn deploy_registry(&self, signer: &SignerContext) -> Result<Deployment, FactoryError> {
        if let Some(reason) = self.fail_registry.read().unwrap().clone() {
            return Err(FactoryError::RegistryDeployment(reason));
        }
        let address = self.next_address(signer.address);
        let tx_hash = self.tx_hash_for(signer.address, "deploy-registry");
        *self.registry.write().unwrap() = Some(address);
        info!(%address, "dev-chain registry deployed");
        Ok(Deployment { address, tx_hash })
    }

    async fn create_entity(
        &self,
        signer: &SignerContext,
        display_name: &str,
    ) -> Result<Deployment, FactoryError> {
        if self.registry.read().unwrap().is_none() {
            return Err(FactoryError::RegistryNotDeployed);
        }
        if self.failing_names.read().unwrap().contains(display_name) {
            return Err(FactoryError::EntityCreation {
                name: display_name.to_string(),
                reason: "creation reverted".to_string(),
            });
        }
        let address = self.next_address(signer.address);
        let tx_hash = self.tx_hash_for(signer.address, display_name);
        self.entities
            .write()
            .unwrap()
            .insert(display_name.to_string(), address);
        debug!(%address, display_name, "dev-chain entity created");
        Ok(Deployment { address, tx_hash })
    }

    async fn resolve_entity_address(
        &self,
        display_name: &str,
    ) -> Result<Option<Address>, FactoryError> {
        Ok(self.entities.read().unwrap().get(display_name).copied())
    }
}
