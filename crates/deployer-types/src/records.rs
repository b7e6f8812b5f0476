//! # Deployment Records
//!
//! Input configuration and output manifest types for one orchestration
//! run. The manifest serializes in camelCase to stay compatible with
//! the `deployment-<unix-ms>.json` / `latest.json` file format consumed
//! by downstream tooling.

use crate::value_objects::{Address, TxHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One configured beneficiary entity, loaded before the run starts.
///
/// Order is significant: downstream consumers index entities by
/// position, so the orchestrator must preserve roster order end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    /// Human-readable display name ("Kathmandu Flood Relief").
    pub display_name: String,
    /// Stable external identifier ("kathmandu-flood"). Unique per roster.
    pub external_id: String,
}

impl EntitySpec {
    /// Creates a spec from a display name and external id.
    #[must_use]
    pub fn new(display_name: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            external_id: external_id.into(),
        }
    }
}

/// Result of a single contract-creating write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Address of the created contract.
    pub address: Address,
    /// Transaction that performed the creation.
    pub tx_hash: TxHash,
}

/// One successfully created sub-contract, produced once per entity.
///
/// `contract_address` is supplied by the entity factory and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedEntity {
    /// Stable external identifier from the roster.
    pub external_id: String,
    /// Display name as configured.
    pub display_name: String,
    /// Address of the spawned sub-contract. Non-zero on success.
    pub contract_address: Address,
    /// Full registered name, e.g. `kathmandu-flood-relief.eth`.
    pub registered_name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Outcome of one reverse-name registration attempt.
///
/// Always produced, one per entity, regardless of success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    /// Name the registration attempted to bind.
    pub registered_name: String,
    /// Address the name was bound (or meant to be bound) to.
    pub contract_address: Address,
    /// Whether the remote call succeeded.
    pub success: bool,
    /// Transaction reference, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TxHash>,
    /// Remote failure reason, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegistrationOutcome {
    /// A successful registration.
    #[must_use]
    pub fn succeeded(registered_name: String, contract_address: Address, tx_hash: TxHash) -> Self {
        Self {
            registered_name,
            contract_address,
            success: true,
            tx_hash: Some(tx_hash),
            error: None,
        }
    }

    /// A failed registration with the remote reason.
    #[must_use]
    pub fn failed(registered_name: String, contract_address: Address, error: String) -> Self {
        Self {
            registered_name,
            contract_address,
            success: false,
            tx_hash: None,
            error: Some(error),
        }
    }
}

/// Network context a manifest was produced on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    /// Network name the run targeted ("local", "base-sepolia").
    pub name: String,
    /// Chain identifier.
    pub chain_id: u64,
    /// Address the signing credential controls.
    pub deployer_address: Address,
    /// When the top-level registry contract was deployed.
    pub deployed_at: DateTime<Utc>,
}

/// The top-level registry (treasury) contract of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryContractInfo {
    /// Address of the registry contract.
    pub address: Address,
    /// Transaction that deployed it.
    pub tx_hash: TxHash,
}

/// A deployed entity merged with its registration outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// The created entity.
    #[serde(flatten)]
    pub entity: DeployedEntity,
    /// Its (possibly failed) name registration.
    pub registration: RegistrationOutcome,
}

/// Auditable record of one complete orchestration run.
///
/// Invariant: `entities.len()` equals the number of entity specs the run
/// attempted, in roster order, even when some registrations failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    /// Network the run executed against.
    pub network: NetworkInfo,
    /// The deployed top-level registry contract.
    pub registry_contract: RegistryContractInfo,
    /// Entities in roster order, each with its registration outcome.
    pub entities: Vec<ManifestEntry>,
}

impl DeploymentManifest {
    /// Entries whose name registration did not succeed.
    #[must_use]
    pub fn unregistered(&self) -> Vec<&ManifestEntry> {
        self.entities
            .iter()
            .filter(|e| !e.registration.success)
            .collect()
    }
}
