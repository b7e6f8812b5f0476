//! # Deployment Orchestrator
//!
//! Drives one run through the pipeline states and assembles the
//! manifest. Creation-time errors abort the run; naming errors are
//! folded into per-entity outcomes and never block persistence.

use crate::errors::{OrchestratorError, RunAborted};
use crate::manifest_store::ManifestStore;
use chrono::Utc;
use deployer_types::{
    DeployedEntity, DeploymentManifest, EntitySpec, ManifestEntry, NetworkInfo,
    RegistrationOutcome, RegistryContractInfo, SignerContext,
};
use ens_naming::format_registered_name;
use entity_factory::EntityFactory;
use registry_client::{BindEntry, RegistryClient, ReverseRegistrar};
use std::fmt;
use tracing::{info, warn};

// =============================================================================
// RUN STAGES
// =============================================================================

/// Pipeline stages of one orchestration run.
///
/// `Aborted` is not a variant here; an aborted run is represented by
/// [`RunAborted`] carrying the stage it failed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    /// Nothing has been deployed yet.
    NotStarted,
    /// The top-level registry contract exists.
    RegistryDeployed,
    /// Every configured entity was created and resolved.
    EntitiesCreated,
    /// Reverse-name binding was attempted for every entity.
    NamesAttempted,
    /// The manifest was written. Terminal success.
    ManifestPersisted,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not-started",
            Self::RegistryDeployed => "registry-deployed",
            Self::EntitiesCreated => "entities-created",
            Self::NamesAttempted => "names-attempted",
            Self::ManifestPersisted => "manifest-persisted",
        };
        f.write_str(s)
    }
}

// =============================================================================
// ORCHESTRATOR
// =============================================================================

/// Network identity stamped into the manifest.
#[derive(Debug, Clone)]
pub struct NetworkDescriptor {
    /// Network name ("local", "base-sepolia").
    pub name: String,
    /// Chain identifier.
    pub chain_id: u64,
}

/// Sequences deployment, naming, and persistence for one roster.
pub struct DeploymentOrchestrator<F, R>
where
    F: EntityFactory,
    R: ReverseRegistrar,
{
    factory: F,
    registry: RegistryClient<R>,
    store: ManifestStore,
    network: NetworkDescriptor,
}

impl<F, R> DeploymentOrchestrator<F, R>
where
    F: EntityFactory,
    R: ReverseRegistrar,
{
    /// Wires an orchestrator from its collaborators.
    pub fn new(
        factory: F,
        registry: RegistryClient<R>,
        store: ManifestStore,
        network: NetworkDescriptor,
    ) -> Self {
        Self {
            factory,
            registry,
            store,
            network,
        }
    }

    /// The manifest store this orchestrator persists through.
    #[must_use]
    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// Runs the full pipeline for the given roster.
    ///
    /// On success the returned manifest has exactly one entry per spec,
    /// in roster order. On a creation-time failure the run aborts with
    /// the entities created so far; nothing is rolled back and no
    /// manifest is written.
    pub async fn run(
        &self,
        signer: &SignerContext,
        specs: &[EntitySpec],
    ) -> Result<DeploymentManifest, RunAborted> {
        info!(
            network = %self.network.name,
            entities = specs.len(),
            deployer = %signer.address,
            "starting orchestration run"
        );

        // NotStarted -> RegistryDeployed. Fatal on error.
        let registry_deployment = self.factory.deploy_registry(signer).await.map_err(|e| {
            RunAborted {
                stage: RunStage::NotStarted,
                completed_so_far: Vec::new(),
                source: e.into(),
            }
        })?;
        let deployed_at = Utc::now();
        info!(address = %registry_deployment.address, "registry contract deployed");

        // RegistryDeployed -> EntitiesCreated. First failure aborts;
        // already-created entities are surfaced, not undone.
        let entities = match self.create_entities(signer, specs).await {
            Ok(entities) => entities,
            Err((completed_so_far, source)) => {
                return Err(RunAborted {
                    stage: RunStage::RegistryDeployed,
                    completed_so_far,
                    source,
                });
            }
        };

        // EntitiesCreated -> NamesAttempted. The one partial-failure-
        // tolerant step: outcomes are inspected, never thrown.
        let outcomes = self.bind_names(signer, &entities).await;

        // NamesAttempted -> ManifestPersisted.
        let manifest = DeploymentManifest {
            network: NetworkInfo {
                name: self.network.name.clone(),
                chain_id: self.network.chain_id,
                deployer_address: signer.address,
                deployed_at,
            },
            registry_contract: RegistryContractInfo {
                address: registry_deployment.address,
                tx_hash: registry_deployment.tx_hash,
            },
            entities: merge_entities_and_outcomes(entities.clone(), outcomes),
        };
        self.persist(&manifest).map_err(|source| RunAborted {
            stage: RunStage::NamesAttempted,
            completed_so_far: entities,
            source,
        })?;

        let failed = manifest.unregistered().len();
        info!(
            entities = manifest.entities.len(),
            unregistered = failed,
            "orchestration run persisted"
        );
        Ok(manifest)
    }

    /// Re-attempts reverse-name registration for every entry of the
    /// latest manifest that failed, writing an updated snapshot and
    /// latest pointer.
    ///
    /// Fails fast when no prior run exists. Entries that fail again
    /// keep their failed outcome; nothing aborts.
    pub async fn reconcile_names(
        &self,
        signer: &SignerContext,
    ) -> Result<DeploymentManifest, OrchestratorError> {
        let mut manifest = self
            .store
            .load_latest()?
            .ok_or(OrchestratorError::NoPriorRun)?;

        let pending: Vec<BindEntry> = manifest
            .unregistered()
            .iter()
            .map(|entry| BindEntry {
                address: entry.entity.contract_address,
                registered_name: entry.entity.registered_name.clone(),
            })
            .collect();

        if pending.is_empty() {
            info!("all names already registered; nothing to reconcile");
            return Ok(manifest);
        }

        info!(pending = pending.len(), "re-attempting failed registrations");
        let outcomes = self.registry.bind_multiple(signer, &pending).await;
        for outcome in outcomes {
            if let Some(entry) = manifest
                .entities
                .iter_mut()
                .find(|e| e.entity.contract_address == outcome.contract_address)
            {
                entry.registration = outcome;
            }
        }

        self.store.save_snapshot(&manifest)?;
        self.store.save_latest(&manifest)?;
        Ok(manifest)
    }

    /// Creates every entity in roster order, resolving each address
    /// right after creation. Returns the entities created before the
    /// first failure alongside the error.
    async fn create_entities(
        &self,
        signer: &SignerContext,
        specs: &[EntitySpec],
    ) -> Result<Vec<DeployedEntity>, (Vec<DeployedEntity>, OrchestratorError)> {
        let tld = &self.registry.config().tld;
        let mut entities = Vec::with_capacity(specs.len());
        for spec in specs {
            let created = match self.factory.create_entity(signer, &spec.display_name).await {
                Ok(created) => created,
                Err(e) => return Err((entities, e.into())),
            };
            // The receipt shape varies by backend; the read-back lookup
            // is authoritative for the address.
            let resolved = match self.factory.resolve_entity_address(&spec.display_name).await {
                Ok(resolved) => resolved,
                Err(e) => return Err((entities, e.into())),
            };
            let contract_address = match resolved {
                Some(address) if !address.is_zero() => address,
                _ => {
                    return Err((
                        entities,
                        OrchestratorError::EntityUnresolved(spec.display_name.clone()),
                    ));
                }
            };
            if contract_address != created.address {
                warn!(
                    display_name = %spec.display_name,
                    receipt = %created.address,
                    resolved = %contract_address,
                    "receipt and resolved address differ; trusting the lookup"
                );
            }
            info!(
                display_name = %spec.display_name,
                address = %contract_address,
                "entity created"
            );
            entities.push(DeployedEntity {
                external_id: spec.external_id.clone(),
                display_name: spec.display_name.clone(),
                contract_address,
                registered_name: format_registered_name(&spec.display_name, tld),
                created_at: Utc::now(),
            });
        }
        Ok(entities)
    }

    /// Binds reverse names for all created entities, synthesizing
    /// failed outcomes if the batch comes back short. The run proceeds
    /// to persistence either way.
    async fn bind_names(
        &self,
        signer: &SignerContext,
        entities: &[DeployedEntity],
    ) -> Vec<RegistrationOutcome> {
        let entries: Vec<BindEntry> = entities
            .iter()
            .map(|entity| BindEntry {
                address: entity.contract_address,
                registered_name: entity.registered_name.clone(),
            })
            .collect();

        let outcomes = self.registry.bind_multiple(signer, &entries).await;
        if outcomes.len() == entities.len() {
            return outcomes;
        }

        // The naming subsystem misbehaved as a whole; treat every
        // entity as unregistered rather than aborting persistence.
        warn!(
            expected = entities.len(),
            got = outcomes.len(),
            "naming batch returned wrong outcome count; marking all entities unregistered"
        );
        entities
            .iter()
            .map(|entity| {
                RegistrationOutcome::failed(
                    entity.registered_name.clone(),
                    entity.contract_address,
                    "naming batch produced no outcome".to_string(),
                )
            })
            .collect()
    }

    fn persist(&self, manifest: &DeploymentManifest) -> Result<(), OrchestratorError> {
        self.store.save_snapshot(manifest)?;
        self.store.save_latest(manifest)?;
        Ok(())
    }
}

// =============================================================================
// MERGE
// =============================================================================

/// Merges entities with their registration outcomes, matching by
/// position and validating by contract address.
///
/// A positionally mismatched outcome is re-matched by address; an
/// entity with no outcome at all gets a synthesized failure so the
/// manifest invariant (one entry per attempted spec) holds.
fn merge_entities_and_outcomes(
    entities: Vec<DeployedEntity>,
    outcomes: Vec<RegistrationOutcome>,
) -> Vec<ManifestEntry> {
    entities
        .into_iter()
        .enumerate()
        .map(|(index, entity)| {
            let positional = outcomes
                .get(index)
                .filter(|o| o.contract_address == entity.contract_address);
            let registration = match positional {
                Some(outcome) => outcome.clone(),
                None => outcomes
                    .iter()
                    .find(|o| o.contract_address == entity.contract_address)
                    .cloned()
                    .unwrap_or_else(|| {
                        warn!(
                            registered_name = %entity.registered_name,
                            "no registration outcome for entity; recording failure"
                        );
                        RegistrationOutcome::failed(
                            entity.registered_name.clone(),
                            entity.contract_address,
                            "no registration outcome recorded".to_string(),
                        )
                    }),
            };
            ManifestEntry {
                entity,
                registration,
            }
        })
        .collect()
}
