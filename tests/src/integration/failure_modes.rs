//! # Failure Modes
//!
//! Abort paths (creation-time fatal errors) and the one tolerated
//! partial failure: per-entity name registration.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use deploy_orchestrator::{
        DeploymentOrchestrator, ManifestStore, NetworkDescriptor, RunStage,
    };
    use deployer_types::{Address, EntitySpec, SignerContext};
    use entity_factory::{DevChainFactory, EntityFactory};
    use registry_client::{
        EnsNetworks, InMemoryReverseRegistrar, NoDelay, RegistryClient,
    };
    use tempfile::TempDir;

    fn roster() -> Vec<EntitySpec> {
        vec![
            EntitySpec::new("Kathmandu Flood Relief", "kathmandu-flood"),
            EntitySpec::new("Terai Heatwave Protection", "terai-heatwave"),
            EntitySpec::new("Urban Poverty Safety Net", "urban-poverty"),
            EntitySpec::new("Agricultural Drought Relief", "agriculture-drought"),
        ]
    }

    fn signer() -> SignerContext {
        SignerContext::new(Address::new([0xAA; 20]))
    }

    fn orchestrator_with(
        dir: &std::path::Path,
        factory: DevChainFactory,
        registrar: Arc<InMemoryReverseRegistrar>,
    ) -> DeploymentOrchestrator<DevChainFactory, InMemoryReverseRegistrar> {
        let ens = EnsNetworks::builtin().get("local").unwrap().clone();
        DeploymentOrchestrator::new(
            factory,
            RegistryClient::new(registrar, Box::new(NoDelay), ens),
            ManifestStore::new(dir),
            NetworkDescriptor {
                name: "local".into(),
                chain_id: 31337,
            },
        )
    }

    /// The dev chain derives addresses deterministically per fresh
    /// chain, so a dry run reveals the address a later run will assign
    /// to each roster position.
    async fn address_of_entity(position: usize) -> Address {
        let chain = DevChainFactory::new();
        chain.deploy_registry(&signer()).await.unwrap();
        let mut address = Address::ZERO;
        for (index, spec) in roster().iter().enumerate() {
            let created = chain.create_entity(&signer(), &spec.display_name).await.unwrap();
            if index == position {
                address = created.address;
            }
        }
        address
    }

    #[tokio::test]
    async fn creation_failure_mid_roster_aborts_before_any_write() {
        let dir = TempDir::new().unwrap();
        let factory = DevChainFactory::new();
        // Entity #2 of 4 (index 1) fails to create.
        factory.fail_creation_of("Terai Heatwave Protection");
        let orch = orchestrator_with(
            dir.path(),
            factory,
            Arc::new(InMemoryReverseRegistrar::new()),
        );

        let aborted = orch.run(&signer(), &roster()).await.unwrap_err();

        assert_eq!(aborted.stage, RunStage::RegistryDeployed);
        assert_eq!(aborted.completed_so_far.len(), 1);
        assert_eq!(aborted.completed_so_far[0].external_id, "kathmandu-flood");

        // No manifest of any kind was written.
        assert!(orch.store().load_latest().unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).map(|d| d.count()).unwrap_or(0), 0);
    }

    #[tokio::test]
    async fn aborted_run_leaves_previous_manifest_untouched() {
        let dir = TempDir::new().unwrap();

        // A successful run establishes latest.json.
        let orch = orchestrator_with(
            dir.path(),
            DevChainFactory::new(),
            Arc::new(InMemoryReverseRegistrar::new()),
        );
        let previous = orch.run(&signer(), &roster()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        // The next run dies on creation; latest must be unchanged.
        let factory = DevChainFactory::new();
        factory.fail_creation_of("Urban Poverty Safety Net");
        let failing = orchestrator_with(
            dir.path(),
            factory,
            Arc::new(InMemoryReverseRegistrar::new()),
        );
        failing.run(&signer(), &roster()).await.unwrap_err();

        let latest = failing.store().load_latest().unwrap().unwrap();
        assert_eq!(latest, previous);
    }

    #[tokio::test]
    async fn single_registration_failure_still_persists_complete_manifest() {
        let dir = TempDir::new().unwrap();
        let third_address = address_of_entity(2).await;

        let registrar = Arc::new(InMemoryReverseRegistrar::new());
        registrar.fail_address(third_address, "registrar rejected name");
        let orch = orchestrator_with(dir.path(), DevChainFactory::new(), registrar.clone());

        let manifest = orch.run(&signer(), &roster()).await.unwrap();

        assert_eq!(manifest.entities.len(), 4);
        assert!(!manifest.entities[2].registration.success);
        assert!(manifest.entities[2]
            .registration
            .error
            .as_deref()
            .unwrap()
            .contains("registrar rejected name"));
        for index in [0usize, 1, 3] {
            assert!(manifest.entities[index].registration.success);
        }

        // The failed entry is queryable for a later reconciliation pass.
        assert_eq!(manifest.unregistered().len(), 1);
        assert_eq!(
            manifest.unregistered()[0].entity.contract_address,
            third_address
        );
    }

    #[tokio::test]
    async fn reconciliation_retries_only_failed_names() {
        let dir = TempDir::new().unwrap();
        let third_address = address_of_entity(2).await;

        let registrar = Arc::new(InMemoryReverseRegistrar::new());
        registrar.fail_address(third_address, "transient outage");
        let orch = orchestrator_with(dir.path(), DevChainFactory::new(), registrar.clone());

        let manifest = orch.run(&signer(), &roster()).await.unwrap();
        assert_eq!(manifest.unregistered().len(), 1);

        tokio::time::sleep(Duration::from_millis(5)).await;

        // Remote recovers; the reconciliation pass fixes the one entry.
        registrar.heal();
        let reconciled = orch.reconcile_names(&signer()).await.unwrap();

        assert_eq!(reconciled.entities.len(), 4);
        assert!(reconciled.entities.iter().all(|e| e.registration.success));
        assert_eq!(
            registrar.name_of(third_address),
            Some("urban-poverty-safety-net.eth".to_string())
        );

        let latest = orch.store().load_latest().unwrap().unwrap();
        assert_eq!(latest, reconciled);
    }

    #[tokio::test]
    async fn total_registrar_outage_never_blocks_persistence() {
        let dir = TempDir::new().unwrap();
        let registrar = Arc::new(InMemoryReverseRegistrar::new());
        registrar.fail_all("naming subsystem down");
        let orch = orchestrator_with(dir.path(), DevChainFactory::new(), registrar);

        let manifest = orch.run(&signer(), &roster()).await.unwrap();

        assert_eq!(manifest.entities.len(), 4);
        assert!(manifest.entities.iter().all(|e| !e.registration.success));
        assert!(orch.store().load_latest().unwrap().is_some());
    }
}
