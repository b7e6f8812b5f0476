//! # End-to-End Deployment Flow
//!
//! Full orchestration runs against the in-process dev chain: roster in,
//! manifest out, with both persistence targets on disk.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use deploy_orchestrator::{DeploymentOrchestrator, ManifestStore, NetworkDescriptor};
    use deployer_types::{Address, EntitySpec, SignerContext};
    use entity_factory::DevChainFactory;
    use registry_client::{
        EnsNetworks, InMemoryReverseRegistrar, NoDelay, RegistryClient,
    };
    use tempfile::TempDir;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

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

    fn orchestrator(
        dir: &std::path::Path,
        registrar: Arc<InMemoryReverseRegistrar>,
    ) -> DeploymentOrchestrator<DevChainFactory, InMemoryReverseRegistrar> {
        let ens = EnsNetworks::builtin().get("local").unwrap().clone();
        DeploymentOrchestrator::new(
            DevChainFactory::new(),
            RegistryClient::new(registrar, Box::new(NoDelay), ens),
            ManifestStore::new(dir),
            NetworkDescriptor {
                name: "local".into(),
                chain_id: 31337,
            },
        )
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn full_run_produces_ordered_named_manifest() {
        let dir = TempDir::new().unwrap();
        let registrar = Arc::new(InMemoryReverseRegistrar::new());
        let orch = orchestrator(dir.path(), registrar.clone());

        let manifest = orch.run(&signer(), &roster()).await.unwrap();

        assert_eq!(manifest.entities.len(), 4);
        let names: Vec<_> = manifest
            .entities
            .iter()
            .map(|e| e.entity.registered_name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "kathmandu-flood-relief.eth",
                "terai-heatwave-protection.eth",
                "urban-poverty-safety-net.eth",
                "agricultural-drought-relief.eth",
            ]
        );
        assert!(manifest.entities.iter().all(|e| e.registration.success));
        assert!(manifest
            .entities
            .iter()
            .all(|e| !e.entity.contract_address.is_zero()));

        // Registered names agree with the encoder applied to the roster.
        for (spec, entry) in roster().iter().zip(&manifest.entities) {
            assert_eq!(
                entry.entity.registered_name,
                ens_naming::format_registered_name(&spec.display_name, "eth")
            );
        }

        // Every contract got a reverse record on the registrar.
        assert_eq!(registrar.record_count(), 4);
        for entry in &manifest.entities {
            assert_eq!(
                registrar.name_of(entry.entity.contract_address),
                Some(entry.entity.registered_name.clone())
            );
        }
    }

    #[tokio::test]
    async fn run_writes_snapshot_and_latest_with_identical_schema() {
        let dir = TempDir::new().unwrap();
        let orch = orchestrator(dir.path(), Arc::new(InMemoryReverseRegistrar::new()));

        let manifest = orch.run(&signer(), &roster()).await.unwrap();

        let snapshots: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(snapshots.iter().any(|n| n.starts_with("deployment-") && n.ends_with(".json")));
        assert!(snapshots.iter().any(|n| n == "latest.json"));

        // Raw JSON uses the camelCase manifest schema.
        let raw = std::fs::read_to_string(dir.path().join("latest.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["network"]["name"], "local");
        assert_eq!(json["network"]["chainId"], 31337);
        assert!(json["registryContract"]["txHash"].is_string());
        assert_eq!(json["entities"].as_array().unwrap().len(), 4);
        assert_eq!(json["entities"][0]["externalId"], "kathmandu-flood");

        assert_eq!(orch.store().load_latest().unwrap().unwrap(), manifest);
    }

    #[tokio::test]
    async fn latest_reflects_most_recent_completed_run() {
        let dir = TempDir::new().unwrap();

        let first = orchestrator(dir.path(), Arc::new(InMemoryReverseRegistrar::new()));
        first.run(&signer(), &roster()).await.unwrap();

        // Snapshot filenames have millisecond resolution; keep the two
        // runs on distinct timestamps.
        tokio::time::sleep(Duration::from_millis(5)).await;

        let failing_registrar = Arc::new(InMemoryReverseRegistrar::new());
        failing_registrar.fail_all("registrar offline");
        let second = orchestrator(dir.path(), failing_registrar);
        let manifest = second.run(&signer(), &roster()).await.unwrap();

        assert!(manifest.entities.iter().all(|e| !e.registration.success));
        let latest = second.store().load_latest().unwrap().unwrap();
        assert_eq!(latest, manifest);

        let snapshot_count = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("deployment-"))
            .count();
        assert_eq!(snapshot_count, 2);
    }
}
