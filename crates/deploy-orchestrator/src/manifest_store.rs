//! # Manifest Store
//!
//! Persists one orchestration run as two files with identical schema:
//! an append-only timestamped snapshot (`deployment-<unix-ms>.json`)
//! and a mutable `latest.json` pointer that always reflects the most
//! recent completed run.
//!
//! The orchestrator runs as a single sequential process per invocation,
//! so `latest.json` is last-writer-wins with no locking. Snapshots are
//! opened with `create_new` and fail loudly on collision.

use crate::errors::ManifestError;
use chrono::Utc;
use deployer_types::DeploymentManifest;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Well-known name of the mutable pointer file.
const LATEST_FILE: &str = "latest.json";

/// Filesystem store for deployment manifests.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    dir: PathBuf,
}

impl ManifestStore {
    /// Creates a store rooted at `dir`. The directory is created on
    /// first write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The deployments directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes a new timestamped snapshot and returns its path.
    pub fn save_snapshot(&self, manifest: &DeploymentManifest) -> Result<PathBuf, ManifestError> {
        self.save_snapshot_at(manifest, Utc::now().timestamp_millis())
    }

    /// Writes a snapshot for an explicit unix-millisecond timestamp.
    ///
    /// Never overwrites: a colliding timestamp yields
    /// [`ManifestError::SnapshotExists`].
    pub fn save_snapshot_at(
        &self,
        manifest: &DeploymentManifest,
        unix_ms: i64,
    ) -> Result<PathBuf, ManifestError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("deployment-{unix_ms}.json"));
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    ManifestError::SnapshotExists(path.clone())
                } else {
                    ManifestError::Io(e)
                }
            })?;
        file.write_all(serde_json::to_string_pretty(manifest)?.as_bytes())?;
        info!(path = %path.display(), "deployment snapshot written");
        Ok(path)
    }

    /// Overwrites `latest.json` unconditionally.
    pub fn save_latest(&self, manifest: &DeploymentManifest) -> Result<(), ManifestError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(LATEST_FILE);
        fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
        debug!(path = %path.display(), "latest manifest updated");
        Ok(())
    }

    /// Loads the most recent manifest, or `None` if no run completed.
    pub fn load_latest(&self) -> Result<Option<DeploymentManifest>, ManifestError> {
        let path = self.dir.join(LATEST_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ManifestError::Io(e)),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use deployer_types::{
        Address, DeployedEntity, ManifestEntry, NetworkInfo, RegistrationOutcome,
        RegistryContractInfo, TxHash,
    };
    use tempfile::TempDir;

    fn manifest(network_name: &str) -> DeploymentManifest {
        let entity = DeployedEntity {
            external_id: "kathmandu-flood".into(),
            display_name: "Kathmandu Flood Relief".into(),
            contract_address: Address::new([2; 20]),
            registered_name: "kathmandu-flood-relief.eth".into(),
            created_at: Utc::now(),
        };
        DeploymentManifest {
            network: NetworkInfo {
                name: network_name.into(),
                chain_id: 31337,
                deployer_address: Address::new([1; 20]),
                deployed_at: Utc::now(),
            },
            registry_contract: RegistryContractInfo {
                address: Address::new([9; 20]),
                tx_hash: TxHash::new([8; 32]),
            },
            entities: vec![ManifestEntry {
                registration: RegistrationOutcome::succeeded(
                    entity.registered_name.clone(),
                    entity.contract_address,
                    TxHash::new([7; 32]),
                ),
                entity,
            }],
        }
    }

    #[test]
    fn load_latest_is_none_before_any_run() {
        let dir = TempDir::new().unwrap();
        let store = ManifestStore::new(dir.path().join("deployments"));
        assert!(store.load_latest().unwrap().is_none());
    }

    #[test]
    fn snapshot_and_latest_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ManifestStore::new(dir.path());
        let m = manifest("local");

        let snapshot = store.save_snapshot(&m).unwrap();
        assert!(snapshot.exists());
        store.save_latest(&m).unwrap();

        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded, m);
    }

    #[test]
    fn colliding_snapshot_timestamp_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let store = ManifestStore::new(dir.path());
        let m = manifest("local");

        store.save_snapshot_at(&m, 1_700_000_000_000).unwrap();
        let err = store.save_snapshot_at(&m, 1_700_000_000_000).unwrap_err();
        assert!(matches!(err, ManifestError::SnapshotExists(_)));

        // Distinct timestamps coexist.
        store.save_snapshot_at(&m, 1_700_000_000_001).unwrap();
    }

    #[test]
    fn latest_is_last_writer_wins() {
        let dir = TempDir::new().unwrap();
        let store = ManifestStore::new(dir.path());

        store.save_latest(&manifest("first")).unwrap();
        store.save_latest(&manifest("second")).unwrap();

        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.network.name, "second");
    }
}
