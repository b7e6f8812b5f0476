//! # Runtime Configuration
//!
//! Plain config structs with defaults plus environment overrides, and
//! the table of networks the deployer knows how to reach. All
//! configuration is resolved before any remote call.

use deployer_types::Address;
use registry_client::ConfigError;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Default signing identity for the in-process dev chain.
const DEV_SIGNER: Address = Address::new([0xAA; 20]);

/// Runtime knobs for one invocation.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory manifests are written to.
    pub deployments_dir: PathBuf,
    /// Inter-call delay for name registrations, in milliseconds.
    pub inter_call_delay_ms: u64,
    /// Address the signing credential controls.
    pub deployer_address: Address,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            deployments_dir: PathBuf::from("./deployments"),
            inter_call_delay_ms: 1_000,
            deployer_address: DEV_SIGNER,
        }
    }
}

impl RuntimeConfig {
    /// Loads defaults and applies environment overrides.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `RELIEF_DEPLOYMENTS_DIR` | manifest output directory |
    /// | `RELIEF_DELAY_MS` | inter-call registration delay |
    /// | `RELIEF_DEPLOYER_ADDRESS` | signer address (0x-hex) |
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("RELIEF_DEPLOYMENTS_DIR") {
            config.deployments_dir = PathBuf::from(dir);
        }
        if let Ok(delay) = std::env::var("RELIEF_DELAY_MS") {
            match delay.parse() {
                Ok(ms) => config.inter_call_delay_ms = ms,
                Err(_) => warn!("RELIEF_DELAY_MS must be an integer, keeping default"),
            }
        }
        if let Ok(addr) = std::env::var("RELIEF_DEPLOYER_ADDRESS") {
            match addr.parse() {
                Ok(address) => config.deployer_address = address,
                Err(_) => warn!("RELIEF_DEPLOYER_ADDRESS must be 20-byte hex, keeping default"),
            }
        }

        config
    }
}

/// How the treasury boundary is reached on a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// In-process simulated chain.
    DevChain,
    /// Remote JSON-RPC node. No adapter is wired for this yet; the
    /// boundary traits are the integration point.
    Rpc,
}

/// One reachable network.
#[derive(Debug, Clone)]
pub struct NetworkSpec {
    /// Chain identifier stamped into manifests.
    pub chain_id: u64,
    /// Treasury backend kind.
    pub backend: Backend,
}

/// Immutable table of networks the runtime can target.
#[derive(Debug, Clone)]
pub struct NetworkTable {
    networks: HashMap<String, NetworkSpec>,
}

impl NetworkTable {
    /// The built-in network table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut networks = HashMap::new();
        networks.insert(
            "local".to_string(),
            NetworkSpec {
                chain_id: 31_337,
                backend: Backend::DevChain,
            },
        );
        networks.insert(
            "base-sepolia".to_string(),
            NetworkSpec {
                chain_id: 84_532,
                backend: Backend::Rpc,
            },
        );
        Self { networks }
    }

    /// Looks up a network, failing fast on unknown names.
    pub fn get(&self, network: &str) -> Result<&NetworkSpec, ConfigError> {
        self.networks
            .get(network)
            .ok_or_else(|| ConfigError::UnsupportedNetwork(network.to_string()))
    }
}
