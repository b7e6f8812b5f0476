//! # Deployer Types - Shared Value Objects and Records
//!
//! Domain primitives and record types shared across the deployment
//! pipeline. Value objects are defined by their value, not identity, and
//! are immutable once constructed.
//!
//! ## Components
//!
//! | Module | Contents |
//! |--------|----------|
//! | `value_objects` | `Address`, `TxHash`, `SignerContext` |
//! | `records` | `EntitySpec`, `DeployedEntity`, `RegistrationOutcome`, `DeploymentManifest` |
//!
//! Addresses and transaction hashes serialize as `0x`-prefixed hex
//! strings so the persisted manifest stays readable and diffable.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod records;
pub mod value_objects;

pub use records::{
    Deployment, DeployedEntity, DeploymentManifest, EntitySpec, ManifestEntry, NetworkInfo,
    RegistrationOutcome, RegistryContractInfo,
};
pub use value_objects::{Address, HexParseError, SignerContext, TxHash};
