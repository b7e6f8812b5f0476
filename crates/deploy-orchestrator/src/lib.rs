//! # Deploy Orchestrator - Deployment and Naming Pipeline
//!
//! Sequences one orchestration run end to end:
//!
//! ```text
//! NotStarted ──deploy registry──→ RegistryDeployed
//!            ──create entities──→ EntitiesCreated
//!            ──bind names──────→ NamesAttempted
//!            ──persist manifest→ ManifestPersisted (terminal)
//! ```
//!
//! `Aborted` is reachable from the first three states on creation-time
//! fatal errors only. Naming failures never abort: they are recorded
//! per entity and the run still persists a complete manifest.
//!
//! Execution is cooperatively sequential; every remote call is awaited
//! before the next, entity order matches roster order, and already
//! created entities are never rolled back. An aborted run surfaces
//! `completed_so_far` so a retry tool can skip what already exists.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod manifest_store;
pub mod orchestrator;

pub use errors::{ManifestError, OrchestratorError, RunAborted};
pub use manifest_store::ManifestStore;
pub use orchestrator::{DeploymentOrchestrator, NetworkDescriptor, RunStage};
