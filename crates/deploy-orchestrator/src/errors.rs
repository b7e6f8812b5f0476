//! # Orchestrator Errors
//!
//! Taxonomy:
//!
//! - Fatal/abort: registry deployment failure, entity-creation failure,
//!   manifest persistence failure. Surfaced as [`RunAborted`], process
//!   exits non-zero, no manifest written.
//! - Recoverable/per-item: individual name-registration failures. Never
//!   appear here; they live in `RegistrationOutcome.error`.

use crate::orchestrator::RunStage;
use deployer_types::DeployedEntity;
use entity_factory::FactoryError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from manifest persistence.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A snapshot file with the same timestamp already exists. The
    /// store fails loudly rather than silently overwriting it.
    #[error("snapshot already exists: {0}")]
    SnapshotExists(PathBuf),

    /// Filesystem failure.
    #[error("manifest I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest could not be encoded or decoded.
    #[error("manifest serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fatal orchestration errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The treasury boundary failed.
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// An entity was reported created but did not resolve to a
    /// non-zero address.
    #[error("created entity \"{0}\" did not resolve to a usable address")]
    EntityUnresolved(String),

    /// Manifest persistence failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Reconciliation was requested but no prior run exists.
    #[error("no prior deployment manifest found")]
    NoPriorRun,
}

/// Terminal failure of one orchestration run.
///
/// Carries the entities created before the abort; the remote contracts
/// are not undone and no manifest is written for the run.
#[derive(Debug, Error)]
#[error("orchestration aborted at {stage}: {source}")]
pub struct RunAborted {
    /// Stage the run had reached when it failed.
    pub stage: RunStage,
    /// Entities created before the failure, in roster order.
    pub completed_so_far: Vec<DeployedEntity>,
    /// The fatal error.
    #[source]
    pub source: OrchestratorError,
}
