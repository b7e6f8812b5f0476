//! # Factory Errors

use thiserror::Error;

/// Errors from the treasury contract boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// Deploying the top-level registry contract failed. Fatal to the
    /// whole orchestration.
    #[error("registry deployment failed: {0}")]
    RegistryDeployment(String),

    /// Creating one sub-contract failed. Fatal to the run; already
    /// created entities are not rolled back.
    #[error("entity creation failed for \"{name}\": {reason}")]
    EntityCreation {
        /// Display name of the entity being created.
        name: String,
        /// Remote failure reason.
        reason: String,
    },

    /// The address lookup call itself failed.
    #[error("address lookup failed for \"{0}\"")]
    Lookup(String),

    /// Creation preconditions not met (registry missing).
    #[error("registry not deployed")]
    RegistryNotDeployed,
}
