//! # Registry Errors
//!
//! Failures reported by the remote name-registry service.

use thiserror::Error;

/// Errors from remote registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The remote write call was rejected.
    #[error("registrar rejected call: {0}")]
    Rejected(String),

    /// The remote service could not be reached.
    #[error("registry unavailable: {0}")]
    Unavailable(String),

    /// The remote call timed out.
    #[error("registry call timed out after {0} ms")]
    Timeout(u64),
}
