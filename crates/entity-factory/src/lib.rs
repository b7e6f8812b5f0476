//! # Entity Factory - Treasury Contract Boundary
//!
//! Port for the remote top-level treasury contract: deploy the registry,
//! create one sub-contract per beneficiary, and resolve a sub-contract's
//! address by display name.
//!
//! The contract's internal accounting is out of scope; this crate only
//! specifies the boundary and ships a deterministic in-process adapter
//! (`DevChainFactory`) for the local network and tests.
//!
//! ## Failure policy
//!
//! Registry deployment and entity creation are fatal operations: errors
//! propagate to the orchestrator, which aborts the run. Address lookup
//! distinguishes "not found" from transport failure.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dev_chain;
pub mod errors;
pub mod ports;

pub use dev_chain::DevChainFactory;
pub use errors::FactoryError;
pub use ports::EntityFactory;
