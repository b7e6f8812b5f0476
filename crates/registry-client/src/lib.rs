//! # Registry Client - Reverse-Name Binding
//!
//! Client for the hierarchical name-registry service. Wraps two remote
//! operations behind ports:
//!
//! | Port | Operation | Direction |
//! |------|-----------|-----------|
//! | `ReverseRegistrar` | bind reverse name to address | write |
//! | `NameResolver` | resolve node to address | read |
//!
//! Batch binding is strictly sequential with a pacing delay between
//! successive calls. The delay is deliberate backpressure against
//! remote rate limiting, applied whether or not the previous call
//! succeeded, and is modeled as an explicit [`PacingPolicy`] so the
//! dispatch discipline can change without touching call sites.
//!
//! Remote failures never escape [`RegistryClient::bind_reverse_name`];
//! they are folded into the returned `RegistrationOutcome`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod client;
pub mod config;
pub mod errors;
pub mod pacing;
pub mod ports;

pub use adapters::{InMemoryNameResolver, InMemoryReverseRegistrar};
pub use client::{BindEntry, RegistryClient};
pub use config::{ConfigError, EnsConfig, EnsNetworks};
pub use errors::RegistryError;
pub use pacing::{FixedDelay, NoDelay, PacingPolicy};
pub use ports::{NameResolver, ReverseRegistrar};
