//! # Registry Client
//!
//! Sequential reverse-name binder. Single writes fold remote failures
//! into `RegistrationOutcome`; batch writes dispatch strictly in input
//! order with the configured pacing delay between calls.

use crate::config::EnsConfig;
use crate::errors::RegistryError;
use crate::pacing::PacingPolicy;
use crate::ports::{NameResolver, ReverseRegistrar};
use deployer_types::{Address, RegistrationOutcome, SignerContext};
use ens_naming::namehash;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One address/name pair queued for reverse binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindEntry {
    /// Address to bind the name to.
    pub address: Address,
    /// Full registered name, e.g. `kathmandu-flood-relief.eth`.
    pub registered_name: String,
}

/// Client for the remote reverse registrar.
///
/// Holds the per-network configuration and the pacing policy; the
/// remote itself sits behind the [`ReverseRegistrar`] port. No local
/// state is mutated by any call.
pub struct RegistryClient<R: ReverseRegistrar> {
    registrar: Arc<R>,
    pacing: Box<dyn PacingPolicy>,
    config: EnsConfig,
    resolver: Option<Arc<dyn NameResolver>>,
}

impl<R: ReverseRegistrar> RegistryClient<R> {
    /// Creates a client over a registrar port with an explicit pacing
    /// policy and network configuration.
    pub fn new(registrar: Arc<R>, pacing: Box<dyn PacingPolicy>, config: EnsConfig) -> Self {
        Self {
            registrar,
            pacing,
            config,
            resolver: None,
        }
    }

    /// Attaches a forward resolver for read-only lookups.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn NameResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// The network configuration this client was constructed with.
    #[must_use]
    pub fn config(&self) -> &EnsConfig {
        &self.config
    }

    /// Resolves a registered name to an address via the node
    /// identifier of the dotted name.
    ///
    /// # Errors
    ///
    /// Fails when no resolver is attached or the remote read fails.
    pub async fn resolve_name(
        &self,
        registered_name: &str,
    ) -> Result<Option<Address>, RegistryError> {
        let resolver = self.resolver.as_ref().ok_or_else(|| {
            RegistryError::Unavailable("no resolver configured for this network".to_string())
        })?;
        resolver.resolve(namehash(registered_name)).await
    }

    /// Binds one reverse name, folding any remote failure into the
    /// returned outcome.
    ///
    /// This is the error boundary for the naming subsystem: nothing
    /// propagates past it.
    pub async fn bind_reverse_name(
        &self,
        signer: &SignerContext,
        address: Address,
        registered_name: &str,
    ) -> RegistrationOutcome {
        debug!(%address, registered_name, "binding reverse name");
        match self
            .registrar
            .set_name(signer, address, registered_name)
            .await
        {
            Ok(tx_hash) => {
                info!(%address, registered_name, %tx_hash, "reverse name bound");
                RegistrationOutcome::succeeded(registered_name.to_string(), address, tx_hash)
            }
            Err(e) => {
                warn!(%address, registered_name, error = %e, "reverse name binding failed");
                RegistrationOutcome::failed(registered_name.to_string(), address, e.to_string())
            }
        }
    }

    /// Binds every entry strictly sequentially, pacing between calls.
    ///
    /// The delay is applied between successive calls whether or not the
    /// previous call succeeded. The result has exactly one outcome per
    /// entry, in input order.
    pub async fn bind_multiple(
        &self,
        signer: &SignerContext,
        entries: &[BindEntry],
    ) -> Vec<RegistrationOutcome> {
        let mut outcomes = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let delay = self.pacing.delay_before(index);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let outcome = self
                .bind_reverse_name(signer, entry.address, &entry.registered_name)
                .await;
            outcomes.push(outcome);
        }
        outcomes
    }
}
