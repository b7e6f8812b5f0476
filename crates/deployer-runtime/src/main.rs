//! # Relief Treasury Deployer
//!
//! CLI entry point for the deployment-and-naming orchestrator.
//!
//! ## Usage
//!
//! ```text
//! deployer-runtime deploy <network>          # full orchestration run
//! deployer-runtime register-names <network>  # retry failed registrations
//! ```
//!
//! Exit status is non-zero when the run aborts (registry deployment or
//! entity creation failed, or configuration is invalid) and zero when a
//! manifest is persisted, even if some name registrations failed.

mod config;
mod roster;

use anyhow::{bail, Context, Result};
use deploy_orchestrator::{
    DeploymentOrchestrator, ManifestStore, NetworkDescriptor,
};
use deployer_types::{DeploymentManifest, SignerContext};
use entity_factory::DevChainFactory;
use registry_client::{
    EnsNetworks, FixedDelay, InMemoryReverseRegistrar, RegistryClient,
};
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{Backend, NetworkTable, RuntimeConfig};

/// Commands the runtime accepts.
enum Command {
    /// Full orchestration run against a network.
    Deploy(String),
    /// Reconciliation pass: re-attempt failed registrations from the
    /// latest manifest.
    RegisterNames(String),
}

fn parse_args() -> Option<Command> {
    let mut args = std::env::args().skip(1);
    let command = args.next()?;
    let network = args.next()?;
    match command.as_str() {
        "deploy" => Some(Command::Deploy(network)),
        "register-names" => Some(Command::RegisterNames(network)),
        _ => None,
    }
}

/// Wires the orchestrator for one network.
fn build_orchestrator(
    network_name: &str,
    runtime: &RuntimeConfig,
) -> Result<DeploymentOrchestrator<DevChainFactory, InMemoryReverseRegistrar>> {
    let table = NetworkTable::builtin();
    let spec = table
        .get(network_name)
        .with_context(|| format!("network {network_name:?} is not configured"))?;
    let ens = EnsNetworks::builtin()
        .get(network_name)
        .context("network has no name-registry configuration")?
        .clone();

    match spec.backend {
        Backend::DevChain => {}
        Backend::Rpc => bail!(
            "network {network_name:?} requires a JSON-RPC treasury adapter, \
             which is not wired into this build"
        ),
    }

    let descriptor = NetworkDescriptor {
        name: network_name.to_string(),
        chain_id: spec.chain_id,
    };
    let client = RegistryClient::new(
        Arc::new(InMemoryReverseRegistrar::new()),
        Box::new(FixedDelay::from_millis(runtime.inter_call_delay_ms)),
        ens,
    );
    Ok(DeploymentOrchestrator::new(
        DevChainFactory::new(),
        client,
        ManifestStore::new(&runtime.deployments_dir),
        descriptor,
    ))
}

fn summarize(manifest: &DeploymentManifest) {
    info!(
        registry = %manifest.registry_contract.address,
        network = %manifest.network.name,
        "deployment summary"
    );
    for (index, entry) in manifest.entities.iter().enumerate() {
        if entry.registration.success {
            info!(
                index,
                name = %entry.entity.display_name,
                contract = %entry.entity.contract_address,
                registered_name = %entry.entity.registered_name,
                "entity deployed and named"
            );
        } else {
            warn!(
                index,
                name = %entry.entity.display_name,
                contract = %entry.entity.contract_address,
                registered_name = %entry.entity.registered_name,
                error = entry.registration.error.as_deref().unwrap_or("unknown"),
                "entity deployed but name registration failed"
            );
        }
    }
    let failed = manifest.unregistered().len();
    if failed > 0 {
        warn!(
            failed,
            "some names failed to register; run `register-names` to retry them"
        );
    }
}

async fn deploy(network: &str) -> Result<()> {
    let runtime = RuntimeConfig::load();
    let orchestrator = build_orchestrator(network, &runtime)?;
    let signer = SignerContext::new(runtime.deployer_address);

    match orchestrator.run(&signer, &roster::default_entities()).await {
        Ok(manifest) => {
            summarize(&manifest);
            Ok(())
        }
        Err(aborted) => {
            error!(
                stage = %aborted.stage,
                created_before_abort = aborted.completed_so_far.len(),
                "orchestration aborted; created entities were not rolled back"
            );
            for entity in &aborted.completed_so_far {
                warn!(
                    name = %entity.display_name,
                    contract = %entity.contract_address,
                    "entity exists on chain but is not recorded in any manifest"
                );
            }
            Err(aborted.into())
        }
    }
}

async fn register_names(network: &str) -> Result<()> {
    let runtime = RuntimeConfig::load();
    let orchestrator = build_orchestrator(network, &runtime)?;
    let signer = SignerContext::new(runtime.deployer_address);

    let manifest = orchestrator
        .reconcile_names(&signer)
        .await
        .context("name reconciliation failed")?;
    summarize(&manifest);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Some(command) = parse_args() else {
        eprintln!("usage: deployer-runtime <deploy|register-names> <network>");
        std::process::exit(2);
    };

    match command {
        Command::Deploy(network) => deploy(&network).await,
        Command::RegisterNames(network) => register_names(&network).await,
    }
}
