use alloy_primitives::Address;
use registry_chain::RpcChainReader;
use registry_core::{PoolDeployment, RegistryConfig, Result};
use registry_service::Registry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("registry_service=info".parse()?),
        )
        .init();

    info!("Pool registry indexer starting...");

    let config = match RegistryConfig::load() {
        Ok(config) => {
            info!(
                chain_id = config.chain_id,
                admin = ?config.deployment.admin,
                pools = config.deployment.pools.len(),
                "Configuration loaded from deployment"
            );
            config
        }
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Start Metrics server (if enabled)
    if let Some(address) = config.metrics_address {
        match registry_metrics::init() {
            Ok(handle) => {
                tokio::spawn(async move {
                    if let Err(e) = registry_metrics::serve(address, handle).await {
                        error!(error = %e, "Metrics server error");
                    }
                });
                info!(address = %address, "Metrics server started");
            }
            Err(e) => warn!(error = %e, "Failed to install metrics recorder"),
        }
    }

    let chain = match RpcChainReader::connect(&config.rpc_url) {
        Ok(chain) => Arc::new(chain),
        Err(e) => {
            error!(error = %e, "Failed to create RPC provider");
            std::process::exit(1);
        }
    };

    let admin = config.deployment.admin;
    let registry = Registry::new(admin, chain);

    let mut registered = 0usize;
    for deployment in &config.deployment.pools {
        match register(&registry, admin, deployment).await {
            Ok(()) => registered += 1,
            Err(e) => warn!(pool = ?deployment.pool(), error = %e, "Failed to register pool"),
        }
    }
    info!(
        registered,
        configured = config.deployment.pools.len(),
        "Bootstrap complete"
    );

    snapshot(&registry).await;

    let Some(secs) = config.refresh_interval_secs else {
        info!("No refresh interval set, exiting");
        return Ok(());
    };

    let mut interval = tokio::time::interval(Duration::from_secs(secs));
    interval.tick().await;
    loop {
        tokio::select! {
            _ = interval.tick() => snapshot(&registry).await,
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received (Ctrl+C)");
                break;
            }
        }
    }

    info!("Pool registry indexer shutdown complete");
    Ok(())
}

/// Replay one deployment entry through the matching registration call
async fn register(registry: &Registry, admin: Address, deployment: &PoolDeployment) -> Result<()> {
    if let Some(args) = deployment.as_lending() {
        registry.add_pool(admin, args).await
    } else if let Some(args) = deployment.as_plain() {
        registry.add_pool_without_underlying(admin, args).await
    } else if let Some(args) = deployment.as_meta() {
        registry.add_metapool(admin, args).await
    } else {
        Ok(())
    }
}

/// Log live state for every registered pool
async fn snapshot(registry: &Registry) {
    for index in 0..registry.pool_count() {
        let pool = registry.pool_list(index);
        match registry.get_pool_info(pool).await {
            Ok(info) => {
                let (n_coins, n_underlying_coins) = registry.get_n_coins(pool);
                info!(
                    pool = ?pool,
                    lp_token = ?info.lp_token,
                    n_coins,
                    n_underlying_coins,
                    balances = ?&info.balances[..n_coins],
                    underlying_balances = ?&info.underlying_balances[..n_underlying_coins],
                    a = %info.params.a,
                    fee = %info.params.fee,
                    "Pool snapshot"
                );
            }
            Err(e) => warn!(pool = ?pool, error = %e, "Failed to read pool state"),
        }
    }
}
