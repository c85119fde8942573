use crate::error::{RegistryError, Result};
use crate::types::{pack_decimals, pack_flags, NewLendingPool, NewMetaPool, NewPlainPool};
use alloy_primitives::{Address, Selector};
use serde::Deserialize;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Deployment configuration loaded from JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    /// Address allowed to mutate the registry
    pub admin: Address,
    /// Pools to register at startup, in order
    #[serde(default)]
    pub pools: Vec<PoolDeployment>,
}

/// One pool entry of the deployment file
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolDeployment {
    /// Registered through `add_pool`
    Lending {
        pool: Address,
        n_coins: usize,
        lp_token: Address,
        #[serde(default)]
        rate_method: Option<Selector>,
        #[serde(default)]
        decimals: Vec<u8>,
        #[serde(default)]
        underlying_decimals: Vec<u8>,
        #[serde(default)]
        has_initial_a: bool,
        #[serde(default)]
        is_v1: bool,
    },
    /// Registered through `add_pool_without_underlying`
    Plain {
        pool: Address,
        n_coins: usize,
        lp_token: Address,
        #[serde(default)]
        rate_method: Option<Selector>,
        #[serde(default)]
        decimals: Vec<u8>,
        #[serde(default)]
        use_rates: Vec<bool>,
        #[serde(default)]
        has_initial_a: bool,
        #[serde(default)]
        is_v1: bool,
    },
    /// Registered through `add_metapool`
    Meta {
        pool: Address,
        n_coins: usize,
        lp_token: Address,
        #[serde(default)]
        decimals: Vec<u8>,
    },
}

impl PoolDeployment {
    pub fn pool(&self) -> Address {
        match self {
            PoolDeployment::Lending { pool, .. }
            | PoolDeployment::Plain { pool, .. }
            | PoolDeployment::Meta { pool, .. } => *pool,
        }
    }

    pub fn as_lending(&self) -> Option<NewLendingPool> {
        match self {
            PoolDeployment::Lending {
                pool,
                n_coins,
                lp_token,
                rate_method,
                decimals,
                underlying_decimals,
                has_initial_a,
                is_v1,
            } => Some(NewLendingPool {
                pool: *pool,
                n_coins: *n_coins,
                lp_token: *lp_token,
                rate_method: *rate_method,
                decimals: pack_decimals(decimals),
                underlying_decimals: pack_decimals(underlying_decimals),
                has_initial_a: *has_initial_a,
                is_v1: *is_v1,
            }),
            _ => None,
        }
    }

    pub fn as_plain(&self) -> Option<NewPlainPool> {
        match self {
            PoolDeployment::Plain {
                pool,
                n_coins,
                lp_token,
                rate_method,
                decimals,
                use_rates,
                has_initial_a,
                is_v1,
            } => Some(NewPlainPool {
                pool: *pool,
                n_coins: *n_coins,
                lp_token: *lp_token,
                rate_method: *rate_method,
                decimals: pack_decimals(decimals),
                use_rates: pack_flags(use_rates),
                has_initial_a: *has_initial_a,
                is_v1: *is_v1,
            }),
            _ => None,
        }
    }

    pub fn as_meta(&self) -> Option<NewMetaPool> {
        match self {
            PoolDeployment::Meta {
                pool,
                n_coins,
                lp_token,
                decimals,
            } => Some(NewMetaPool {
                pool: *pool,
                n_coins: *n_coins,
                lp_token: *lp_token,
                decimals: pack_decimals(decimals),
            }),
            _ => None,
        }
    }
}

impl DeploymentConfig {
    /// Load deployment configuration from JSON file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|_| RegistryError::DeploymentFileNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| RegistryError::DeploymentParseError(e.to_string()))
    }

    fn default_path(chain_id: u64) -> PathBuf {
        PathBuf::from(format!("deployments/{}.json", chain_id))
    }
}

/// Complete indexer configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    pub deployment: DeploymentConfig,
    /// Interval for logging live pool snapshots; `None` exits after bootstrap
    pub refresh_interval_secs: Option<u64>,
    /// Prometheus listener; `None` leaves metrics disabled
    pub metrics_address: Option<SocketAddr>,
}

impl RegistryConfig {
    /// Load configuration from environment variables and the deployment file
    pub fn load() -> Result<Self> {
        let chain_id = env::var("CHAIN_ID")
            .map_err(|_| RegistryError::MissingEnvVar("CHAIN_ID".to_string()))?
            .parse::<u64>()
            .map_err(|_| RegistryError::MissingEnvVar("CHAIN_ID (invalid format)".to_string()))?;

        let rpc_url = sanitize_url(
            &env::var("RPC_URL").map_err(|_| RegistryError::MissingEnvVar("RPC_URL".to_string()))?,
        );

        let path = env::var("DEPLOYMENT_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| DeploymentConfig::default_path(chain_id));
        let deployment = DeploymentConfig::load(&path)?;

        let refresh_interval_secs = env::var("REFRESH_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0);

        let metrics_address = match env::var("METRICS_PORT") {
            Ok(port) => Some(parse_metrics_address(
                &env::var("METRICS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                &port,
            )?),
            Err(_) => None,
        };

        Ok(Self {
            chain_id,
            rpc_url,
            deployment,
            refresh_interval_secs,
            metrics_address,
        })
    }
}

fn parse_metrics_address(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port
        .trim()
        .parse::<u16>()
        .map_err(|_| RegistryError::MissingEnvVar("METRICS_PORT (invalid format)".to_string()))?;
    format!("{}:{}", host.trim(), port)
        .parse()
        .map_err(|_| RegistryError::MissingEnvVar("METRICS_HOST (invalid format)".to_string()))
}

/// Remove surrounding quotes and whitespace
fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();
    let without_quotes = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    without_quotes.to_string()
}
