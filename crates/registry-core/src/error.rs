use alloy_primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Pool already registered: {0}")]
    DuplicatePool(Address),

    #[error("LP token already belongs to a registered pool: {0}")]
    DuplicateLpToken(Address),

    #[error("Base pool not registered for LP token: {0}")]
    UnknownBasePool(Address),

    #[error("Pool not registered: {0}")]
    NotRegistered(Address),

    #[error("No available market: pool={pool}, from={from}, to={to}")]
    NoMarket {
        pool: Address,
        from: Address,
        to: Address,
    },

    #[error("Caller is not the registry admin: {0}")]
    Unauthorized(Address),

    #[error("Unknown LP token: {0}")]
    UnknownLpToken(Address),

    #[error("Invalid coin count: {0}")]
    InvalidCoinCount(usize),

    #[error("No pending admin transfer")]
    NoPendingAdmin,

    #[error("Arithmetic failure for pool {pool}: {reason}")]
    Arithmetic { pool: Address, reason: &'static str },

    #[error("Chain call failed: {0}")]
    Chain(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Deployment file not found: {0}")]
    DeploymentFileNotFound(String),

    #[error("Failed to parse deployment file: {0}")]
    DeploymentParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::DuplicatePool(_) => "duplicate_pool",
            RegistryError::DuplicateLpToken(_) => "duplicate_lp_token",
            RegistryError::UnknownBasePool(_) => "unknown_base_pool",
            RegistryError::NotRegistered(_) => "not_registered",
            RegistryError::NoMarket { .. } => "no_market",
            RegistryError::Unauthorized(_) => "unauthorized",
            RegistryError::UnknownLpToken(_) => "unknown_lp_token",
            RegistryError::InvalidCoinCount(_) => "invalid_coin_count",
            RegistryError::NoPendingAdmin => "no_pending_admin",
            RegistryError::Arithmetic { .. } => "arithmetic",
            RegistryError::Chain(_) => "chain",
            RegistryError::MissingEnvVar(_)
            | RegistryError::DeploymentFileNotFound(_)
            | RegistryError::DeploymentParseError(_) => "config",
            RegistryError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
