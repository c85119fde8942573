pub mod config;
pub mod error;
pub mod types;

pub use config::{DeploymentConfig, PoolDeployment, RegistryConfig};
pub use error::{RegistryError, Result};
