use alloy_primitives::{Address, Selector, B256};

/// Arguments for registering a pool with distinct wrapped and underlying coins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLendingPool {
    pub pool: Address,
    pub n_coins: usize,
    pub lp_token: Address,
    /// Rate getter called on each wrapped coin; `None` means every rate is 1e18
    pub rate_method: Option<Selector>,
    pub decimals: B256,
    pub underlying_decimals: B256,
    pub has_initial_a: bool,
    pub is_v1: bool,
}

/// Arguments for registering a pool whose underlying coins are its own coins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlainPool {
    pub pool: Address,
    pub n_coins: usize,
    pub lp_token: Address,
    pub rate_method: Option<Selector>,
    pub decimals: B256,
    /// Packed per-coin flags selecting which coins use `rate_method`
    pub use_rates: B256,
    pub has_initial_a: bool,
    pub is_v1: bool,
}

/// Arguments for registering a meta-pool over an already registered base pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMetaPool {
    pub pool: Address,
    pub n_coins: usize,
    pub lp_token: Address,
    pub decimals: B256,
}
