use alloy_primitives::{Address, U256};

use super::coins::{Amounts, Coins, Decimals};

/// Position of two coins within one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinIndices {
    pub i: usize,
    pub j: usize,
    /// Whether the positions refer to the underlying coin list
    pub is_underlying: bool,
}

impl CoinIndices {
    pub fn new(i: usize, j: usize, is_underlying: bool) -> Self {
        Self {
            i,
            j,
            is_underlying,
        }
    }
}

/// Amplification and fee parameters read from a pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolParams {
    pub a: U256,
    pub future_a: U256,
    pub fee: U256,
    pub admin_fee: U256,
    pub future_fee: U256,
    pub future_admin_fee: U256,
    pub future_owner: Address,
    pub initial_a: U256,
    pub initial_a_time: U256,
    pub future_a_time: U256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolCoins {
    pub coins: Coins,
    pub underlying_coins: Coins,
    pub decimals: Decimals,
    pub underlying_decimals: Decimals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolInfo {
    pub balances: Amounts,
    pub underlying_balances: Amounts,
    pub decimals: Decimals,
    pub underlying_decimals: Decimals,
    pub rates: Amounts,
    pub lp_token: Address,
    pub params: PoolParams,
}
