use alloy_primitives::{Address, Selector, U256};
use async_trait::async_trait;
use registry_core::types::{PoolAbi, PoolParams};
use registry_core::Result;

/// Live chain state the registry derives its values from.
///
/// Every method is a single view call; failures surface as
/// `RegistryError::Chain` and are never retried here.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// `token.decimals()`
    async fn decimals(&self, token: Address) -> Result<u8>;

    /// `token.balanceOf(holder)`
    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256>;

    /// Native asset balance of `holder`
    async fn native_balance(&self, holder: Address) -> Result<U256>;

    /// `token.totalSupply()`
    async fn total_supply(&self, token: Address) -> Result<U256>;

    /// Raw call of `method` on `coin`, decoded as a single uint256
    async fn exchange_rate(&self, coin: Address, method: Selector) -> Result<U256>;

    /// `pool.coins(i)`
    async fn pool_coin(&self, pool: Address, abi: PoolAbi, i: usize) -> Result<Address>;

    /// `pool.underlying_coins(i)`
    async fn pool_underlying_coin(&self, pool: Address, abi: PoolAbi, i: usize) -> Result<Address>;

    /// `pool.balances(i)`
    async fn pool_balance(&self, pool: Address, abi: PoolAbi, i: usize) -> Result<U256>;

    /// Amplification and fee parameters. The `initial_A` family is only
    /// queried when `has_initial_a` is set and is zero otherwise.
    async fn pool_params(&self, pool: Address, has_initial_a: bool) -> Result<PoolParams>;

    /// `pool.get_virtual_price()`
    async fn virtual_price(&self, pool: Address) -> Result<U256>;
}
