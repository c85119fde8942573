use alloy_primitives::{Address, Selector, U256};
use async_trait::async_trait;
use parking_lot::Mutex;
use registry_core::types::{PoolAbi, PoolParams, RATE_PRECISION};
use registry_core::{RegistryError, Result};
use std::collections::HashMap;

use crate::reader::ChainReader;

#[derive(Debug, Clone, Default)]
struct TokenState {
    decimals: u8,
    balances: HashMap<Address, U256>,
    total_supply: U256,
    /// Rate returned for any rate selector; tokens without one revert
    rate: Option<U256>,
}

#[derive(Debug, Clone, Default)]
struct PoolState {
    coins: Vec<Address>,
    underlying_coins: Vec<Address>,
    balances: Vec<U256>,
    params: PoolParams,
    virtual_price: U256,
}

#[derive(Debug, Default)]
struct ChainState {
    tokens: HashMap<Address, TokenState>,
    pools: HashMap<Address, PoolState>,
    native: HashMap<Address, U256>,
}

/// Mutable in-memory chain for tests.
///
/// Calls against addresses that were never deployed fail the way a view
/// call to an empty account reverts.
#[derive(Debug, Default)]
pub struct InMemoryChain {
    state: Mutex<ChainState>,
}

fn revert(what: &str, address: Address) -> RegistryError {
    RegistryError::Chain(format!("execution reverted: {} at {}", what, address))
}

impl InMemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy an ERC20 with the given decimals
    pub fn deploy_token(&self, token: Address, decimals: u8) {
        self.state.lock().tokens.insert(
            token,
            TokenState {
                decimals,
                ..Default::default()
            },
        );
    }

    /// Deploy a wrapped token that answers rate calls with `rate`
    pub fn deploy_rate_token(&self, token: Address, decimals: u8, rate: U256) {
        self.state.lock().tokens.insert(
            token,
            TokenState {
                decimals,
                rate: Some(rate),
                ..Default::default()
            },
        );
    }

    /// Deploy a pool; `underlying_coins` may be empty for pools without them
    pub fn deploy_pool(&self, pool: Address, coins: &[Address], underlying_coins: &[Address]) {
        let params = PoolParams {
            a: U256::from(100u64),
            future_a: U256::from(100u64),
            fee: U256::from(4_000_000u64),
            admin_fee: U256::from(5_000_000_000u64),
            ..Default::default()
        };
        self.state.lock().pools.insert(
            pool,
            PoolState {
                coins: coins.to_vec(),
                underlying_coins: underlying_coins.to_vec(),
                balances: vec![U256::ZERO; coins.len()],
                params,
                virtual_price: RATE_PRECISION,
            },
        );
    }

    pub fn set_exchange_rate(&self, token: Address, rate: U256) {
        if let Some(token) = self.state.lock().tokens.get_mut(&token) {
            token.rate = Some(rate);
        }
    }

    /// Balances the pool reports through `balances(i)`
    pub fn set_pool_balances(&self, pool: Address, balances: &[U256]) {
        if let Some(pool) = self.state.lock().pools.get_mut(&pool) {
            for (slot, balance) in pool.balances.iter_mut().zip(balances) {
                *slot = *balance;
            }
        }
    }

    pub fn set_virtual_price(&self, pool: Address, virtual_price: U256) {
        if let Some(pool) = self.state.lock().pools.get_mut(&pool) {
            pool.virtual_price = virtual_price;
        }
    }

    pub fn set_params(&self, pool: Address, params: PoolParams) {
        if let Some(pool) = self.state.lock().pools.get_mut(&pool) {
            pool.params = params;
        }
    }

    /// Ramp-free A change, like an admin forcing A and clearing the ramp
    pub fn set_a(&self, pool: Address, a: U256) {
        if let Some(pool) = self.state.lock().pools.get_mut(&pool) {
            pool.params.a = a;
            pool.params.future_a = U256::ZERO;
            pool.params.initial_a = U256::ZERO;
            pool.params.initial_a_time = U256::ZERO;
            pool.params.future_a_time = U256::ZERO;
        }
    }

    pub fn set_fees_and_owner(
        &self,
        pool: Address,
        fees: [U256; 4],
        future_owner: Address,
    ) {
        if let Some(pool) = self.state.lock().pools.get_mut(&pool) {
            let [fee, admin_fee, future_fee, future_admin_fee] = fees;
            pool.params.fee = fee;
            pool.params.admin_fee = admin_fee;
            pool.params.future_fee = future_fee;
            pool.params.future_admin_fee = future_admin_fee;
            pool.params.future_owner = future_owner;
        }
    }

    /// Mint `amount` of `token` to `holder`, growing the total supply
    pub fn mint(&self, token: Address, holder: Address, amount: U256) {
        if let Some(token) = self.state.lock().tokens.get_mut(&token) {
            let balance = token.balances.entry(holder).or_default();
            *balance = balance.saturating_add(amount);
            token.total_supply = token.total_supply.saturating_add(amount);
        }
    }

    /// Send native asset to `holder`
    pub fn transfer_native(&self, holder: Address, amount: U256) {
        let mut state = self.state.lock();
        let balance = state.native.entry(holder).or_default();
        *balance = balance.saturating_add(amount);
    }
}

#[async_trait]
impl ChainReader for InMemoryChain {
    async fn decimals(&self, token: Address) -> Result<u8> {
        self.state
            .lock()
            .tokens
            .get(&token)
            .map(|t| t.decimals)
            .ok_or_else(|| revert("decimals()", token))
    }

    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256> {
        self.state
            .lock()
            .tokens
            .get(&token)
            .map(|t| t.balances.get(&holder).copied().unwrap_or_default())
            .ok_or_else(|| revert("balanceOf()", token))
    }

    async fn native_balance(&self, holder: Address) -> Result<U256> {
        Ok(self.state.lock().native.get(&holder).copied().unwrap_or_default())
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        self.state
            .lock()
            .tokens
            .get(&token)
            .map(|t| t.total_supply)
            .ok_or_else(|| revert("totalSupply()", token))
    }

    async fn exchange_rate(&self, coin: Address, _method: Selector) -> Result<U256> {
        self.state
            .lock()
            .tokens
            .get(&coin)
            .and_then(|t| t.rate)
            .ok_or_else(|| revert("rate method", coin))
    }

    async fn pool_coin(&self, pool: Address, _abi: PoolAbi, i: usize) -> Result<Address> {
        self.state
            .lock()
            .pools
            .get(&pool)
            .and_then(|p| p.coins.get(i).copied())
            .ok_or_else(|| revert("coins()", pool))
    }

    async fn pool_underlying_coin(&self, pool: Address, _abi: PoolAbi, i: usize) -> Result<Address> {
        self.state
            .lock()
            .pools
            .get(&pool)
            .and_then(|p| p.underlying_coins.get(i).copied())
            .ok_or_else(|| revert("underlying_coins()", pool))
    }

    async fn pool_balance(&self, pool: Address, _abi: PoolAbi, i: usize) -> Result<U256> {
        self.state
            .lock()
            .pools
            .get(&pool)
            .and_then(|p| p.balances.get(i).copied())
            .ok_or_else(|| revert("balances()", pool))
    }

    async fn pool_params(&self, pool: Address, has_initial_a: bool) -> Result<PoolParams> {
        let mut params = self
            .state
            .lock()
            .pools
            .get(&pool)
            .map(|p| p.params)
            .ok_or_else(|| revert("A()", pool))?;
        if !has_initial_a {
            params.initial_a = U256::ZERO;
            params.initial_a_time = U256::ZERO;
            params.future_a_time = U256::ZERO;
        }
        Ok(params)
    }

    async fn virtual_price(&self, pool: Address) -> Result<U256> {
        self.state
            .lock()
            .pools
            .get(&pool)
            .map(|p| p.virtual_price)
            .ok_or_else(|| revert("get_virtual_price()", pool))
    }
}
