use alloy_primitives::{Address, U256};
use parking_lot::RwLock;
use registry_chain::ChainReader;
use registry_core::types::{
    Amounts, CoinIndices, Coins, Decimals, PoolCoins, PoolInfo, PoolParams, PoolRecord,
    EMPTY_AMOUNTS, EMPTY_COINS, MAX_COINS,
};
use registry_core::{RegistryError, Result};
use registry_resolver::Resolver;
use registry_store::RegistryStore;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ownership::AdminState;

/// Pool registry mirroring the on-chain one.
///
/// Mutations are admitted one at a time through `writer` and restricted to
/// the admin. Queries read a snapshot of the stored record and derive live
/// values through the [`Resolver`].
pub struct Registry {
    pub(crate) store: Arc<RegistryStore>,
    pub(crate) resolver: Resolver,
    pub(crate) admin: RwLock<AdminState>,
    pub(crate) writer: Mutex<()>,
}

impl Registry {
    pub fn new(admin: Address, chain: Arc<dyn ChainReader>) -> Self {
        Self::with_store(admin, chain, Arc::new(RegistryStore::new()))
    }

    pub fn with_store(admin: Address, chain: Arc<dyn ChainReader>, store: Arc<RegistryStore>) -> Self {
        Self {
            store,
            resolver: Resolver::new(chain),
            admin: RwLock::new(AdminState {
                admin,
                future_admin: None,
            }),
            writer: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<RegistryStore> {
        &self.store
    }

    pub(crate) fn chain(&self) -> &Arc<dyn ChainReader> {
        self.resolver.chain()
    }

    fn record(&self, pool: &Address) -> Option<PoolRecord> {
        self.store.get(pool)
    }

    fn registered(&self, pool: &Address) -> Result<PoolRecord> {
        self.record(pool).ok_or(RegistryError::NotRegistered(*pool))
    }

    /// Most recently registered pool trading `from` against `to`, or zero
    pub fn find_pool_for_coins(&self, from: Address, to: Address) -> Address {
        self.find_pool_for_coins_at(from, to, 0)
    }

    /// `index`-th pool trading the pair, newest first, or zero
    pub fn find_pool_for_coins_at(&self, from: Address, to: Address, index: usize) -> Address {
        self.store
            .find_pool_for_coins(from, to, index)
            .unwrap_or_default()
    }

    pub fn pool_count(&self) -> usize {
        self.store.pool_count()
    }

    pub fn pool_list(&self, index: usize) -> Address {
        self.store.pool_at(index).unwrap_or_default()
    }

    /// `(n_coins, n_underlying_coins)`, zeros for unknown pools
    pub fn get_n_coins(&self, pool: Address) -> (usize, usize) {
        self.record(&pool)
            .map(|r| (r.n_coins, r.n_underlying_coins))
            .unwrap_or_default()
    }

    pub fn get_coins(&self, pool: Address) -> Coins {
        self.record(&pool).map_or(EMPTY_COINS, |r| r.coins)
    }

    pub fn get_underlying_coins(&self, pool: Address) -> Coins {
        self.record(&pool).map_or(EMPTY_COINS, |r| r.underlying_coins)
    }

    pub fn get_decimals(&self, pool: Address) -> Decimals {
        self.record(&pool).map_or([0; MAX_COINS], |r| r.decimals)
    }

    pub fn get_underlying_decimals(&self, pool: Address) -> Decimals {
        self.record(&pool)
            .map_or([0; MAX_COINS], |r| r.underlying_decimals)
    }

    pub fn get_pool_coins(&self, pool: Address) -> PoolCoins {
        self.record(&pool)
            .map(|r| PoolCoins {
                coins: r.coins,
                underlying_coins: r.underlying_coins,
                decimals: r.decimals,
                underlying_decimals: r.underlying_decimals,
            })
            .unwrap_or_default()
    }

    pub fn get_lp_token(&self, pool: Address) -> Address {
        self.record(&pool).map(|r| r.lp_token).unwrap_or_default()
    }

    pub fn get_pool_from_lp_token(&self, lp_token: Address) -> Address {
        self.store.pool_from_lp_token(&lp_token).unwrap_or_default()
    }

    /// Positions of two coins in one pool; fails with `NoMarket` when the
    /// pool cannot swap them
    pub fn get_coin_indices(&self, pool: Address, from: Address, to: Address) -> Result<CoinIndices> {
        self.store.coin_indices(pool, from, to)
    }

    /// Live rates; zeros for unknown pools
    pub async fn get_rates(&self, pool: Address) -> Result<Amounts> {
        match self.record(&pool) {
            Some(record) => self.observe(self.resolver.rates(&record).await),
            None => Ok(EMPTY_AMOUNTS),
        }
    }

    pub async fn get_balances(&self, pool: Address) -> Result<Amounts> {
        let record = self.registered(&pool)?;
        self.observe(self.resolver.balances(&record).await)
    }

    pub async fn get_underlying_balances(&self, pool: Address) -> Result<Amounts> {
        let record = self.registered(&pool)?;
        self.observe(self.resolver.underlying_balances(&record).await)
    }

    pub async fn get_admin_balances(&self, pool: Address) -> Result<Amounts> {
        let record = self.registered(&pool)?;
        self.observe(self.resolver.admin_balances(&record).await)
    }

    /// Live pool parameters; zeros for unknown pools
    pub async fn get_parameters(&self, pool: Address) -> Result<PoolParams> {
        match self.record(&pool) {
            Some(record) => self.observe(self.resolver.params(&record).await),
            None => Ok(PoolParams::default()),
        }
    }

    pub async fn get_a(&self, pool: Address) -> Result<U256> {
        Ok(self.get_parameters(pool).await?.a)
    }

    /// `(fee, admin_fee)`
    pub async fn get_fees(&self, pool: Address) -> Result<(U256, U256)> {
        let params = self.get_parameters(pool).await?;
        Ok((params.fee, params.admin_fee))
    }

    pub async fn get_virtual_price_from_lp_token(&self, lp_token: Address) -> Result<U256> {
        let pool = self
            .store
            .pool_from_lp_token(&lp_token)
            .ok_or(RegistryError::UnknownLpToken(lp_token))?;
        self.observe(self.resolver.virtual_price(pool).await)
    }

    pub async fn get_pool_info(&self, pool: Address) -> Result<PoolInfo> {
        let record = self.registered(&pool)?;
        self.observe(self.resolver.pool_info(&record).await)
    }

    /// Count failed chain reads before handing the result back
    pub(crate) fn observe<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(RegistryError::Chain(_)) = &result {
            registry_metrics::counters::chain_errors(1);
        }
        result
    }
}
