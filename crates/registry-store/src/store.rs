use alloy_primitives::Address;
use parking_lot::RwLock;
use registry_core::types::{CoinIndices, PoolRecord};
use registry_core::{RegistryError, Result};
use std::time::Instant;
use tracing::debug;

use crate::coin_index::{resolve_coin_indices, CoinIndex};
use crate::lp_tokens::LpTokenIndex;
use crate::pools::PoolStore;

/// All registry indexes, always mutated together
#[derive(Debug, Default)]
pub struct RegistryState {
    pub pools: PoolStore,
    pub markets: CoinIndex,
    pub lp_tokens: LpTokenIndex,
}

/// Thread-safe registry state.
///
/// Every mutation takes the write lock once and updates the pool records,
/// the market index and the LP token index before releasing it, so readers
/// never see a half-applied registration or removal.
#[derive(Debug, Default)]
pub struct RegistryStore {
    state: RwLock<RegistryState>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pool record and all of its index entries
    pub fn insert_pool(&self, record: PoolRecord) -> Result<()> {
        let start = Instant::now();
        let pool = record.address;
        let mut state = self.state.write();

        if state.pools.contains(&pool) {
            return Err(RegistryError::DuplicatePool(pool));
        }
        if let Some(base_pool) = record.base_pool() {
            if !state.pools.contains(&base_pool) {
                return Err(RegistryError::UnknownBasePool(record.coins[record.n_coins.saturating_sub(1)]));
            }
        }
        if state.lp_tokens.contains(&record.lp_token) {
            return Err(RegistryError::DuplicateLpToken(record.lp_token));
        }

        let pairs = record.coin_pairs();
        let pair_count = pairs.len();
        state.markets.insert(pool, pairs);
        state.lp_tokens.insert(record.lp_token, pool);
        state.pools.insert(record);

        debug!(
            pool = ?pool,
            coin_pairs = pair_count,
            total_pools = state.pools.count(),
            insert_us = start.elapsed().as_micros(),
            "Pool inserted into registry store"
        );
        Ok(())
    }

    /// Remove a pool record and every index entry it contributed
    pub fn remove_pool(&self, pool: &Address) -> Result<PoolRecord> {
        let start = Instant::now();
        let mut state = self.state.write();

        let record = state
            .pools
            .remove(pool)
            .ok_or(RegistryError::NotRegistered(*pool))?;
        state.markets.remove(pool, record.coin_pairs());
        state.lp_tokens.remove(&record.lp_token, pool);

        debug!(
            pool = ?pool,
            total_pools = state.pools.count(),
            indexed_pairs = state.markets.pair_count(),
            remove_us = start.elapsed().as_micros(),
            "Pool removed from registry store"
        );
        Ok(record)
    }

    /// Snapshot of a pool record
    pub fn get(&self, pool: &Address) -> Option<PoolRecord> {
        self.state.read().pools.get(pool).cloned()
    }

    pub fn contains(&self, pool: &Address) -> bool {
        self.state.read().pools.contains(pool)
    }

    pub fn pool_from_lp_token(&self, lp_token: &Address) -> Option<Address> {
        self.state.read().lp_tokens.pool(lp_token)
    }

    pub fn find_pool_for_coins(&self, a: Address, b: Address, index: usize) -> Option<Address> {
        self.state.read().markets.find_at(a, b, index)
    }

    /// Coin positions resolved against the pool's current record.
    /// Unknown pools resolve against empty coin lists and fail.
    pub fn coin_indices(&self, pool: Address, from: Address, to: Address) -> Result<CoinIndices> {
        let state = self.state.read();
        match state.pools.get(&pool) {
            Some(record) => {
                resolve_coin_indices(pool, &record.coins, &record.underlying_coins, from, to)
            }
            None => Err(RegistryError::NoMarket { pool, from, to }),
        }
    }

    pub fn pool_count(&self) -> usize {
        self.state.read().pools.count()
    }

    pub fn pool_at(&self, index: usize) -> Option<Address> {
        self.state.read().pools.at(index)
    }

    pub fn pool_addresses(&self) -> Vec<Address> {
        self.state.read().pools.addresses().to_vec()
    }

    pub fn coin_pair_count(&self) -> usize {
        self.state.read().markets.pair_count()
    }

    /// Whether the market index still references `pool` anywhere
    pub fn is_indexed(&self, pool: &Address) -> bool {
        self.state.read().markets.references(pool)
    }
}
