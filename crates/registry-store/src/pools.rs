use alloy_primitives::Address;
use registry_core::types::PoolRecord;
use std::collections::HashMap;

/// Pool records plus their registration order
#[derive(Debug, Default)]
pub struct PoolStore {
    /// Pool address -> record
    pools: HashMap<Address, PoolRecord>,
    /// Enumerable pool list; removal swaps the last entry into the gap
    pool_list: Vec<Address>,
}

impl PoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: PoolRecord) {
        if !self.pools.contains_key(&record.address) {
            self.pool_list.push(record.address);
        }
        self.pools.insert(record.address, record);
    }

    pub fn remove(&mut self, pool: &Address) -> Option<PoolRecord> {
        let record = self.pools.remove(pool)?;
        if let Some(position) = self.pool_list.iter().position(|p| p == pool) {
            self.pool_list.swap_remove(position);
        }
        Some(record)
    }

    pub fn get(&self, pool: &Address) -> Option<&PoolRecord> {
        self.pools.get(pool)
    }

    pub fn contains(&self, pool: &Address) -> bool {
        self.pools.contains_key(pool)
    }

    pub fn count(&self) -> usize {
        self.pool_list.len()
    }

    /// Pool at position `index` of the enumerable list
    pub fn at(&self, index: usize) -> Option<Address> {
        self.pool_list.get(index).copied()
    }

    pub fn addresses(&self) -> &[Address] {
        &self.pool_list
    }
}
