use alloy_primitives::Address;
use std::collections::HashMap;

/// LP token -> owning pool
#[derive(Debug, Default)]
pub struct LpTokenIndex {
    pools: HashMap<Address, Address>,
}

impl LpTokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lp_token: Address, pool: Address) {
        self.pools.insert(lp_token, pool);
    }

    /// Clears the entry only while it still points at `pool`
    pub fn remove(&mut self, lp_token: &Address, pool: &Address) {
        if self.pools.get(lp_token) == Some(pool) {
            self.pools.remove(lp_token);
        }
    }

    pub fn pool(&self, lp_token: &Address) -> Option<Address> {
        self.pools.get(lp_token).copied()
    }

    pub fn contains(&self, lp_token: &Address) -> bool {
        self.pools.contains_key(lp_token)
    }
}
