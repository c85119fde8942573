use alloy_primitives::Address;
use registry_core::types::{CoinIndices, CoinPair, Coins};
use registry_core::{RegistryError, Result};
use std::collections::HashMap;

/// Registry-wide market index: unordered coin pair -> owning pools
#[derive(Debug, Default)]
pub struct CoinIndex {
    /// Owners in registration order, most recent last
    markets: HashMap<CoinPair, Vec<Address>>,
}

impl CoinIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pool: Address, pairs: impl IntoIterator<Item = CoinPair>) {
        for pair in pairs {
            let owners = self.markets.entry(pair).or_default();
            if !owners.contains(&pool) {
                owners.push(pool);
            }
        }
    }

    /// Drops `pool` from every given pair, leaving other owners in place
    pub fn remove(&mut self, pool: &Address, pairs: impl IntoIterator<Item = CoinPair>) {
        for pair in pairs {
            if let Some(owners) = self.markets.get_mut(&pair) {
                owners.retain(|owner| owner != pool);
                if owners.is_empty() {
                    self.markets.remove(&pair);
                }
            }
        }
    }

    /// Most recently registered pool owning the pair
    pub fn find(&self, a: Address, b: Address) -> Option<Address> {
        self.find_at(a, b, 0)
    }

    /// `index`-th owner of the pair, counting back from the most recent one
    pub fn find_at(&self, a: Address, b: Address, index: usize) -> Option<Address> {
        let pair = CoinPair::new(a, b)?;
        self.markets
            .get(&pair)
            .and_then(|owners| owners.iter().rev().nth(index))
            .copied()
    }

    /// Whether any entry still references `pool`
    pub fn references(&self, pool: &Address) -> bool {
        self.markets.values().any(|owners| owners.contains(pool))
    }

    /// Number of indexed pairs
    pub fn pair_count(&self) -> usize {
        self.markets.len()
    }
}

/// Resolve the positions of `from` and `to` inside one pool.
///
/// The wrapped list is searched first, then the underlying list. Both coins
/// must sit in the same list; each list ends at its first zero slot.
pub fn resolve_coin_indices(
    pool: Address,
    coins: &Coins,
    underlying_coins: &Coins,
    from: Address,
    to: Address,
) -> Result<CoinIndices> {
    if let Some((i, j)) = positions(coins, from, to) {
        return Ok(CoinIndices::new(i, j, false));
    }
    positions(underlying_coins, from, to)
        .map(|(i, j)| CoinIndices::new(i, j, true))
        .ok_or(RegistryError::NoMarket { pool, from, to })
}

fn positions(list: &Coins, from: Address, to: Address) -> Option<(usize, usize)> {
    let active = list.iter().take_while(|coin| !coin.is_zero());
    let mut i = None;
    let mut j = None;
    for (x, coin) in active.enumerate() {
        if *coin == from {
            i = Some(x);
        } else if *coin == to {
            j = Some(x);
        }
        if let (Some(i), Some(j)) = (i, j) {
            return Some((i, j));
        }
    }
    None
}
