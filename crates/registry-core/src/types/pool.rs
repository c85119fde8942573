use alloy_primitives::{Address, Selector};
use std::collections::BTreeSet;

use super::coins::{Coins, CoinPair, Decimals, MAX_COINS};

/// Which A-parameter interface a pool exposes, resolved once at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// Only `A()` and `future_A()`
    LegacyA,
    /// Also `initial_A()`, `initial_A_time()` and `future_A_time()`
    StandardA,
    /// Meta-pool; its last coin is the LP token of `base_pool`
    Meta {
        base_pool: Address,
        base_abi: PoolAbi,
    },
}

impl PoolKind {
    pub fn from_initial_a_flag(has_initial_a: bool) -> Self {
        if has_initial_a {
            PoolKind::StandardA
        } else {
            PoolKind::LegacyA
        }
    }

    pub fn has_initial_a(&self) -> bool {
        !matches!(self, PoolKind::LegacyA)
    }

    pub fn base_pool(&self) -> Option<Address> {
        match self {
            PoolKind::Meta { base_pool, .. } => Some(*base_pool),
            _ => None,
        }
    }
}

/// Argument width of the pool's indexed getters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolAbi {
    /// `coins(int128)`, `balances(int128)`
    V1,
    /// `coins(uint256)`, `balances(uint256)`
    Current,
}

impl PoolAbi {
    pub fn from_v1_flag(is_v1: bool) -> Self {
        if is_v1 {
            PoolAbi::V1
        } else {
            PoolAbi::Current
        }
    }
}

/// Where the exchange rate of one coin slot comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Constant 1e18
    Unit,
    /// Call the selector on the wrapped coin contract
    Method(Selector),
    /// Live virtual price of the meta-pool's base pool
    BaseVirtualPrice,
}

/// Static metadata of a registered pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRecord {
    pub address: Address,
    pub n_coins: usize,
    pub n_underlying_coins: usize,
    pub coins: Coins,
    pub underlying_coins: Coins,
    pub decimals: Decimals,
    pub underlying_decimals: Decimals,
    pub rates: [RateSource; MAX_COINS],
    pub kind: PoolKind,
    pub abi: PoolAbi,
    pub lp_token: Address,
}

impl PoolRecord {
    pub fn is_meta(&self) -> bool {
        matches!(self.kind, PoolKind::Meta { .. })
    }

    pub fn base_pool(&self) -> Option<Address> {
        self.kind.base_pool()
    }

    pub fn active_coins(&self) -> &[Address] {
        &self.coins[..self.n_coins]
    }

    pub fn active_underlying_coins(&self) -> &[Address] {
        &self.underlying_coins[..self.n_underlying_coins]
    }

    /// Every coin pair this pool owns in the registry-wide market index.
    ///
    /// Meta-pools own pairs among their own coins and between their coins
    /// (minus the shared LP coin) and the base pool's underlying coins. Pairs
    /// among the base coins stay with the base pool.
    pub fn coin_pairs(&self) -> BTreeSet<CoinPair> {
        let mut pairs = BTreeSet::new();
        let coins = self.active_coins();
        pairs.extend(all_pairs(coins));

        let underlying = self.active_underlying_coins();
        if self.is_meta() {
            let (meta, base) = underlying.split_at(self.n_coins.saturating_sub(1));
            for m in meta {
                pairs.extend(base.iter().filter_map(|b| CoinPair::new(*m, *b)));
            }
        } else {
            pairs.extend(all_pairs(underlying));
        }
        pairs
    }
}

fn all_pairs(coins: &[Address]) -> impl Iterator<Item = CoinPair> + '_ {
    coins.iter().enumerate().flat_map(move |(i, a)| {
        coins[i + 1..]
            .iter()
            .filter_map(move |b| CoinPair::new(*a, *b))
    })
}
