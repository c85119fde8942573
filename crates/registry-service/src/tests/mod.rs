mod admin;

use alloy_primitives::{Address, Selector, U256};
use registry_chain::InMemoryChain;
use registry_core::types::{
    pack_decimals, Amounts, NewLendingPool, NewMetaPool, NewPlainPool, EMPTY_AMOUNTS,
    RATE_PRECISION,
};
use std::sync::Arc;

use crate::Registry;

pub(crate) const ALICE: Address = Address::repeat_byte(0xA1);
pub(crate) const BOB: Address = Address::repeat_byte(0xB0);

/// cToken-style `exchangeRateStored()`
pub(crate) const RATE_METHOD: Selector = Selector::new([0x18, 0x2d, 0xf0, 0xf5]);

pub(crate) fn amounts(values: &[u64]) -> Amounts {
    let mut amounts = EMPTY_AMOUNTS;
    for (slot, value) in amounts.iter_mut().zip(values) {
        *slot = U256::from(*value);
    }
    amounts
}

pub(crate) fn padded<T: Copy + Default>(values: &[T]) -> [T; 8] {
    let mut padded = [T::default(); 8];
    padded[..values.len()].copy_from_slice(values);
    padded
}

/// Lending pool: two rate-bearing wrapped coins and one plain coin
pub(crate) struct LendingFixture {
    pub chain: Arc<InMemoryChain>,
    pub registry: Registry,
    pub pool: Address,
    pub lp_token: Address,
    pub wrapped_coins: Vec<Address>,
    pub underlying_coins: Vec<Address>,
    pub wrapped_decimals: Vec<u8>,
    pub underlying_decimals: Vec<u8>,
}

impl LendingFixture {
    pub async fn new() -> Self {
        let chain = Arc::new(InMemoryChain::new());
        let pool = Address::repeat_byte(0x50);
        let lp_token = Address::repeat_byte(0x51);

        let underlying_coins = vec![
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x12),
            Address::repeat_byte(0x13),
        ];
        let wrapped_coins = vec![
            Address::repeat_byte(0x21),
            Address::repeat_byte(0x22),
            underlying_coins[2],
        ];
        let underlying_decimals = vec![18, 6, 6];
        let wrapped_decimals = vec![8, 8, 6];

        for (coin, decimals) in underlying_coins.iter().zip(&underlying_decimals) {
            chain.deploy_token(*coin, *decimals);
        }
        for (coin, decimals) in wrapped_coins[..2].iter().zip(&wrapped_decimals) {
            chain.deploy_rate_token(*coin, *decimals, RATE_PRECISION);
        }
        chain.deploy_token(lp_token, 18);
        chain.deploy_pool(pool, &wrapped_coins, &underlying_coins);

        let registry = Registry::new(ALICE, chain.clone());
        registry
            .add_pool(
                ALICE,
                NewLendingPool {
                    pool,
                    n_coins: 3,
                    lp_token,
                    rate_method: Some(RATE_METHOD),
                    decimals: pack_decimals(&wrapped_decimals),
                    underlying_decimals: pack_decimals(&underlying_decimals),
                    has_initial_a: true,
                    is_v1: false,
                },
            )
            .await
            .unwrap();

        Self {
            chain,
            registry,
            pool,
            lp_token,
            wrapped_coins,
            underlying_coins,
            wrapped_decimals,
            underlying_decimals,
        }
    }

    pub fn n_coins(&self) -> usize {
        self.wrapped_coins.len()
    }
}

/// Three-coin base pool with a two-coin meta-pool on top
pub(crate) struct MetaFixture {
    pub chain: Arc<InMemoryChain>,
    pub registry: Registry,
    pub base_pool: Address,
    pub meta_pool: Address,
    pub lp_token: Address,
    pub meta_lp_token: Address,
    pub base_coins: Vec<Address>,
    pub meta_coins: Vec<Address>,
    pub base_decimals: Vec<u8>,
    pub meta_decimals: Vec<u8>,
}

impl MetaFixture {
    pub async fn new() -> Self {
        let chain = Arc::new(InMemoryChain::new());
        let base_pool = Address::repeat_byte(0x60);
        let lp_token = Address::repeat_byte(0x61);
        let meta_pool = Address::repeat_byte(0x70);
        let meta_lp_token = Address::repeat_byte(0x71);

        let base_coins = vec![
            Address::repeat_byte(0x31),
            Address::repeat_byte(0x32),
            Address::repeat_byte(0x33),
        ];
        let base_decimals = vec![18, 6, 6];
        let meta_coins = vec![Address::repeat_byte(0x41), lp_token];
        let meta_decimals = vec![18, 18];

        for (coin, decimals) in base_coins.iter().zip(&base_decimals) {
            chain.deploy_token(*coin, *decimals);
        }
        chain.deploy_token(meta_coins[0], 18);
        chain.deploy_token(lp_token, 18);
        chain.deploy_token(meta_lp_token, 18);
        chain.deploy_pool(base_pool, &base_coins, &[]);
        chain.deploy_pool(meta_pool, &meta_coins, &[]);

        let registry = Registry::new(ALICE, chain.clone());
        registry
            .add_pool_without_underlying(
                ALICE,
                NewPlainPool {
                    pool: base_pool,
                    n_coins: 3,
                    lp_token,
                    rate_method: None,
                    decimals: pack_decimals(&base_decimals),
                    use_rates: Default::default(),
                    has_initial_a: true,
                    is_v1: false,
                },
            )
            .await
            .unwrap();
        registry
            .add_metapool(
                ALICE,
                NewMetaPool {
                    pool: meta_pool,
                    n_coins: 2,
                    lp_token: meta_lp_token,
                    decimals: pack_decimals(&meta_decimals),
                },
            )
            .await
            .unwrap();

        Self {
            chain,
            registry,
            base_pool,
            meta_pool,
            lp_token,
            meta_lp_token,
            base_coins,
            meta_coins,
            base_decimals,
            meta_decimals,
        }
    }

    pub fn n_coins(&self) -> usize {
        self.base_coins.len()
    }

    pub fn n_metacoins(&self) -> usize {
        self.meta_coins.len()
    }

    /// Give the base LP token a supply so meta underlying balances resolve
    pub fn seed_base_liquidity(&self) {
        self.chain.mint(self.lp_token, BOB, U256::from(1_000u64));
    }

    /// Meta coins except the LP coin, followed by the base coins
    pub fn underlying_coins(&self) -> Vec<Address> {
        let mut coins = self.meta_coins[..self.n_metacoins() - 1].to_vec();
        coins.extend(&self.base_coins);
        coins
    }
}
