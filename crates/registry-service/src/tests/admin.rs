use alloy_primitives::{Address, B256, U256};
use registry_chain::InMemoryChain;
use registry_core::types::{pack_flags, NewMetaPool, NewPlainPool, EMPTY_AMOUNTS, NATIVE_ASSET, RATE_PRECISION};
use registry_core::RegistryError;
use std::sync::Arc;

use super::{padded, MetaFixture, ALICE, BOB, RATE_METHOD};
use crate::Registry;

fn plain(pool: Address, n_coins: usize, lp_token: Address) -> NewPlainPool {
    NewPlainPool {
        pool,
        n_coins,
        lp_token,
        rate_method: None,
        decimals: B256::ZERO,
        use_rates: B256::ZERO,
        has_initial_a: false,
        is_v1: false,
    }
}

/// Deploy a plain pool over fresh 18-decimal tokens
fn deploy_plain(chain: &InMemoryChain, seed: u8, n_coins: usize) -> (Address, Vec<Address>, Address) {
    let pool = Address::with_last_byte(seed);
    let lp_token = Address::repeat_byte(seed);
    let coins: Vec<Address> = (0..n_coins)
        .map(|k| {
            let mut bytes = [0u8; 20];
            bytes[0] = seed;
            bytes[19] = k as u8 + 1;
            Address::from(bytes)
        })
        .collect();
    for coin in &coins {
        chain.deploy_token(*coin, 18);
    }
    chain.deploy_token(lp_token, 18);
    chain.deploy_pool(pool, &coins, &[]);
    (pool, coins, lp_token)
}

#[tokio::test]
async fn test_unauthorized_add() {
    let chain = Arc::new(InMemoryChain::new());
    let (pool, coins, lp_token) = deploy_plain(&chain, 0x80, 2);
    let registry = Registry::new(ALICE, chain);

    let err = registry
        .add_pool_without_underlying(BOB, plain(pool, 2, lp_token))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Unauthorized(caller) if caller == BOB));
    assert_eq!(registry.pool_count(), 0);
    assert_eq!(registry.find_pool_for_coins(coins[0], coins[1]), Address::ZERO);
}

#[tokio::test]
async fn test_duplicate_pool() {
    let chain = Arc::new(InMemoryChain::new());
    let (pool, _, lp_token) = deploy_plain(&chain, 0x80, 2);
    let registry = Registry::new(ALICE, chain);

    registry
        .add_pool_without_underlying(ALICE, plain(pool, 2, lp_token))
        .await
        .unwrap();
    let err = registry
        .add_pool_without_underlying(ALICE, plain(pool, 2, lp_token))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicatePool(p) if p == pool));
    assert_eq!(registry.pool_count(), 1);
}

#[tokio::test]
async fn test_invalid_coin_count() {
    let chain = Arc::new(InMemoryChain::new());
    let (pool, _, lp_token) = deploy_plain(&chain, 0x80, 2);
    let registry = Registry::new(ALICE, chain);

    for n_coins in [0, 1, 9] {
        let err = registry
            .add_pool_without_underlying(ALICE, plain(pool, n_coins, lp_token))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCoinCount(n) if n == n_coins));
    }
}

#[tokio::test]
async fn test_failed_chain_read_leaves_no_state() {
    let chain = Arc::new(InMemoryChain::new());
    let (pool, coins, lp_token) = deploy_plain(&chain, 0x80, 2);
    let registry = Registry::new(ALICE, chain);

    // the pool only has two coins
    let err = registry
        .add_pool_without_underlying(ALICE, plain(pool, 3, lp_token))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Chain(_)));
    assert_eq!(registry.pool_count(), 0);
    assert_eq!(registry.get_pool_from_lp_token(lp_token), Address::ZERO);
    assert_eq!(registry.find_pool_for_coins(coins[0], coins[1]), Address::ZERO);
}

#[tokio::test]
async fn test_metapool_requires_registered_base() {
    let chain = Arc::new(InMemoryChain::new());
    let (_, _, base_lp) = deploy_plain(&chain, 0x80, 3);
    let meta_pool = Address::repeat_byte(0x90);
    let meta_coin = Address::repeat_byte(0x91);
    chain.deploy_token(meta_coin, 18);
    chain.deploy_pool(meta_pool, &[meta_coin, base_lp], &[]);
    let registry = Registry::new(ALICE, chain);

    let err = registry
        .add_metapool(
            ALICE,
            NewMetaPool {
                pool: meta_pool,
                n_coins: 2,
                lp_token: Address::repeat_byte(0x92),
                decimals: B256::ZERO,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownBasePool(lp) if lp == base_lp));
    assert_eq!(registry.pool_count(), 0);
}

#[tokio::test]
async fn test_metapool_too_many_underlying_coins() {
    let chain = Arc::new(InMemoryChain::new());
    let (base_pool, _, base_lp) = deploy_plain(&chain, 0x80, 8);
    let meta_pool = Address::repeat_byte(0x90);
    let meta_coin = Address::repeat_byte(0x91);
    chain.deploy_token(meta_coin, 18);
    chain.deploy_pool(meta_pool, &[meta_coin, base_lp], &[]);
    let registry = Registry::new(ALICE, chain);

    registry
        .add_pool_without_underlying(ALICE, plain(base_pool, 8, base_lp))
        .await
        .unwrap();
    let err = registry
        .add_metapool(
            ALICE,
            NewMetaPool {
                pool: meta_pool,
                n_coins: 2,
                lp_token: Address::repeat_byte(0x92),
                decimals: B256::ZERO,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidCoinCount(9)));
}

#[tokio::test]
async fn test_native_coin() {
    let chain = Arc::new(InMemoryChain::new());
    let pool = Address::repeat_byte(0x80);
    let lp_token = Address::repeat_byte(0x81);
    let token = Address::repeat_byte(0x82);
    chain.deploy_token(token, 6);
    chain.deploy_token(lp_token, 18);
    chain.deploy_pool(pool, &[NATIVE_ASSET, token], &[]);
    let registry = Registry::new(ALICE, chain.clone());

    registry
        .add_pool_without_underlying(ALICE, plain(pool, 2, lp_token))
        .await
        .unwrap();
    assert_eq!(registry.get_decimals(pool), padded::<u8>(&[18, 6]));

    chain.transfer_native(pool, U256::from(1000u64));
    chain.mint(token, pool, U256::from(500u64));
    chain.set_pool_balances(pool, &[U256::from(400u64), U256::from(500u64)]);

    let mut expected = EMPTY_AMOUNTS;
    expected[0] = U256::from(600u64);
    assert_eq!(registry.get_admin_balances(pool).await.unwrap(), expected);
}

#[tokio::test]
async fn test_plain_pool_with_rates() {
    let chain = Arc::new(InMemoryChain::new());
    let pool = Address::repeat_byte(0x80);
    let lp_token = Address::repeat_byte(0x81);
    let coins = [Address::repeat_byte(0x82), Address::repeat_byte(0x83)];
    let rate = RATE_PRECISION * U256::from(2u64);
    chain.deploy_token(coins[0], 18);
    chain.deploy_rate_token(coins[1], 18, rate);
    chain.deploy_token(lp_token, 18);
    chain.deploy_pool(pool, &coins, &[]);
    let registry = Registry::new(ALICE, chain);

    let mut args = plain(pool, 2, lp_token);
    args.rate_method = Some(RATE_METHOD);
    args.use_rates = pack_flags(&[false, true]);
    registry.add_pool_without_underlying(ALICE, args).await.unwrap();

    let mut expected = EMPTY_AMOUNTS;
    expected[0] = RATE_PRECISION;
    expected[1] = rate;
    assert_eq!(registry.get_rates(pool).await.unwrap(), expected);
    assert_eq!(registry.get_underlying_coins(pool), registry.get_coins(pool));
}

#[tokio::test]
async fn test_find_pool_prefers_latest() {
    let chain = Arc::new(InMemoryChain::new());
    let coins = [Address::repeat_byte(0x82), Address::repeat_byte(0x83)];
    for coin in coins {
        chain.deploy_token(coin, 18);
    }
    let first = Address::repeat_byte(0x80);
    let second = Address::repeat_byte(0x90);
    chain.deploy_pool(first, &coins, &[]);
    chain.deploy_pool(second, &coins, &[]);
    let registry = Registry::new(ALICE, chain);

    registry
        .add_pool_without_underlying(ALICE, plain(first, 2, Address::repeat_byte(0x81)))
        .await
        .unwrap();
    registry
        .add_pool_without_underlying(ALICE, plain(second, 2, Address::repeat_byte(0x91)))
        .await
        .unwrap();

    assert_eq!(registry.find_pool_for_coins(coins[0], coins[1]), second);
    assert_eq!(registry.find_pool_for_coins_at(coins[1], coins[0], 1), first);

    registry.remove_pool(ALICE, second).await.unwrap();
    assert_eq!(registry.find_pool_for_coins(coins[0], coins[1]), first);
    assert_eq!(registry.pool_list(0), first);
}

#[tokio::test]
async fn test_removing_base_keeps_meta_pool() {
    let f = MetaFixture::new().await;
    f.registry.remove_pool(ALICE, f.base_pool).await.unwrap();

    assert_eq!(f.registry.pool_count(), 1);
    assert_eq!(
        f.registry.find_pool_for_coins(f.meta_coins[0], f.base_coins[0]),
        f.meta_pool
    );
    assert_eq!(
        f.registry.find_pool_for_coins(f.base_coins[0], f.base_coins[1]),
        Address::ZERO
    );
}

#[tokio::test]
async fn test_ownership_transfer() {
    let chain = Arc::new(InMemoryChain::new());
    let registry = Registry::new(ALICE, chain);

    assert!(matches!(
        registry.commit_transfer_ownership(BOB, BOB).await,
        Err(RegistryError::Unauthorized(_))
    ));
    assert!(matches!(
        registry.apply_transfer_ownership(ALICE).await,
        Err(RegistryError::NoPendingAdmin)
    ));

    registry.commit_transfer_ownership(ALICE, BOB).await.unwrap();
    assert_eq!(registry.future_admin(), Some(BOB));
    assert_eq!(registry.admin(), ALICE);

    registry.revert_transfer_ownership(ALICE).await.unwrap();
    assert_eq!(registry.future_admin(), None);

    registry.commit_transfer_ownership(ALICE, BOB).await.unwrap();
    registry.apply_transfer_ownership(ALICE).await.unwrap();
    assert_eq!(registry.admin(), BOB);
    assert_eq!(registry.future_admin(), None);

    assert!(matches!(
        registry.remove_pool(ALICE, Address::ZERO).await,
        Err(RegistryError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_concurrent_registrations() {
    let chain = Arc::new(InMemoryChain::new());
    let deployed: Vec<_> = (1..=6u8).map(|seed| deploy_plain(&chain, seed, 3)).collect();
    let registry = Arc::new(Registry::new(ALICE, chain));

    let handles: Vec<_> = deployed
        .iter()
        .map(|(pool, _, lp_token)| {
            let registry = registry.clone();
            let args = plain(*pool, 3, *lp_token);
            tokio::spawn(async move { registry.add_pool_without_underlying(ALICE, args).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(registry.pool_count(), 6);
    assert_eq!(registry.store().coin_pair_count(), 6 * 3);
    for (pool, coins, lp_token) in &deployed {
        assert_eq!(registry.find_pool_for_coins(coins[0], coins[2]), *pool);
        assert_eq!(registry.get_pool_from_lp_token(*lp_token), *pool);
    }
}

#[tokio::test]
async fn test_shared_lp_token_rejected() {
    let chain = Arc::new(InMemoryChain::new());
    let (first, _, lp_token) = deploy_plain(&chain, 0x80, 2);
    let (second, coins, _) = deploy_plain(&chain, 0x90, 2);
    let registry = Registry::new(ALICE, chain);

    registry
        .add_pool_without_underlying(ALICE, plain(first, 2, lp_token))
        .await
        .unwrap();
    let err = registry
        .add_pool_without_underlying(ALICE, plain(second, 2, lp_token))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateLpToken(lp) if lp == lp_token));
    assert_eq!(registry.find_pool_for_coins(coins[0], coins[1]), Address::ZERO);

    assert!(registry.remove_pool(ALICE, second).await.is_err());
    assert_eq!(registry.get_pool_from_lp_token(lp_token), first);
    assert_eq!(
        registry.get_virtual_price_from_lp_token(lp_token).await.unwrap(),
        RATE_PRECISION
    );
}
