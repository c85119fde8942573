use alloy_primitives::Address;
use futures::future::try_join_all;
use registry_core::types::{
    is_native, pad_coins, pad_decimals, unpack_decimals, unpack_flags, Coins,
    Decimals, NewLendingPool, NewMetaPool, NewPlainPool, PoolAbi, PoolKind, PoolRecord,
    RateSource, MAX_COINS, NATIVE_DECIMALS,
};
use registry_core::{RegistryError, Result};
use registry_metrics::{counters, gauges};
use tracing::{info, warn};

use crate::registry::Registry;

impl Registry {
    /// Register a pool whose wrapped coins are backed by separate underlying
    /// coins (lending pools). Coins that equal their underlying coin use a
    /// unit rate; the others call `rate_method` on the wrapped coin.
    pub async fn add_pool(&self, caller: Address, args: NewLendingPool) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.admit(caller, args.pool, args.n_coins)?;

        let abi = PoolAbi::from_v1_flag(args.is_v1);
        let n = args.n_coins;
        let (coins, underlying_coins) = futures::try_join!(
            self.fetch_coins(args.pool, abi, n, false),
            self.fetch_coins(args.pool, abi, n, true)
        )?;
        let (decimals, underlying_decimals) = futures::try_join!(
            self.resolve_decimals(&coins[..n], unpack_decimals(args.decimals)),
            self.resolve_decimals(&underlying_coins[..n], unpack_decimals(args.underlying_decimals))
        )?;

        let mut rates = [RateSource::Unit; MAX_COINS];
        if let Some(method) = args.rate_method {
            for (i, rate) in rates.iter_mut().enumerate().take(n) {
                if coins[i] != underlying_coins[i] {
                    *rate = RateSource::Method(method);
                }
            }
        }

        let record = PoolRecord {
            address: args.pool,
            n_coins: n,
            n_underlying_coins: n,
            coins,
            underlying_coins,
            decimals,
            underlying_decimals,
            rates,
            kind: PoolKind::from_initial_a_flag(args.has_initial_a),
            abi,
            lp_token: args.lp_token,
        };
        self.commit(record, "lending")
    }

    /// Register a pool without separate underlying coins. `use_rates` picks
    /// the coins whose rate comes from `rate_method`.
    pub async fn add_pool_without_underlying(&self, caller: Address, args: NewPlainPool) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.admit(caller, args.pool, args.n_coins)?;

        let abi = PoolAbi::from_v1_flag(args.is_v1);
        let n = args.n_coins;
        let coins = self.fetch_coins(args.pool, abi, n, false).await?;
        let decimals = self
            .resolve_decimals(&coins[..n], unpack_decimals(args.decimals))
            .await?;

        let use_rates = unpack_flags(args.use_rates);
        let mut rates = [RateSource::Unit; MAX_COINS];
        if let Some(method) = args.rate_method {
            for (rate, _) in rates.iter_mut().zip(use_rates).take(n).filter(|(_, used)| *used) {
                *rate = RateSource::Method(method);
            }
        }

        let record = PoolRecord {
            address: args.pool,
            n_coins: n,
            n_underlying_coins: n,
            coins,
            underlying_coins: coins,
            decimals,
            underlying_decimals: decimals,
            rates,
            kind: PoolKind::from_initial_a_flag(args.has_initial_a),
            abi,
            lp_token: args.lp_token,
        };
        self.commit(record, "plain")
    }

    /// Register a meta-pool. Its last coin must be the LP token of a pool
    /// that is already registered.
    pub async fn add_metapool(&self, caller: Address, args: NewMetaPool) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.admit(caller, args.pool, args.n_coins)?;

        let n = args.n_coins;
        let coins = self
            .fetch_coins(args.pool, PoolAbi::Current, n, false)
            .await?;

        let base_lp = coins[n - 1];
        let base = self
            .store
            .pool_from_lp_token(&base_lp)
            .and_then(|pool| self.store.get(&pool))
            .ok_or_else(|| {
                counters::mutation_rejected("unknown_base_pool");
                RegistryError::UnknownBasePool(base_lp)
            })?;

        let n_underlying = n - 1 + base.n_underlying_coins;
        if n_underlying > MAX_COINS {
            counters::mutation_rejected("invalid_coin_count");
            return Err(RegistryError::InvalidCoinCount(n_underlying));
        }

        let decimals = self
            .resolve_decimals(&coins[..n], unpack_decimals(args.decimals))
            .await?;

        let underlying: Vec<Address> = coins[..n - 1]
            .iter()
            .chain(base.active_underlying_coins())
            .copied()
            .collect();
        let underlying_decimals: Vec<u8> = decimals[..n - 1]
            .iter()
            .chain(&base.underlying_decimals[..base.n_underlying_coins])
            .copied()
            .collect();

        let mut rates = [RateSource::Unit; MAX_COINS];
        rates[n - 1] = RateSource::BaseVirtualPrice;

        let record = PoolRecord {
            address: args.pool,
            n_coins: n,
            n_underlying_coins: n_underlying,
            coins,
            underlying_coins: pad_coins(&underlying),
            decimals,
            underlying_decimals: pad_decimals(&underlying_decimals),
            rates,
            kind: PoolKind::Meta {
                base_pool: base.address,
                base_abi: base.abi,
            },
            abi: PoolAbi::Current,
            lp_token: args.lp_token,
        };
        self.commit(record, "meta")
    }

    /// Remove a pool together with every market and LP token entry it owns
    pub async fn remove_pool(&self, caller: Address, pool: Address) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.ensure_admin(caller)?;

        let record = self.store.remove_pool(&pool).inspect_err(|e| {
            counters::mutation_rejected(e.kind());
        })?;

        let dependents: Vec<Address> = self
            .store
            .pool_addresses()
            .into_iter()
            .filter(|p| self.store.get(p).and_then(|r| r.base_pool()) == Some(pool))
            .collect();
        if !dependents.is_empty() {
            warn!(pool = ?pool, meta_pools = ?dependents, "Removed a base pool that meta-pools still use");
        }

        counters::pools_removed();
        self.update_gauges();
        info!(
            pool = ?pool,
            lp_token = ?record.lp_token,
            n_coins = record.n_coins,
            "Pool removed"
        );
        Ok(())
    }

    /// Checks shared by every registration before any chain read
    fn admit(&self, caller: Address, pool: Address, n_coins: usize) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.store.contains(&pool) {
            counters::mutation_rejected("duplicate_pool");
            return Err(RegistryError::DuplicatePool(pool));
        }
        if !(2..=MAX_COINS).contains(&n_coins) {
            counters::mutation_rejected("invalid_coin_count");
            return Err(RegistryError::InvalidCoinCount(n_coins));
        }
        Ok(())
    }

    fn commit(&self, record: PoolRecord, kind: &'static str) -> Result<()> {
        let pool = record.address;
        let lp_token = record.lp_token;
        let (n_coins, n_underlying) = (record.n_coins, record.n_underlying_coins);

        self.store.insert_pool(record).inspect_err(|e| {
            counters::mutation_rejected(e.kind());
        })?;

        counters::pools_registered(kind);
        self.update_gauges();
        info!(
            pool = ?pool,
            kind = kind,
            lp_token = ?lp_token,
            n_coins = n_coins,
            n_underlying_coins = n_underlying,
            "Pool registered"
        );
        Ok(())
    }

    fn update_gauges(&self) {
        gauges::set_pools(self.store.pool_count());
        gauges::set_coin_pairs(self.store.coin_pair_count());
    }

    async fn fetch_coins(&self, pool: Address, abi: PoolAbi, n: usize, underlying: bool) -> Result<Coins> {
        let chain = self.chain();
        let calls = (0..n).map(|i| async move {
            if underlying {
                chain.pool_underlying_coin(pool, abi, i).await
            } else {
                chain.pool_coin(pool, abi, i).await
            }
        });
        let coins = self.observe(try_join_all(calls).await)?;
        Ok(pad_coins(&coins))
    }

    /// Explicit decimals win; a zero entry is looked up on the token
    async fn resolve_decimals(&self, coins: &[Address], packed: Decimals) -> Result<Decimals> {
        let chain = self.chain();
        let calls = coins.iter().zip(packed).map(|(coin, explicit)| async move {
            match explicit {
                0 if is_native(coin) => Ok(NATIVE_DECIMALS),
                0 => chain.decimals(*coin).await,
                d => Ok(d),
            }
        });
        let decimals = self.observe(try_join_all(calls).await)?;
        Ok(pad_decimals(&decimals))
    }
}
