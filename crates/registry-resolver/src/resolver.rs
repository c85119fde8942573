use alloy_primitives::{Address, U256};
use registry_chain::ChainReader;
use registry_core::types::{PoolInfo, PoolParams, PoolRecord};
use registry_core::Result;
use std::sync::Arc;
use tracing::debug;

/// Derives live values for registered pools from chain reads.
///
/// Nothing is cached: every call reads the chain again, so aggregates and
/// single getters agree whenever the chain does.
#[derive(Clone)]
pub struct Resolver {
    pub(crate) chain: Arc<dyn ChainReader>,
}

impl Resolver {
    pub fn new(chain: Arc<dyn ChainReader>) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &Arc<dyn ChainReader> {
        &self.chain
    }

    pub async fn params(&self, record: &PoolRecord) -> Result<PoolParams> {
        self.chain
            .pool_params(record.address, record.kind.has_initial_a())
            .await
    }

    pub async fn virtual_price(&self, pool: Address) -> Result<U256> {
        self.chain.virtual_price(pool).await
    }

    /// Every derived value of a pool, built from one set of reads
    pub async fn pool_info(&self, record: &PoolRecord) -> Result<PoolInfo> {
        let (balances, rates, params) = futures::try_join!(
            self.balances(record),
            self.rates(record),
            self.params(record)
        )?;
        let underlying_balances = self
            .underlying_balances_from(record, &balances, &rates)
            .await?;

        debug!(pool = ?record.address, n_coins = record.n_coins, "Pool info resolved");

        Ok(PoolInfo {
            balances,
            underlying_balances,
            decimals: record.decimals,
            underlying_decimals: record.underlying_decimals,
            rates,
            lp_token: record.lp_token,
            params,
        })
    }
}
