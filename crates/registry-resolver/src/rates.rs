use alloy_primitives::{Address, U256};
use futures::future::try_join_all;
use registry_core::types::{Amounts, PoolRecord, RateSource, EMPTY_AMOUNTS, RATE_PRECISION};
use registry_core::{RegistryError, Result};

use crate::resolver::Resolver;

impl Resolver {
    /// Per-coin exchange rates, zero past the pool's coin count
    pub async fn rates(&self, record: &PoolRecord) -> Result<Amounts> {
        let calls = record
            .rates
            .iter()
            .zip(record.coins.iter())
            .take(record.n_coins)
            .map(|(source, coin)| self.rate(record, *source, *coin));

        let mut rates = EMPTY_AMOUNTS;
        for (slot, rate) in rates.iter_mut().zip(try_join_all(calls).await?) {
            *slot = rate;
        }
        Ok(rates)
    }

    async fn rate(&self, record: &PoolRecord, source: RateSource, coin: Address) -> Result<U256> {
        match source {
            RateSource::Unit => Ok(RATE_PRECISION),
            RateSource::Method(method) => self.chain.exchange_rate(coin, method).await,
            RateSource::BaseVirtualPrice => {
                let base_pool = record
                    .base_pool()
                    .ok_or(RegistryError::UnknownBasePool(coin))?;
                self.chain.virtual_price(base_pool).await
            }
        }
    }
}
