use alloy_primitives::U256;
use futures::future::try_join_all;
use registry_core::types::{is_native, Amounts, PoolKind, PoolRecord, EMPTY_AMOUNTS};
use registry_core::{RegistryError, Result};

use crate::resolver::Resolver;

fn arithmetic(record: &PoolRecord, reason: &'static str) -> RegistryError {
    RegistryError::Arithmetic {
        pool: record.address,
        reason,
    }
}

fn fill(values: impl IntoIterator<Item = U256>) -> Amounts {
    let mut amounts = EMPTY_AMOUNTS;
    for (slot, value) in amounts.iter_mut().zip(values) {
        *slot = value;
    }
    amounts
}

impl Resolver {
    /// Balances the pool reports for each of its coins
    pub async fn balances(&self, record: &PoolRecord) -> Result<Amounts> {
        let calls = (0..record.n_coins)
            .map(|i| self.chain.pool_balance(record.address, record.abi, i));
        Ok(fill(try_join_all(calls).await?))
    }

    /// Balances expressed in underlying coins
    pub async fn underlying_balances(&self, record: &PoolRecord) -> Result<Amounts> {
        let (balances, rates) = futures::try_join!(self.balances(record), self.rates(record))?;
        self.underlying_balances_from(record, &balances, &rates).await
    }

    pub(crate) async fn underlying_balances_from(
        &self,
        record: &PoolRecord,
        balances: &Amounts,
        rates: &Amounts,
    ) -> Result<Amounts> {
        let PoolKind::Meta {
            base_pool,
            base_abi,
        } = record.kind
        else {
            let ten = U256::from(10u64);
            let converted = (0..record.n_coins)
                .map(|i| {
                    let precision = ten
                        .checked_pow(U256::from(record.underlying_decimals[i]))
                        .ok_or_else(|| arithmetic(record, "decimal precision overflow"))?;
                    balances[i]
                        .checked_mul(rates[i])
                        .map(|value| value / precision)
                        .ok_or_else(|| arithmetic(record, "balance times rate overflows"))
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(fill(converted));
        };

        // The last meta coin is the base LP token; its balance is spread
        // over the base coins in proportion to the LP supply it represents.
        let shared = record.n_coins - 1;
        let base_lp = record.coins[shared];
        let n_base = record.n_underlying_coins - shared;

        let supply = self.chain.total_supply(base_lp);
        let base_balances =
            try_join_all((0..n_base).map(|k| self.chain.pool_balance(base_pool, base_abi, k)));
        let (supply, base_balances) = futures::try_join!(supply, base_balances)?;

        if supply.is_zero() {
            return Err(arithmetic(record, "base LP token has no supply"));
        }
        let share = balances[shared];
        let converted = base_balances
            .into_iter()
            .map(|balance| {
                balance
                    .checked_mul(share)
                    .map(|value| value / supply)
                    .ok_or_else(|| arithmetic(record, "base balance times share overflows"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(fill(balances[..shared].iter().copied().chain(converted)))
    }

    /// Tokens held by the pool beyond what it reports as liquidity
    pub async fn admin_balances(&self, record: &PoolRecord) -> Result<Amounts> {
        let calls = record.active_coins().iter().enumerate().map(|(i, coin)| {
            let coin = *coin;
            async move {
                let held = if is_native(&coin) {
                    self.chain.native_balance(record.address).await?
                } else {
                    self.chain.balance_of(coin, record.address).await?
                };
                let reported = self.chain.pool_balance(record.address, record.abi, i).await?;
                held.checked_sub(reported)
                    .ok_or_else(|| arithmetic(record, "pool reports more than it holds"))
            }
        });
        Ok(fill(try_join_all(calls).await?))
    }
}
