use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, Selector, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use registry_core::types::{PoolAbi, PoolParams};
use registry_core::{RegistryError, Result};
use std::fmt::Display;
use tracing::trace;

use crate::contracts::{IStableSwap, IStableSwapV1, IERC20};
use crate::reader::ChainReader;

/// [`ChainReader`] backed by an HTTP JSON-RPC provider
#[derive(Clone)]
pub struct RpcChainReader {
    provider: DynProvider<Ethereum>,
}

impl RpcChainReader {
    /// Connect to an HTTP RPC endpoint
    pub fn connect(http_url: &str) -> Result<Self> {
        let http_url: reqwest::Url = http_url
            .parse()
            .map_err(|e| RegistryError::Chain(format!("Invalid HTTP URL: {}", e)))?;

        let provider = ProviderBuilder::new().connect_http(http_url).erased();
        Ok(Self { provider })
    }
}

fn chain_err(e: impl Display) -> RegistryError {
    RegistryError::Chain(e.to_string())
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn decimals(&self, token: Address) -> Result<u8> {
        IERC20::new(token, &self.provider)
            .decimals()
            .call()
            .await
            .map_err(chain_err)
    }

    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256> {
        IERC20::new(token, &self.provider)
            .balanceOf(holder)
            .call()
            .await
            .map_err(chain_err)
    }

    async fn native_balance(&self, holder: Address) -> Result<U256> {
        self.provider.get_balance(holder).await.map_err(chain_err)
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        IERC20::new(token, &self.provider)
            .totalSupply()
            .call()
            .await
            .map_err(chain_err)
    }

    async fn exchange_rate(&self, coin: Address, method: Selector) -> Result<U256> {
        let tx = TransactionRequest::default()
            .to(coin)
            .input(Bytes::copy_from_slice(method.as_slice()).into());
        let output = self.provider.call(tx).await.map_err(chain_err)?;
        trace!(coin = ?coin, method = ?method, len = output.len(), "Rate call returned");

        if output.len() < 32 {
            return Err(RegistryError::Chain(format!(
                "rate call on {} returned {} bytes",
                coin,
                output.len()
            )));
        }
        Ok(U256::from_be_slice(&output[..32]))
    }

    async fn pool_coin(&self, pool: Address, abi: PoolAbi, i: usize) -> Result<Address> {
        match abi {
            PoolAbi::V1 => IStableSwapV1::new(pool, &self.provider)
                .coins(i as i128)
                .call()
                .await
                .map_err(chain_err),
            PoolAbi::Current => IStableSwap::new(pool, &self.provider)
                .coins(U256::from(i))
                .call()
                .await
                .map_err(chain_err),
        }
    }

    async fn pool_underlying_coin(&self, pool: Address, abi: PoolAbi, i: usize) -> Result<Address> {
        match abi {
            PoolAbi::V1 => IStableSwapV1::new(pool, &self.provider)
                .underlying_coins(i as i128)
                .call()
                .await
                .map_err(chain_err),
            PoolAbi::Current => IStableSwap::new(pool, &self.provider)
                .underlying_coins(U256::from(i))
                .call()
                .await
                .map_err(chain_err),
        }
    }

    async fn pool_balance(&self, pool: Address, abi: PoolAbi, i: usize) -> Result<U256> {
        match abi {
            PoolAbi::V1 => IStableSwapV1::new(pool, &self.provider)
                .balances(i as i128)
                .call()
                .await
                .map_err(chain_err),
            PoolAbi::Current => IStableSwap::new(pool, &self.provider)
                .balances(U256::from(i))
                .call()
                .await
                .map_err(chain_err),
        }
    }

    async fn pool_params(&self, pool: Address, has_initial_a: bool) -> Result<PoolParams> {
        let swap = IStableSwap::new(pool, &self.provider);

        let mut params = PoolParams {
            a: swap.A().call().await.map_err(chain_err)?,
            future_a: swap.future_A().call().await.map_err(chain_err)?,
            fee: swap.fee().call().await.map_err(chain_err)?,
            admin_fee: swap.admin_fee().call().await.map_err(chain_err)?,
            future_fee: swap.future_fee().call().await.map_err(chain_err)?,
            future_admin_fee: swap.future_admin_fee().call().await.map_err(chain_err)?,
            future_owner: swap.future_owner().call().await.map_err(chain_err)?,
            ..Default::default()
        };

        if has_initial_a {
            params.initial_a = swap.initial_A().call().await.map_err(chain_err)?;
            params.initial_a_time = swap.initial_A_time().call().await.map_err(chain_err)?;
            params.future_a_time = swap.future_A_time().call().await.map_err(chain_err)?;
        }

        Ok(params)
    }

    async fn virtual_price(&self, pool: Address) -> Result<U256> {
        IStableSwap::new(pool, &self.provider)
            .get_virtual_price()
            .call()
            .await
            .map_err(chain_err)
    }
}
