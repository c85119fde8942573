mod contracts;
#[cfg(any(test, feature = "test-util"))]
mod memory;
mod provider;
mod reader;

pub use contracts::{IStableSwap, IStableSwapV1, IERC20};
#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryChain;
pub use provider::RpcChainReader;
pub use reader::ChainReader;
