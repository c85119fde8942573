mod coin_index;
mod lp_tokens;
mod pools;
mod store;

pub use coin_index::{resolve_coin_indices, CoinIndex};
pub use lp_tokens::LpTokenIndex;
pub use pools::PoolStore;
pub use store::{RegistryState, RegistryStore};
