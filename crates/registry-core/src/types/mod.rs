mod coins;
mod info;
mod pool;
mod registration;

pub use coins::{
    is_native, pack_decimals, pack_flags, pad_coins, pad_decimals, unpack_decimals, unpack_flags,
    Amounts, CoinPair, Coins, Decimals, EMPTY_AMOUNTS, EMPTY_COINS, MAX_COINS, NATIVE_ASSET,
    NATIVE_DECIMALS, RATE_PRECISION,
};
pub use info::{CoinIndices, PoolCoins, PoolInfo, PoolParams};
pub use pool::{PoolAbi, PoolKind, PoolRecord, RateSource};
pub use registration::{NewLendingPool, NewMetaPool, NewPlainPool};

