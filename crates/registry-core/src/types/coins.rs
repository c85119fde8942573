use alloy_primitives::{address, Address, B256, U256};

/// Fixed slot capacity of every per-coin array
pub const MAX_COINS: usize = 8;

/// Placeholder address pools use for the chain's native asset
pub const NATIVE_ASSET: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Decimals reported for the native asset (it has no token contract to ask)
pub const NATIVE_DECIMALS: u8 = 18;

/// Fixed-point precision of rates and virtual prices (1e18)
pub const RATE_PRECISION: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

pub type Coins = [Address; MAX_COINS];
pub type Decimals = [u8; MAX_COINS];
pub type Amounts = [U256; MAX_COINS];

pub const EMPTY_COINS: Coins = [Address::ZERO; MAX_COINS];
pub const EMPTY_AMOUNTS: Amounts = [U256::ZERO; MAX_COINS];

pub fn is_native(coin: &Address) -> bool {
    *coin == NATIVE_ASSET
}

/// Unpack one byte per coin, most significant byte first.
pub fn unpack_decimals(packed: B256) -> Decimals {
    let mut decimals = [0u8; MAX_COINS];
    decimals.copy_from_slice(&packed[..MAX_COINS]);
    decimals
}

/// Inverse of [`unpack_decimals`]; values past the eighth are dropped.
pub fn pack_decimals(values: &[u8]) -> B256 {
    let mut word = [0u8; 32];
    for (slot, value) in word.iter_mut().zip(values.iter().take(MAX_COINS)) {
        *slot = *value;
    }
    B256::from(word)
}

/// Same layout as packed decimals, any non-zero byte is `true`.
pub fn unpack_flags(packed: B256) -> [bool; MAX_COINS] {
    let mut flags = [false; MAX_COINS];
    for (flag, byte) in flags.iter_mut().zip(packed.iter()) {
        *flag = *byte != 0;
    }
    flags
}

pub fn pack_flags(values: &[bool]) -> B256 {
    let bytes: Vec<u8> = values.iter().map(|flag| u8::from(*flag)).collect();
    pack_decimals(&bytes)
}

pub fn pad_coins(coins: &[Address]) -> Coins {
    let mut padded = EMPTY_COINS;
    for (slot, coin) in padded.iter_mut().zip(coins) {
        *slot = *coin;
    }
    padded
}

pub fn pad_decimals(decimals: &[u8]) -> Decimals {
    let mut padded = [0u8; MAX_COINS];
    for (slot, value) in padded.iter_mut().zip(decimals) {
        *slot = *value;
    }
    padded
}

/// Unordered pair of distinct, non-zero coins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinPair(Address, Address);

impl CoinPair {
    /// Returns `None` for self-pairs and for the zero address.
    pub fn new(a: Address, b: Address) -> Option<Self> {
        if a.is_zero() || b.is_zero() || a == b {
            return None;
        }
        if a < b {
            Some(Self(a, b))
        } else {
            Some(Self(b, a))
        }
    }

    pub fn get(&self) -> (Address, Address) {
        (self.0, self.1)
    }
}
