mod balances;
mod rates;
mod resolver;

pub use resolver::Resolver;
