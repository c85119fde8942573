use metrics::{describe_gauge, gauge};

/// Initialize gauge descriptions
pub fn init() {
    describe_gauge!("registry_pools", "Number of registered pools");
    describe_gauge!("registry_coin_pairs", "Number of indexed coin pairs");
}

pub fn set_pools(count: usize) {
    gauge!("registry_pools").set(count as f64);
}

pub fn set_coin_pairs(count: usize) {
    gauge!("registry_coin_pairs").set(count as f64);
}
