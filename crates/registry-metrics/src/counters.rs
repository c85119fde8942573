use metrics::{counter, describe_counter};

/// Initialize counter descriptions
pub fn init() {
    describe_counter!(
        "registry_pools_registered_total",
        "Total number of pools registered"
    );
    describe_counter!(
        "registry_pools_removed_total",
        "Total number of pools removed"
    );
    describe_counter!(
        "registry_mutations_rejected_total",
        "Total number of rejected registry mutations"
    );
    describe_counter!(
        "registry_chain_errors_total",
        "Total number of failed chain reads"
    );
}

/// Increment registered pools counter
pub fn pools_registered(kind: &'static str) {
    counter!("registry_pools_registered_total", "kind" => kind).increment(1);
}

/// Increment removed pools counter
pub fn pools_removed() {
    counter!("registry_pools_removed_total").increment(1);
}

/// Increment rejected mutations counter
pub fn mutation_rejected(reason: &'static str) {
    counter!("registry_mutations_rejected_total", "reason" => reason).increment(1);
}

/// Increment chain errors counter
pub fn chain_errors(count: u64) {
    counter!("registry_chain_errors_total").increment(count);
}
