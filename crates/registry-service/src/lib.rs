mod ownership;
mod registration;
mod registry;

pub use registry::Registry;

#[cfg(test)]
mod tests;
