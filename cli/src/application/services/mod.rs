//! Application services: one module per use-case.

pub mod pipeline;
pub mod privilege;
pub mod runner;
pub mod service_activation;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;
