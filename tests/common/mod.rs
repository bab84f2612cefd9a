//! Common test utilities for grafana-export integration tests

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod grafana;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use grafana::*;
