//! Dashboard API access
//!
//! The exporter never talks HTTP directly. It goes through the
//! [`DashboardSource`] trait, which has two operations: search for
//! descriptors, and fetch the raw JSON of one dashboard.
//!
//! - [`GrafanaClient`]: reqwest-based client for the Grafana HTTP API
//!
//! ## Usage
//!
//! ```no_run
//! use grafana_export::config::GrafanaConfig;
//! use grafana_export::source::{DashboardSource, GrafanaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GrafanaClient::new(&GrafanaConfig {
//!         url: "https://grafana.example.com".to_string(),
//!         api_key: "secret".to_string(),
//!         ..Default::default()
//!     })?;
//!
//!     for descriptor in client.search().await? {
//!         println!("{} ({:?})", descriptor.title, descriptor.kind);
//!     }
//!     Ok(())
//! }
//! ```

mod grafana;
mod traits;

pub use grafana::GrafanaClient;
pub use traits::DashboardSource;
