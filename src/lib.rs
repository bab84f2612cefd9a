//! # grafana-export
//!
//! Export the dashboards of a Grafana instance into a local directory tree
//! that mirrors its folders, then optionally archive the tree and back it up
//! to S3.
//!
//! ```text
//! dashboards/
//! ├── General/
//! │   └── CPU-Mem.json
//! └── Infra/
//!     └── Disk usage.json
//! ```
//!
//! Dashboards are processed one at a time. A dashboard that cannot be
//! fetched, parsed or written is counted as failed and skipped; it never
//! stops the rest of the export.
//!
//! ## Quick Start
//!
//! ```no_run
//! use grafana_export::{Config, DashboardExporter};
//! use grafana_export::config::GrafanaConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         grafana: GrafanaConfig {
//!             url: "https://grafana.example.com".to_string(),
//!             api_key: "secret".to_string(),
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     };
//!
//!     let summary = DashboardExporter::new(config)?.run().await?;
//!     println!("Total: {} Failed: {}", summary.export.total, summary.export.failed);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Archive creation
pub mod archive;
/// Object storage backup
pub mod backup;
/// Command-line arguments
pub mod cli;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Export engine and run orchestration
pub mod exporter;
/// Dashboard API access
pub mod source;
/// Core types
pub mod types;
/// Naming helpers
pub mod utils;

// Re-export commonly used types
pub use backup::{S3Uploader, Uploader};
pub use config::{ArchiveFormat, Config};
pub use error::{Error, Result};
pub use exporter::{DashboardExporter, sync_dashboards};
pub use source::{DashboardSource, GrafanaClient};
pub use types::{
    DashboardDescriptor, DescriptorKind, ExportResult, ExportStage, ItemOutcome, RunSummary,
    UploadTarget,
};
