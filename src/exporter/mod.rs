//! Dashboard export engine and run orchestration
//!
//! [`sync_dashboards`] is the engine: given descriptors and an
//! [`ExportConfig`](crate::config::ExportConfig) it builds the
//! `<root>/<folder>/<title>.json` tree. [`DashboardExporter`] wraps a full
//! run around it: search, export, then the optional archive and upload
//! steps.

mod output;
mod sync;


pub use sync::{export_dashboard, parse_dashboard, render_dashboard, sync_dashboards};

use crate::archive;
use crate::backup::{S3Uploader, Uploader};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::source::{DashboardSource, GrafanaClient};
use crate::types::{DashboardDescriptor, ExportResult, RunSummary, UploadTarget};
use std::sync::Arc;
use tracing::info;

/// Exports dashboards from one Grafana instance
///
/// # Example
///
/// ```no_run
/// use grafana_export::{Config, DashboardExporter};
/// use grafana_export::config::GrafanaConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config {
///         grafana: GrafanaConfig {
///             url: "https://grafana.example.com".to_string(),
///             api_key: "secret".to_string(),
///             ..Default::default()
///         },
///         ..Default::default()
///     };
///
///     let summary = DashboardExporter::new(config)?.run().await?;
///     println!("{} of {} dashboards failed", summary.export.failed, summary.export.total);
///     Ok(())
/// }
/// ```
pub struct DashboardExporter {
    config: Arc<Config>,
    source: Arc<dyn DashboardSource>,
    uploader: Option<Arc<dyn Uploader>>,
}

impl DashboardExporter {
    /// Create an exporter talking to the Grafana HTTP API
    ///
    /// The configuration is validated up front so missing connection
    /// parameters fail before anything else happens.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = GrafanaClient::new(&config.grafana)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create an exporter reading from a custom dashboard source
    pub fn with_source(config: Config, source: Arc<dyn DashboardSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
            uploader: None,
        }
    }

    /// Use `uploader` for backups instead of the S3 client built from the config
    #[must_use]
    pub fn with_uploader(mut self, uploader: Arc<dyn Uploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the export pass over an already fetched descriptor list
    pub async fn sync(&self, descriptors: &[DashboardDescriptor]) -> Result<ExportResult> {
        sync_dashboards(self.source.as_ref(), descriptors, &self.config.export).await
    }

    /// Search, export, and optionally archive and upload
    ///
    /// Per-dashboard failures are reported in the returned summary. Any
    /// error returned from here is fatal for the run; files already written
    /// are left in place.
    pub async fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;

        let descriptors = self.source.search().await?;
        info!(
            source = self.source.name(),
            count = descriptors.len(),
            "fetched dashboard list"
        );

        let export = self.sync(&descriptors).await?;
        let mut summary = RunSummary {
            export,
            archive: None,
            upload: None,
        };

        if !self.config.wants_archive() {
            return Ok(summary);
        }

        // One archive serves both --compress and --backup.
        let archive_path =
            archive::compress(self.config.dashboards_dir(), self.config.archive.format).await?;
        info!(archive = %archive_path.display(), "dashboards compressed");
        summary.archive = Some(archive_path.clone());

        if self.config.backup.enabled {
            let backup = &self.config.backup;
            let bucket = backup
                .bucket_name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    Error::config("bucket_name", "no S3 bucket specified for backup")
                })?;
            let key = backup.bucket_key.clone();

            let uploader: Arc<dyn Uploader> = match &self.uploader {
                Some(uploader) => Arc::clone(uploader),
                None => Arc::new(S3Uploader::new(backup).await),
            };
            uploader.upload(&archive_path, &bucket, &key).await?;
            info!(
                archive = %archive_path.display(),
                bucket = %bucket,
                key = %key,
                uploader = uploader.name(),
                "uploaded archive"
            );
            summary.upload = Some(UploadTarget { bucket, key });
        }

        Ok(summary)
    }
}
