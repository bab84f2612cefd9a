//! Command-line arguments for the `grafana-export` binary
//!
//! Every flag can also be supplied through a `GEXPORT_*` environment
//! variable (`--api-key` ↔ `GEXPORT_API_KEY`); an explicit flag wins over
//! the environment.

use crate::config::{
    ArchiveConfig, ArchiveFormat, BackupConfig, Config, ExportConfig, GrafanaConfig,
};
use crate::types::ExportResult;
use clap::Parser;
use std::path::PathBuf;

/// Flags of the `grafana-export` binary
#[derive(Parser, Debug)]
#[command(name = "grafana-export", version)]
#[command(
    about = "Export Grafana dashboards into a folder tree, optionally archived and backed up to S3",
    long_about = None
)]
pub struct Cli {
    /// The base URL for the Grafana instance
    #[arg(long, env = "GEXPORT_URL")]
    pub url: Option<String>,

    /// The API key to access the Grafana instance
    #[arg(long, env = "GEXPORT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The directory where the Grafana dashboards are to be downloaded
    #[arg(long, env = "GEXPORT_DASHBOARDS_DIR", default_value = "dashboards")]
    pub dashboards_dir: PathBuf,

    /// The limit for number of results returned by the Grafana search API
    #[arg(long, env = "GEXPORT_LIMIT", default_value_t = 1000)]
    pub limit: u32,

    /// Overwrite existing dashboards directory
    #[arg(long, env = "GEXPORT_OVERWRITE")]
    pub overwrite: bool,

    /// Create an archive of the exported dashboards folder
    #[arg(long, env = "GEXPORT_COMPRESS")]
    pub compress: bool,

    /// Archive format used by --compress and --backup
    #[arg(long, env = "GEXPORT_ARCHIVE_FORMAT", value_enum, default_value_t = ArchiveFormat::TarGz)]
    pub archive_format: ArchiveFormat,

    /// Backup the downloaded dashboards to S3. Requires --bucket-name
    #[arg(long, env = "GEXPORT_BACKUP")]
    pub backup: bool,

    /// Compress and upload the dashboards to the specified S3 bucket. Requires --backup
    #[arg(long, env = "GEXPORT_BUCKET_NAME")]
    pub bucket_name: Option<String>,

    /// The key to use for storing the backup inside the S3 bucket
    #[arg(long, env = "GEXPORT_BUCKET_KEY", default_value = "grafana-export")]
    pub bucket_key: String,

    /// AWS region of the bucket
    #[arg(long, env = "GEXPORT_BUCKET_REGION")]
    pub bucket_region: Option<String>,

    /// Custom S3 endpoint (MinIO, LocalStack)
    #[arg(long, env = "GEXPORT_S3_ENDPOINT_URL")]
    pub s3_endpoint_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the exporter configuration from the parsed arguments
    pub fn into_config(self) -> Config {
        Config {
            grafana: GrafanaConfig {
                url: self.url.unwrap_or_default(),
                api_key: self.api_key.unwrap_or_default(),
                limit: self.limit,
            },
            export: ExportConfig {
                dashboards_dir: self.dashboards_dir,
                overwrite: self.overwrite,
            },
            archive: ArchiveConfig {
                compress: self.compress,
                format: self.archive_format,
            },
            backup: BackupConfig {
                enabled: self.backup,
                bucket_name: self.bucket_name,
                bucket_key: self.bucket_key,
                region: self.bucket_region,
                endpoint_url: self.s3_endpoint_url,
            },
        }
    }
}

/// Final statistics block printed after a run
pub fn render_summary(result: &ExportResult) -> String {
    format!(
        "Done! Download Statistics:\n\tTotal: {}\n\tFailed: {}",
        result.total, result.failed
    )
}
