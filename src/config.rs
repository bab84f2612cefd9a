//! Configuration types for grafana-export
//!
//! The configuration is a plain value handed to
//! [`DashboardExporter`](crate::DashboardExporter); nothing is read from the
//! environment at run time. The binary builds it from flags and `GEXPORT_*`
//! variables, library users build it directly:
//!
//! ```
//! use grafana_export::config::{Config, GrafanaConfig};
//!
//! let config = Config {
//!     grafana: GrafanaConfig {
//!         url: "https://grafana.example.com".to_string(),
//!         api_key: "secret".to_string(),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Timeout applied to every request against the dashboard API
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Dashboard API connection settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrafanaConfig {
    /// Base URL of the Grafana instance (required)
    #[serde(default)]
    pub url: String,

    /// API key sent as a bearer token (required)
    #[serde(default)]
    pub api_key: String,

    /// Maximum number of results requested from the search endpoint (default: 1000)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for GrafanaConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            limit: default_limit(),
        }
    }
}

/// Output tree settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Root directory of the exported tree (default: "dashboards")
    #[serde(default = "default_dashboards_dir")]
    pub dashboards_dir: PathBuf,

    /// Remove an existing root directory instead of failing
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dashboards_dir: default_dashboards_dir(),
            overwrite: false,
        }
    }
}

/// Archive format produced by the compress step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// Gzipped tarball (`.tar.gz`)
    #[default]
    TarGz,
    /// ZIP archive (`.zip`)
    Zip,
}

impl ArchiveFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }
}

/// Archive settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Create an archive of the exported tree
    #[serde(default)]
    pub compress: bool,

    /// Archive format
    #[serde(default)]
    pub format: ArchiveFormat,
}

/// S3 backup settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Upload the archive to S3 (implies creating an archive)
    #[serde(default)]
    pub enabled: bool,

    /// Destination bucket (required when `enabled`)
    #[serde(default)]
    pub bucket_name: Option<String>,

    /// Object key of the uploaded archive (default: "grafana-export")
    #[serde(default = "default_bucket_key")]
    pub bucket_key: String,

    /// Region override, the SDK default chain is used otherwise
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint URL (MinIO, LocalStack)
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bucket_name: None,
            bucket_key: default_bucket_key(),
            region: None,
            endpoint_url: None,
        }
    }
}

/// Main configuration for [`DashboardExporter`](crate::DashboardExporter)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dashboard API connection
    #[serde(default)]
    pub grafana: GrafanaConfig,

    /// Output tree
    #[serde(default)]
    pub export: ExportConfig,

    /// Archive creation
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// S3 backup
    #[serde(default)]
    pub backup: BackupConfig,
}

impl Config {
    /// Root directory of the exported tree
    pub fn dashboards_dir(&self) -> &PathBuf {
        &self.export.dashboards_dir
    }

    /// Whether the run produces an archive (explicitly or for a backup)
    pub fn wants_archive(&self) -> bool {
        self.archive.compress || self.backup.enabled
    }

    /// Check the settings that must hold before any export work starts
    pub fn validate(&self) -> Result<()> {
        if self.grafana.url.is_empty() {
            return Err(Error::config("url", "missing required argument: --url"));
        }
        if self.grafana.api_key.is_empty() {
            return Err(Error::config(
                "api_key",
                "missing required argument: --api-key",
            ));
        }

        url::Url::parse(&self.grafana.url).map_err(|e| {
            Error::config("url", format!("invalid URL '{}': {}", self.grafana.url, e))
        })?;

        if self.grafana.limit == 0 {
            return Err(Error::config("limit", "limit must be greater than zero"));
        }

        if self.backup.enabled
            && self
                .backup
                .bucket_name
                .as_deref()
                .is_none_or(str::is_empty)
        {
            return Err(Error::config(
                "bucket_name",
                "no S3 bucket specified for backup, pass --bucket-name",
            ));
        }

        Ok(())
    }
}

fn default_limit() -> u32 {
    1000
}

fn default_dashboards_dir() -> PathBuf {
    PathBuf::from("dashboards")
}

fn default_bucket_key() -> String {
    "grafana-export".to_string()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            grafana: GrafanaConfig {
                url: "http://localhost:3000".to_string(),
                api_key: "key".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.grafana.limit, 1000);
        assert_eq!(config.export.dashboards_dir, PathBuf::from("dashboards"));
        assert!(!config.export.overwrite);
        assert!(!config.archive.compress);
        assert_eq!(config.archive.format, ArchiveFormat::TarGz);
        assert_eq!(config.backup.bucket_key, "grafana-export");
        assert!(!config.wants_archive());
    }

    #[test]
    fn test_missing_url_is_rejected_first() {
        let err = Config::default().validate().unwrap_err();
        match err {
            Error::Config { key, message } => {
                assert_eq!(key.as_deref(), Some("url"));
                assert!(message.contains("--url"));
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let mut config = valid_config();
        config.grafana.api_key.clear();
        match config.validate().unwrap_err() {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("api_key")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let mut config = valid_config();
        config.grafana.url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let mut config = valid_config();
        config.grafana.limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backup_requires_bucket_name() {
        let mut config = valid_config();
        config.backup.enabled = true;
        assert!(config.validate().is_err());

        config.backup.bucket_name = Some(String::new());
        assert!(config.validate().is_err());

        config.backup.bucket_name = Some("backups".to_string());
        assert!(config.validate().is_ok());
        assert!(config.wants_archive(), "backup implies an archive");
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"grafana": {"url": "http://g", "api_key": "k"}, "archive": {"format": "zip"}}"#,
        )
        .unwrap();
        assert_eq!(config.grafana.limit, 1000);
        assert_eq!(config.archive.format, ArchiveFormat::Zip);
        assert_eq!(config.export.dashboards_dir, PathBuf::from("dashboards"));
    }

    #[test]
    fn test_archive_extensions() {
        assert_eq!(ArchiveFormat::TarGz.extension(), "tar.gz");
        assert_eq!(ArchiveFormat::Zip.extension(), "zip");
    }
}
