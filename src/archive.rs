//! Archive creation for the exported tree
//!
//! The archive is written next to the directory, named after it with a
//! second-resolution timestamp:
//! `dashboards/` → `dashboards-20060102150405.tar.gz`.
//! Two archives of the same directory made within one second share a name
//! and the later one replaces the earlier.

use crate::config::ArchiveFormat;
use crate::error::{Error, Result};
use crate::utils::trim_trailing_separators;
use chrono::{Local, NaiveDateTime};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use tracing::debug;
use walkdir::WalkDir;

/// Timestamp layout appended to archive names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Archive file name for `dir` at `timestamp`
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use grafana_export::archive::archive_path;
/// use grafana_export::config::ArchiveFormat;
/// use std::path::{Path, PathBuf};
///
/// let at = NaiveDate::from_ymd_opt(2006, 1, 2)
///     .unwrap()
///     .and_hms_opt(15, 4, 5)
///     .unwrap();
/// assert_eq!(
///     archive_path(Path::new("dashboards/"), at, ArchiveFormat::TarGz),
///     PathBuf::from("dashboards-20060102150405.tar.gz")
/// );
/// ```
#[must_use]
pub fn archive_path(dir: &Path, timestamp: NaiveDateTime, format: ArchiveFormat) -> PathBuf {
    PathBuf::from(format!(
        "{}-{}.{}",
        trim_trailing_separators(dir),
        timestamp.format(TIMESTAMP_FORMAT),
        format.extension()
    ))
}

/// Archive `dir` and return the path of the created archive
///
/// The archive holds the directory itself as its top-level entry.
///
/// # Errors
///
/// - [`Error::NotFound`] if `dir` does not exist
/// - [`Error::Archive`] if the archive cannot be written
pub async fn compress(dir: &Path, format: ArchiveFormat) -> Result<PathBuf> {
    if !tokio::fs::try_exists(dir).await? {
        return Err(Error::NotFound(format!(
            "directory {} does not exist",
            dir.display()
        )));
    }

    let destination = archive_path(dir, Local::now().naive_local(), format);
    debug!(dir = %dir.display(), archive = %destination.display(), ?format, "creating archive");

    let source = dir.to_path_buf();
    let target = destination.clone();
    spawn_blocking(move || write_archive(&source, &target, format))
        .await
        .map_err(|e| Error::Archive {
            path: dir.to_path_buf(),
            reason: format!("archive task failed: {}", e),
        })??;

    Ok(destination)
}

fn write_archive(dir: &Path, destination: &Path, format: ArchiveFormat) -> Result<()> {
    let root_name = entry_root_name(dir)?;
    let fail = |reason: String| Error::Archive {
        path: dir.to_path_buf(),
        reason,
    };

    let file = File::create(destination)
        .map_err(|e| fail(format!("cannot create {}: {}", destination.display(), e)))?;

    match format {
        ArchiveFormat::TarGz => {
            write_tar_gz(file, dir, &root_name).map_err(|e| fail(e.to_string()))
        }
        ArchiveFormat::Zip => write_zip(file, dir, &root_name).map_err(fail),
    }
}

/// Name of the top-level entry inside the archive
fn entry_root_name(dir: &Path) -> Result<String> {
    if let Some(name) = dir.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }

    // `.` or `..`: name the entry after the directory they resolve to
    let resolved = std::fs::canonicalize(dir)?;
    Ok(resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dashboards".to_string()))
}

fn write_tar_gz(file: File, dir: &Path, root_name: &str) -> std::io::Result<()> {
    let encoder = GzEncoder::new(file, Compression::default());
    let mut tar = tar::Builder::new(encoder);
    tar.append_dir_all(root_name, dir)?;
    tar.into_inner()?.finish()?;
    Ok(())
}

fn write_zip(file: File, dir: &Path, root_name: &str) -> std::result::Result<(), String> {
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| e.to_string())?;
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| e.to_string())?;

        // Zip entry names always use forward slashes
        let mut name = root_name.to_string();
        for component in relative.components() {
            name.push('/');
            name.push_str(&component.as_os_str().to_string_lossy());
        }

        if entry.file_type().is_dir() {
            zip.add_directory(name, options).map_err(|e| e.to_string())?;
        } else {
            zip.start_file(name, options).map_err(|e| e.to_string())?;
            let mut source = File::open(entry.path()).map_err(|e| e.to_string())?;
            std::io::copy(&mut source, &mut zip).map_err(|e| e.to_string())?;
        }
    }

    zip.finish().map_err(|e| e.to_string())?;
    Ok(())
}
