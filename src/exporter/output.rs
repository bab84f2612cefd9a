//! Output tree management

use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Prepare the root directory of the exported tree
///
/// An existing root is an error unless `overwrite` is set, in which case the
/// whole tree is removed first. Nothing on disk is touched when the error is
/// returned.
pub(crate) async fn prepare_root(root: &Path, overwrite: bool) -> Result<()> {
    match tokio::fs::symlink_metadata(root).await {
        Ok(metadata) => {
            if !overwrite {
                return Err(Error::DirectoryExists(root.to_path_buf()));
            }

            info!(root = %root.display(), "removing existing dashboards directory");
            if metadata.is_dir() {
                tokio::fs::remove_dir_all(root).await?;
            } else {
                tokio::fs::remove_file(root).await?;
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::Io(e)),
    }

    tokio::fs::create_dir_all(root).await?;
    Ok(())
}

/// Create `dir` and its parents if they are missing
pub(crate) async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}
