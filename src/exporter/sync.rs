//! The export pass: descriptors in, folder tree and statistics out.

use super::output::{ensure_dir, prepare_root};
use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::source::DashboardSource;
use crate::types::{DashboardDescriptor, ExportResult, ExportStage, ItemOutcome};
use crate::utils::{dashboard_file_name, folder_dir_name};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Replicate the folder structure and download every dashboard
///
/// Descriptors are processed one at a time in input order. A dashboard that
/// fails to fetch, parse or write is counted as failed and the pass moves on;
/// only problems with the root directory itself abort the pass.
///
/// # Errors
///
/// - [`Error::DirectoryExists`] if the root exists and `overwrite` is off
/// - [`Error::Io`] if the root cannot be removed or created
pub async fn sync_dashboards(
    source: &dyn DashboardSource,
    descriptors: &[DashboardDescriptor],
    config: &ExportConfig,
) -> Result<ExportResult> {
    let root = config.dashboards_dir.as_path();
    prepare_root(root, config.overwrite).await?;

    info!(root = %root.display(), entries = descriptors.len(), "syncing dashboards");

    let mut result = ExportResult::default();
    let mut written: HashSet<PathBuf> = HashSet::new();

    for descriptor in descriptors {
        if descriptor.is_folder() {
            // Folder markers only re-assert the root; dashboard folders are
            // created lazily below.
            ensure_dir(root).await?;
            continue;
        }

        let outcome = export_dashboard(source, descriptor, root).await;
        match &outcome {
            ItemOutcome::Exported { title, path } => {
                if !written.insert(path.clone()) {
                    warn!(
                        title = %title,
                        path = %path.display(),
                        "dashboard overwrote a file written earlier in this run"
                    );
                }
                info!(title = %title, path = %path.display(), "dashboard downloaded");
            }
            ItemOutcome::Failed {
                title,
                stage,
                reason,
            } => {
                warn!(title = %title, stage = %stage, error = %reason, "failed to {stage} dashboard");
            }
        }
        result.record(outcome);
    }

    info!(
        total = result.total,
        failed = result.failed,
        "dashboard sync finished"
    );
    Ok(result)
}

/// Run the fetch → parse → serialize → write pipeline for one dashboard
pub async fn export_dashboard(
    source: &dyn DashboardSource,
    descriptor: &DashboardDescriptor,
    root: &Path,
) -> ItemOutcome {
    match run_pipeline(source, descriptor, root).await {
        Ok(path) => ItemOutcome::Exported {
            title: descriptor.title.clone(),
            path,
        },
        Err((stage, error)) => ItemOutcome::Failed {
            title: descriptor.title.clone(),
            stage,
            reason: error.to_string(),
        },
    }
}

async fn run_pipeline(
    source: &dyn DashboardSource,
    descriptor: &DashboardDescriptor,
    root: &Path,
) -> std::result::Result<PathBuf, (ExportStage, Error)> {
    let raw = source
        .fetch_dashboard(descriptor)
        .await
        .map_err(at(ExportStage::Fetch))?;
    let document = parse_dashboard(&raw).map_err(at(ExportStage::Parse))?;
    let rendered = render_dashboard(&document).map_err(at(ExportStage::Serialize))?;

    let folder = root.join(folder_dir_name(descriptor.folder_name()));
    ensure_dir(&folder).await.map_err(at(ExportStage::Write))?;

    let path = folder.join(dashboard_file_name(&descriptor.title));
    tokio::fs::write(&path, rendered)
        .await
        .map_err(|e| (ExportStage::Write, Error::Io(e)))?;

    Ok(path)
}

fn at(stage: ExportStage) -> impl FnOnce(Error) -> (ExportStage, Error) {
    move |error| (stage, error)
}

/// Parse a dashboard document as a generic JSON object
pub fn parse_dashboard(raw: &[u8]) -> Result<Map<String, Value>> {
    Ok(serde_json::from_slice(raw)?)
}

/// Render a dashboard document with two-space indentation
///
/// Keys come out in the serializer's canonical (sorted) order; the set of
/// keys and their values are unchanged.
pub fn render_dashboard(document: &Map<String, Value>) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
