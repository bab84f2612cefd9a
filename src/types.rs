//! Core types for grafana-export

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Folder name used for dashboards that do not live in a folder
pub const GENERAL_FOLDER: &str = "General";

/// Kind of entry returned by the search endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptorKind {
    /// Folder marker, carries no content
    #[serde(rename = "dash-folder")]
    Folder,
    /// Dashboard reference
    ///
    /// Anything that is not a folder is treated as a dashboard.
    #[default]
    #[serde(rename = "dash-db", other)]
    Dashboard,
}

/// One metadata record returned by the dashboard search endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDescriptor {
    /// Numeric id assigned by the server
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    /// Stable unique identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub uid: String,
    /// Display title, also the source of the exported file name
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Legacy content reference (`db/<slug>`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    /// Relative URL of the dashboard in the web UI
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// URL slug
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Folder or dashboard
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: DescriptorKind,
    /// Tags attached to the dashboard
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<serde_json::Value>,
    /// Whether the API user starred the dashboard
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_starred: bool,
    /// Id of the containing folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
    /// Uid of the containing folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_uid: Option<String>,
    /// Title of the containing folder (absent for the General folder)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_title: Option<String>,
    /// URL of the containing folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_url: Option<String>,
}

/// Servers omit some fields and send `null` for others; treat both alike
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DashboardDescriptor {
    /// Build a dashboard descriptor with the fields the exporter relies on
    pub fn dashboard(
        title: impl Into<String>,
        uri: impl Into<String>,
        folder_title: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
            kind: DescriptorKind::Dashboard,
            folder_title: folder_title.map(str::to_string),
            ..Default::default()
        }
    }

    /// Build a folder descriptor
    pub fn folder(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: DescriptorKind::Folder,
            ..Default::default()
        }
    }

    /// Whether this entry is a folder marker
    pub fn is_folder(&self) -> bool {
        self.kind == DescriptorKind::Folder
    }

    /// Logical folder of the dashboard, `General` when none is set
    pub fn folder_name(&self) -> &str {
        match self.folder_title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => GENERAL_FOLDER,
        }
    }

    /// API endpoint (relative to `/api/`) serving the dashboard content
    ///
    /// The legacy `uri` is preferred; servers that no longer report it are
    /// reached through the uid endpoint.
    pub fn content_endpoint(&self) -> String {
        if !self.uri.is_empty() || self.uid.is_empty() {
            format!("dashboards/{}", self.uri)
        } else {
            format!("dashboards/uid/{}", self.uid)
        }
    }
}

/// Step of the per-dashboard pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStage {
    /// Fetching the dashboard JSON from the API
    Fetch,
    /// Parsing the response as a JSON object
    Parse,
    /// Re-serializing the object with indentation
    Serialize,
    /// Creating the folder and writing the file
    Write,
}

impl std::fmt::Display for ExportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExportStage::Fetch => "fetch",
            ExportStage::Parse => "parse",
            ExportStage::Serialize => "serialize",
            ExportStage::Write => "write",
        };
        f.write_str(s)
    }
}

/// Result of exporting a single dashboard
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Dashboard written to disk
    Exported {
        /// Dashboard title
        title: String,
        /// Path of the written file
        path: PathBuf,
    },
    /// Dashboard skipped after a failing step
    Failed {
        /// Dashboard title
        title: String,
        /// Step that failed
        stage: ExportStage,
        /// Error message
        reason: String,
    },
}

impl ItemOutcome {
    /// Title of the dashboard this outcome belongs to
    pub fn title(&self) -> &str {
        match self {
            ItemOutcome::Exported { title, .. } | ItemOutcome::Failed { title, .. } => title,
        }
    }

    /// Whether the dashboard failed
    pub fn is_failed(&self) -> bool {
        matches!(self, ItemOutcome::Failed { .. })
    }
}

/// Aggregate statistics of one export pass
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportResult {
    /// Number of dashboards attempted
    pub total: usize,
    /// Number of dashboards that did not complete fetch, parse and write
    pub failed: usize,
    /// Per-dashboard outcomes in input order
    pub items: Vec<ItemOutcome>,
}

impl ExportResult {
    /// Record the outcome of one dashboard
    pub fn record(&mut self, outcome: ItemOutcome) {
        self.total += 1;
        if outcome.is_failed() {
            self.failed += 1;
        }
        self.items.push(outcome);
    }

    /// Number of dashboards written to disk
    pub fn succeeded(&self) -> usize {
        self.total - self.failed
    }
}

/// Object storage location an archive was uploaded to
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadTarget {
    /// Bucket name
    pub bucket: String,
    /// Object key
    pub key: String,
}

/// Outcome of a full run (export plus optional archive and upload)
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    /// Export statistics
    pub export: ExportResult,
    /// Archive created for this run, if any
    pub archive: Option<PathBuf>,
    /// Upload destination, if a backup was made
    pub upload: Option<UploadTarget>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserializes_folders_and_dashboards() {
        let json = r#"[
            {"id": 1, "uid": "f1", "title": "Infra", "uri": "db/infra", "type": "dash-folder",
             "tags": [], "isStarred": false},
            {"id": 2, "uid": "d1", "title": "CPU/Mem", "uri": "db/cpu-mem", "type": "dash-db",
             "tags": ["linux"], "isStarred": true, "folderId": 1, "folderUid": "f1",
             "folderTitle": "Infra", "folderUrl": "/dashboards/f/f1/infra"}
        ]"#;

        let descriptors: Vec<DashboardDescriptor> = serde_json::from_str(json).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert!(descriptors[0].is_folder());
        assert_eq!(descriptors[1].kind, DescriptorKind::Dashboard);
        assert_eq!(descriptors[1].folder_title.as_deref(), Some("Infra"));
        assert_eq!(descriptors[1].folder_id, Some(1));
        assert!(descriptors[1].is_starred);
    }

    #[test]
    fn test_unknown_or_missing_type_is_a_dashboard() {
        let descriptors: Vec<DashboardDescriptor> =
            serde_json::from_str(r#"[{"title": "a", "type": "snapshot"}, {"title": "b"}]"#)
                .unwrap();
        assert!(descriptors.iter().all(|d| d.kind == DescriptorKind::Dashboard));
    }

    #[test]
    fn test_null_fields_deserialize_as_defaults() {
        let descriptors: Vec<DashboardDescriptor> = serde_json::from_str(
            r#"[{"id": 7, "uid": null, "title": "CPU", "uri": "db/cpu", "url": null,
                 "slug": null, "type": null, "tags": null, "isStarred": null,
                 "folderTitle": null}]"#,
        )
        .unwrap();

        let descriptor = &descriptors[0];
        assert!(descriptor.tags.is_empty());
        assert_eq!(descriptor.uid, "");
        assert_eq!(descriptor.kind, DescriptorKind::Dashboard);
        assert!(!descriptor.is_starred);
        assert_eq!(descriptor.folder_name(), GENERAL_FOLDER);
    }

    #[test]
    fn test_folder_name_defaults_to_general() {
        assert_eq!(DashboardDescriptor::dashboard("a", "db/a", None).folder_name(), "General");
        assert_eq!(
            DashboardDescriptor::dashboard("a", "db/a", Some("")).folder_name(),
            "General"
        );
        assert_eq!(
            DashboardDescriptor::dashboard("a", "db/a", Some("Ops")).folder_name(),
            "Ops"
        );
    }

    #[test]
    fn test_content_endpoint_prefers_uri_then_uid() {
        let by_uri = DashboardDescriptor::dashboard("a", "db/cpu", None);
        assert_eq!(by_uri.content_endpoint(), "dashboards/db/cpu");

        let by_uid = DashboardDescriptor {
            uid: "abc123".into(),
            ..DashboardDescriptor::dashboard("a", "", None)
        };
        assert_eq!(by_uid.content_endpoint(), "dashboards/uid/abc123");
    }

    #[test]
    fn test_export_result_counts_failures() {
        let mut result = ExportResult::default();
        result.record(ItemOutcome::Exported {
            title: "a".into(),
            path: PathBuf::from("General/a.json"),
        });
        result.record(ItemOutcome::Failed {
            title: "b".into(),
            stage: ExportStage::Fetch,
            reason: "timeout".into(),
        });

        assert_eq!(result.total, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.succeeded(), 1);
        assert_eq!(result.items[1].title(), "b");
    }

    #[test]
    fn test_stage_display_is_lowercase() {
        assert_eq!(ExportStage::Fetch.to_string(), "fetch");
        assert_eq!(ExportStage::Write.to_string(), "write");
    }
}
