//! Search responses, dashboard documents and filesystem helpers

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// API key the mock Grafana accepts
pub const API_KEY: &str = "test-api-key";

/// Search response covering folders, foldered and unfoldered dashboards
///
/// `db/broken` answers with invalid JSON and `db/gone` with HTTP 500, see
/// [`dashboard_bodies`].
pub const SEARCH_RESPONSE: &str = r#"[
  {"id": 1, "uid": "f-infra", "title": "Infra", "uri": "db/infra", "url": "/dashboards/f/f-infra/infra",
   "slug": "", "type": "dash-folder", "tags": [], "isStarred": false},
  {"id": 2, "uid": "cpu", "title": "CPU/Mem", "uri": "db/cpu-mem", "url": "/d/cpu/cpu-mem",
   "slug": "", "type": "dash-db", "tags": ["linux"], "isStarred": true,
   "folderId": 1, "folderUid": "f-infra", "folderTitle": "Infra", "folderUrl": "/dashboards/f/f-infra/infra"},
  {"id": 3, "uid": "home", "title": "Home", "uri": "db/home", "url": "/d/home/home",
   "slug": "", "type": "dash-db", "tags": [], "isStarred": false},
  {"id": 4, "uid": "broken", "title": "Broken", "uri": "db/broken", "url": "/d/broken/broken",
   "slug": "", "type": "dash-db", "tags": [], "isStarred": false},
  {"id": 5, "uid": "gone", "title": "Gone", "uri": "db/gone", "url": "/d/gone/gone",
   "slug": "", "type": "dash-db", "tags": [], "isStarred": false,
   "folderId": 1, "folderUid": "f-infra", "folderTitle": "Infra", "folderUrl": "/dashboards/f/f-infra/infra"}
]"#;

/// Content served per dashboard uri; `None` means the server answers 500
pub fn dashboard_bodies() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        (
            "db/cpu-mem",
            Some(r#"{"meta":{"slug":"cpu-mem"},"dashboard":{"title":"CPU/Mem","panels":[{"id":1}],"version":3}}"#),
        ),
        ("db/home", Some(r#"{"dashboard":{"title":"Home"}}"#)),
        ("db/broken", Some("{\"dashboard\": ")),
        ("db/gone", None),
    ]
}

/// Relative paths of every regular file under `root`, sorted
pub fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}
