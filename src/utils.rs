//! Naming helpers for exported files and archives

use std::path::Path;

/// Replace path separators in a title so it forms a single path segment
///
/// # Examples
///
/// ```
/// use grafana_export::utils::sanitize_title;
///
/// assert_eq!(sanitize_title("CPU/Mem"), "CPU-Mem");
/// assert_eq!(sanitize_title("Latency p99"), "Latency p99");
/// ```
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    title.replace('/', "-")
}

/// File name of an exported dashboard
#[must_use]
pub fn dashboard_file_name(title: &str) -> String {
    format!("{}.json", sanitize_title(title))
}

/// Directory name of a dashboard folder
///
/// Same rule as [`sanitize_title`]; in addition a name made only of dots
/// (`.`, `..`) has its dots replaced so it cannot refer to the current or
/// parent directory.
///
/// # Examples
///
/// ```
/// use grafana_export::utils::folder_dir_name;
///
/// assert_eq!(folder_dir_name("Team/Ops"), "Team-Ops");
/// assert_eq!(folder_dir_name(".."), "--");
/// ```
#[must_use]
pub fn folder_dir_name(folder: &str) -> String {
    let name = sanitize_title(folder);
    if !name.is_empty() && name.chars().all(|c| c == '.') {
        name.replace('.', "-")
    } else {
        name
    }
}

/// Path rendered as a string without trailing separators
///
/// `dashboards/` and `dashboards` both become `dashboards`.
#[must_use]
pub fn trim_trailing_separators(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    rendered
        .trim_end_matches(std::path::is_separator)
        .to_string()
}
