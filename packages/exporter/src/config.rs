//! Configuration constants for the exporter.

/// Output directory used when `--out` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Namespace list shown in the top-left frame.
pub const OVERVIEW_FRAME: &str = "overview-frame.html";

/// Table of every element, shown in the main frame on load.
pub const OVERVIEW_SUMMARY: &str = "overview-summary.html";

/// Element list shown in the bottom-left frame.
pub const ALLCLASSES_FRAME: &str = "allclasses-frame.html";

/// Format of the "Generated" stamp in page footers.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// File name of a namespace's element list, inside its directory.
///
/// # Examples
/// ```
/// use shr_javadoc::config::package_page;
///
/// assert_eq!(package_page("shr_core"), "shr_core-pkg.html");
/// ```
#[must_use]
pub fn package_page(namespace_path: &str) -> String {
    format!("{namespace_path}-pkg.html")
}

/// File name of a namespace's description page, inside its directory.
///
/// # Examples
/// ```
/// use shr_javadoc::config::info_page;
///
/// assert_eq!(info_page("shr_core"), "shr_core-info.html");
/// ```
#[must_use]
pub fn info_page(namespace_path: &str) -> String {
    format!("{namespace_path}-info.html")
}
