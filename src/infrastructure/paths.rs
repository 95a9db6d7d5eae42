//! Path manipulation utilities for Zellij sandbox environment.
//!
//! In the Zellij plugin sandbox the host filesystem is mounted under `/host`.
//! These helpers translate user-facing `~` paths into sandbox paths and back,
//! and locate the plugin's data directory.

use std::path::PathBuf;

/// File name of the catalog document when no `catalog_path` is configured.
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Returns the data directory for Cinedex storage.
///
/// The directory is located at `/host/.local/share/zellij/cinedex` in the Zellij
/// sandbox, which typically resolves to `~/.local/share/zellij/cinedex` on the
/// host. Both the default catalog document and the trace file live here.
///
/// # Examples
///
/// ```
/// use cinedex::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/cinedex");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("cinedex")
}

/// Sandbox path of the catalog document used when none is configured.
#[must_use]
pub fn default_catalog_path() -> String {
    get_data_dir()
        .join(DEFAULT_CATALOG_FILE)
        .display()
        .to_string()
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// # Examples
///
/// ```
/// use cinedex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/movies/catalog.json"), "/host/movies/catalog.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Formats a sandbox path the way the user wrote it, with `~` for `/host`.
///
/// Used in empty-state hints, where `/host/...` would only confuse.
///
/// # Examples
///
/// ```
/// use cinedex::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/movies/catalog.json"), "~/movies/catalog.json");
/// assert_eq!(display_path("/host"), "~");
/// assert_eq!(display_path("/hostile/catalog.json"), "/hostile/catalog.json");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}
