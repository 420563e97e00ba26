//! File path helpers

use std::path::{Path, PathBuf};

/// Resolve a leading `~` component against the home directory.
/// Paths without one are returned as given.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
