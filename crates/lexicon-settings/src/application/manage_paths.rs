//! Use cases: edit the list of dictionary search paths.

use lexicon_core::Configuration;
use tracing::{debug, warn};

/// Appends `path` to the search paths.
///
/// Duplicates are allowed and kept; a warning is logged.
pub fn add_path(config: &mut Configuration, path: impl Into<String>) {
    let path = path.into();
    if config.paths.contains(&path) {
        warn!(%path, "path is already listed; adding a duplicate entry");
    }
    debug!(%path, "adding dictionary search path");
    config.paths.push(path);
}

/// Removes every occurrence of `path` and returns how many were removed.
pub fn remove_path(config: &mut Configuration, path: &str) -> usize {
    let before = config.paths.len();
    config.paths.retain(|p| p != path);
    let removed = before - config.paths.len();
    if removed == 0 {
        warn!(%path, "path not listed; nothing removed");
    }
    removed
}
