//! Removal of the folders a run emptied.

use crate::report::Issue;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Outcome of the cleanup phase.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub issues: Vec<Issue>,
}

/// Removes scanned folders, deepest first.
///
/// `folders` is the scanner's pre-order list, so walking it backwards visits
/// children before their parents. Only empty folders are removed; anything
/// else is reported and skipped.
pub fn cleanup(folders: &[PathBuf]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for folder in folders.iter().rev() {
        match fs::remove_dir(folder) {
            Ok(()) => {
                debug!(folder = %folder.display(), "removed");
                report.removed.push(folder.clone());
            }
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "could not remove folder");
                report.issues.push(Issue::DirectoryNotEmpty {
                    path: folder.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}
