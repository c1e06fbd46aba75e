//! The three phases of a run: scan, reorganize, clean up.
//!
//! The scan finishes before anything is mutated, and the cleanup only sees
//! folders the scan recorded.

use crate::cleanup::cleanup;
use crate::config::{CompiledFilters, Config, ConfigError, ConflictPolicy};
use crate::error::OrganizeResult;
use crate::file_organizer::{FileOrganizer, PlannedAction};
use crate::report::OrganizeReport;
use crate::scanner::{ScanResult, Scanner};
use std::path::Path;
use tracing::info;

/// Runs organization with a given set of filters and conflict policy.
#[derive(Debug, Clone, Default)]
pub struct Organizer {
    filters: CompiledFilters,
    on_conflict: ConflictPolicy,
}

impl Organizer {
    /// Creates an organizer with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an organizer from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter pattern does not compile.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            filters: config.compile()?,
            on_conflict: config.organize.on_conflict,
        })
    }

    /// Scans `root` without touching it.
    pub fn scan(&self, root: &Path) -> OrganizeResult<ScanResult> {
        Scanner::new().with_filters(self.filters.clone()).scan(root)
    }

    /// Lists what [`apply`](Self::apply) would do with `scan`.
    pub fn plan(&self, scan: &ScanResult) -> Vec<PlannedAction> {
        self.file_organizer(&scan.root).plan(scan)
    }

    /// Reorganizes the scanned root according to `scan`, then removes the
    /// scanned folders that ended up empty. `on_item` is called once per file.
    pub fn apply<F>(&self, scan: &ScanResult, on_item: F) -> OrganizeResult<OrganizeReport>
    where
        F: FnMut(&Path),
    {
        let mut report = self.file_organizer(&scan.root).reorganize(scan, on_item)?;

        let cleaned = cleanup(&scan.folders);
        report.removed_dirs = cleaned.removed;
        report.issues.extend(cleaned.issues);

        info!(
            root = %scan.root.display(),
            files = report.total_files(),
            removed_dirs = report.removed_dirs.len(),
            issues = report.issues.len(),
            "organize complete"
        );
        Ok(report)
    }

    /// Runs all three phases on `root`.
    pub fn run(&self, root: &Path) -> OrganizeResult<OrganizeReport> {
        let scan = self.scan(root)?;
        self.apply(&scan, |_| {})
    }

    fn file_organizer(&self, root: &Path) -> FileOrganizer {
        FileOrganizer::new(root).with_conflict_policy(self.on_conflict)
    }
}

/// Organizes the tree under `root` with the built-in defaults.
///
/// # Errors
///
/// Fails with [`crate::OrganizeError::InvalidRoot`] before touching anything
/// if `root` is not a directory, and with another [`crate::OrganizeError`]
/// on any unexpected I/O failure mid-run. Archive and cleanup failures are
/// not errors; they are listed in [`OrganizeReport::issues`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// let report = clean_folder::organize(Path::new("/home/user/Downloads")).unwrap();
/// for issue in &report.issues {
///     eprintln!("{issue}");
/// }
/// ```
pub fn organize(root: &Path) -> OrganizeResult<OrganizeReport> {
    Organizer::new().run(root)
}

/// Same as [`organize`], with filters and conflict policy from `config`.
///
/// # Errors
///
/// Returns [`crate::OrganizeError::InvalidConfig`] if a filter pattern does
/// not compile; nothing is scanned in that case.
pub fn organize_with_config(root: &Path, config: &Config) -> OrganizeResult<OrganizeReport> {
    Organizer::from_config(config)?.run(root)
}
