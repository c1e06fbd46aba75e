//! Read-only traversal of the tree to organize.
//!
//! The scanner walks the root depth-first, pre-order, and buckets every file
//! by category. It records the subdirectories it descends into so they can be
//! removed once emptied, and never descends into a folder named after a
//! category (those hold output of an earlier run). Nothing on disk is touched.
//!
//! Directory listing goes through the [`DirectoryReader`] trait so the walk
//! can run against an in-memory tree in tests.

use crate::config::CompiledFilters;
use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::{Category, FileMapper, extension_of};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Kind of a directory entry. Anything that is not a real directory,
/// symlinks included, counts as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Whether it is a file or a directory.
    pub kind: EntryKind,
}

impl DirEntryInfo {
    /// The entry's own name, lossily converted to UTF-8.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Source of directory listings for the scanner.
pub trait DirectoryReader {
    /// Returns the kind of the entry at `path`.
    fn kind_of(&self, path: &Path) -> io::Result<EntryKind>;

    /// Lists the direct children of `dir`.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Resolves `path` to an absolute path without `.` or `..` components.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// [`DirectoryReader`] backed by the local filesystem.
///
/// Entries are returned sorted by name so runs are deterministic. Symlinks
/// are reported as files and never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DirectoryReader for LocalFs {
    fn kind_of(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = fs::metadata(path)?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        })
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let kind = if entry.file_type()?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(DirEntryInfo {
                path: entry.path(),
                kind,
            });
        }
        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

/// Everything the scanner found, consumed by the reorganizer and cleanup.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Absolute path of the scanned root.
    pub root: PathBuf,
    buckets: BTreeMap<Category, Vec<PathBuf>>,
    /// Recognized extensions seen during the scan.
    pub known_extensions: BTreeSet<String>,
    /// Unrecognized extensions seen during the scan.
    pub unknown_extensions: BTreeSet<String>,
    /// Subdirectories descended into, in pre-order.
    pub folders: Vec<PathBuf>,
    /// Files skipped because of filter rules.
    pub excluded: Vec<PathBuf>,
}

impl ScanResult {
    /// Files assigned to `category`, in discovery order.
    pub fn files(&self, category: Category) -> &[PathBuf] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of files across all categories.
    pub fn total_files(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True if the scan found no files to organize.
    pub fn is_empty(&self) -> bool {
        self.total_files() == 0
    }

    fn push(&mut self, category: Category, path: PathBuf) {
        self.buckets.entry(category).or_default().push(path);
    }
}

/// Walks a tree and builds a [`ScanResult`].
pub struct Scanner<R = LocalFs> {
    reader: R,
    mapper: FileMapper,
    filters: CompiledFilters,
}

impl Scanner<LocalFs> {
    /// Creates a scanner over the local filesystem with no filters.
    pub fn new() -> Self {
        Self::with_reader(LocalFs)
    }
}

impl Default for Scanner<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DirectoryReader> Scanner<R> {
    /// Creates a scanner over an arbitrary directory reader.
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            mapper: FileMapper::default(),
            filters: CompiledFilters::default(),
        }
    }

    /// Applies filter rules; excluded files are left where they are.
    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Scans `root` recursively.
    ///
    /// A relative `root` is resolved first, so every path in the result is
    /// absolute.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::InvalidRoot`] if `root` is missing or not a
    /// directory, and [`OrganizeError::ReadDirFailed`] if a directory cannot
    /// be listed.
    pub fn scan(&self, root: &Path) -> OrganizeResult<ScanResult> {
        match self.reader.kind_of(root) {
            Ok(EntryKind::Directory) => {}
            Ok(EntryKind::File) => {
                return Err(OrganizeError::InvalidRoot {
                    path: root.to_path_buf(),
                    reason: "not a directory".to_string(),
                });
            }
            Err(e) => {
                return Err(OrganizeError::InvalidRoot {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }

        let root = self
            .reader
            .canonicalize(root)
            .map_err(|e| OrganizeError::InvalidRoot {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut result = ScanResult {
            root: root.clone(),
            ..Default::default()
        };
        self.walk(&root, &root, &mut result)?;

        info!(
            files = result.total_files(),
            folders = result.folders.len(),
            excluded = result.excluded.len(),
            "scan complete"
        );
        Ok(result)
    }

    fn walk(&self, root: &Path, dir: &Path, result: &mut ScanResult) -> OrganizeResult<()> {
        debug!(dir = %dir.display(), "scanning");
        let entries = self
            .reader
            .read_dir(dir)
            .map_err(|e| OrganizeError::ReadDirFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;

        for entry in entries {
            match entry.kind {
                EntryKind::Directory => {
                    if Category::is_category_dir(&entry.name()) {
                        debug!(dir = %entry.path.display(), "skipping category folder");
                        continue;
                    }
                    result.folders.push(entry.path.clone());
                    self.walk(root, &entry.path, result)?;
                }
                EntryKind::File => self.record_file(root, entry.path, result),
            }
        }
        Ok(())
    }

    fn record_file(&self, root: &Path, path: PathBuf, result: &mut ScanResult) {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if !self.filters.should_include(relative) {
            debug!(file = %path.display(), "excluded by filters");
            result.excluded.push(path);
            return;
        }

        let extension = extension_of(&path);
        let category = match self.mapper.extension_to_category(&extension) {
            Some(category) => {
                result.known_extensions.insert(extension);
                category
            }
            None => {
                if !extension.is_empty() {
                    result.unknown_extensions.insert(extension);
                }
                Category::Other
            }
        };
        result.push(category, path);
    }
}
