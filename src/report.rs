//! What a run did.

use crate::file_category::Category;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// A file moved into a category folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub category: Category,
}

/// An archive unpacked into its own folder and then deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedArchive {
    pub archive: PathBuf,
    pub folder: PathBuf,
}

/// A non-fatal problem. The run continues past each one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// An archive could not be unpacked and was kept as is.
    ArchiveExtractFailure { path: PathBuf, reason: String },
    /// A scanned directory still had content at cleanup.
    DirectoryNotEmpty { path: PathBuf, reason: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::ArchiveExtractFailure { path, reason } => {
                write!(f, "Could not unpack {}: {}", path.display(), reason)
            }
            Issue::DirectoryNotEmpty { path, reason } => {
                write!(f, "Could not remove folder {}: {}", path.display(), reason)
            }
        }
    }
}

/// Summary of an organization run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizeReport {
    pub root: PathBuf,
    pub moved: Vec<MovedFile>,
    pub extracted: Vec<ExtractedArchive>,
    pub removed_dirs: Vec<PathBuf>,
    /// Files left in place by filter rules.
    pub excluded: Vec<PathBuf>,
    pub known_extensions: BTreeSet<String>,
    pub unknown_extensions: BTreeSet<String>,
    pub issues: Vec<Issue>,
}

impl OrganizeReport {
    /// Creates an empty report for `root`.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Number of files handled per category; extracted archives count
    /// toward `archives`.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for moved in &self.moved {
            *counts.entry(moved.category).or_insert(0) += 1;
        }
        if !self.extracted.is_empty() {
            *counts.entry(Category::Archives).or_insert(0) += self.extracted.len();
        }
        counts
    }

    /// Total number of files moved or extracted.
    pub fn total_files(&self) -> usize {
        self.moved.len() + self.extracted.len()
    }

    /// True if nothing non-fatal went wrong.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
