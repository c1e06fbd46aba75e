/// Moving files into category folders and unpacking archives.
///
/// This module performs every filesystem mutation of a run except directory
/// cleanup. It works from a finished [`ScanResult`], so nothing it creates is
/// ever picked up by the same run.
use crate::archive;
use crate::config::ConflictPolicy;
use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::Category;
use crate::normalize::normalize;
use crate::report::{ExtractedArchive, Issue, MovedFile, OrganizeReport};
use crate::scanner::ScanResult;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A step a run would take, as shown by a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlannedAction {
    Move {
        from: PathBuf,
        to: PathBuf,
        category: Category,
    },
    Extract {
        archive: PathBuf,
        folder: PathBuf,
    },
}

/// Result of handling one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Unpacked, and the archive file deleted.
    Extracted(ExtractedArchive),
    /// Not unpacked; the archive file was moved into `archives/` unchanged.
    Failed { moved: MovedFile, reason: String },
}

/// Organizes files under a root into its category folders.
pub struct FileOrganizer {
    root: PathBuf,
    on_conflict: ConflictPolicy,
}

fn file_name_of(path: &Path) -> OrganizeResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| OrganizeError::FileMoveFailure {
            from: path.to_path_buf(),
            to: PathBuf::new(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })
}

/// Name of the folder an archive is unpacked into: its file name without the
/// final extension, normalized.
pub fn archive_folder_name(archive: &Path) -> String {
    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    normalize(&stem)
}

fn ensure_dir(path: &Path) -> OrganizeResult<()> {
    fs::create_dir_all(path).map_err(|e| OrganizeError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Paths already in use, on disk or by earlier steps of a plan.
#[derive(Debug, Default)]
struct Claimed {
    files: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
}

impl Claimed {
    fn holds_file(&self, path: &Path) -> bool {
        self.files.contains(path) || (path.exists() && !path.is_dir())
    }

    fn holds_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path) || path.is_dir()
    }

    fn is_taken(&self, path: &Path) -> bool {
        self.holds_file(path) || self.holds_dir(path)
    }
}

/// Appends `_1`, `_2`, ... to `candidate` until `is_taken` rejects it.
///
/// With `keep_extension` the counter goes before the last extension
/// (`a_b_1.txt`), otherwise after the whole name (`backup.tar_1`).
fn unique_path<F>(candidate: PathBuf, keep_extension: bool, is_taken: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    if !is_taken(&candidate) {
        return candidate;
    }

    let name = candidate
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if keep_extension && !stem.is_empty() => {
            (stem.to_string(), format!(".{ext}"))
        }
        _ => (name.clone(), String::new()),
    };

    let mut n = 1;
    loop {
        let next = candidate.with_file_name(format!("{stem}_{n}{ext}"));
        if !is_taken(&next) {
            return next;
        }
        n += 1;
    }
}

impl FileOrganizer {
    /// Creates an organizer for `root` that overwrites on name collisions.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            on_conflict: ConflictPolicy::default(),
        }
    }

    /// Sets how destination name collisions are resolved.
    pub fn with_conflict_policy(mut self, on_conflict: ConflictPolicy) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    /// Path of the folder for `category` directly under the root.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Final path for a file headed to `candidate`.
    ///
    /// A directory in the way is always stepped around; an existing file is
    /// replaced or stepped around depending on the conflict policy.
    fn file_destination(&self, candidate: PathBuf, claimed: &Claimed) -> PathBuf {
        let occupied = claimed.holds_dir(&candidate)
            || (self.on_conflict == ConflictPolicy::Rename && claimed.holds_file(&candidate));
        if occupied {
            unique_path(candidate, true, |p| claimed.is_taken(p))
        } else {
            candidate
        }
    }

    /// Folder `archive` is unpacked into. An existing folder is reused; a
    /// file of the same name, such as an earlier archive that could not be
    /// unpacked, is stepped around.
    fn extraction_folder(&self, archive: &Path, claimed: &Claimed) -> PathBuf {
        let folder = self
            .category_dir(Category::Archives)
            .join(archive_folder_name(archive));
        unique_path(folder, false, |p| claimed.holds_file(p))
    }

    /// Moves a file into its category folder under its normalized name.
    ///
    /// The category folder is created if missing. With the default policy an
    /// existing file of the same name is replaced.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use clean_folder::file_category::Category;
    /// use clean_folder::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let organizer = FileOrganizer::new(Path::new("/path/to/base"));
    /// let moved = organizer
    ///     .move_to_category(Path::new("/path/to/base/фото.JPG"), Category::Images)
    ///     .unwrap();
    /// assert_eq!(moved.to, Path::new("/path/to/base/images/foto.JPG"));
    /// ```
    pub fn move_to_category(&self, file: &Path, category: Category) -> OrganizeResult<MovedFile> {
        let category_path = self.category_dir(category);
        ensure_dir(&category_path)?;

        let name = normalize(&file_name_of(file)?);
        let destination = self.file_destination(category_path.join(name), &Claimed::default());

        fs::rename(file, &destination).map_err(|e| OrganizeError::FileMoveFailure {
            from: file.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;
        debug!(from = %file.display(), to = %destination.display(), "moved");

        Ok(MovedFile {
            from: file.to_path_buf(),
            to: destination,
            category,
        })
    }

    /// Unpacks an archive into `archives/<normalized stem>/` and deletes it.
    ///
    /// When a file already sits at that path the folder gets a `_1`, `_2`, ...
    /// suffix instead. If the file is not a readable archive, the extraction
    /// folder is removed again (only if this call created it, partial output
    /// included) and the archive is moved into `archives/` unchanged. That
    /// case is not an error.
    ///
    /// # Errors
    ///
    /// Fails only on unexpected I/O: creating folders, moving the unreadable
    /// archive, or deleting the unpacked one.
    pub fn unpack_archive(&self, file: &Path) -> OrganizeResult<ArchiveOutcome> {
        let archives_dir = self.category_dir(Category::Archives);
        ensure_dir(&archives_dir)?;

        let folder = self.extraction_folder(file, &Claimed::default());
        let existed = folder.exists();
        ensure_dir(&folder)?;

        match archive::extract(file, &folder) {
            Ok(format) => {
                fs::remove_file(file).map_err(|e| OrganizeError::FileRemovalFailed {
                    path: file.to_path_buf(),
                    source: e,
                })?;
                debug!(archive = %file.display(), folder = %folder.display(), ?format, "unpacked");
                Ok(ArchiveOutcome::Extracted(ExtractedArchive {
                    archive: file.to_path_buf(),
                    folder,
                }))
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(archive = %file.display(), %reason, "could not unpack archive");
                if !existed && let Err(err) = fs::remove_dir_all(&folder) {
                    warn!(folder = %folder.display(), error = %err, "could not remove extraction folder");
                }
                let moved = self.move_to_category(file, Category::Archives)?;
                Ok(ArchiveOutcome::Failed { moved, reason })
            }
        }
    }

    /// Applies a scan: moves every plain file, then unpacks every archive.
    ///
    /// `on_item` is called with each file's original path once it has been
    /// handled. Archive failures are recorded as issues; any other error
    /// aborts, leaving already moved files where they are.
    pub fn reorganize<F>(&self, scan: &ScanResult, mut on_item: F) -> OrganizeResult<OrganizeReport>
    where
        F: FnMut(&Path),
    {
        let mut report = OrganizeReport::new(self.root.clone());
        report.known_extensions = scan.known_extensions.clone();
        report.unknown_extensions = scan.unknown_extensions.clone();
        report.excluded = scan.excluded.clone();

        for category in Category::PROCESSING_ORDER {
            for file in scan.files(category) {
                if category == Category::Archives {
                    match self.unpack_archive(file)? {
                        ArchiveOutcome::Extracted(extracted) => report.extracted.push(extracted),
                        ArchiveOutcome::Failed { moved, reason } => {
                            report.issues.push(Issue::ArchiveExtractFailure {
                                path: file.clone(),
                                reason,
                            });
                            report.moved.push(moved);
                        }
                    }
                } else {
                    report.moved.push(self.move_to_category(file, category)?);
                }
                on_item(file.as_path());
            }
        }

        info!(
            moved = report.moved.len(),
            extracted = report.extracted.len(),
            "reorganize complete"
        );
        Ok(report)
    }

    /// Lists what [`reorganize`](Self::reorganize) would do, without touching
    /// the filesystem.
    ///
    /// Destinations are resolved the way a run resolves them, including name
    /// collisions between files of the same run. Archives whose signature is
    /// not recognized are listed as moves into `archives/`; an archive that is
    /// recognized but damaged past its header still shows as an extraction.
    pub fn plan(&self, scan: &ScanResult) -> Vec<PlannedAction> {
        let mut claimed = Claimed::default();
        let mut actions = Vec::with_capacity(scan.total_files());

        for category in Category::PROCESSING_ORDER {
            for file in scan.files(category) {
                let action = if category == Category::Archives && archive::detect(file).is_ok() {
                    let folder = self.extraction_folder(file, &claimed);
                    claimed.dirs.insert(folder.clone());
                    PlannedAction::Extract {
                        archive: file.clone(),
                        folder,
                    }
                } else {
                    let name = file
                        .file_name()
                        .map(|n| normalize(&n.to_string_lossy()))
                        .unwrap_or_default();
                    let to = self.file_destination(self.category_dir(category).join(name), &claimed);
                    claimed.files.insert(to.clone());
                    PlannedAction::Move {
                        from: file.clone(),
                        to,
                        category,
                    }
                };
                actions.push(action);
            }
        }
        actions
    }
}
