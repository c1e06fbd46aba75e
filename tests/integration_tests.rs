use clean_folder::{Category, ConflictPolicy, Config, Issue, Organizer, organize};
/// Integration tests for clean-folder
///
/// These tests build real directory trees in a temporary folder and run the
/// complete scan, reorganize and cleanup cycle on them.
///
/// Test categories:
/// 1. Basic placement and renaming
/// 2. Archives
/// 3. Folder cleanup
/// 4. Repeated runs
/// 5. Name collisions and configuration
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary directory with helpers for building and inspecting trees.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file (and its parent folders) with content.
    fn create_file(&self, rel_path: &str, content: &[u8]) {
        let file_path = self.path().join(rel_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content)
            .expect("Failed to write file content");
    }

    fn create_text_file(&self, rel_path: &str, content: &str) {
        self.create_file(rel_path, content.as_bytes());
    }

    fn create_subdir(&self, rel_path: &str) {
        fs::create_dir_all(self.path().join(rel_path)).expect("Failed to create subdirectory");
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_dir(), "Directory should exist: {}", path.display());
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "Path should not exist: {}", path.display());
    }

    fn read(&self, rel_path: &str) -> String {
        fs::read_to_string(self.path().join(rel_path)).expect("Failed to read file")
    }

    /// All files under the root, relative and sorted.
    fn list_files_recursive(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        Self::walk_dir(self.path(), &mut files);
        let mut relative: Vec<_> = files
            .into_iter()
            .map(|p| p.strip_prefix(self.path()).unwrap().to_path_buf())
            .collect();
        relative.sort();
        relative
    }

    fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                } else if path.is_dir() {
                    Self::walk_dir(&path, files);
                }
            }
        }
    }
}

// ============================================================================
// Test Data: Archives
// ============================================================================

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        writer.write_all(data).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, *data)
            .expect("Failed to append tar entry");
    }
    builder.into_inner().expect("Failed to finish tar")
}

fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder =
        flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).expect("Failed to gzip");
    encoder.finish().expect("Failed to finish gzip")
}

// ============================================================================
// Test Suite 1: Basic Placement
// ============================================================================

#[test]
fn test_organize_empty_directory() {
    let fixture = TestFixture::new();

    let report = organize(fixture.path()).expect("Should succeed on empty directory");

    assert_eq!(report.total_files(), 0);
    assert!(report.is_clean());
    assert!(fixture.list_files_recursive().is_empty());
    assert_eq!(fs::read_dir(fixture.path()).unwrap().count(), 0);
}

#[test]
fn test_cyrillic_image_is_transliterated() {
    let fixture = TestFixture::new();
    fixture.create_text_file("фото.JPG", "pixels");

    organize(fixture.path()).unwrap();

    fixture.assert_file_exists("images/foto.JPG");
    fixture.assert_not_exists("фото.JPG");
}

#[test]
fn test_file_without_extension_goes_to_other() {
    let fixture = TestFixture::new();
    fixture.create_text_file("README", "read me");

    organize(fixture.path()).unwrap();

    fixture.assert_file_exists("other/README");
}

#[test]
fn test_every_category_gets_its_folder() {
    let fixture = TestFixture::new();
    fixture.create_text_file("pic.png", "x");
    fixture.create_text_file("Пісня.MP3", "x");
    fixture.create_text_file("report final.docx", "x");
    fixture.create_text_file("clip.mov", "x");
    fixture.create_text_file("script.py", "x");
    fixture.create_text_file(".bashrc", "x");

    let report = organize(fixture.path()).unwrap();

    fixture.assert_file_exists("images/pic.png");
    fixture.assert_file_exists("audio/Pisnja.MP3");
    fixture.assert_file_exists("documents/report_final.docx");
    fixture.assert_file_exists("video/clip.mov");
    fixture.assert_file_exists("other/script.py");
    fixture.assert_file_exists("other/_bashrc");
    fixture.assert_not_exists("archives");

    let counts = report.category_counts();
    assert_eq!(counts.get(&Category::Other), Some(&2));
    assert_eq!(report.total_files(), 6);
    assert!(report.known_extensions.contains("MP3"));
    assert!(report.known_extensions.contains("DOCX"));
    assert!(report.unknown_extensions.contains("PY"));
    assert_eq!(report.unknown_extensions.len(), 1);
}

#[test]
fn test_nested_files_are_collected_at_root() {
    let fixture = TestFixture::new();
    fixture.create_text_file("a/b/c/deep.pdf", "x");
    fixture.create_text_file("a/top.wav", "x");

    organize(fixture.path()).unwrap();

    fixture.assert_file_exists("documents/deep.pdf");
    fixture.assert_file_exists("audio/top.wav");
    fixture.assert_not_exists("a");
}

// ============================================================================
// Test Suite 2: Archives
// ============================================================================

#[test]
fn test_corrupt_zip_is_kept_in_archives() {
    let fixture = TestFixture::new();
    fixture.create_text_file("broken.zip", "definitely not a zip");

    let report = organize(fixture.path()).unwrap();

    fixture.assert_file_exists("archives/broken.zip");
    fixture.assert_not_exists("archives/broken");
    fixture.assert_not_exists("broken.zip");
    assert_eq!(fixture.read("archives/broken.zip"), "definitely not a zip");
    assert!(matches!(
        report.issues.as_slice(),
        [Issue::ArchiveExtractFailure { .. }]
    ));
}

#[test]
fn test_tar_is_unpacked_and_deleted() {
    let fixture = TestFixture::new();
    fixture.create_file("data.tar", &tar_bytes(&[("inside.txt", b"payload")]));

    let report = organize(fixture.path()).unwrap();

    fixture.assert_file_exists("archives/data/inside.txt");
    assert_eq!(fixture.read("archives/data/inside.txt"), "payload");
    fixture.assert_not_exists("data.tar");
    fixture.assert_not_exists("archives/data.tar");
    assert_eq!(report.extracted.len(), 1);
    assert!(report.is_clean());
}

#[test]
fn test_zip_is_unpacked_under_normalized_name() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "Архів.zip",
        &zip_bytes(&[("a.txt", b"alpha"), ("nested/b.txt", b"beta")]),
    );

    organize(fixture.path()).unwrap();

    fixture.assert_file_exists("archives/Arhiv/a.txt");
    fixture.assert_file_exists("archives/Arhiv/nested/b.txt");
    fixture.assert_not_exists("Архів.zip");
}

#[test]
fn test_tar_gz_is_unpacked() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "backup.tar.gz",
        &gzip_bytes(&tar_bytes(&[("notes.txt", b"n")])),
    );

    organize(fixture.path()).unwrap();

    fixture.assert_file_exists("archives/backup.tar/notes.txt");
    fixture.assert_not_exists("backup.tar.gz");
}

#[test]
fn test_extracted_content_is_not_reorganized() {
    let fixture = TestFixture::new();
    fixture.create_file("bundle.zip", &zip_bytes(&[("photo.jpg", b"x")]));
    fixture.create_text_file("loose.jpg", "y");

    organize(fixture.path()).unwrap();

    fixture.assert_file_exists("archives/bundle/photo.jpg");
    fixture.assert_file_exists("images/loose.jpg");
    fixture.assert_not_exists("images/photo.jpg");
}

#[test]
fn test_nested_archive_lands_under_root_archives() {
    let fixture = TestFixture::new();
    fixture.create_file("downloads/pack.zip", &zip_bytes(&[("f.txt", b"f")]));
    fixture.create_text_file("downloads/bad.tar", "garbage");

    let report = organize(fixture.path()).unwrap();

    fixture.assert_file_exists("archives/pack/f.txt");
    fixture.assert_file_exists("archives/bad.tar");
    fixture.assert_not_exists("archives/bad");
    fixture.assert_not_exists("downloads");
    assert_eq!(report.issues.len(), 1);
}

#[test]
fn test_failed_archive_does_not_block_later_extraction() {
    let fixture = TestFixture::new();
    fixture.create_text_file("backup.tar", "corrupt");
    fixture.create_file(
        "backup.tar.gz",
        &gzip_bytes(&tar_bytes(&[("notes.txt", b"n")])),
    );
    fixture.create_text_file("old/note.txt", "x");

    let report = organize(fixture.path()).expect("Run should complete");

    fixture.assert_file_exists("archives/backup.tar");
    assert_eq!(fixture.read("archives/backup.tar"), "corrupt");
    fixture.assert_file_exists("archives/backup.tar_1/notes.txt");
    fixture.assert_file_exists("documents/note.txt");
    fixture.assert_not_exists("backup.tar.gz");
    fixture.assert_not_exists("old");
    assert_eq!(report.extracted.len(), 1);
    assert_eq!(report.issues.len(), 1);
}

#[test]
fn test_failed_archive_from_earlier_run_does_not_block_extraction() {
    let fixture = TestFixture::new();
    fixture.create_text_file("backup.tar", "corrupt");
    organize(fixture.path()).expect("First run should complete");
    fixture.assert_file_exists("archives/backup.tar");

    fixture.create_file(
        "backup.tar.gz",
        &gzip_bytes(&tar_bytes(&[("notes.txt", b"n")])),
    );
    fixture.create_text_file("old/note.txt", "x");
    let report = organize(fixture.path()).expect("Second run should complete");

    fixture.assert_file_exists("archives/backup.tar");
    fixture.assert_file_exists("archives/backup.tar_1/notes.txt");
    fixture.assert_not_exists("old");
    assert!(report.is_clean());
}

#[test]
fn test_failed_archive_does_not_clobber_extracted_folder() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "backup.tar.gz",
        &gzip_bytes(&tar_bytes(&[("notes.txt", b"n")])),
    );
    organize(fixture.path()).expect("First run should complete");

    fixture.create_text_file("backup.tar", "corrupt");
    let report = organize(fixture.path()).expect("Second run should complete");

    fixture.assert_file_exists("archives/backup.tar/notes.txt");
    fixture.assert_file_exists("archives/backup_1.tar");
    assert_eq!(report.issues.len(), 1);
}

// ============================================================================
// Test Suite 3: Folder Cleanup
// ============================================================================

#[test]
fn test_emptied_folder_is_removed() {
    let fixture = TestFixture::new();
    fixture.create_text_file("old_stuff/a.txt", "a");
    fixture.create_text_file("old_stuff/b.png", "b");
    fixture.create_subdir("old_stuff/empty_child");

    let report = organize(fixture.path()).unwrap();

    fixture.assert_not_exists("old_stuff");
    assert_eq!(report.removed_dirs.len(), 2);
    assert!(report.is_clean());
}

#[test]
fn test_folder_with_leftover_is_reported_and_kept() {
    let fixture = TestFixture::new();
    fixture.create_text_file("old_stuff/a.txt", "a");
    fixture.create_text_file("keep/images/already.png", "x");
    fixture.create_text_file("keep/movie.mp4", "x");

    let report = organize(fixture.path()).unwrap();

    fixture.assert_not_exists("old_stuff");
    fixture.assert_dir_exists("keep");
    fixture.assert_file_exists("keep/images/already.png");
    fixture.assert_file_exists("video/movie.mp4");
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        Issue::DirectoryNotEmpty { path, .. }
            if path == &fs::canonicalize(fixture.path()).unwrap().join("keep")
    )));
}

// ============================================================================
// Test Suite 4: Repeated Runs
// ============================================================================

#[test]
fn test_second_run_is_a_no_op() {
    let fixture = TestFixture::new();
    fixture.create_text_file("фото.JPG", "x");
    fixture.create_text_file("misc/notes.txt", "x");
    fixture.create_text_file("README", "x");
    fixture.create_text_file("broken.zip", "x");
    fixture.create_file("data.tar", &tar_bytes(&[("inside.txt", b"payload")]));

    organize(fixture.path()).unwrap();
    let after_first = fixture.list_files_recursive();

    let report = organize(fixture.path()).unwrap();
    let after_second = fixture.list_files_recursive();

    assert_eq!(after_first, after_second);
    assert_eq!(report.total_files(), 0);
    assert!(report.is_clean());
}

// ============================================================================
// Test Suite 5: Name Collisions and Configuration
// ============================================================================

#[test]
fn test_colliding_names_overwrite_in_name_order() {
    let fixture = TestFixture::new();
    fixture.create_text_file("a b.txt", "first");
    fixture.create_text_file("a_b.txt", "second");

    organize(fixture.path()).unwrap();

    assert_eq!(fixture.read("documents/a_b.txt"), "second");
    assert_eq!(fixture.list_files_recursive().len(), 1);
}

#[test]
fn test_colliding_names_renamed_with_policy() {
    let fixture = TestFixture::new();
    fixture.create_text_file("a b.txt", "first");
    fixture.create_text_file("a_b.txt", "second");

    let mut config = Config::default();
    config.organize.on_conflict = ConflictPolicy::Rename;
    Organizer::from_config(&config)
        .unwrap()
        .run(fixture.path())
        .unwrap();

    assert_eq!(fixture.read("documents/a_b.txt"), "first");
    assert_eq!(fixture.read("documents/a_b_1.txt"), "second");
}

#[test]
fn test_config_file_filters_are_applied() {
    let fixture = TestFixture::new();
    fixture.create_text_file("keep.txt", "x");
    fixture.create_text_file("partial.mkv.part", "x");
    let config = Config::from_toml(
        r#"
        [filters.exclude]
        patterns = ["*.part"]
        "#,
    )
    .unwrap();

    let report = Organizer::from_config(&config)
        .unwrap()
        .run(fixture.path())
        .unwrap();

    fixture.assert_file_exists("documents/keep.txt");
    fixture.assert_file_exists("partial.mkv.part");
    assert_eq!(report.excluded.len(), 1);
}

#[test]
fn test_invalid_root_mutates_nothing() {
    let fixture = TestFixture::new();
    fixture.create_text_file("file.txt", "x");

    let result = organize(&fixture.path().join("file.txt"));

    assert!(result.is_err());
    fixture.assert_file_exists("file.txt");
    fixture.assert_not_exists("documents");
}
