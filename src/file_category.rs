/// File categorization by extension.
///
/// This module holds the fixed table mapping file extensions to the six
/// category folders and the classifier built on top of it.
///
/// # Examples
///
/// ```
/// use clean_folder::file_category::{Category, FileMapper};
///
/// let mapper = FileMapper::default();
/// assert_eq!(mapper.classify("JPG"), Category::Images);
/// assert_eq!(mapper.classify("mp3"), Category::Audio);
/// assert_eq!(mapper.classify(""), Category::Other);
/// ```
use serde::Serialize;
use std::path::Path;

/// Represents one of the fixed category folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// JPEG, JPG, PNG, SVG
    Images,
    /// MP3, OGG, WAV, AMR
    Audio,
    /// DOC, DOCX, TXT, PDF, XLSX, PPTX
    Documents,
    /// AVI, MP4, MOV, MKV
    Video,
    /// ZIP, GZ, TAR. Unpacked rather than moved.
    Archives,
    /// Fallback for everything unrecognized.
    Other,
}

impl Category {
    /// All categories in table-declaration order.
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Audio,
        Category::Documents,
        Category::Video,
        Category::Archives,
        Category::Other,
    ];

    /// Order in which the reorganizer processes the buckets. Archives go last
    /// so content extracted during a run is never picked up by a plain move.
    pub const PROCESSING_ORDER: [Category; 6] = [
        Category::Images,
        Category::Audio,
        Category::Video,
        Category::Documents,
        Category::Other,
        Category::Archives,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use clean_folder::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Other.dir_name(), "other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Audio => "audio",
            Category::Documents => "documents",
            Category::Video => "video",
            Category::Archives => "archives",
            Category::Other => "other",
        }
    }

    /// Returns the category whose folder is called `name`, if any.
    pub fn from_dir_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.dir_name() == name)
    }

    /// True if `name` is one of the six category folder names.
    pub fn is_category_dir(name: &str) -> bool {
        Self::from_dir_name(name).is_some()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The built-in category table. `Other` has no extensions of its own.
pub const CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (Category::Images, &["JPEG", "JPG", "PNG", "SVG"]),
    (Category::Audio, &["MP3", "OGG", "WAV", "AMR"]),
    (
        Category::Documents,
        &["DOC", "DOCX", "TXT", "PDF", "XLSX", "PPTX"],
    ),
    (Category::Video, &["AVI", "MP4", "MOV", "MKV"]),
    (Category::Archives, &["ZIP", "GZ", "TAR"]),
    (Category::Other, &[]),
];

/// Maps file extensions to categories.
///
/// Lookups walk the table in declaration order, so if an extension were ever
/// listed under two categories the first one wins.
#[derive(Debug, Clone)]
pub struct FileMapper {
    table: &'static [(Category, &'static [&'static str])],
}

impl FileMapper {
    /// Creates a mapper over the built-in table.
    pub fn new() -> Self {
        Self::with_table(CATEGORY_TABLE)
    }

    /// Creates a mapper over an arbitrary static table.
    pub fn with_table(table: &'static [(Category, &'static [&'static str])]) -> Self {
        Self { table }
    }

    /// Maps an extension to a category, or `None` if no table row lists it.
    ///
    /// # Examples
    ///
    /// ```
    /// use clean_folder::file_category::{Category, FileMapper};
    ///
    /// let mapper = FileMapper::default();
    /// assert_eq!(mapper.extension_to_category("pdf"), Some(Category::Documents));
    /// assert_eq!(mapper.extension_to_category("xyz"), None);
    /// ```
    pub fn extension_to_category(&self, ext: &str) -> Option<Category> {
        if ext.is_empty() {
            return None;
        }
        let ext = ext.to_uppercase();
        self.table
            .iter()
            .find(|(_, extensions)| extensions.contains(&ext.as_str()))
            .map(|(category, _)| *category)
    }

    /// Classifies an extension, falling back to [`Category::Other`].
    pub fn classify(&self, ext: &str) -> Category {
        self.extension_to_category(ext).unwrap_or(Category::Other)
    }
}

impl Default for FileMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a file's extension uppercased and without the dot.
///
/// Returns an empty string for files without one, including dotfiles such as
/// `.bashrc` and names ending in a bare dot.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}
