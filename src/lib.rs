//! clean-folder - sort a directory tree into category folders
//!
//! This library scans a folder recursively, classifies every file by
//! extension, moves it under a transliterated ASCII-safe name into one of
//! `images`, `audio`, `documents`, `video`, `archives` or `other`, unpacks
//! archives into their own subfolders and removes the folders it emptied.

pub mod archive;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod normalize;
pub mod organizer;
pub mod output;
pub mod report;
pub mod scanner;

pub use config::{CompiledFilters, Config, ConfigError, ConflictPolicy};
pub use error::{ExtractError, OrganizeError, OrganizeResult};
pub use file_category::{Category, FileMapper};
pub use file_organizer::{FileOrganizer, PlannedAction};
pub use normalize::normalize;
pub use organizer::{Organizer, organize, organize_with_config};
pub use report::{Issue, OrganizeReport};
pub use scanner::{ScanResult, Scanner};
