//! Archive detection and extraction.
//!
//! The format is decided from the file's leading bytes, never from its name,
//! so a `.zip` that is not really a ZIP is reported as unsupported instead of
//! being half-extracted.

use crate::error::ExtractError;
use crate::normalize::normalize;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected for signatures.
const SNIFF_LEN: u64 = 8192;

/// Archive formats that can be unpacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    /// Gzip-compressed tar.
    TarGz,
    /// Gzip of a single file.
    Gzip,
}

fn read_head<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    let mut head = Vec::new();
    reader.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok(head)
}

/// Detects the archive format of the file at `path`.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedFormat`] when no known signature
/// matches, and [`ExtractError::Io`] when the file or its gzip stream cannot
/// be read.
pub fn detect(path: &Path) -> Result<ArchiveFormat, ExtractError> {
    let head = read_head(File::open(path)?)?;

    if infer::archive::is_zip(&head) {
        return Ok(ArchiveFormat::Zip);
    }
    if infer::archive::is_tar(&head) {
        return Ok(ArchiveFormat::Tar);
    }
    if infer::archive::is_gz(&head) {
        let inner = read_head(GzDecoder::new(File::open(path)?))?;
        return Ok(if infer::archive::is_tar(&inner) {
            ArchiveFormat::TarGz
        } else {
            ArchiveFormat::Gzip
        });
    }

    Err(ExtractError::UnsupportedFormat)
}

/// Extracts the archive at `path` into the existing directory `dest`.
///
/// A plain gzip file is decompressed to a single file named after the
/// archive's normalized stem. Entries that would land outside `dest` are
/// rejected by the underlying readers.
pub fn extract(path: &Path, dest: &Path) -> Result<ArchiveFormat, ExtractError> {
    let format = detect(path)?;

    match format {
        ArchiveFormat::Zip => {
            let mut archive = zip::ZipArchive::new(File::open(path)?)?;
            archive.extract(dest)?;
        }
        ArchiveFormat::Tar => {
            tar::Archive::new(File::open(path)?).unpack(dest)?;
        }
        ArchiveFormat::TarGz => {
            tar::Archive::new(GzDecoder::new(File::open(path)?)).unpack(dest)?;
        }
        ArchiveFormat::Gzip => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut decoder = GzDecoder::new(File::open(path)?);
            let mut out = File::create(dest.join(normalize(&stem)))?;
            io::copy(&mut decoder, &mut out)?;
        }
    }

    Ok(format)
}
