//! Extraction of the first usable entry from a downloaded archive.
//!
//! The remote API serves each subtitle as a compressed archive assumed to
//! contain exactly one file of interest. Directory entries and macOS
//! resource-fork entries are skipped; everything after the first match is
//! ignored.

use std::io::{Cursor, Read};

use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

/// Prefix of macOS resource-fork entries bundled into third-party zips.
const MACOS_RESOURCE_PREFIX: &str = "__MACOSX";

/// Errors while opening or reading a downloaded archive.
///
/// An archive with no qualifying entry is NOT an error; that case yields
/// an empty buffer so the caller degrades to an empty subtitle stream.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The buffer is not a readable archive.
    #[error("unreadable archive: {source}")]
    Unreadable {
        /// The underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry could not be opened or decompressed.
    #[error("failed to read archive entry {name}: {source}")]
    EntryRead {
        /// Path of the entry inside the archive.
        name: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    fn unreadable(source: zip::result::ZipError) -> Self {
        Self::Unreadable { source }
    }

    fn entry_read(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::EntryRead {
            name: name.into(),
            source,
        }
    }
}

/// Extracts the first non-directory, non-resource-fork entry of a zip
/// archive into an in-memory buffer.
///
/// Entries are visited in archive order; the first qualifying entry wins
/// and the rest are ignored. Returns an empty buffer when no entry
/// qualifies.
///
/// # Errors
///
/// Returns [`ArchiveError`] when the buffer is not a readable archive or
/// the selected entry fails to decompress. Callers running inside the
/// download retry loop treat either as a failed attempt.
pub fn extract_first_file(archive_bytes: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let mut archive =
        ZipArchive::new(Cursor::new(archive_bytes)).map_err(ArchiveError::unreadable)?;

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::Io(source)) => {
                return Err(ArchiveError::entry_read(format!("#{index}"), source));
            }
            Err(source) => return Err(ArchiveError::unreadable(source)),
        };

        if entry.is_dir() || entry.name().starts_with(MACOS_RESOURCE_PREFIX) {
            continue;
        }

        let mut buffer = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        let name = entry.name().to_string();
        entry
            .read_to_end(&mut buffer)
            .map_err(|source| ArchiveError::entry_read(name.clone(), source))?;

        debug!(entry = %name, bytes = buffer.len(), "extracted archive entry");
        return Ok(buffer);
    }

    debug!("archive held no qualifying entry");
    Ok(Vec::new())
}
