//! Directory enumeration collaborator.
//!
//! Listing a directory is the one piece of the system that touches the
//! filesystem, so it sits behind a trait: the index talks to a
//! [`DirectorySource`] and tests substitute an in-memory one.

use std::fs;
use std::path::Path;

use crate::error::{CompletionError, Result};
use crate::types::EntryKind;

/// An immediate entry of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// The entry's filename, not its full path.
    pub name: String,
    pub kind: EntryKind,
}

/// Enumerates the immediate entries of one directory.
///
/// Implementations never yield the `.`/`..` self references and do not
/// recurse. The order of the returned entries is unspecified; callers that
/// need a deterministic order sort for themselves (the trie does so
/// inherently).
pub trait DirectorySource {
    fn entries(&self, dir: &Path) -> Result<Vec<DirEntry>>;
}

/// [`DirectorySource`] over the live filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectorySource;

impl DirectorySource for FsDirectorySource {
    fn entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let read_dir =
            fs::read_dir(dir).map_err(|source| CompletionError::DirectoryUnavailable {
                path: dir.to_path_buf(),
                source,
            })?;

        // Entries that disappear or turn unreadable mid-listing are dropped
        // rather than failing the whole directory.
        let entries = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                let kind = entry
                    .file_type()
                    .map(EntryKind::from_fs)
                    .unwrap_or(EntryKind::Other);
                DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind,
                }
            })
            .collect();
        Ok(entries)
    }
}
