//! Shared result types for indexing and search.

use std::fs;

use serde::{Deserialize, Serialize};

/// Kind of a directory entry, as reported by the directory source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Other => "other",
        }
    }

    /// Maps a `std::fs` file type probe onto an entry kind.
    pub fn from_fs(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}

/// Counters describing what an index currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Directories registered so far, duplicates included.
    pub directories: usize,
    /// Distinct paths held by the trie.
    pub indexed_entries: usize,
    /// Entries whose names could not be indexed and were skipped.
    pub skipped_entries: usize,
}

/// A completed search, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// The partial filename that was queried.
    pub query: String,
    /// Matching paths, directory registration order outer, byte order inner.
    pub matches: Vec<String>,
}
