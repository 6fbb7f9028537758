//! Filename autocompletion over a byte-wise prefix tree.
//!
//! This crate indexes the immediate entries of a set of directories into
//! one shared trie and answers "which indexed paths start with this text"
//! queries across all of them:
//! - [`Trie`]: insertion and prefix search over 7-bit byte strings
//! - [`DirectoryIndex`]: multi-directory aggregation with per-directory
//!   path reconstruction at query time
//! - [`DirectorySource`]: the directory listing collaborator, with a
//!   `std::fs` implementation
//!
//! Everything runs single-threaded and synchronous. The tree is rebuilt
//! from live directory listings on every run; nothing is persisted and
//! nothing re-indexes incrementally.

pub mod error;
pub mod index;
pub mod source;
pub mod trie;
pub mod types;

// Re-export main types
pub use error::{CompletionError, Result};
pub use index::DirectoryIndex;
pub use source::{DirEntry, DirectorySource, FsDirectorySource};
pub use trie::Trie;
pub use types::{EntryKind, IndexStats, SearchReport};
