//! Directory-trie aggregation.
//!
//! A [`DirectoryIndex`] maps any number of registered directories onto one
//! shared [`Trie`]. Registration inserts `directory/entry` for each
//! immediate entry; a query joins the partial filename onto every registered
//! directory and collects the trie matches in registration order.

use std::path::Path;

use crate::error::{CompletionError, Result};
use crate::source::{DirectorySource, FsDirectorySource};
use crate::trie::{validate_key, Trie};
use crate::types::{EntryKind, IndexStats};

/// Aggregates indexed directories over one shared trie.
///
/// Directories are registered in order and never removed; the same
/// directory may be registered more than once and then contributes its
/// matches once per registration. All state is single-owner and mutated
/// only through `&mut self`; no operation overlaps another.
#[derive(Debug, Default)]
pub struct DirectoryIndex<S = FsDirectorySource> {
    source: S,
    trie: Trie,
    directories: Vec<String>,
    skipped: usize,
}

impl DirectoryIndex<FsDirectorySource> {
    /// Creates an index backed by the live filesystem.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DirectorySource> DirectoryIndex<S> {
    /// Creates an index over a custom directory source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            trie: Trie::new(),
            directories: Vec::new(),
            skipped: 0,
        }
    }

    /// Indexes the immediate entries of `dir` and records the directory for
    /// subsequent [`search`](Self::search) calls.
    ///
    /// Returns the number of entries inserted. A directory that cannot be
    /// opened propagates [`CompletionError::DirectoryUnavailable`] and
    /// leaves the index exactly as it was: nothing inserted, nothing
    /// recorded. An individual entry whose name cannot be indexed is
    /// skipped with a warning; the rest of the directory still indexes.
    /// Nested directories are not descended into.
    pub fn index_directory(&mut self, dir: &Path) -> Result<usize> {
        let dir_str = dir
            .to_str()
            .ok_or_else(|| CompletionError::InvalidPath(dir.to_path_buf()))?;
        // Reject a directory the trie could never answer queries for
        // before touching any state.
        validate_key(dir_str)?;

        let entries = self.source.entries(dir)?;

        let mut inserted = 0usize;
        let mut files = 0usize;
        let mut dirs = 0usize;
        for entry in &entries {
            let path = join_candidate(dir_str, &entry.name);
            match self.trie.insert(&path) {
                Ok(()) => {
                    inserted += 1;
                    if entry.kind == EntryKind::Directory {
                        dirs += 1;
                    } else {
                        files += 1;
                    }
                }
                Err(error) => {
                    // Insertion only fails on out-of-range name bytes; one
                    // odd filename must not poison the whole directory.
                    self.skipped += 1;
                    log::warn!(
                        "skipping entry {:?} in {}: {}",
                        entry.name,
                        dir.display(),
                        error
                    );
                }
            }
        }

        self.directories.push(dir_str.to_string());
        log::info!(
            "indexed directory {} entries={} files={} dirs={} total_keys={}",
            dir.display(),
            inserted,
            files,
            dirs,
            self.trie.len(),
        );
        Ok(inserted)
    }

    /// Returns every indexed path starting with `partial` under each
    /// registered directory.
    ///
    /// For each directory, the candidate prefix is the directory path and
    /// `partial` joined by exactly one separator. Ordering: directories in
    /// registration order, each directory's matches in ascending byte
    /// order. No cross-directory dedup: a twice-registered directory
    /// contributes twice. The result is built fresh per call.
    pub fn search(&self, partial: &str) -> Result<Vec<String>> {
        let mut matches = Vec::new();
        for dir in &self.directories {
            let candidate = join_candidate(dir, partial);
            let found = self.trie.search_by_prefix(&candidate)?;
            log::debug!(
                "prefix search dir={} candidate={:?} matches={}",
                dir,
                candidate,
                found.len()
            );
            matches.extend(found);
        }
        Ok(matches)
    }

    /// Every indexed path, in ascending byte order.
    pub fn indexed_paths(&self) -> Vec<String> {
        self.trie.keys()
    }

    /// Registered directories, in registration order.
    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.directories.iter().map(Path::new)
    }

    /// Current index counters.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            directories: self.directories.len(),
            indexed_entries: self.trie.len(),
            skipped_entries: self.skipped,
        }
    }
}

/// Joins a directory path and a name with exactly one separator.
///
/// Used identically at indexing and query time, so a directory registered
/// with a trailing slash still lines up with its inserted paths.
fn join_candidate(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DirEntry;
    use std::collections::HashMap;
    use std::io;

    /// In-memory source: known paths list their entries, anything else
    /// fails to open.
    #[derive(Debug, Default)]
    struct FakeSource {
        listings: HashMap<String, Vec<DirEntry>>,
    }

    impl FakeSource {
        fn with(listings: &[(&str, &[&str])]) -> Self {
            let listings = listings
                .iter()
                .map(|(dir, names)| {
                    let entries = names
                        .iter()
                        .map(|name| DirEntry {
                            name: (*name).to_string(),
                            kind: EntryKind::File,
                        })
                        .collect();
                    ((*dir).to_string(), entries)
                })
                .collect();
            Self { listings }
        }
    }

    impl DirectorySource for FakeSource {
        fn entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
            let key = dir.to_string_lossy();
            self.listings.get(key.as_ref()).cloned().ok_or_else(|| {
                CompletionError::DirectoryUnavailable {
                    path: dir.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                }
            })
        }
    }

    #[test]
    fn aggregates_across_directories_in_registration_order() {
        let source = FakeSource::with(&[("/a", &["foo", "foobar"]), ("/b", &["foo"])]);
        let mut index = DirectoryIndex::with_source(source);
        index.index_directory(Path::new("/a")).unwrap();
        index.index_directory(Path::new("/b")).unwrap();

        let matches = index.search("foo").unwrap();
        assert_eq!(matches, vec!["/a/foo", "/a/foobar", "/b/foo"]);
    }

    #[test]
    fn unavailable_directory_leaves_state_unchanged() {
        let source = FakeSource::with(&[("/a", &["foo"])]);
        let mut index = DirectoryIndex::with_source(source);
        index.index_directory(Path::new("/a")).unwrap();

        let error = index.index_directory(Path::new("/missing")).unwrap_err();
        assert!(matches!(
            error,
            CompletionError::DirectoryUnavailable { .. }
        ));

        let stats = index.stats();
        assert_eq!(stats.directories, 1);
        assert_eq!(stats.indexed_entries, 1);
        // Previously indexed directories still answer.
        assert_eq!(index.search("foo").unwrap(), vec!["/a/foo"]);
    }

    #[test]
    fn duplicate_registration_contributes_twice() {
        let source = FakeSource::with(&[("/a", &["foo"])]);
        let mut index = DirectoryIndex::with_source(source);
        index.index_directory(Path::new("/a")).unwrap();
        index.index_directory(Path::new("/a")).unwrap();

        assert_eq!(index.search("foo").unwrap(), vec!["/a/foo", "/a/foo"]);
        // The trie itself holds each path once.
        assert_eq!(index.stats().indexed_entries, 1);
        assert_eq!(index.stats().directories, 2);
    }

    #[test]
    fn trailing_slash_directory_joins_with_single_separator() {
        let source = FakeSource::with(&[("/a/", &["foo"])]);
        let mut index = DirectoryIndex::with_source(source);
        index.index_directory(Path::new("/a/")).unwrap();

        assert_eq!(index.search("foo").unwrap(), vec!["/a/foo"]);
        assert_eq!(index.indexed_paths(), vec!["/a/foo"]);
    }

    #[test]
    fn consecutive_searches_share_no_state() {
        let source = FakeSource::with(&[("/a", &["foo", "bar"])]);
        let mut index = DirectoryIndex::with_source(source);
        index.index_directory(Path::new("/a")).unwrap();

        assert_eq!(index.search("foo").unwrap(), vec!["/a/foo"]);
        assert!(index.search("quux").unwrap().is_empty());
        // Nothing from the first search leaks into the third.
        assert_eq!(index.search("bar").unwrap(), vec!["/a/bar"]);
    }

    #[test]
    fn skips_entries_with_unsupported_names() {
        let source = FakeSource::with(&[("/a", &["plain", "naïve"])]);
        let mut index = DirectoryIndex::with_source(source);

        let inserted = index.index_directory(Path::new("/a")).unwrap();
        assert_eq!(inserted, 1);

        let stats = index.stats();
        assert_eq!(stats.skipped_entries, 1);
        assert_eq!(stats.indexed_entries, 1);
        assert_eq!(index.search("").unwrap(), vec!["/a/plain"]);
    }

    #[test]
    fn rejects_directory_path_outside_seven_bits() {
        let source = FakeSource::with(&[("/ü", &["foo"])]);
        let mut index = DirectoryIndex::with_source(source);

        let error = index.index_directory(Path::new("/ü")).unwrap_err();
        assert!(matches!(error, CompletionError::KeyOutOfRange { .. }));
        assert_eq!(index.stats().directories, 0);
        assert!(index.indexed_paths().is_empty());
    }

    #[test]
    fn empty_partial_lists_every_registered_directory() {
        let source = FakeSource::with(&[("/a", &["x", "y"]), ("/b", &["z"])]);
        let mut index = DirectoryIndex::with_source(source);
        index.index_directory(Path::new("/a")).unwrap();
        index.index_directory(Path::new("/b")).unwrap();

        assert_eq!(
            index.search("").unwrap(),
            vec!["/a/x", "/a/y", "/b/z"]
        );
    }

    #[test]
    fn search_before_any_registration_is_empty() {
        let index = DirectoryIndex::with_source(FakeSource::default());
        assert!(index.search("anything").unwrap().is_empty());
    }

    #[test]
    fn directories_iterates_in_registration_order() {
        let source = FakeSource::with(&[("/b", &[]), ("/a", &[])]);
        let mut index = DirectoryIndex::with_source(source);
        index.index_directory(Path::new("/b")).unwrap();
        index.index_directory(Path::new("/a")).unwrap();

        let dirs: Vec<_> = index.directories().collect();
        assert_eq!(dirs, vec![Path::new("/b"), Path::new("/a")]);
    }
}
