//! Hierarchical content sources the loader reads declarations from.
//!
//! A source is a namespace of named nodes addressed by `/`-joined relative
//! paths (`guides/foundations/group.yaml`). A node is either a collection,
//! which can be listed, or a leaf, which can be read.
//!
//! # Layout
//!
//! ```text
//! guides/
//! └── <group>/
//!     ├── group.yaml
//!     └── <chapter>/
//!         ├── chapter.yaml
//!         └── <guide>.yaml
//! ```

use std::io;

pub mod dir;
pub mod memory;

pub use dir::DirSource;
pub use memory::MemorySource;

/// Kind of a node in a content source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory-like node that can be listed
    Collection,
    /// Declaration file that can be read
    Leaf,
}

/// A child of a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl SourceEntry {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Collection,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Leaf,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.kind == EntryKind::Collection
    }

    /// Dot-prefixed entries are never loaded
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Read access to a tree of declarations
///
/// Implementations decide the order `list` yields children in; the loader
/// keeps that order. Both bundled implementations sort by name.
pub trait ContentSource {
    /// List the children of a collection
    fn list(&self, path: &str) -> io::Result<Vec<SourceEntry>>;

    /// Read the bytes of a leaf
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

impl<T: ContentSource + ?Sized> ContentSource for &T {
    fn list(&self, path: &str) -> io::Result<Vec<SourceEntry>> {
        (**self).list(path)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// Join path segments with `/`, skipping empty segments
pub fn join(segments: &[&str]) -> String {
    segments
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}
