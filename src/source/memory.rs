//! In-memory content source.
//!
//! Useful for tests and for binaries that bundle their guides with
//! `include_str!` instead of shipping a directory next to the executable.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use super::{ContentSource, SourceEntry};

/// Files keyed by `/`-joined path; collections are implied by the paths
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a leaf, creating any collections on its path
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(normalize(&path.into()), contents.into());
        self
    }

    /// Builder-style `insert`
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such entry: {}", path))
}

impl ContentSource for MemorySource {
    fn list(&self, path: &str) -> io::Result<Vec<SourceEntry>> {
        let path = normalize(path);
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{}/", path)
        };

        let mut collections = BTreeSet::new();
        let mut leaves = BTreeSet::new();

        for file in self.files.keys() {
            let Some(rest) = file.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    collections.insert(dir.to_string());
                }
                None => {
                    leaves.insert(rest.to_string());
                }
            }
        }

        if collections.is_empty() && leaves.is_empty() {
            return Err(not_found(&path));
        }

        let mut entries: Vec<SourceEntry> = collections
            .into_iter()
            .map(SourceEntry::collection)
            .chain(leaves.into_iter().map(SourceEntry::leaf))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let path = normalize(path);
        self.files
            .get(&path)
            .cloned()
            .ok_or_else(|| not_found(&path))
    }
}
