//! Content source backed by a directory on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ContentSource, SourceEntry};

/// Reads declarations from a directory tree rooted at `root`
///
/// The root is the directory that contains `guides/`, not `guides/` itself.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl ContentSource for DirSource {
    fn list(&self, path: &str) -> io::Result<Vec<SourceEntry>> {
        let dir = self.resolve(path);
        let mut entries = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::debug!("Skipping non-UTF-8 entry {:?} in {}", raw, dir.display());
                    continue;
                }
            };

            let file_type = entry.file_type()?;
            // A linked chapter directory still counts as a collection; a
            // dangling link is listed as a leaf
            let is_dir = if file_type.is_symlink() {
                fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
            } else {
                file_type.is_dir()
            };
            entries.push(if is_dir {
                SourceEntry::collection(name)
            } else {
                SourceEntry::leaf(name)
            });
        }

        // read_dir order is platform dependent
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }
}
