//! Load-and-validate facade over the guide library.
//!
//! `load_library` is the single entry point: it runs the tree loader, then the
//! library-wide checks, and hands back either a fully valid tree or the first
//! failure. `guides()` wraps it in a process-wide, load-once cache for
//! binaries that serve the bundled content.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config;
use crate::domain::{Chapter, Group, Guide, Library};
use crate::loader;
use crate::source::{ContentSource, DirSource};
use crate::validate::{self, GuideSlugScope};

/// Global library (stores Result so a failed load is reported on every call)
static GUIDES: OnceLock<Result<Library, String>> = OnceLock::new();

/// Options for a single load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub guide_slug_scope: GuideSlugScope,
}

impl LoadOptions {
    pub fn with_scope(guide_slug_scope: GuideSlugScope) -> Self {
        Self { guide_slug_scope }
    }
}

/// Load and validate a whole library from `source`
pub fn load_library(source: &dyn ContentSource, options: &LoadOptions) -> Result<Library> {
    let library = loader::load_tree(source)?;
    validate::validate_library(&library, options.guide_slug_scope)?;

    let stats = library.stats();
    tracing::info!(
        groups = stats.groups,
        chapters = stats.chapters,
        guides = stats.guides,
        steps = stats.steps,
        scope = %options.guide_slug_scope,
        "Loaded guide library"
    );

    Ok(library)
}

/// Load and validate a library from a directory containing `guides/`
pub fn load_dir(root: &Path, options: &LoadOptions) -> Result<Library> {
    load_library(&DirSource::new(root), options)
        .with_context(|| format!("Failed to load guides from {}", root.display()))
}

/// Get the process-wide library (loads once from the configured root, then cached)
///
/// The library is never mutated after loading. A failure here means the
/// bundled content is broken; callers at the process boundary are expected
/// to treat it as fatal.
pub fn guides() -> Result<&'static Library> {
    let result = GUIDES.get_or_init(|| {
        load_configured().map_err(|e| format!("{:#}", e))
    });

    match result {
        Ok(library) => Ok(library),
        Err(e) => anyhow::bail!("userguides: {}", e),
    }
}

fn load_configured() -> Result<Library> {
    let config = config::config()?;
    load_dir(&config.content_root, &LoadOptions::with_scope(config.guide_slug_scope))
}

/// A guide together with the group and chapter it belongs to
#[derive(Debug, Clone, Copy)]
pub struct GuideRef<'a> {
    pub group: &'a Group,
    pub chapter: &'a Chapter,
    pub guide: &'a Guide,
}

impl GuideRef<'_> {
    /// `group/chapter/guide`
    pub fn path(&self) -> String {
        validate::guide_path(&self.group.slug, &self.chapter.slug, &self.guide.slug)
    }
}

/// Entity counts for a library
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub groups: usize,
    pub chapters: usize,
    pub guides: usize,
    pub steps: usize,
}

impl Library {
    pub fn group(&self, slug: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.slug == slug)
    }

    /// Every guide in load order
    pub fn guides(&self) -> impl Iterator<Item = GuideRef<'_>> {
        self.groups.iter().flat_map(|group| {
            group.chapters.iter().flat_map(move |chapter| {
                chapter.guides.iter().map(move |guide| GuideRef {
                    group,
                    chapter,
                    guide,
                })
            })
        })
    }

    /// First guide with the given slug
    pub fn find_guide(&self, slug: &str) -> Option<GuideRef<'_>> {
        self.guides().find(|r| r.guide.slug == slug)
    }

    /// Resolve a guide's recommended guides, in declaration order
    pub fn recommended_guides(&self, slug: &str) -> Option<Vec<GuideRef<'_>>> {
        let guide = self.find_guide(slug)?.guide;
        Some(self.resolve(&guide.completion.recommended_guide_ids))
    }

    /// Resolve a guide's prerequisites, in declaration order
    pub fn prerequisites(&self, slug: &str) -> Option<Vec<GuideRef<'_>>> {
        let guide = self.find_guide(slug)?.guide;
        Some(self.resolve(&guide.prerequisite_guide_slugs))
    }

    fn resolve(&self, slugs: &[String]) -> Vec<GuideRef<'_>> {
        slugs.iter().filter_map(|s| self.find_guide(s)).collect()
    }

    pub fn stats(&self) -> LibraryStats {
        let mut stats = LibraryStats {
            groups: self.groups.len(),
            ..Default::default()
        };
        for group in &self.groups {
            stats.chapters += group.chapters.len();
        }
        for r in self.guides() {
            stats.guides += 1;
            stats.steps += r.guide.steps.len();
        }
        stats
    }

    /// Content hash of the whole tree (SHA256 of its JSON form, first 16 hex chars)
    ///
    /// Two loads of the same content produce the same fingerprint.
    pub fn fingerprint(&self) -> Result<String> {
        let json = serde_json::to_vec(self).context("Failed to serialize library")?;
        let digest = Sha256::digest(&json);
        Ok(hex::encode(&digest[..8]))
    }
}
