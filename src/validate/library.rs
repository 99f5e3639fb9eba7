//! Cross-entity checks over an assembled library.
//!
//! Runs after every record has passed its own validation:
//! - slug uniqueness for groups, chapters and guides
//! - recommended guides and prerequisites resolve to existing guides

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Library;

/// Scope within which guide slugs must be unique
///
/// Recommendations and prerequisites are resolved by bare slug, so with
/// `Chapter` scope a reference to a slug used in two chapters is ambiguous;
/// it resolves as long as any guide carries the slug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideSlugScope {
    /// Unique across the whole library
    #[default]
    Library,
    /// Unique within each chapter only
    Chapter,
}

impl fmt::Display for GuideSlugScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuideSlugScope::Library => write!(f, "library"),
            GuideSlugScope::Chapter => write!(f, "chapter"),
        }
    }
}

impl FromStr for GuideSlugScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "library" => Ok(GuideSlugScope::Library),
            "chapter" => Ok(GuideSlugScope::Chapter),
            _ => anyhow::bail!("Unknown guide slug scope: {}", s),
        }
    }
}

/// A duplicate identifier or a dangling reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("duplicate group slug: {group}")]
    DuplicateGroup { group: String },

    #[error("duplicate chapter slug {chapter} in group {group}")]
    DuplicateChapter { group: String, chapter: String },

    #[error("duplicate guide slug {guide} in chapter {chapter_path}")]
    DuplicateGuide { chapter_path: String, guide: String },

    #[error("duplicate guide slug {guide}: used by {first} and {second}")]
    DuplicateGuideInLibrary {
        guide: String,
        first: String,
        second: String,
    },

    #[error("guide {guide_path} references non-existent guide in recommendedGuideIds: {reference}")]
    UnknownRecommendation {
        guide_path: String,
        reference: String,
    },

    #[error("guide {guide_path} references non-existent guide in prerequisiteGuideSlugs: {reference}")]
    UnknownPrerequisite {
        guide_path: String,
        reference: String,
    },

    /// Only the direct self-reference; longer prerequisite cycles are not detected
    #[error("guide {guide_path} lists itself as a prerequisite")]
    SelfPrerequisite { guide_path: String },
}

/// `group/chapter/guide`, used to name guides in errors
pub fn guide_path(group: &str, chapter: &str, guide: &str) -> String {
    format!("{}/{}/{}", group, chapter, guide)
}

/// Run all library-wide checks, stopping at the first violation
pub fn validate_library(library: &Library, scope: GuideSlugScope) -> Result<(), IntegrityError> {
    let guide_slugs = check_uniqueness(library, scope)?;
    check_references(library, &guide_slugs)
}

/// Returns every guide slug in the library for reference resolution
fn check_uniqueness(
    library: &Library,
    scope: GuideSlugScope,
) -> Result<HashSet<String>, IntegrityError> {
    let mut group_slugs = HashSet::new();
    // slug -> path of the first guide using it
    let mut all_guides: HashMap<String, String> = HashMap::new();

    for group in &library.groups {
        if !group_slugs.insert(group.slug.as_str()) {
            return Err(IntegrityError::DuplicateGroup {
                group: group.slug.clone(),
            });
        }

        let mut chapter_slugs = HashSet::new();
        for chapter in &group.chapters {
            if !chapter_slugs.insert(chapter.slug.as_str()) {
                return Err(IntegrityError::DuplicateChapter {
                    group: group.slug.clone(),
                    chapter: chapter.slug.clone(),
                });
            }

            let mut guide_slugs = HashSet::new();
            for guide in &chapter.guides {
                if !guide_slugs.insert(guide.slug.as_str()) {
                    return Err(IntegrityError::DuplicateGuide {
                        chapter_path: format!("{}/{}", group.slug, chapter.slug),
                        guide: guide.slug.clone(),
                    });
                }

                let path = guide_path(&group.slug, &chapter.slug, &guide.slug);
                if let Some(first) = all_guides.get(&guide.slug) {
                    if scope == GuideSlugScope::Library {
                        return Err(IntegrityError::DuplicateGuideInLibrary {
                            guide: guide.slug.clone(),
                            first: first.clone(),
                            second: path,
                        });
                    }
                } else {
                    all_guides.insert(guide.slug.clone(), path);
                }
            }
        }
    }

    Ok(all_guides.into_keys().collect())
}

fn check_references(library: &Library, guide_slugs: &HashSet<String>) -> Result<(), IntegrityError> {
    for group in &library.groups {
        for chapter in &group.chapters {
            for guide in &chapter.guides {
                let path = || guide_path(&group.slug, &chapter.slug, &guide.slug);

                for prerequisite in &guide.prerequisite_guide_slugs {
                    if prerequisite == &guide.slug {
                        return Err(IntegrityError::SelfPrerequisite { guide_path: path() });
                    }
                    if !guide_slugs.contains(prerequisite) {
                        return Err(IntegrityError::UnknownPrerequisite {
                            guide_path: path(),
                            reference: prerequisite.clone(),
                        });
                    }
                }

                for recommended in &guide.completion.recommended_guide_ids {
                    if !guide_slugs.contains(recommended) {
                        return Err(IntegrityError::UnknownRecommendation {
                            guide_path: path(),
                            reference: recommended.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}
