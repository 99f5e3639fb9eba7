//! Tree loader.
//!
//! Walks a content source one group at a time, decodes each declaration
//! from YAML, validates the resulting record immediately and attaches it to
//! its parent. Errors carry the group/chapter/guide they came from, innermost
//! last in the `{:#}` rendering:
//!
//! ```text
//! parse group foundations: parse chapter basics: parse guide intro.yaml: guide intro: title cannot be empty
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{
    Chapter, Group, Guide, GuideCompletion, GuideMetadata, GuideStep, Library, Variable,
};
use crate::source::{self, ContentSource};
use crate::validate;

/// Root collection of every content source
pub const ROOT_COLLECTION: &str = "guides";

pub const GROUP_FILE: &str = "group.yaml";

pub const CHAPTER_FILE: &str = "chapter.yaml";

/// Suffix identifying guide declarations inside a chapter
pub const GUIDE_SUFFIX: &str = ".yaml";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupDeclaration {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    skill_level: String,
    #[serde(default)]
    ordering: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChapterDeclaration {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ordering: i64,
    #[serde(default)]
    variables: Vec<Variable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuideDeclaration {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    ordering: i64,
    #[serde(default)]
    prerequisite_guide_slugs: Vec<String>,
    #[serde(default)]
    metadata: GuideMetadata,
    #[serde(default)]
    steps: Vec<GuideStep>,
    #[serde(default)]
    completion: GuideCompletion,
}

/// Decode a declaration, treating an empty document as all defaults
fn decode<T: DeserializeOwned>(data: &[u8]) -> std::result::Result<T, serde_yaml::Error> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return serde_yaml::from_str("{}");
    }
    serde_yaml::from_slice(data)
}

/// Load every group under `guides/` into an unchecked library
///
/// Each record has passed its own validation; cross-entity checks are left
/// to the caller (see `crate::library::load_library`).
pub fn load_tree(source: &dyn ContentSource) -> Result<Library> {
    let entries = source
        .list(ROOT_COLLECTION)
        .context("read guides directory")?;

    let mut library = Library::default();

    for entry in entries {
        if !entry.is_collection() || entry.is_hidden() {
            continue;
        }

        let group = load_group(source, &entry.name)
            .with_context(|| format!("parse group {}", entry.name))?;
        library.groups.push(group);
    }

    Ok(library)
}

/// Load one group and all of its chapters
pub fn load_group(source: &dyn ContentSource, group_slug: &str) -> Result<Group> {
    let group_path = source::join(&[ROOT_COLLECTION, group_slug]);

    let data = source
        .read(&source::join(&[group_path.as_str(), GROUP_FILE]))
        .context("read group.yaml")?;
    let declaration: GroupDeclaration = decode(&data).context("parse group.yaml")?;

    let mut group = Group {
        slug: group_slug.to_string(),
        name: declaration.name,
        description: declaration.description,
        skill_level: declaration.skill_level,
        ordering: declaration.ordering,
        chapters: Vec::new(),
    };

    validate::validate_group(&group)?;

    let entries = source
        .list(&group_path)
        .context("read group directory")?;

    for entry in entries {
        if !entry.is_collection() || entry.is_hidden() {
            continue;
        }

        let chapter = load_chapter(source, group_slug, &entry.name)
            .with_context(|| format!("parse chapter {}", entry.name))?;
        group.chapters.push(chapter);
    }

    tracing::debug!(
        group = %group.slug,
        chapters = group.chapters.len(),
        "Loaded group"
    );

    Ok(group)
}

/// Load one chapter and all of its guides
pub fn load_chapter(
    source: &dyn ContentSource,
    group_slug: &str,
    chapter_slug: &str,
) -> Result<Chapter> {
    let chapter_path = source::join(&[ROOT_COLLECTION, group_slug, chapter_slug]);

    let data = source
        .read(&source::join(&[chapter_path.as_str(), CHAPTER_FILE]))
        .context("read chapter.yaml")?;
    let declaration: ChapterDeclaration = decode(&data).context("parse chapter.yaml")?;

    let mut chapter = Chapter {
        slug: chapter_slug.to_string(),
        name: declaration.name,
        description: declaration.description,
        ordering: declaration.ordering,
        variables: declaration.variables,
        guides: Vec::new(),
    };

    validate::validate_chapter(&chapter)?;

    let entries = source
        .list(&chapter_path)
        .context("read chapter directory")?;

    for entry in entries {
        if entry.is_collection()
            || entry.is_hidden()
            || !entry.name.ends_with(GUIDE_SUFFIX)
            || entry.name == CHAPTER_FILE
        {
            continue;
        }

        let guide = load_guide(source, group_slug, chapter_slug, &entry.name)
            .with_context(|| format!("parse guide {}", entry.name))?;
        chapter.guides.push(guide);
    }

    tracing::debug!(
        group = group_slug,
        chapter = %chapter.slug,
        guides = chapter.guides.len(),
        "Loaded chapter"
    );

    Ok(chapter)
}

/// Load a single guide declaration file
pub fn load_guide(
    source: &dyn ContentSource,
    group_slug: &str,
    chapter_slug: &str,
    guide_file: &str,
) -> Result<Guide> {
    let path = source::join(&[ROOT_COLLECTION, group_slug, chapter_slug, guide_file]);

    let data = source.read(&path).context("read guide file")?;
    let declaration: GuideDeclaration = decode(&data).context("parse guide YAML")?;

    let guide = Guide {
        slug: declaration.slug,
        ordering: declaration.ordering,
        prerequisite_guide_slugs: declaration.prerequisite_guide_slugs,
        metadata: declaration.metadata,
        steps: declaration.steps,
        completion: declaration.completion,
    };

    validate::validate_guide(&guide)?;

    tracing::debug!(guide = %guide.slug, steps = guide.steps.len(), "Loaded guide");

    Ok(guide)
}
