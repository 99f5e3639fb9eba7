//! JSON Schema documents for the three declaration files.
//!
//! These describe `group.yaml`, `chapter.yaml` and guide files for editors
//! and offline linting. They are not consulted when loading; the validators
//! in `crate::validate` are the source of truth and the enumerations here are
//! generated from the same types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::domain::{Difficulty, ResourceType, SkillLevel};
use crate::validate::entity::DOC_URL_SCHEMES;

const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

pub const GROUP_SCHEMA_FILE: &str = "group_schema.json";
pub const CHAPTER_SCHEMA_FILE: &str = "chapter_schema.json";
pub const GUIDE_SCHEMA_FILE: &str = "guide_schema.json";

fn non_empty_string() -> Value {
    json!({ "type": "string", "minLength": 1 })
}

pub fn group_schema() -> Value {
    let skill_levels = SkillLevel::ALL.map(|l| l.as_str());

    json!({
        "$schema": DRAFT,
        "title": "Group",
        "type": "object",
        "required": ["name", "skillLevel"],
        "properties": {
            "name": non_empty_string(),
            "description": { "type": "string" },
            "skillLevel": {
                "type": "string",
                "enum": skill_levels,
            },
            "ordering": { "type": "integer" },
        },
    })
}

pub fn chapter_schema() -> Value {
    let resource_types = ResourceType::ALL.map(|r| r.as_str());

    json!({
        "$schema": DRAFT,
        "title": "Chapter",
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": non_empty_string(),
            "description": { "type": "string" },
            "ordering": { "type": "integer" },
            "variables": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "resourceType"],
                    "properties": {
                        "name": non_empty_string(),
                        "description": { "type": "string" },
                        "resourceType": {
                            "type": "string",
                            "enum": resource_types,
                        },
                    },
                },
            },
        },
    })
}

pub fn guide_schema() -> Value {
    let mut difficulties: Vec<&str> = vec![""];
    difficulties.extend(Difficulty::ALL.map(|d| d.as_str()));

    // ^(http|https)://
    let url_pattern = format!("^({})://", DOC_URL_SCHEMES.join("|"));

    json!({
        "$schema": DRAFT,
        "title": "Guide",
        "type": "object",
        "required": ["slug", "metadata", "steps"],
        "properties": {
            "slug": non_empty_string(),
            "ordering": { "type": "integer" },
            "prerequisiteGuideSlugs": {
                "type": "array",
                "items": non_empty_string(),
            },
            "metadata": {
                "type": "object",
                "required": ["title"],
                "properties": {
                    "title": non_empty_string(),
                    "description": { "type": "string" },
                    "labels": {
                        "type": "array",
                        "items": { "type": "string", "pattern": "\\S" },
                    },
                    "difficulty": { "type": "string", "enum": difficulties },
                    "minutesToComplete": { "type": "integer", "minimum": 0 },
                },
            },
            "steps": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["order", "title", "instruction"],
                    "properties": {
                        "order": { "type": "integer", "minimum": 1 },
                        "title": non_empty_string(),
                        "instruction": non_empty_string(),
                        "hint": { "type": "string" },
                        "validationHint": { "type": "string" },
                        "validation": {},
                        "docs": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["title", "url"],
                                "properties": {
                                    "title": non_empty_string(),
                                    "url": {
                                        "type": "string",
                                        "format": "uri",
                                        "pattern": url_pattern,
                                    },
                                },
                            },
                        },
                    },
                },
            },
            "completion": {
                "type": "object",
                "properties": {
                    "successMessage": { "type": "string" },
                    "recommendedGuideIds": {
                        "type": "array",
                        "items": non_empty_string(),
                    },
                },
            },
        },
    })
}

/// Write all three schema documents into `dir`, returning the written paths
pub fn write_all(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create schema directory: {}", dir.display()))?;

    let documents = [
        (GROUP_SCHEMA_FILE, group_schema()),
        (CHAPTER_SCHEMA_FILE, chapter_schema()),
        (GUIDE_SCHEMA_FILE, guide_schema()),
    ];

    let mut written = Vec::with_capacity(documents.len());
    for (name, document) in documents {
        let path = dir.join(name);
        let content = serde_json::to_string_pretty(&document)?;
        std::fs::write(&path, content + "\n")
            .with_context(|| format!("Failed to write schema: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
