//! Records making up a loaded guide library.
//!
//! The tree is built once by the loader and read-only afterwards. Records
//! carry no validation logic of their own; see `crate::validate`.

use serde::{Deserialize, Serialize};

use super::levels::{Difficulty, ResourceType, SkillLevel};

/// Root of the content tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// Groups in the order the content source yielded them
    pub groups: Vec<Group>,
}

/// Top-level content category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Identifier, taken from the group's collection name
    pub slug: String,

    pub name: String,

    pub description: String,

    /// One of BEGINNER, ENABLER, COMMANDER, GUARDIAN
    pub skill_level: String,

    /// Presentation hint only; never used to sort
    pub ordering: i64,

    pub chapters: Vec<Chapter>,
}

impl Group {
    /// Parsed skill level, `None` if the authored value is not recognized
    pub fn skill_level(&self) -> Option<SkillLevel> {
        self.skill_level.parse().ok()
    }

    pub fn chapter(&self, slug: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.slug == slug)
    }
}

/// Ordered subdivision of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Identifier, taken from the chapter's collection name
    pub slug: String,

    pub name: String,

    pub description: String,

    pub ordering: i64,

    /// Typed placeholders guides in this chapter can refer to
    pub variables: Vec<Variable>,

    pub guides: Vec<Guide>,
}

impl Chapter {
    pub fn guide(&self, slug: &str) -> Option<&Guide> {
        self.guides.iter().find(|g| g.slug == slug)
    }
}

/// Named placeholder declared at chapter scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variable {
    pub name: String,
    pub description: String,
    /// One of stack, policy, aws_integration
    pub resource_type: String,
}

impl Variable {
    pub fn resource_type(&self) -> Option<ResourceType> {
        self.resource_type.parse().ok()
    }
}

/// A single walkthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    /// Declared identifier, unique across the library by default
    pub slug: String,

    pub ordering: i64,

    /// Slugs of guides that should be completed first
    pub prerequisite_guide_slugs: Vec<String>,

    pub metadata: GuideMetadata,

    pub steps: Vec<GuideStep>,

    pub completion: GuideCompletion,
}

impl Guide {
    /// Steps sorted by their declared order
    ///
    /// The loaded sequence keeps source order; this is a view for callers
    /// that want to walk the guide.
    pub fn ordered_steps(&self) -> Vec<&GuideStep> {
        let mut steps: Vec<&GuideStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }

    pub fn step(&self, order: i64) -> Option<&GuideStep> {
        self.steps.iter().find(|s| s.order == order)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuideMetadata {
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    /// easy, medium, hard, or empty
    pub difficulty: String,
    pub minutes_to_complete: i64,
}

impl GuideMetadata {
    /// Parsed difficulty, `None` when unset or unrecognized
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty.parse().ok()
    }
}

/// One instructional unit of a guide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuideStep {
    /// 1-based position within the guide
    pub order: i64,

    pub title: String,

    pub instruction: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_hint: Option<String>,

    /// Validation expression, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<serde_yaml::Value>,

    pub docs: Vec<GuideDoc>,
}

/// Reference documentation link attached to a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideDoc {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuideCompletion {
    pub success_message: String,
    /// Slugs of guides to suggest once this one is done
    pub recommended_guide_ids: Vec<String>,
}
