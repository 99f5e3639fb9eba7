//! Per-entity validation.
//!
//! Each function checks one record's fields in isolation from its siblings
//! and returns the first violated rule. The loader calls these as soon as a
//! record is built, so a malformed guide never reaches the assembled tree.

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::domain::levels::one_of;
use crate::domain::{Chapter, Difficulty, Group, Guide, ResourceType, SkillLevel};

/// URL schemes accepted for step documentation links
pub const DOC_URL_SCHEMES: [&str; 2] = ["http", "https"];

/// A single record violating its local contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("group {group}: name cannot be empty")]
    GroupNameEmpty { group: String },

    #[error("group {group}: skill level cannot be empty")]
    SkillLevelEmpty { group: String },

    #[error("group {group}: invalid skill level {value:?} (must be {})", skill_levels())]
    InvalidSkillLevel { group: String, value: String },

    #[error("chapter {chapter}: name cannot be empty")]
    ChapterNameEmpty { chapter: String },

    #[error("chapter {chapter}: variable {variable} resource type cannot be empty")]
    ResourceTypeEmpty { chapter: String, variable: String },

    #[error(
        "chapter {chapter}: variable {variable} has invalid resource type {value:?} (must be {})",
        resource_types()
    )]
    InvalidResourceType {
        chapter: String,
        variable: String,
        value: String,
    },

    #[error("guide {guide}: slug cannot be empty")]
    GuideSlugEmpty { guide: String },

    #[error("guide {guide}: title cannot be empty")]
    TitleEmpty { guide: String },

    #[error("guide {guide}: must have at least one step")]
    NoSteps { guide: String },

    #[error("guide {guide}: invalid difficulty {value:?} (must be {})", difficulties())]
    InvalidDifficulty { guide: String, value: String },

    #[error("guide {guide}: label at index {index} is empty")]
    EmptyLabel { guide: String, index: usize },

    #[error("guide {guide}: step order must be positive, found {order}")]
    StepOrderNotPositive { guide: String, order: i64 },

    #[error("guide {guide}: step {order} title cannot be empty")]
    StepTitleEmpty { guide: String, order: i64 },

    #[error("guide {guide}: step {order} instruction cannot be empty")]
    StepInstructionEmpty { guide: String, order: i64 },

    #[error("guide {guide}: duplicate step order {order}")]
    DuplicateStepOrder { guide: String, order: i64 },

    #[error("guide {guide}: step {order} doc title cannot be empty")]
    DocTitleEmpty { guide: String, order: i64 },

    #[error("guide {guide}: step {order} doc URL cannot be empty")]
    DocUrlEmpty { guide: String, order: i64 },

    #[error("guide {guide}: step {order} doc URL {url:?} is malformed")]
    MalformedDocUrl {
        guide: String,
        order: i64,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("guide {guide}: step {order} doc URL {url:?} must use http or https scheme")]
    UnsupportedDocScheme {
        guide: String,
        order: i64,
        url: String,
    },

    #[error(
        "guide {guide}: steps must be sequentially ordered starting at 1, found order {found} at position {position}"
    )]
    StepsNotSequential {
        guide: String,
        found: i64,
        position: usize,
    },

    #[error("guide {guide}: minutes to complete cannot be negative, found {minutes}")]
    NegativeMinutes { guide: String, minutes: i64 },
}

fn skill_levels() -> String {
    one_of(&SkillLevel::ALL.map(|l| l.as_str()))
}

fn difficulties() -> String {
    one_of(&Difficulty::ALL.map(|d| d.as_str()))
}

fn resource_types() -> String {
    one_of(&ResourceType::ALL.map(|r| r.as_str()))
}

/// Check a group's own fields (not its chapters)
pub fn validate_group(group: &Group) -> Result<(), ValidationError> {
    if group.name.is_empty() {
        return Err(ValidationError::GroupNameEmpty {
            group: group.slug.clone(),
        });
    }

    if group.skill_level.is_empty() {
        return Err(ValidationError::SkillLevelEmpty {
            group: group.slug.clone(),
        });
    }

    if group.skill_level.parse::<SkillLevel>().is_err() {
        return Err(ValidationError::InvalidSkillLevel {
            group: group.slug.clone(),
            value: group.skill_level.clone(),
        });
    }

    Ok(())
}

/// Check a chapter's own fields and its variables (not its guides)
pub fn validate_chapter(chapter: &Chapter) -> Result<(), ValidationError> {
    if chapter.name.is_empty() {
        return Err(ValidationError::ChapterNameEmpty {
            chapter: chapter.slug.clone(),
        });
    }

    for variable in &chapter.variables {
        if variable.resource_type.is_empty() {
            return Err(ValidationError::ResourceTypeEmpty {
                chapter: chapter.slug.clone(),
                variable: variable.name.clone(),
            });
        }
        if variable.resource_type.parse::<ResourceType>().is_err() {
            return Err(ValidationError::InvalidResourceType {
                chapter: chapter.slug.clone(),
                variable: variable.name.clone(),
                value: variable.resource_type.clone(),
            });
        }
    }

    Ok(())
}

/// Check a guide: metadata, labels, steps, docs and step ordering
pub fn validate_guide(guide: &Guide) -> Result<(), ValidationError> {
    let id = || guide.slug.clone();

    if guide.slug.is_empty() {
        // Nothing better to name the guide by than its title
        return Err(ValidationError::GuideSlugEmpty {
            guide: guide.metadata.title.clone(),
        });
    }

    if guide.metadata.title.is_empty() {
        return Err(ValidationError::TitleEmpty { guide: id() });
    }

    if guide.steps.is_empty() {
        return Err(ValidationError::NoSteps { guide: id() });
    }

    let difficulty = &guide.metadata.difficulty;
    if !difficulty.is_empty() && difficulty.parse::<Difficulty>().is_err() {
        return Err(ValidationError::InvalidDifficulty {
            guide: id(),
            value: difficulty.clone(),
        });
    }

    for (index, label) in guide.metadata.labels.iter().enumerate() {
        if label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel { guide: id(), index });
        }
    }

    let mut seen = HashSet::with_capacity(guide.steps.len());
    let mut orders = Vec::with_capacity(guide.steps.len());

    for step in &guide.steps {
        let order = step.order;
        if order <= 0 {
            return Err(ValidationError::StepOrderNotPositive { guide: id(), order });
        }
        if step.title.is_empty() {
            return Err(ValidationError::StepTitleEmpty { guide: id(), order });
        }
        if step.instruction.is_empty() {
            return Err(ValidationError::StepInstructionEmpty { guide: id(), order });
        }
        if !seen.insert(order) {
            return Err(ValidationError::DuplicateStepOrder { guide: id(), order });
        }
        orders.push(order);

        for doc in &step.docs {
            if doc.title.is_empty() {
                return Err(ValidationError::DocTitleEmpty { guide: id(), order });
            }
            if doc.url.is_empty() {
                return Err(ValidationError::DocUrlEmpty { guide: id(), order });
            }
            let parsed = Url::parse(&doc.url).map_err(|source| ValidationError::MalformedDocUrl {
                guide: id(),
                order,
                url: doc.url.clone(),
                source,
            })?;
            if !DOC_URL_SCHEMES.contains(&parsed.scheme()) {
                return Err(ValidationError::UnsupportedDocScheme {
                    guide: id(),
                    order,
                    url: doc.url.clone(),
                });
            }
        }
    }

    // Orders are positive and distinct here, so sorted they must be exactly 1..=N
    orders.sort_unstable();
    for (i, &found) in orders.iter().enumerate() {
        let position = i + 1;
        if found != position as i64 {
            return Err(ValidationError::StepsNotSequential {
                guide: id(),
                found,
                position,
            });
        }
    }

    if guide.metadata.minutes_to_complete < 0 {
        return Err(ValidationError::NegativeMinutes {
            guide: id(),
            minutes: guide.metadata.minutes_to_complete,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GuideCompletion, GuideDoc, GuideMetadata, GuideStep, Variable};

    fn step(order: i64) -> GuideStep {
        GuideStep {
            order,
            title: format!("Step {}", order),
            instruction: "Do this".to_string(),
            ..Default::default()
        }
    }

    fn guide(steps: Vec<GuideStep>) -> Guide {
        Guide {
            slug: "test-guide".to_string(),
            ordering: 1,
            prerequisite_guide_slugs: Vec::new(),
            metadata: GuideMetadata {
                title: "Test Guide".to_string(),
                description: "A test guide".to_string(),
                labels: vec!["test".to_string()],
                difficulty: "easy".to_string(),
                minutes_to_complete: 5,
            },
            steps,
            completion: GuideCompletion {
                success_message: "Done".to_string(),
                recommended_guide_ids: Vec::new(),
            },
        }
    }

    fn group(skill_level: &str) -> Group {
        Group {
            slug: "foundations".to_string(),
            name: "Foundations".to_string(),
            description: String::new(),
            skill_level: skill_level.to_string(),
            ordering: 1,
            chapters: Vec::new(),
        }
    }

    fn chapter(variables: Vec<Variable>) -> Chapter {
        Chapter {
            slug: "basics".to_string(),
            name: "Basics".to_string(),
            description: String::new(),
            ordering: 1,
            variables,
            guides: Vec::new(),
        }
    }

    fn variable(resource_type: &str) -> Variable {
        Variable {
            name: "target".to_string(),
            description: String::new(),
            resource_type: resource_type.to_string(),
        }
    }

    #[test]
    fn test_valid_guide() {
        assert_eq!(validate_guide(&guide(vec![step(1), step(2)])), Ok(()));
    }

    #[test]
    fn test_steps_may_appear_out_of_order() {
        assert_eq!(validate_guide(&guide(vec![step(3), step(1), step(2)])), Ok(()));
    }

    #[test]
    fn test_gap_in_step_orders() {
        let err = validate_guide(&guide(vec![step(1), step(3)])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::StepsNotSequential {
                guide: "test-guide".to_string(),
                found: 3,
                position: 2,
            }
        );
        assert!(err.to_string().contains("steps must be sequentially ordered"));
    }

    #[test]
    fn test_steps_not_starting_at_one() {
        let err = validate_guide(&guide(vec![step(2), step(3)])).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::StepsNotSequential { found: 2, position: 1, .. }
        ));
    }

    #[test]
    fn test_duplicate_step_order() {
        let err = validate_guide(&guide(vec![step(1), step(1)])).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateStepOrder { order: 1, .. }));
    }

    #[test]
    fn test_non_positive_step_order() {
        let err = validate_guide(&guide(vec![step(0)])).unwrap_err();
        assert!(matches!(err, ValidationError::StepOrderNotPositive { order: 0, .. }));
        assert!(err.to_string().contains("step order must be positive"));
    }

    #[test]
    fn test_step_title_and_instruction_required() {
        let mut untitled = step(1);
        untitled.title.clear();
        assert!(matches!(
            validate_guide(&guide(vec![untitled])),
            Err(ValidationError::StepTitleEmpty { order: 1, .. })
        ));

        let mut empty = step(1);
        empty.instruction.clear();
        assert!(matches!(
            validate_guide(&guide(vec![empty])),
            Err(ValidationError::StepInstructionEmpty { order: 1, .. })
        ));
    }

    #[test]
    fn test_guide_needs_title_and_steps() {
        let mut g = guide(vec![step(1)]);
        g.metadata.title.clear();
        assert!(validate_guide(&g).unwrap_err().to_string().contains("title cannot be empty"));

        let err = validate_guide(&guide(Vec::new())).unwrap_err();
        assert_eq!(err.to_string(), "guide test-guide: must have at least one step");
    }

    #[test]
    fn test_empty_slug() {
        let mut g = guide(vec![step(1)]);
        g.slug.clear();
        let err = validate_guide(&g).unwrap_err();
        assert_eq!(
            err,
            ValidationError::GuideSlugEmpty {
                guide: "Test Guide".to_string()
            }
        );
        assert!(err.to_string().contains("slug cannot be empty"));
    }

    #[test]
    fn test_invalid_difficulty() {
        let mut g = guide(vec![step(1)]);
        g.metadata.difficulty = "super-hard".to_string();
        let err = validate_guide(&g).unwrap_err();
        assert_eq!(
            err.to_string(),
            "guide test-guide: invalid difficulty \"super-hard\" (must be easy, medium, or hard)"
        );
    }

    #[test]
    fn test_empty_difficulty_is_allowed() {
        let mut g = guide(vec![step(1)]);
        g.metadata.difficulty.clear();
        assert_eq!(validate_guide(&g), Ok(()));
    }

    #[test]
    fn test_empty_label() {
        let mut g = guide(vec![step(1)]);
        g.metadata.labels = vec!["valid".to_string(), "".to_string()];
        let err = validate_guide(&g).unwrap_err();
        assert!(err.to_string().contains("label at index 1 is empty"));

        g.metadata.labels = vec!["   ".to_string()];
        assert!(matches!(
            validate_guide(&g),
            Err(ValidationError::EmptyLabel { index: 0, .. })
        ));
    }

    #[test]
    fn test_doc_url_scheme() {
        let mut s = step(1);
        s.docs.push(GuideDoc {
            title: "Docs".to_string(),
            url: "ftp://example.com".to_string(),
        });
        let err = validate_guide(&guide(vec![s])).unwrap_err();
        assert!(err.to_string().contains("must use http or https scheme"));
    }

    #[test]
    fn test_doc_url_malformed() {
        let mut s = step(1);
        s.docs.push(GuideDoc {
            title: "Docs".to_string(),
            url: "not a url".to_string(),
        });
        let err = validate_guide(&guide(vec![s])).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedDocUrl { .. }));
        assert!(err.to_string().ends_with("is malformed"));

        // The parse failure is reported once, as the cause
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert!(chain.ends_with("is malformed: relative URL without a base"));
        assert_eq!(chain.matches("relative URL without a base").count(), 1);
    }

    #[test]
    fn test_doc_fields_required() {
        let mut s = step(1);
        s.docs.push(GuideDoc {
            title: String::new(),
            url: "https://docs.spacelift.io".to_string(),
        });
        assert!(matches!(
            validate_guide(&guide(vec![s])),
            Err(ValidationError::DocTitleEmpty { order: 1, .. })
        ));

        let mut s = step(1);
        s.docs.push(GuideDoc {
            title: "Docs".to_string(),
            url: String::new(),
        });
        assert!(matches!(
            validate_guide(&guide(vec![s])),
            Err(ValidationError::DocUrlEmpty { order: 1, .. })
        ));
    }

    #[test]
    fn test_http_and_https_docs_pass() {
        let mut s = step(1);
        s.docs.push(GuideDoc {
            title: "Plain".to_string(),
            url: "http://example.com/docs".to_string(),
        });
        s.docs.push(GuideDoc {
            title: "Secure".to_string(),
            url: "https://docs.spacelift.io/concepts/stack".to_string(),
        });
        assert_eq!(validate_guide(&guide(vec![s])), Ok(()));
    }

    #[test]
    fn test_negative_minutes() {
        let mut g = guide(vec![step(1)]);
        g.metadata.minutes_to_complete = -1;
        let err = validate_guide(&g).unwrap_err();
        assert!(err.to_string().contains("minutes to complete cannot be negative"));
    }

    #[test]
    fn test_skill_levels() {
        assert_eq!(validate_group(&group("GUARDIAN")), Ok(()));
        assert_eq!(validate_group(&group("BEGINNER")), Ok(()));

        let err = validate_group(&group("EXPERT")).unwrap_err();
        assert!(err.to_string().contains("invalid skill level"));
        assert!(err
            .to_string()
            .contains("(must be BEGINNER, ENABLER, COMMANDER, or GUARDIAN)"));

        assert!(matches!(
            validate_group(&group("")),
            Err(ValidationError::SkillLevelEmpty { .. })
        ));
    }

    #[test]
    fn test_group_name_required() {
        let mut g = group("BEGINNER");
        g.name.clear();
        assert_eq!(
            validate_group(&g).unwrap_err().to_string(),
            "group foundations: name cannot be empty"
        );
    }

    #[test]
    fn test_chapter_variables() {
        assert_eq!(
            validate_chapter(&chapter(vec![
                variable("stack"),
                variable("policy"),
                variable("aws_integration"),
            ])),
            Ok(())
        );

        let err = validate_chapter(&chapter(vec![variable("module")])).unwrap_err();
        assert!(err.to_string().contains("invalid resource type"));

        assert!(matches!(
            validate_chapter(&chapter(vec![variable("")])),
            Err(ValidationError::ResourceTypeEmpty { .. })
        ));
    }

    #[test]
    fn test_chapter_name_required() {
        let mut c = chapter(Vec::new());
        c.name.clear();
        assert!(matches!(
            validate_chapter(&c),
            Err(ValidationError::ChapterNameEmpty { .. })
        ));
    }
}
