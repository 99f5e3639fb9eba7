//! Bundled Guides Integration Tests
//!
//! Loads the guides/ directory shipped with the crate and checks the
//! invariants every successful load must satisfy.

use std::collections::HashSet;
use std::path::Path;

use userguides::{load_dir, LoadOptions, SkillLevel};

fn bundled() -> userguides::Library {
    load_dir(Path::new(env!("CARGO_MANIFEST_DIR")), &LoadOptions::default())
        .expect("bundled guides should load")
}

#[test]
fn test_guides_load() {
    let library = bundled();
    assert!(!library.groups.is_empty(), "Expected at least one group");

    for group in &library.groups {
        assert!(!group.slug.is_empty());
        assert!(!group.name.is_empty(), "Group {} has empty name", group.slug);
        assert!(group.skill_level().is_some());

        for chapter in &group.chapters {
            assert!(!chapter.slug.is_empty());
            assert!(!chapter.name.is_empty(), "Chapter {} has empty name", chapter.slug);

            for guide in &chapter.guides {
                assert!(!guide.slug.is_empty());
                assert!(!guide.metadata.title.is_empty());
                assert!(!guide.steps.is_empty(), "Guide {} has no steps", guide.slug);

                for step in &guide.steps {
                    assert!(step.order > 0);
                    assert!(!step.title.is_empty());
                    assert!(!step.instruction.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_foundations_group() {
    let library = bundled();
    let foundations = library
        .group("foundations")
        .expect("Expected 'foundations' group to exist");

    assert_eq!(foundations.name, "Foundations");
    assert_eq!(foundations.skill_level(), Some(SkillLevel::Beginner));
    assert!(!foundations.chapters.is_empty());

    let chapter = foundations.chapter("getting-started").unwrap();
    assert_eq!(chapter.variables[0].name, "firstStack");
}

#[test]
fn test_step_orders_are_dense() {
    let library = bundled();

    for r in library.guides() {
        let mut orders: Vec<i64> = r.guide.steps.iter().map(|s| s.order).collect();
        orders.sort_unstable();
        let expected: Vec<i64> = (1..=r.guide.steps.len() as i64).collect();
        assert_eq!(orders, expected, "Guide {} has non-sequential steps", r.path());
    }
}

#[test]
fn test_doc_urls_use_http_schemes() {
    let library = bundled();

    for r in library.guides() {
        for step in &r.guide.steps {
            for doc in &step.docs {
                let url = url::Url::parse(&doc.url).unwrap();
                assert!(matches!(url.scheme(), "http" | "https"));
            }
        }
    }
}

#[test]
fn test_references_resolve() {
    let library = bundled();
    let slugs: HashSet<&str> = library.guides().map(|r| r.guide.slug.as_str()).collect();

    for r in library.guides() {
        for prerequisite in &r.guide.prerequisite_guide_slugs {
            assert!(slugs.contains(prerequisite.as_str()), "{} -> {}", r.path(), prerequisite);
        }
        for recommended in &r.guide.completion.recommended_guide_ids {
            assert!(slugs.contains(recommended.as_str()), "{} -> {}", r.path(), recommended);
        }
    }

    let next = library.recommended_guides("create-first-stack").unwrap();
    let next: Vec<&str> = next.iter().map(|r| r.guide.slug.as_str()).collect();
    assert_eq!(next, vec!["review-a-run", "write-a-plan-policy"]);
}

#[test]
fn test_stats_and_fingerprint_are_stable() {
    let first = bundled();
    let second = bundled();

    let stats = first.stats();
    assert_eq!(stats.groups, 2);
    assert_eq!(stats.chapters, 3);
    assert_eq!(stats.guides, 4);
    assert_eq!(stats.steps, 10);

    assert_eq!(first, second);
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn test_groups_keep_source_order() {
    let library = bundled();
    let slugs: Vec<&str> = library.groups.iter().map(|g| g.slug.as_str()).collect();

    // Sorted by name, not by the `ordering` hint (foundations declares 1, advanced 2)
    assert_eq!(slugs, vec!["advanced", "foundations"]);
}
