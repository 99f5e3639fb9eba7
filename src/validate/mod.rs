//! Validation of loaded content.
//!
//! - entity: per-record checks, run by the loader as each record is built
//! - library: uniqueness and reference checks over the assembled tree

pub mod entity;
pub mod library;

pub use entity::{validate_chapter, validate_group, validate_guide, ValidationError};
pub use library::{guide_path, validate_library, GuideSlugScope, IntegrityError};
