//! Domain types for the guide library.
//!
//! This module contains:
//! - Entities: Library, Group, Chapter, Guide and their parts
//! - Levels: the closed enumerations (skill level, difficulty, resource type)

pub mod entities;
pub mod levels;

// Re-export commonly used types
pub use entities::{
    Chapter, Group, Guide, GuideCompletion, GuideDoc, GuideMetadata, GuideStep, Library, Variable,
};
pub use levels::{Difficulty, ResourceType, SkillLevel, UnknownVariant};
