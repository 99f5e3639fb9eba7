//! userguides - loader and validator for the user guide library
//!
//! Guides are authored as YAML declarations in a `guides/` tree
//! (groups → chapters → guides → steps). This crate loads the tree,
//! validates every record and the cross-references between them, and hands
//! back an immutable `Library`.
//!
//! # Modules
//!
//! - `domain`: Records (Library, Group, Chapter, Guide, ...) and enumerations
//! - `source`: Content sources (directory on disk, in-memory)
//! - `loader`: Tree walk and YAML decoding
//! - `validate`: Per-record and library-wide validation
//! - `library`: Load-and-validate facade and lookups
//! - `schema`: JSON schema documents for the declaration files
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Validate a content directory
//! userguides check --root .
//!
//! # Print the tree
//! userguides tree
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod loader;
pub mod schema;
pub mod source;
pub mod validate;

// Re-export main types at crate root for convenience
pub use domain::{
    Chapter, Difficulty, Group, Guide, GuideCompletion, GuideDoc, GuideMetadata, GuideStep,
    Library, ResourceType, SkillLevel, Variable,
};
pub use library::{guides, load_dir, load_library, GuideRef, LibraryStats, LoadOptions};
pub use source::{ContentSource, DirSource, EntryKind, MemorySource, SourceEntry};
pub use validate::{GuideSlugScope, IntegrityError, ValidationError};
