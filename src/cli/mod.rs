//! Command-line interface for userguides.
//!
//! Provides commands for checking a content directory, printing the loaded
//! tree, showing a single guide, emitting JSON schemas and inspecting the
//! resolved configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::domain::Library;
use crate::library::{self, LoadOptions};
use crate::schema;
use crate::validate::GuideSlugScope;

/// userguides - load and validate the user guide library
#[derive(Parser, Debug)]
#[command(name = "userguides")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate the library, then print a summary
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the group/chapter/guide tree
    Tree {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show a single guide and its steps
    Show {
        /// Guide slug
        slug: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write JSON schema documents for the declaration files
    Schema {
        /// Output directory
        #[arg(short, long, default_value = "schema")]
        out: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Where to load from; unset values fall back to the resolved configuration
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory containing guides/
    #[arg(short, long, env = "USERGUIDES_ROOT")]
    pub root: Option<PathBuf>,

    /// Scope within which guide slugs must be unique
    #[arg(short, long, value_enum)]
    pub scope: Option<ScopeArg>,
}

/// Guide slug scope for CLI (maps to GuideSlugScope)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    /// Unique across the whole library
    Library,

    /// Unique within each chapter
    Chapter,
}

impl From<ScopeArg> for GuideSlugScope {
    fn from(s: ScopeArg) -> Self {
        match s {
            ScopeArg::Library => GuideSlugScope::Library,
            ScopeArg::Chapter => GuideSlugScope::Chapter,
        }
    }
}

impl SourceArgs {
    fn load(&self) -> Result<Library> {
        let (root, scope) = match (&self.root, self.scope) {
            (Some(root), Some(scope)) => (root.clone(), scope.into()),
            _ => {
                let config = config::config()?;
                (
                    self.root.clone().unwrap_or_else(|| config.content_root.clone()),
                    self.scope.map(Into::into).unwrap_or(config.guide_slug_scope),
                )
            }
        };

        library::load_dir(&root, &LoadOptions::with_scope(scope))
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check { source } => check(&source),
            Commands::Tree { source } => print_tree(&source),
            Commands::Show { slug, source } => show_guide(&slug, &source),
            Commands::Schema { out } => write_schemas(out),
            Commands::Config => show_config(),
        }
    }
}

/// Load, validate and summarize
fn check(source: &SourceArgs) -> Result<()> {
    let library = source.load()?;
    let stats = library.stats();

    println!(
        "OK: {} group(s), {} chapter(s), {} guide(s), {} step(s)",
        stats.groups, stats.chapters, stats.guides, stats.steps
    );
    println!("Fingerprint: {}", library.fingerprint()?);

    Ok(())
}

fn print_tree(source: &SourceArgs) -> Result<()> {
    let library = source.load()?;

    for group in &library.groups {
        println!("{} ({}) [{}]", group.name, group.slug, group.skill_level);
        for chapter in &group.chapters {
            println!("  {} ({}) - {} guide(s)", chapter.name, chapter.slug, chapter.guides.len());
            for guide in &chapter.guides {
                println!(
                    "    {} ({}) - {} step(s)",
                    guide.metadata.title,
                    guide.slug,
                    guide.steps.len()
                );
            }
        }
    }

    Ok(())
}

fn show_guide(slug: &str, source: &SourceArgs) -> Result<()> {
    let library = source.load()?;
    let found = library
        .find_guide(slug)
        .with_context(|| format!("Guide not found: {}", slug))?;
    let guide = found.guide;

    println!("Guide: {}", guide.metadata.title);
    println!("Path: {}", found.path());
    if !guide.metadata.difficulty.is_empty() {
        println!("Difficulty: {}", guide.metadata.difficulty);
    }
    println!("Minutes: {}", guide.metadata.minutes_to_complete);
    if !guide.metadata.labels.is_empty() {
        println!("Labels: {}", guide.metadata.labels.join(", "));
    }

    let prerequisites = library.prerequisites(slug).unwrap_or_default();
    if !prerequisites.is_empty() {
        println!("\nPrerequisites:");
        for r in prerequisites {
            println!("  {} ({})", r.guide.metadata.title, r.path());
        }
    }

    println!("\nSteps:");
    for step in guide.ordered_steps() {
        println!("  {}. {}", step.order, step.title);
        if let Some(hint) = &step.hint {
            println!("     Hint: {}", hint);
        }
        for doc in &step.docs {
            println!("     Doc: {} <{}>", doc.title, doc.url);
        }
    }

    let recommended = library.recommended_guides(slug).unwrap_or_default();
    if !recommended.is_empty() {
        println!("\nNext:");
        for r in recommended {
            println!("  {} ({})", r.guide.metadata.title, r.path());
        }
    }

    Ok(())
}

fn write_schemas(out: PathBuf) -> Result<()> {
    for path in schema::write_all(&out)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn show_config() -> Result<()> {
    let config = config::reload_config()?;

    println!("Content root: {}", config.content_root.display());
    println!("Guide slug scope: {}", config.guide_slug_scope);
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none)"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_with_flags() {
        let cli = Cli::try_parse_from(["userguides", "check", "--root", "content", "--scope", "chapter"])
            .unwrap();
        match cli.command {
            Commands::Check { source } => {
                assert_eq!(source.root, Some(PathBuf::from("content")));
                assert!(matches!(source.scope, Some(ScopeArg::Chapter)));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_show_requires_slug() {
        assert!(Cli::try_parse_from(["userguides", "show"]).is_err());
        assert!(Cli::try_parse_from(["userguides", "show", "intro"]).is_ok());
    }
}
