//! Configuration for locating and validating the guide library.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (USERGUIDES_ROOT, USERGUIDES_GUIDE_SLUG_SCOPE)
//! 2. Config file (.userguides/config.yaml, then the user config directory)
//! 3. Defaults (current directory, library-wide guide slugs)
//!
//! Config file discovery:
//! - Searches current directory and parents for .userguides/config.yaml
//! - Falls back to <config dir>/userguides/config.yaml
//! - `content.root` is relative to the directory holding `.userguides/`

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::validate::GuideSlugScope;

pub const ENV_ROOT: &str = "USERGUIDES_ROOT";

pub const ENV_GUIDE_SLUG_SCOPE: &str = "USERGUIDES_GUIDE_SLUG_SCOPE";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Directory containing `guides/` (relative to the project root)
    pub root: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    pub guide_slug_scope: Option<GuideSlugScope>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory containing `guides/`
    pub content_root: PathBuf,
    /// Uniqueness scope for guide slugs
    pub guide_slug_scope: GuideSlugScope,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".userguides").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("userguides").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine config file and environment values over the defaults
fn resolve(
    config_file: Option<(PathBuf, ConfigFile)>,
    env_root: Option<String>,
    env_scope: Option<String>,
    cwd: &Path,
) -> Result<ResolvedConfig> {
    let (file_root, file_scope, config_path) = match config_file {
        Some((path, config)) => {
            // Project root is the parent of .userguides/ (grandparent of config.yaml)
            let base_dir = path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."))
                .to_path_buf();
            let root = config.content.root.map(|r| resolve_path(&base_dir, &r));
            (root, config.validation.guide_slug_scope, Some(path))
        }
        None => (None, None, None),
    };

    let content_root = env_root
        .map(PathBuf::from)
        .or(file_root)
        .unwrap_or_else(|| cwd.to_path_buf());

    let guide_slug_scope: GuideSlugScope = match env_scope {
        Some(scope) => scope
            .parse()
            .with_context(|| format!("Invalid {}", ENV_GUIDE_SLUG_SCOPE))?,
        None => file_scope.unwrap_or_default(),
    };

    Ok(ResolvedConfig {
        content_root,
        guide_slug_scope,
        config_file: config_path,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let config_file = match find_config_file() {
        Some(path) => {
            let config = load_config_file(&path)?;
            Some((path, config))
        }
        None => None,
    };

    resolve(
        config_file,
        std::env::var(ENV_ROOT).ok(),
        std::env::var(ENV_GUIDE_SLUG_SCOPE).ok(),
        &cwd,
    )
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (bypasses the cache)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
