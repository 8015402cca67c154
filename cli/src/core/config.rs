//! # HexMaker Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the settings that decide where generated files go and
//! which namespace they live in. Configuration is optional: without any file
//! the maker targets a stock Symfony layout (`App\` mapped to `src/`, tests in
//! `tests/`).
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.hexmaker.toml` in the project directory or its ancestors
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `<config dir>/hexmaker/config.toml`
//! 3. Default values defined in the code
//!
//! When a project file is found, its directory becomes the project root that
//! `source_dir` and `tests_dir` are resolved against.
//!
//! ## Examples
//!
//! ```toml
//! [project]
//! root_namespace = "Acme\\Shop"
//! source_dir = "src"
//! tests_dir = "tests"
//!
//! [templates]
//! directory = "~/.config/hexmaker/templates"
//! ```
//!
use crate::common::naming;
use crate::core::error::{MakerError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Resolved configuration, after merging every source over the defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub project: ProjectConfig,
    pub templates: TemplatesConfig,
    /// Directory holding the project config file, when one was found.
    pub project_root: Option<PathBuf>,
}

/// Layout of the PHP project the makers write into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// PSR-4 prefix mapped to `source_dir`.
    pub root_namespace: String,
    /// Source directory, relative to the project root.
    pub source_dir: String,
    /// Test directory, relative to the project root.
    pub tests_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_namespace: default_root_namespace(),
            source_dir: default_source_dir(),
            tests_dir: default_tests_dir(),
        }
    }
}

/// Template override settings.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory whose `*.tera` files replace the built-in templates (can use ~).
    /// Relative paths are resolved against the project root.
    pub directory: Option<String>,
}

/// One configuration file as written. Keys left out stay `None`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    project: ProjectSection,
    #[serde(default)]
    templates: TemplatesConfig,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ProjectSection {
    root_namespace: Option<String>,
    source_dir: Option<String>,
    tests_dir: Option<String>,
}

fn default_root_namespace() -> String {
    "App".to_string()
}
fn default_source_dir() -> String {
    "src".to_string()
}
fn default_tests_dir() -> String {
    "tests".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".hexmaker.toml";

/// Loads, merges, expands and validates the configuration for `project_dir`.
pub fn load_config(project_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?.unwrap_or_default();
    let (project_config, project_root) = match load_project_config(project_dir)? {
        Some((config, root)) => (config, Some(root)),
        None => (ConfigFile::default(), None),
    };

    let mut merged_config = merge_configs(user_config, project_config);
    merged_config.project_root = project_root;

    let base_dir = merged_config
        .project_root
        .clone()
        .unwrap_or_else(|| project_dir.to_path_buf());
    expand_config_paths(&mut merged_config, &base_dir)
        .context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "HexMaker", "hexmaker") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

/// The project file found from `project_dir` upwards, with the directory holding it.
fn load_project_config(project_dir: &Path) -> Result<Option<(ConfigFile, PathBuf)>> {
    if let Some(project_config_path) = find_project_config_path(project_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        let config = load_config_from_path(&project_config_path)?;
        let root = project_config_path
            .parent()
            .unwrap_or(project_dir)
            .to_path_buf();
        Ok(Some((config, root)))
    } else {
        debug!(
            "No project configuration file ({}) found in '{}' or ancestors.",
            PROJECT_CONFIG_FILENAME,
            project_dir.display()
        );
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project keys win over user keys, which win over the defaults.
fn merge_configs(user: ConfigFile, project: ConfigFile) -> Config {
    Config {
        project: ProjectConfig {
            root_namespace: project
                .project
                .root_namespace
                .or(user.project.root_namespace)
                .unwrap_or_else(default_root_namespace),
            source_dir: project
                .project
                .source_dir
                .or(user.project.source_dir)
                .unwrap_or_else(default_source_dir),
            tests_dir: project
                .project
                .tests_dir
                .or(user.project.tests_dir)
                .unwrap_or_else(default_tests_dir),
        },
        templates: TemplatesConfig {
            directory: project.templates.directory.or(user.templates.directory),
        },
        project_root: None,
    }
}

/// Expands `~` in the template directory and anchors a relative one at `base_dir`.
fn expand_config_paths(config: &mut Config, base_dir: &Path) -> Result<()> {
    if let Some(directory) = &config.templates.directory {
        let expanded = PathBuf::from(shellexpand::tilde(directory).into_owned());
        let resolved = if expanded.is_absolute() {
            expanded
        } else {
            base_dir.join(expanded)
        };
        debug!("Resolved template directory: {}", resolved.display());
        config.templates.directory = Some(resolved.to_string_lossy().into_owned());
    }
    Ok(())
}

/// Checks the merged configuration before any file is generated.
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if !naming::is_php_namespace(&config.project.root_namespace) {
        return Err(anyhow!(MakerError::Config(format!(
            "Invalid root namespace '{}'. Expected segments like 'App' or 'Acme\\Shop'.",
            config.project.root_namespace
        ))));
    }
    if config.project.source_dir.trim().is_empty() {
        return Err(anyhow!(MakerError::Config(
            "project.source_dir cannot be empty.".to_string()
        )));
    }
    if config.project.tests_dir.trim().is_empty() {
        return Err(anyhow!(MakerError::Config(
            "project.tests_dir cannot be empty.".to_string()
        )));
    }
    if let Some(directory) = &config.templates.directory {
        let dir = PathBuf::from(directory);
        if !dir.exists() {
            warn!(
                "Configured template directory '{}' does not exist.",
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(MakerError::Config(format!(
                "Configured template path '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    Ok(())
}
