//! # HexMaker Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module implements the file generator the makers write through. A
//! maker hands it a target path, a template name and a map of variables; the
//! generator renders the template and queues the result. Nothing touches the
//! disk until `write_changes` flushes the queue, so one maker invocation is
//! written as a single batch.
//!
//! ## Architecture
//!
//! - `Generator`: the port the makers depend on. Tests swap in a recording stub.
//! - `TeraGenerator`: the adapter backed by the Tera templating engine.
//!
//! Templates ship inside the binary (`cli/templates/**`). A template override
//! directory (from configuration) is walked at startup and any file whose
//! relative path matches an embedded template name replaces it, so a project
//! can restyle the generated PHP without rebuilding the maker.
//!
//! Flushing checks every queued target before writing the first one. If any
//! target exists and `force` is off, nothing is written.
//!
//! ## Examples
//!
//! ```rust
//! let mut generator = TeraGenerator::new(&project_root, None)?;
//! generator.generate_file(
//!     Path::new("src/User/Application/CreateUser/CreateUserCommand.php"),
//!     "command/Command.php.tera",
//!     variables,
//! )?;
//! generator.write_changes()?;
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{MakerError, Result};
use anyhow::anyhow;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Variables handed to a template. Ordered so identical inputs compare equal.
pub type TemplateVariables = BTreeMap<String, Value>;

/// Extension every template file carries.
const TEMPLATE_EXTENSION: &str = ".tera";

/// Templates compiled into the binary, keyed by the name makers refer to them by.
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (
        "command/Command.php.tera",
        include_str!("../../templates/command/Command.php.tera"),
    ),
    (
        "command/CommandHandler.php.tera",
        include_str!("../../templates/command/CommandHandler.php.tera"),
    ),
    (
        "command/CommandHandlerWithFactory.php.tera",
        include_str!("../../templates/command/CommandHandlerWithFactory.php.tera"),
    ),
    (
        "command/Factory.php.tera",
        include_str!("../../templates/command/Factory.php.tera"),
    ),
    (
        "command/CommandHandlerTest.php.tera",
        include_str!("../../templates/command/CommandHandlerTest.php.tera"),
    ),
    (
        "query/Query.php.tera",
        include_str!("../../templates/query/Query.php.tera"),
    ),
    (
        "query/QueryHandler.php.tera",
        include_str!("../../templates/query/QueryHandler.php.tera"),
    ),
    (
        "query/Response.php.tera",
        include_str!("../../templates/query/Response.php.tera"),
    ),
];

/// Renders templates and writes the results.
pub trait Generator {
    /// Renders `template_path` with `variables` and queues the output for `target_path`.
    fn generate_file(
        &mut self,
        target_path: &Path,
        template_path: &str,
        variables: TemplateVariables,
    ) -> Result<()>;

    /// Writes every queued file.
    fn write_changes(&mut self) -> Result<()>;
}

/// A rendered file waiting for `write_changes`.
#[derive(Debug, Clone)]
struct PendingFile {
    path: PathBuf,
    template: String,
    content: String,
}

/// `Generator` backed by Tera, writing below a project root.
pub struct TeraGenerator {
    tera: Tera,
    project_root: PathBuf,
    force: bool,
    dry_run: bool,
    pending: Vec<PendingFile>,
    written: Vec<PathBuf>,
}

impl TeraGenerator {
    /// Loads the embedded templates plus any overrides found in `override_dir`.
    pub fn new(project_root: &Path, override_dir: Option<&Path>) -> Result<Self> {
        let mut templates: BTreeMap<String, String> = EMBEDDED_TEMPLATES
            .iter()
            .map(|(name, content)| (name.to_string(), content.to_string()))
            .collect();

        if let Some(dir) = override_dir {
            load_template_overrides(dir, &mut templates)?;
        }

        let mut tera = Tera::default();
        // The output is PHP, never HTML.
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(templates.iter().map(|(name, content)| (name.as_str(), content.as_str())))
            .map_err(|e| {
                anyhow!(MakerError::Template { source: e }).context("Failed to compile templates")
            })?;
        debug!("Registered {} templates", templates.len());

        Ok(Self {
            tera,
            project_root: project_root.to_path_buf(),
            force: false,
            dry_run: false,
            pending: Vec::new(),
            written: Vec::new(),
        })
    }

    /// Allows `write_changes` to overwrite existing files.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Makes `write_changes` report what it would write without touching disk.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[cfg(test)]
    fn pending_files(&self) -> &[PendingFile] {
        &self.pending
    }

    /// Files written (or, in dry-run mode, that would have been written) so far.
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Generator for TeraGenerator {
    fn generate_file(
        &mut self,
        target_path: &Path,
        template_path: &str,
        variables: TemplateVariables,
    ) -> Result<()> {
        debug!(
            "Rendering '{}' for '{}' with {:?}",
            template_path,
            target_path.display(),
            variables
        );
        let context = tera::Context::from_serialize(&variables).map_err(|e| {
            anyhow!(MakerError::Template { source: e })
                .context("Failed to create Tera context from variables")
        })?;
        let content = self.tera.render(template_path, &context).map_err(|e| {
            anyhow!(MakerError::Template { source: e }).context(format!(
                "Tera rendering failed for template '{}'",
                template_path
            ))
        })?;

        self.pending.push(PendingFile {
            path: self.project_root.join(target_path),
            template: template_path.to_string(),
            content,
        });
        Ok(())
    }

    fn write_changes(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);

        for file in &pending {
            if file.path.exists() {
                if self.force {
                    warn!(
                        "'{}' already exists. Overwriting due to --force.",
                        file.path.display()
                    );
                } else {
                    return Err(anyhow!(MakerError::FileExists {
                        path: file.path.display().to_string(),
                    }));
                }
            }
        }

        for file in pending {
            if self.dry_run {
                info!("Dry run, not writing '{}'", file.path.display());
            } else {
                io::write_string_to_file(&file.path, &file.content)?;
                info!(
                    "Rendered '{}' to '{}'",
                    file.template,
                    file.path.display()
                );
            }
            self.written.push(file.path);
        }
        Ok(())
    }
}

/// Replaces embedded templates with same-named files found below `dir`.
fn load_template_overrides(dir: &Path, templates: &mut BTreeMap<String, String>) -> Result<()> {
    if !dir.is_dir() {
        warn!(
            "Template override directory '{}' does not exist, using built-in templates.",
            dir.display()
        );
        return Ok(());
    }

    for entry_result in WalkDir::new(dir) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to access entry during walk in '{}': {}",
                    dir.display(),
                    e
                );
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let relative_path = match entry.path().strip_prefix(dir) {
            Ok(p) => p,
            Err(_) => continue,
        };
        let name = relative_path
            .components()
            .map(|comp| comp.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if !name.ends_with(TEMPLATE_EXTENSION) {
            debug!("Skipping non-template file: {}", entry.path().display());
            continue;
        }
        if !templates.contains_key(&name) {
            warn!(
                "'{}' does not match any built-in template and is ignored.",
                entry.path().display()
            );
            continue;
        }

        let content = io::read_file_to_string(entry.path())?;
        info!("Using template override '{}'", entry.path().display());
        templates.insert(name, content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn command_variables() -> TemplateVariables {
        let mut variables = TemplateVariables::new();
        variables.insert(
            "namespace".into(),
            json!("App\\User\\Application\\CreateUser"),
        );
        variables.insert("class_name".into(), json!("CreateUserCommand"));
        variables.insert(
            "properties".into(),
            json!([{ "name": "email", "type": "string", "nullable": false, "php_type": "string" }]),
        );
        variables
    }

    #[test]
    fn test_render_and_write() -> Result<()> {
        let project = tempdir()?;
        let mut generator = TeraGenerator::new(project.path(), None)?;
        let target = Path::new("src/User/Application/CreateUser/CreateUserCommand.php");

        generator.generate_file(target, "command/Command.php.tera", command_variables())?;
        assert_eq!(generator.pending_files().len(), 1);
        assert!(!project.path().join(target).exists());

        generator.write_changes()?;
        assert!(generator.pending_files().is_empty());
        let content = fs::read_to_string(project.path().join(target))?;
        assert!(content.contains("namespace App\\User\\Application\\CreateUser;"));
        assert!(content.contains("final readonly class CreateUserCommand"));
        assert!(content.contains("        public string $email,"));
        assert_eq!(generator.written_files(), [project.path().join(target)]);
        Ok(())
    }

    #[test]
    fn test_existing_file_blocks_whole_batch() -> Result<()> {
        let project = tempdir()?;
        let existing = project.path().join("src/B.php");
        fs::create_dir_all(existing.parent().unwrap())?;
        fs::write(&existing, "<?php // hand written")?;

        let mut generator = TeraGenerator::new(project.path(), None)?;
        generator.generate_file(Path::new("src/A.php"), "command/Command.php.tera", command_variables())?;
        generator.generate_file(Path::new("src/B.php"), "command/Command.php.tera", command_variables())?;

        let result = generator.write_changes();
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MakerError>(),
            Some(MakerError::FileExists { .. })
        ));
        assert!(!project.path().join("src/A.php").exists());
        assert_eq!(fs::read_to_string(&existing)?, "<?php // hand written");
        Ok(())
    }

    #[test]
    fn test_force_overwrites() -> Result<()> {
        let project = tempdir()?;
        let existing = project.path().join("A.php");
        fs::write(&existing, "old")?;

        let mut generator = TeraGenerator::new(project.path(), None)?.with_force(true);
        generator.generate_file(Path::new("A.php"), "command/Command.php.tera", command_variables())?;
        generator.write_changes()?;
        assert!(fs::read_to_string(&existing)?.contains("CreateUserCommand"));
        Ok(())
    }

    #[test]
    fn test_dry_run_writes_nothing() -> Result<()> {
        let project = tempdir()?;
        let mut generator = TeraGenerator::new(project.path(), None)?.with_dry_run(true);
        generator.generate_file(Path::new("A.php"), "command/Command.php.tera", command_variables())?;
        generator.write_changes()?;
        assert!(!project.path().join("A.php").exists());
        assert_eq!(generator.written_files().len(), 1);
        Ok(())
    }

    #[test]
    fn test_unknown_template_is_an_error() -> Result<()> {
        let project = tempdir()?;
        let mut generator = TeraGenerator::new(project.path(), None)?;
        let result = generator.generate_file(
            Path::new("A.php"),
            "command/Missing.php.tera",
            TemplateVariables::new(),
        );
        let error_string = format!("{:#}", result.unwrap_err());
        assert!(error_string.contains("Tera rendering failed"));
        assert!(error_string.contains("command/Missing.php.tera"));
        Ok(())
    }

    #[test]
    fn test_template_override_directory() -> Result<()> {
        let project = tempdir()?;
        let overrides = tempdir()?;
        fs::create_dir_all(overrides.path().join("command"))?;
        fs::write(
            overrides.path().join("command/Command.php.tera"),
            "<?php // custom {{ class_name }}",
        )?;
        fs::write(overrides.path().join("command/Unknown.php.tera"), "ignored")?;
        fs::write(overrides.path().join("README.md"), "not a template")?;

        let mut generator = TeraGenerator::new(project.path(), Some(overrides.path()))?;
        generator.generate_file(Path::new("A.php"), "command/Command.php.tera", command_variables())?;
        assert_eq!(
            generator.pending_files()[0].content,
            "<?php // custom CreateUserCommand"
        );
        Ok(())
    }

    #[test]
    fn test_missing_override_directory_falls_back() -> Result<()> {
        let project = tempdir()?;
        let missing = project.path().join("no-such-dir");
        assert!(TeraGenerator::new(project.path(), Some(&missing)).is_ok());
        Ok(())
    }
}
