//! # HexMaker Command Utilities
//!
//! File: cli/src/commands/utils.rs
//!
//! ## Overview
//!
//! Pieces shared by the `command` and `query` makers:
//!
//! - `OutputArgs`: the `--force` / `--dry-run` flags, flattened into each maker.
//! - `MakerContext`: the resolved project root and configuration, and the
//!   factory for the `TeraGenerator` a maker writes through.
//! - Validation of the module path and use case name given on the command line.
//! - `print_completion_message`: the summary printed once the files are written.
//!
use crate::common::namespace::NamespacePath;
use crate::common::naming;
use crate::core::config::{self, Config};
use crate::core::error::{MakerError, Result};
use crate::core::templating::TeraGenerator;
use anyhow::{anyhow, Context};
use clap::Args;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Flags controlling how generated files reach the disk.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArgs {
    /// Overwrite files that already exist.
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Render everything and list the files without writing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Where and how the makers generate.
#[derive(Debug)]
pub struct MakerContext {
    /// Directory the configured `source_dir` / `tests_dir` are relative to.
    pub project_root: PathBuf,
    pub config: Config,
    /// Template overrides; the flag wins over `[templates] directory`.
    pub template_dir: Option<PathBuf>,
}

impl MakerContext {
    /// Resolves the project from `project_dir` (relative to the current directory).
    ///
    /// The project root is the directory holding `.hexmaker.toml` when one is
    /// found in `project_dir` or its ancestors, otherwise `project_dir` itself.
    pub fn load(project_dir: &Path, templates_dir: Option<&Path>) -> Result<Self> {
        let project_dir = absolute(project_dir)?;
        let config = config::load_config(&project_dir).context("Failed to load configuration")?;
        let project_root = config
            .project_root
            .clone()
            .unwrap_or_else(|| project_dir.clone());

        let template_dir = templates_dir
            .map(Path::to_path_buf)
            .or_else(|| config.templates.directory.as_ref().map(PathBuf::from))
            .map(|dir| {
                if dir.is_absolute() {
                    dir
                } else {
                    project_root.join(dir)
                }
            });

        info!("Project root: {}", project_root.display());
        debug!("Template overrides: {:?}", template_dir);
        Ok(Self {
            project_root,
            config,
            template_dir,
        })
    }

    /// A fresh generator rooted at the project, honoring `output`.
    pub fn generator(&self, output: &OutputArgs) -> Result<TeraGenerator> {
        Ok(
            TeraGenerator::new(&self.project_root, self.template_dir.as_deref())?
                .with_force(output.force)
                .with_dry_run(output.dry_run),
        )
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()
            .context("Failed to get current directory")?
            .join(path))
    }
}

/// Checks that `path` names a module whose segments are valid PHP namespace parts.
pub fn validate_module_path(path: &str) -> Result<()> {
    for segment in path
        .split(['/', '\\', '.'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
    {
        let normalized = NamespacePath::normalize(segment);
        if !naming::is_php_identifier(&normalized) {
            return Err(anyhow!(MakerError::ArgumentParsing(format!(
                "Invalid module path '{}': '{}' is not a valid namespace segment.",
                path, segment
            ))));
        }
    }
    Ok(())
}

/// Checks that `name` turns into a valid PHP class name.
pub fn validate_class_name(name: &str) -> Result<()> {
    let normalized = NamespacePath::normalize(name);
    if !naming::is_php_identifier(&normalized) {
        return Err(anyhow!(MakerError::ArgumentParsing(format!(
            "Invalid name '{}'. Expected something like 'CreateUser' or 'create-user'.",
            name
        ))));
    }
    Ok(())
}

/// Lists the generated files relative to the current directory.
pub fn print_completion_message(kind: &str, name: &str, generator: &TeraGenerator) {
    if generator.is_dry_run() {
        println!("\nDry run: {} '{}' would create:", kind, name);
    } else {
        println!("\n✅ {} '{}' generated successfully!", kind, name);
    }

    let cwd = env::current_dir().ok();
    for file in generator.written_files() {
        let display_path = cwd
            .as_ref()
            .and_then(|cwd| pathdiff::diff_paths(file, cwd))
            .unwrap_or_else(|| file.clone());
        println!("   {}", display_path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_class_name() {
        assert!(validate_class_name("CreateUser").is_ok());
        assert!(validate_class_name("create-user").is_ok());
        assert!(validate_class_name("create_user_command").is_ok());

        for bad in ["", "  ", "1Create", "Create$User", "Create/User"] {
            let err = validate_class_name(bad).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<MakerError>(),
                    Some(MakerError::ArgumentParsing(_))
                ),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validate_module_path() {
        assert!(validate_module_path("user").is_ok());
        assert!(validate_module_path("Catalog/Product").is_ok());
        assert!(validate_module_path("App\\Billing").is_ok());
        assert!(validate_module_path("").is_ok());
        assert!(validate_module_path("user/2fa").is_err());
        assert!(validate_module_path("user/acc$ount").is_err());
    }

    #[test]
    fn test_context_uses_project_dir_without_config() -> Result<()> {
        let project = tempdir()?;
        fs::create_dir(project.path().join(".git"))?;

        let context = MakerContext::load(project.path(), None)?;
        assert_eq!(context.project_root, project.path());
        assert_eq!(context.config.project.root_namespace, "App");
        assert_eq!(context.template_dir, None);
        Ok(())
    }

    #[test]
    fn test_context_root_is_config_directory() -> Result<()> {
        let project = tempdir()?;
        fs::create_dir(project.path().join(".git"))?;
        fs::write(
            project.path().join(".hexmaker.toml"),
            "[project]\nroot_namespace = \"Acme\"\n\n[templates]\ndirectory = \"php-templates\"\n",
        )?;
        let nested = project.path().join("src").join("User");
        fs::create_dir_all(&nested)?;

        let context = MakerContext::load(&nested, None)?;
        assert_eq!(context.project_root, project.path());
        assert_eq!(context.config.project.root_namespace, "Acme");
        assert_eq!(
            context.template_dir,
            Some(project.path().join("php-templates"))
        );
        Ok(())
    }

    #[test]
    fn test_template_flag_overrides_config() -> Result<()> {
        let project = tempdir()?;
        fs::create_dir(project.path().join(".git"))?;
        fs::write(
            project.path().join(".hexmaker.toml"),
            "[templates]\ndirectory = \"php-templates\"\n",
        )?;
        let flag_dir = project.path().join("custom");

        let context = MakerContext::load(project.path(), Some(flag_dir.as_path()))?;
        assert_eq!(context.template_dir, Some(flag_dir));
        Ok(())
    }

    #[test]
    fn test_generator_honors_output_flags() -> Result<()> {
        let project = tempdir()?;
        fs::create_dir(project.path().join(".git"))?;
        let context = MakerContext::load(project.path(), None)?;

        let generator = context.generator(&OutputArgs {
            force: false,
            dry_run: true,
        })?;
        assert!(generator.is_dry_run());
        Ok(())
    }
}
