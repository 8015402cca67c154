//! # HexMaker Command Maker
//!
//! File: cli/src/commands/command.rs
//!
//! ## Overview
//!
//! Implements `hexmaker command <PATH> <NAME>`: generates a command DTO and its
//! handler (optionally a factory and a PHPUnit skeleton) in the module `PATH`.
//!
//! Unless `--no-analyze` is given, the command name is run through the
//! `CommandPatternAnalyzer` first. The detected pattern, the inferred entities
//! and the generated handler body become the `CommandMetadata` the generator
//! uses to inject repositories and fill in `__invoke`. `--entity` replaces the
//! inferred primary entity, which is handy when the name alone is misleading.
//!
//! ```bash
//! hexmaker command user CreateUser -p email -p age:?int
//! hexmaker command catalog AddProduct --entity Product --factory --with-tests
//! hexmaker command user DoSomething --no-analyze --dry-run
//! ```
//!
use super::utils::{self, MakerContext, OutputArgs};
use crate::common::namespace::NamespacePath;
use crate::core::error::Result;
use crate::maker::analyzer::{CommandPatternAnalyzer, DEFAULT_COMMAND_VAR};
use crate::maker::cq_generator::{CommandMetadata, CQGenerator};
use crate::maker::property::PropertyConfig;
use clap::Parser;
use tracing::{debug, info};

/// Arguments for `hexmaker command`.
#[derive(Parser, Debug)]
pub struct CommandArgs {
    /// Module the use case belongs to, e.g. `user` or `Catalog/Product`.
    pub path: String,

    /// Use case name, e.g. `CreateUser`. A trailing `Command` is dropped.
    pub name: String,

    /// Delegate entity construction to a generated factory.
    #[arg(long)]
    pub factory: bool,

    /// Also generate a PHPUnit test skeleton for the handler.
    #[arg(long)]
    pub with_tests: bool,

    /// Command property as `name[:type]`, `?type` for nullable. Repeatable.
    #[arg(long = "property", short = 'p', action = clap::ArgAction::Append)]
    pub properties: Vec<PropertyConfig>,

    /// Entity the handler works on, instead of the one inferred from the name.
    #[arg(long)]
    pub entity: Option<String>,

    /// Skip the name analysis and generate a plain handler.
    #[arg(long)]
    pub no_analyze: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn handle_command(args: CommandArgs, context: &MakerContext) -> Result<()> {
    info!("Handling command maker for '{}' in '{}'", args.name, args.path);
    utils::validate_module_path(&args.path)?;
    utils::validate_class_name(&args.name)?;

    let metadata = build_metadata(&args);
    debug!("Command metadata: {:?}", metadata);

    let generator = context.generator(&args.output)?;
    let mut maker = CQGenerator::new(generator, context.config.project.clone());
    maker.generate_command(
        &args.path,
        &args.name,
        args.factory,
        args.with_tests,
        &args.properties,
        metadata.as_ref(),
    )?;

    utils::print_completion_message("Command", &args.name, maker.generator());
    Ok(())
}

/// Metadata for the generator, from the analyzer and the `--entity` override.
fn build_metadata(args: &CommandArgs) -> Option<CommandMetadata> {
    let entity = args
        .entity
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(NamespacePath::normalize);

    if args.no_analyze {
        return entity.map(|entity| CommandMetadata {
            entity_name: Some(entity),
            ..Default::default()
        });
    }

    let analysis = CommandPatternAnalyzer::analyze(&NamespacePath::normalize(&args.name));
    let mut entities = analysis.entities;
    let handler_code = match entity {
        Some(entity) => {
            match entities.first_mut() {
                Some(primary) => *primary = entity,
                None => entities.push(entity),
            }
            CommandPatternAnalyzer::generate_handler_code(
                analysis.pattern,
                &entities,
                DEFAULT_COMMAND_VAR,
            )
        }
        None => analysis.handler_code,
    };
    info!(
        "Detected {} pattern for '{}' (entities: {:?})",
        analysis.pattern, args.name, entities
    );

    let mut entities = entities.into_iter();
    Some(CommandMetadata {
        pattern: Some(analysis.pattern),
        entity_name: entities.next(),
        related_entities: entities.collect(),
        handler_code: Some(handler_code),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maker::pattern::CommandPattern;

    fn parse(args: &[&str]) -> CommandArgs {
        let argv = std::iter::once("command").chain(args.iter().copied());
        CommandArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parses_flags_and_properties() {
        let args = parse(&[
            "user",
            "CreateUser",
            "--factory",
            "--with-tests",
            "-p",
            "email",
            "--property",
            "age:?int",
            "--entity",
            "Account",
            "--force",
            "--dry-run",
        ]);
        assert_eq!(args.path, "user");
        assert_eq!(args.name, "CreateUser");
        assert!(args.factory);
        assert!(args.with_tests);
        assert_eq!(
            args.properties,
            vec![
                PropertyConfig::new("email", "string"),
                PropertyConfig::new("age", "int").nullable(),
            ]
        );
        assert_eq!(args.entity.as_deref(), Some("Account"));
        assert!(!args.no_analyze);
        assert!(args.output.force);
        assert!(args.output.dry_run);
    }

    #[test]
    fn test_rejects_invalid_property() {
        let result = CommandArgs::try_parse_from(["command", "user", "CreateUser", "-p", "1st"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_requires_path_and_name() {
        assert!(CommandArgs::try_parse_from(["command", "user"]).is_err());
    }

    #[test]
    fn test_metadata_from_analysis() {
        let metadata = build_metadata(&parse(&["user", "CreateUserCommand"])).unwrap();
        assert_eq!(metadata.pattern, Some(CommandPattern::Create));
        assert_eq!(metadata.entity_name.as_deref(), Some("User"));
        assert!(metadata.related_entities.is_empty());
        assert!(metadata
            .handler_code
            .unwrap()
            .contains("$this->userRepository->save($user);"));
    }

    #[test]
    fn test_metadata_for_relation_keeps_association() {
        let metadata = build_metadata(&parse(&["gift", "AttribuerCadeaux"])).unwrap();
        assert_eq!(metadata.pattern, Some(CommandPattern::CreateRelation));
        assert_eq!(metadata.entity_name.as_deref(), Some("Cadeaux"));
        assert_eq!(metadata.related_entities, vec!["Attribution".to_string()]);
    }

    #[test]
    fn test_entity_override_regenerates_handler_code() {
        let metadata =
            build_metadata(&parse(&["user", "UpdateProfile", "--entity", "account"])).unwrap();
        assert_eq!(metadata.pattern, Some(CommandPattern::Update));
        assert_eq!(metadata.entity_name.as_deref(), Some("Account"));
        let code = metadata.handler_code.unwrap();
        assert!(code.contains("$account = $this->accountRepository->findById($command->id);"));
        assert!(!code.contains("profile"));
    }

    #[test]
    fn test_entity_override_on_custom_pattern() {
        let metadata =
            build_metadata(&parse(&["user", "DoSomethingWeird", "--entity", "User"])).unwrap();
        assert_eq!(metadata.pattern, Some(CommandPattern::Custom));
        assert_eq!(metadata.entity_name.as_deref(), Some("User"));
        assert!(metadata.handler_code.unwrap().starts_with("// TODO"));
    }

    #[test]
    fn test_no_analyze() {
        assert_eq!(
            build_metadata(&parse(&["user", "CreateUser", "--no-analyze"])),
            None
        );

        let metadata = build_metadata(&parse(&[
            "user",
            "CreateUser",
            "--no-analyze",
            "--entity",
            "Member",
        ]))
        .unwrap();
        assert_eq!(metadata.pattern, None);
        assert_eq!(metadata.entity_name.as_deref(), Some("Member"));
        assert_eq!(metadata.handler_code, None);
    }
}
