//! # HexMaker Command Pattern Analyzer
//!
//! File: cli/src/maker/analyzer.rs
//!
//! ## Overview
//!
//! Turns a human-chosen command name such as `CreateUserCommand` or
//! `AttribuerCadeauxCommand` into:
//! - a `CommandPattern` classification
//! - the entity names the command most likely touches
//! - a PHP handler body implementing the default behavior for that pattern
//! - the repository dependencies that body relies on
//!
//! This is a heuristic, not a parser. Every function here is total: an
//! unrecognized name degrades to `CommandPattern::Custom`, no entities and a
//! single TODO comment. The output is scaffolding for a human to finish.
//!
//! ## Architecture
//!
//! Classification walks `VERB_GROUPS` in order and the first group whose verb
//! prefixes the name wins. The same table drives prefix stripping during
//! entity inference, so adding a verb only touches the table. English and
//! French verbs are both recognized.
//!
//! Code emission is plain string formatting. Variable names come from
//! `common::naming` so the handler body matches the constructor dependencies
//! the generator injects (`$this->userRepository` for `User`).
//!
//! ## Examples
//!
//! ```rust
//! let analysis = CommandPatternAnalyzer::analyze("ArchiveArticleCommand");
//! assert_eq!(analysis.pattern, CommandPattern::ChangeStatus);
//! assert_eq!(analysis.entities, vec!["Article".to_string()]);
//! ```
//!
use crate::common::naming;
use crate::maker::pattern::CommandPattern;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Command object reference used in generated code unless the caller picks another.
pub const DEFAULT_COMMAND_VAR: &str = "$command";

/// Association entity assumed for relation commands.
///
/// Nothing in a name like `AttribuerCadeaux` says what the association is
/// called. Callers that know better pass their own entity list to
/// `generate_handler_code`.
pub const DEFAULT_ASSOCIATION_ENTITY: &str = "Attribution";

/// Entity name used in generated code when none could be inferred.
const FALLBACK_ENTITY: &str = "Entity";

/// Id property read off the command for lookup-based patterns.
const ID_PROPERTY: &str = "id";

/// Second identifier read off the command when creating an association.
const RELATION_TARGET_ID_PROPERTY: &str = "targetId";

/// Verb prefixes per pattern, in priority order. Within a group longer verbs
/// come first so `Archiver` is stripped whole.
const VERB_GROUPS: &[(&[&str], CommandPattern)] = &[
    (&["Create"], CommandPattern::Create),
    (&["Update", "Modify", "Change", "Edit"], CommandPattern::Update),
    (&["Delete", "Remove"], CommandPattern::Delete),
    (
        &["Attribuer", "Associate", "Assign", "Attach", "Link"],
        CommandPattern::CreateRelation,
    ),
    (
        &["Activate", "Activer", "Enable"],
        CommandPattern::Activate,
    ),
    (
        &["Deactivate", "Desactiver", "Disable"],
        CommandPattern::Deactivate,
    ),
    (
        &["Publish", "Publier", "Archiver", "Archive"],
        CommandPattern::ChangeStatus,
    ),
];

static PATTERN_MATCHERS: Lazy<Vec<(Regex, CommandPattern)>> = Lazy::new(|| {
    VERB_GROUPS
        .iter()
        .map(|(verbs, pattern)| (prefix_regex(verbs), *pattern))
        .collect()
});

/// One matcher per verb, in table order.
static VERB_MATCHERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    VERB_GROUPS
        .iter()
        .flat_map(|(verbs, _)| verbs.iter().copied())
        .map(|verb| prefix_regex(&[verb]))
        .collect()
});

static COMMAND_WORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)command"));

static COMMAND_SUFFIX: Lazy<Regex> = Lazy::new(|| compile(r"(?i)command$"));

fn prefix_regex(verbs: &[&str]) -> Regex {
    compile(&format!("(?i)^(?:{})", verbs.join("|")))
}

/// Drops the leading verb from `stem`.
///
/// A verb ending on a word boundary (uppercase letter, digit or end of input)
/// wins over a longer one that cuts a word in half: `ArchiveRecord` loses
/// `Archive`, not `Archiver`. Without such a match the first verb in table
/// order is taken.
fn strip_verb_prefix(stem: &str) -> &str {
    let mut fallback = None;
    for regex in VERB_MATCHERS.iter() {
        if let Some(found) = regex.find(stem) {
            let rest = &stem[found.end()..];
            if !rest.starts_with(|c: char| c.is_lowercase()) {
                return rest;
            }
            fallback.get_or_insert(rest);
        }
    }
    fallback.unwrap_or(stem)
}

// Only ever called with the literals in this file.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("verb table regex must compile")
}

/// A repository the generated handler needs injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDependency {
    /// Short name of the repository port, e.g. `UserRepositoryInterface`.
    pub interface: String,
    /// Constructor parameter / property name, e.g. `userRepository`.
    pub var_name: String,
}

/// Everything the analyzer can tell about one command name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandAnalysis {
    pub command_name: String,
    pub pattern: CommandPattern,
    pub entities: Vec<String>,
    pub handler_code: String,
    pub repositories: Vec<RepositoryDependency>,
}

/// Name-based heuristics for command handlers.
pub struct CommandPatternAnalyzer;

impl CommandPatternAnalyzer {
    /// Runs the whole analysis with the default `$command` variable.
    pub fn analyze(command_name: &str) -> CommandAnalysis {
        let pattern = Self::detect_pattern(command_name);
        let entities = Self::infer_entities(command_name, pattern);
        let handler_code = Self::generate_handler_code(pattern, &entities, DEFAULT_COMMAND_VAR);
        let repositories = Self::generate_repository_dependencies(&entities);
        debug!(
            "Analyzed '{}': pattern={}, entities={:?}",
            command_name, pattern, entities
        );
        CommandAnalysis {
            command_name: command_name.to_string(),
            pattern,
            entities,
            handler_code,
            repositories,
        }
    }

    /// Classifies a command name. Case-insensitive; `Custom` when no verb matches.
    pub fn detect_pattern(command_name: &str) -> CommandPattern {
        let stem = COMMAND_WORD.replace_all(command_name, "");
        PATTERN_MATCHERS
            .iter()
            .find(|(regex, _)| regex.is_match(&stem))
            .map(|(_, pattern)| *pattern)
            .unwrap_or(CommandPattern::Custom)
    }

    /// Best-effort entity names for `command_name` under `pattern`.
    ///
    /// One name for single-entity patterns, the target plus
    /// `DEFAULT_ASSOCIATION_ENTITY` for relations, none for `Custom`.
    pub fn infer_entities(command_name: &str, pattern: CommandPattern) -> Vec<String> {
        let without_suffix = COMMAND_SUFFIX.replace(command_name, "");
        let entity_part = strip_verb_prefix(&without_suffix);
        let words = naming::split_words(entity_part);

        match pattern {
            CommandPattern::Create
            | CommandPattern::Update
            | CommandPattern::Delete
            | CommandPattern::Activate
            | CommandPattern::Deactivate
            | CommandPattern::ChangeStatus => vec![words.concat()],
            CommandPattern::CreateRelation => Self::infer_relation_entities(&words),
            CommandPattern::Custom => Vec::new(),
        }
    }

    fn infer_relation_entities(words: &[String]) -> Vec<String> {
        vec![words.concat(), DEFAULT_ASSOCIATION_ENTITY.to_string()]
    }

    /// PHP handler body for `pattern`, referring to the command as `command_var`.
    pub fn generate_handler_code(
        pattern: CommandPattern,
        entities: &[String],
        command_var: &str,
    ) -> String {
        let command = if command_var.starts_with('$') {
            command_var.to_string()
        } else {
            naming::php_variable(command_var)
        };
        let entity = EntityNames::new(
            entities
                .first()
                .map(String::as_str)
                .unwrap_or(FALLBACK_ENTITY),
        );

        match pattern {
            CommandPattern::Create => generate_create(&entity, &command),
            CommandPattern::Update => generate_update(&entity, &command),
            CommandPattern::Delete => generate_delete(&entity, &command),
            CommandPattern::CreateRelation => generate_create_relation(entities, &command),
            CommandPattern::Activate => generate_toggle(&entity, &command, "activate"),
            CommandPattern::Deactivate => generate_toggle(&entity, &command, "deactivate"),
            CommandPattern::ChangeStatus => generate_change_status(&entity, &command),
            CommandPattern::Custom => "// TODO: implement the command handling logic".to_string(),
        }
    }

    /// One repository dependency per entity, in the same order.
    pub fn generate_repository_dependencies(entities: &[String]) -> Vec<RepositoryDependency> {
        entities
            .iter()
            .map(|entity| RepositoryDependency {
                interface: naming::repository_interface_name_for(entity),
                var_name: naming::repository_variable_name_for(entity),
            })
            .collect()
    }
}

/// Names derived from one entity, shared by every emission strategy.
struct EntityNames {
    class: String,
    var: String,
    repository: String,
}

impl EntityNames {
    fn new(entity: &str) -> Self {
        Self {
            class: naming::entity_class_name_for(entity),
            var: naming::php_variable(&naming::entity_variable_name_for(entity)),
            repository: format!("$this->{}", naming::repository_variable_name_for(entity)),
        }
    }

    fn lookup(&self, id_expr: &str) -> String {
        format!(
            "{var} = {repo}->findById({id});\n\
             if (null === {var}) {{\n    \
             throw new \\RuntimeException(sprintf('{class} with id \"%s\" not found.', {id}));\n\
             }}",
            var = self.var,
            repo = self.repository,
            class = self.class,
            id = id_expr,
        )
    }

    fn save(&self) -> String {
        format!("{}->save({});", self.repository, self.var)
    }
}

fn id_of(command: &str) -> String {
    format!("{}->{}", command, ID_PROPERTY)
}

fn generate_create(entity: &EntityNames, command: &str) -> String {
    format!(
        "{var} = {class}::create(\n    \
         // TODO: pass the values carried by {command}\n\
         );\n\
         \n\
         {save}",
        var = entity.var,
        class = entity.class,
        command = command,
        save = entity.save(),
    )
}

fn generate_update(entity: &EntityNames, command: &str) -> String {
    format!(
        "{lookup}\n\
         \n\
         // TODO: apply the changes carried by {command}\n\
         {var}->update();\n\
         \n\
         {save}",
        lookup = entity.lookup(&id_of(command)),
        command = command,
        var = entity.var,
        save = entity.save(),
    )
}

fn generate_delete(entity: &EntityNames, command: &str) -> String {
    format!(
        "{lookup}\n\
         \n\
         {repo}->delete({var});",
        lookup = entity.lookup(&id_of(command)),
        repo = entity.repository,
        var = entity.var,
    )
}

fn generate_create_relation(entities: &[String], command: &str) -> String {
    let (target, association) = match entities {
        [target, association, ..] => (EntityNames::new(target), EntityNames::new(association)),
        _ => {
            return "// TODO: implement the relation, the related entities could not be inferred"
                .to_string()
        }
    };
    let target_id = format!(
        "{}->{}Id",
        command,
        naming::entity_variable_name_for(&entities[0])
    );

    format!(
        "{lookup}\n\
         \n\
         // TODO: check the identifiers passed to {class}::create(), they are guessed from the command name\n\
         {var} = {class}::create(\n    \
         {target_id},\n    \
         {command}->{second_id},\n\
         );\n\
         \n\
         {save}",
        lookup = target.lookup(&target_id),
        class = association.class,
        var = association.var,
        target_id = target_id,
        command = command,
        second_id = RELATION_TARGET_ID_PROPERTY,
        save = association.save(),
    )
}

fn generate_toggle(entity: &EntityNames, command: &str, method: &str) -> String {
    format!(
        "{lookup}\n\
         \n\
         {var}->{method}();\n\
         \n\
         {save}",
        lookup = entity.lookup(&id_of(command)),
        var = entity.var,
        method = method,
        save = entity.save(),
    )
}

fn generate_change_status(entity: &EntityNames, command: &str) -> String {
    format!(
        "{lookup}\n\
         \n\
         // TODO: apply the status change, e.g. {var}->publish()\n\
         \n\
         {save}",
        lookup = entity.lookup(&id_of(command)),
        var = entity.var,
        save = entity.save(),
    )
}
