//! # HexMaker Command/Query Generator
//!
//! File: cli/src/maker/cq_generator.rs
//!
//! ## Overview
//!
//! `CQGenerator` turns a module path, a name and optional metadata into the
//! set of PHP files making up one CQRS use case:
//!
//! | Call | Files under `{source}/{Module}/Application/{Name}/` |
//! |---|---|
//! | `generate_command` | `{Name}Command.php`, `{Name}CommandHandler.php`, optionally `{Name}Factory.php` |
//! | `generate_query` | `{Name}Query.php`, `{Name}QueryHandler.php`, `{Name}Response.php` |
//!
//! `generate_command` can also queue a PHPUnit skeleton under
//! `{tests}/Unit/{Module}/Application/{Name}/`.
//!
//! ## Architecture
//!
//! The generator only assembles variable maps. Rendering and writing belong
//! to the injected `Generator`; every file of one call is queued first and
//! flushed with a single `write_changes`. Errors from the generator are
//! returned untouched.
//!
//! Metadata, usually produced by the command pattern analyzer, enriches the
//! handler: the entity name yields the repository ports to inject (from the
//! module's `Domain\Port` namespace) and the entity classes to import (from
//! `Domain\Model`), and pre-generated handler code becomes the `__invoke` body.
//!
use crate::common::namespace::NamespacePath;
use crate::common::naming;
use crate::core::config::ProjectConfig;
use crate::core::error::Result;
use crate::core::templating::{Generator, TemplateVariables};
use crate::maker::analyzer::{CommandPatternAnalyzer, DEFAULT_COMMAND_VAR};
use crate::maker::pattern::CommandPattern;
use crate::maker::property::PropertyConfig;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};

const COMMAND_TEMPLATE: &str = "command/Command.php.tera";
const COMMAND_HANDLER_TEMPLATE: &str = "command/CommandHandler.php.tera";
const COMMAND_HANDLER_WITH_FACTORY_TEMPLATE: &str = "command/CommandHandlerWithFactory.php.tera";
const FACTORY_TEMPLATE: &str = "command/Factory.php.tera";
const COMMAND_HANDLER_TEST_TEMPLATE: &str = "command/CommandHandlerTest.php.tera";
const QUERY_TEMPLATE: &str = "query/Query.php.tera";
const QUERY_HANDLER_TEMPLATE: &str = "query/QueryHandler.php.tera";
const RESPONSE_TEMPLATE: &str = "query/Response.php.tera";

const APPLICATION_LAYER: &str = "Application";
const PORT_NAMESPACE: &str = "Domain\\Port";
const MODEL_NAMESPACE: &str = "Domain\\Model";
const MESSAGE_HANDLER_ATTRIBUTE: &str = "Symfony\\Component\\Messenger\\Attribute\\AsMessageHandler";
const TEST_CASE_CLASS: &str = "PHPUnit\\Framework\\TestCase";

/// Indentation of statements inside a generated method body.
const METHOD_BODY_INDENT: &str = "        ";

/// Optional analysis results driving handler generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandMetadata {
    /// Forwarded to the handler template as-is.
    pub pattern: Option<CommandPattern>,
    /// Primary entity; enables repository injection.
    pub entity_name: Option<String>,
    /// Further entities the handler persists (e.g. the association of a relation).
    pub related_entities: Vec<String>,
    /// Body of `__invoke`, usually from `CommandPatternAnalyzer::generate_handler_code`.
    pub handler_code: Option<String>,
}

impl CommandMetadata {
    /// Primary entity followed by related ones, without blanks or duplicates.
    pub fn entity_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.entity_name
            .iter()
            .chain(self.related_entities.iter())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect()
    }
}

/// Optional metadata for query generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMetadata {
    /// Entity the query reads; enables repository injection and an entity-based response.
    pub entity_name: Option<String>,
    /// Whether the response wraps a list of entities instead of one.
    pub is_collection: bool,
}

/// Assembles template variables for command and query use cases.
pub struct CQGenerator<G: Generator> {
    generator: G,
    layout: ProjectConfig,
}

impl<G: Generator> CQGenerator<G> {
    pub fn new(generator: G, layout: ProjectConfig) -> Self {
        Self { generator, layout }
    }

    /// The wrapped generator, e.g. to list the files it wrote.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    #[cfg(test)]
    pub fn into_generator(self) -> G {
        self.generator
    }

    /// Queues the command DTO, its handler (and factory / test) and flushes once.
    pub fn generate_command(
        &mut self,
        namespace_path: &str,
        name: &str,
        with_factory: bool,
        with_tests: bool,
        properties: &[PropertyConfig],
        metadata: Option<&CommandMetadata>,
    ) -> Result<()> {
        let path = NamespacePath::new(namespace_path, &self.layout.root_namespace);
        let name = strip_class_suffix(&NamespacePath::normalize(name), "Command");
        let namespace = self.use_case_namespace(&path, &name);
        let directory = self.use_case_dir(&path, &name);
        let command_class = format!("{}Command", name);
        let handler_class = format!("{}CommandHandler", name);
        info!(
            "Generating command '{}' for module '{}' in namespace '{}'",
            command_class,
            path.to_short_class_name(),
            namespace
        );

        self.generator.generate_file(
            &directory.join(format!("{}.php", command_class)),
            COMMAND_TEMPLATE,
            dto_variables(&namespace, &command_class, properties),
        )?;

        let entities = metadata.map(CommandMetadata::entity_names).unwrap_or_default();
        let repositories = self.repository_descriptors(&path, &entities);
        let entity_descriptors: Vec<Value> = entities
            .iter()
            .map(|entity| self.entity_descriptor(&path, entity))
            .collect();
        let pattern = metadata
            .and_then(|m| m.pattern)
            .map_or(Value::Null, |p| json!(p));

        if with_factory {
            let factory_class = naming::factory_class_name_for(&name);
            let primary_entity = entity_descriptors.first().cloned().unwrap_or(Value::Null);

            let mut handler = TemplateVariables::new();
            handler.insert("namespace".into(), json!(namespace));
            handler.insert("class_name".into(), json!(handler_class));
            handler.insert("command_class".into(), json!(command_class));
            handler.insert("factory_class".into(), json!(factory_class));
            handler.insert("pattern".into(), pattern);
            handler.insert(
                "primary_repository".into(),
                repositories.first().cloned().unwrap_or(Value::Null),
            );
            handler.insert(
                "imports".into(),
                json!(imports(&[MESSAGE_HANDLER_ATTRIBUTE], &repositories, &[])),
            );
            handler.insert("repositories".into(), Value::Array(repositories.clone()));
            self.generator.generate_file(
                &directory.join(format!("{}.php", handler_class)),
                COMMAND_HANDLER_WITH_FACTORY_TEMPLATE,
                handler,
            )?;

            let mut factory = TemplateVariables::new();
            factory.insert("namespace".into(), json!(namespace));
            factory.insert("class_name".into(), json!(factory_class));
            factory.insert("command_class".into(), json!(command_class));
            factory.insert(
                "imports".into(),
                json!(imports(&[], &[], std::slice::from_ref(&primary_entity))),
            );
            factory.insert("entity".into(), primary_entity);
            factory.insert("properties".into(), property_values(properties));
            self.generator.generate_file(
                &directory.join(format!("{}.php", factory_class)),
                FACTORY_TEMPLATE,
                factory,
            )?;
        } else {
            let handler_code = metadata
                .and_then(|m| m.handler_code.clone())
                .unwrap_or_else(|| {
                    CommandPatternAnalyzer::generate_handler_code(
                        CommandPattern::Custom,
                        &[],
                        DEFAULT_COMMAND_VAR,
                    )
                });

            let mut handler = TemplateVariables::new();
            handler.insert("namespace".into(), json!(namespace));
            handler.insert("class_name".into(), json!(handler_class));
            handler.insert("command_class".into(), json!(command_class));
            handler.insert("pattern".into(), pattern);
            handler.insert(
                "entity_name".into(),
                entities.first().map_or(Value::Null, |e| json!(e)),
            );
            handler.insert(
                "imports".into(),
                json!(imports(
                    &[MESSAGE_HANDLER_ATTRIBUTE],
                    &repositories,
                    &entity_descriptors
                )),
            );
            handler.insert("repositories".into(), Value::Array(repositories));
            handler.insert("entities".into(), Value::Array(entity_descriptors));
            handler.insert("handler_code".into(), json!(handler_code));
            handler.insert(
                "handler_body".into(),
                json!(indent(&handler_code, METHOD_BODY_INDENT)),
            );
            self.generator.generate_file(
                &directory.join(format!("{}.php", handler_class)),
                COMMAND_HANDLER_TEMPLATE,
                handler,
            )?;
        }

        if with_tests {
            let test_class = format!("{}Test", handler_class);
            let test_path = NamespacePath::new(
                &format!("Tests/Unit/{}", path.normalized_value()),
                &self.layout.root_namespace,
            );
            let handler_fqcn = format!("{}\\{}", namespace, handler_class);
            let command_fqcn = format!("{}\\{}", namespace, command_class);

            let mut test = TemplateVariables::new();
            test.insert(
                "namespace".into(),
                json!(self.use_case_namespace(&test_path, &name)),
            );
            test.insert("class_name".into(), json!(test_class));
            test.insert("command_class".into(), json!(command_class));
            test.insert("handler_class".into(), json!(handler_class));
            test.insert(
                "imports".into(),
                json!(imports(
                    &[
                        handler_fqcn.as_str(),
                        command_fqcn.as_str(),
                        TEST_CASE_CLASS
                    ],
                    &[],
                    &[]
                )),
            );
            let test_dir = module_dir(PathBuf::from(&self.layout.tests_dir).join("Unit"), &path)
                .join(APPLICATION_LAYER)
                .join(&name);
            self.generator.generate_file(
                &test_dir.join(format!("{}.php", test_class)),
                COMMAND_HANDLER_TEST_TEMPLATE,
                test,
            )?;
        }

        self.generator.write_changes()
    }

    /// Queues the query DTO, its handler and the response, then flushes once.
    pub fn generate_query(
        &mut self,
        namespace_path: &str,
        name: &str,
        properties: &[PropertyConfig],
        metadata: Option<&QueryMetadata>,
    ) -> Result<()> {
        let path = NamespacePath::new(namespace_path, &self.layout.root_namespace);
        let name = strip_class_suffix(&NamespacePath::normalize(name), "Query");
        let namespace = self.use_case_namespace(&path, &name);
        let directory = self.use_case_dir(&path, &name);
        let query_class = format!("{}Query", name);
        let handler_class = format!("{}QueryHandler", name);
        let response_class = format!("{}Response", name);
        info!(
            "Generating query '{}' for module '{}' in namespace '{}'",
            query_class,
            path.to_short_class_name(),
            namespace
        );

        self.generator.generate_file(
            &directory.join(format!("{}.php", query_class)),
            QUERY_TEMPLATE,
            dto_variables(&namespace, &query_class, properties),
        )?;

        let entity_name = metadata
            .and_then(|m| m.entity_name.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty());
        let is_collection = metadata.is_some_and(|m| m.is_collection);
        let entity = entity_name.map_or(Value::Null, |e| self.entity_descriptor(&path, e));
        let repositories: Vec<Value> = entity_name
            .map(|e| self.repository_descriptors(&path, &[e.to_string()]))
            .unwrap_or_default();
        let response_mode = if entity_name.is_some() && properties.is_empty() {
            "entity"
        } else {
            "properties"
        };
        debug!("Response for '{}' is {}-based", query_class, response_mode);

        let mut handler = TemplateVariables::new();
        handler.insert("namespace".into(), json!(namespace));
        handler.insert("class_name".into(), json!(handler_class));
        handler.insert("query_class".into(), json!(query_class));
        handler.insert("response_class".into(), json!(response_class));
        handler.insert("response_mode".into(), json!(response_mode));
        handler.insert("is_collection".into(), json!(is_collection));
        handler.insert("entity".into(), entity.clone());
        handler.insert(
            "primary_repository".into(),
            repositories.first().cloned().unwrap_or(Value::Null),
        );
        handler.insert(
            "imports".into(),
            json!(imports(&[MESSAGE_HANDLER_ATTRIBUTE], &repositories, &[])),
        );
        handler.insert("repositories".into(), Value::Array(repositories));
        self.generator.generate_file(
            &directory.join(format!("{}.php", handler_class)),
            QUERY_HANDLER_TEMPLATE,
            handler,
        )?;

        let mut response = dto_variables(&namespace, &response_class, properties);
        response.insert("response_mode".into(), json!(response_mode));
        response.insert("is_collection".into(), json!(is_collection));
        let entity_imports = if response_mode == "entity" {
            imports(&[], &[], std::slice::from_ref(&entity))
        } else {
            Vec::new()
        };
        response.insert("imports".into(), json!(entity_imports));
        response.insert("entity".into(), entity);
        self.generator.generate_file(
            &directory.join(format!("{}.php", response_class)),
            RESPONSE_TEMPLATE,
            response,
        )?;

        self.generator.write_changes()
    }

    /// `{root}\{Module}\Application\{Name}`
    fn use_case_namespace(&self, path: &NamespacePath, name: &str) -> String {
        path.to_namespace(&format!("{}\\{}", APPLICATION_LAYER, name))
    }

    /// `{source}/{Module}/Application/{Name}`
    fn use_case_dir(&self, path: &NamespacePath, name: &str) -> PathBuf {
        module_dir(PathBuf::from(&self.layout.source_dir), path)
            .join(APPLICATION_LAYER)
            .join(name)
    }

    fn repository_descriptors(&self, path: &NamespacePath, entities: &[String]) -> Vec<Value> {
        let port_namespace = path.to_namespace(PORT_NAMESPACE);
        CommandPatternAnalyzer::generate_repository_dependencies(entities)
            .into_iter()
            .map(|dependency| {
                json!({
                    "fqcn": format!("{}\\{}", port_namespace, dependency.interface),
                    "interface": dependency.interface,
                    "namespace": port_namespace,
                    "var_name": dependency.var_name,
                })
            })
            .collect()
    }

    fn entity_descriptor(&self, path: &NamespacePath, entity: &str) -> Value {
        let model_namespace = path.to_namespace(MODEL_NAMESPACE);
        let class = naming::entity_class_name_for(entity);
        json!({
            "fqcn": format!("{}\\{}", model_namespace, class),
            "name": class,
            "namespace": model_namespace,
            "var": naming::entity_variable_name_for(entity),
        })
    }
}

/// `base` extended by the module's directory (`src` + `User/Account`).
fn module_dir(mut base: PathBuf, path: &NamespacePath) -> PathBuf {
    if !path.is_root() {
        base.push(path.normalized_value());
    }
    base
}

/// Variables shared by every property-bag class (command, query, response).
fn dto_variables(namespace: &str, class_name: &str, properties: &[PropertyConfig]) -> TemplateVariables {
    let mut variables = TemplateVariables::new();
    variables.insert("namespace".into(), json!(namespace));
    variables.insert("class_name".into(), json!(class_name));
    variables.insert("properties".into(), property_values(properties));
    variables
}

fn property_values(properties: &[PropertyConfig]) -> Value {
    Value::Array(properties.iter().map(PropertyConfig::to_array).collect())
}

/// Sorted, de-duplicated `use` statements for a generated class.
fn imports(classes: &[&str], repositories: &[Value], entities: &[Value]) -> Vec<String> {
    let descriptors = repositories.iter().chain(entities.iter());
    classes
        .iter()
        .map(|class| class.to_string())
        .chain(
            descriptors.filter_map(|descriptor| descriptor["fqcn"].as_str().map(str::to_string)),
        )
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Drops a trailing `suffix` (`CreateUserCommand` -> `CreateUser`) unless nothing would remain.
fn strip_class_suffix(name: &str, suffix: &str) -> String {
    match name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// Prefixes every non-blank line of `code` with `prefix`.
fn indent(code: &str, prefix: &str) -> String {
    code.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
