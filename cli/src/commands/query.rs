//! # HexMaker Query Maker
//!
//! File: cli/src/commands/query.rs
//!
//! Implements `hexmaker query <PATH> <NAME>`: generates the query DTO, its
//! handler and the response class. With `--entity` the handler gets the
//! entity's repository and, when no `-p` properties are given, the response
//! wraps the entity (or a list of them with `--collection`).
//!
use super::utils::{self, MakerContext, OutputArgs};
use crate::common::namespace::NamespacePath;
use crate::core::error::Result;
use crate::maker::cq_generator::{CQGenerator, QueryMetadata};
use crate::maker::property::PropertyConfig;
use clap::Parser;
use tracing::{debug, info};

/// Arguments for `hexmaker query`.
#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Module the use case belongs to, e.g. `catalog`.
    pub path: String,

    /// Use case name, e.g. `GetProduct`. A trailing `Query` is dropped.
    pub name: String,

    /// Query property as `name[:type]`, `?type` for nullable. Repeatable.
    #[arg(long = "property", short = 'p', action = clap::ArgAction::Append)]
    pub properties: Vec<PropertyConfig>,

    /// Entity the query reads.
    #[arg(long)]
    pub entity: Option<String>,

    /// The response holds a list of entities.
    #[arg(long)]
    pub collection: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn handle_query(args: QueryArgs, context: &MakerContext) -> Result<()> {
    info!("Handling query maker for '{}' in '{}'", args.name, args.path);
    utils::validate_module_path(&args.path)?;
    utils::validate_class_name(&args.name)?;

    let metadata = build_metadata(&args);
    debug!("Query metadata: {:?}", metadata);

    let generator = context.generator(&args.output)?;
    let mut maker = CQGenerator::new(generator, context.config.project.clone());
    maker.generate_query(&args.path, &args.name, &args.properties, metadata.as_ref())?;

    utils::print_completion_message("Query", &args.name, maker.generator());
    Ok(())
}

fn build_metadata(args: &QueryArgs) -> Option<QueryMetadata> {
    let entity_name = args
        .entity
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(NamespacePath::normalize);
    if entity_name.is_none() && !args.collection {
        return None;
    }
    Some(QueryMetadata {
        entity_name,
        is_collection: args.collection,
    })
}
