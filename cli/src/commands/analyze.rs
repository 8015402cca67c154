//! # HexMaker Analyze Command
//!
//! File: cli/src/commands/analyze.rs
//!
//! Implements `hexmaker analyze <NAME>`: runs the command pattern analyzer on
//! a command name and prints what `hexmaker command` would base its handler
//! on, without touching the project. `--json` prints the analysis as a JSON
//! document instead.
//!
use crate::common::namespace::NamespacePath;
use crate::core::error::Result;
use crate::maker::analyzer::{CommandAnalysis, CommandPatternAnalyzer};
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Arguments for `hexmaker analyze`.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Command name to analyze, e.g. `CreateUserCommand`.
    pub name: String,

    /// Print the analysis as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    info!("Analyzing command name '{}'", args.name);
    let analysis = CommandPatternAnalyzer::analyze(&NamespacePath::normalize(&args.name));

    if args.json {
        let document =
            serde_json::to_string_pretty(&analysis).context("Failed to serialize the analysis")?;
        println!("{}", document);
    } else {
        print!("{}", format_analysis(&analysis));
    }
    Ok(())
}

fn format_analysis(analysis: &CommandAnalysis) -> String {
    let entities = if analysis.entities.is_empty() {
        "(none)".to_string()
    } else {
        analysis.entities.join(", ")
    };
    let loads_entity = if analysis.pattern.is_lookup_based() {
        "yes"
    } else {
        "no"
    };

    let mut lines = vec![
        format!("Command:      {}", analysis.command_name),
        format!("Pattern:      {}", analysis.pattern),
        format!("Entities:     {}", entities),
        format!("Loads entity: {}", loads_entity),
    ];
    if analysis.repositories.is_empty() {
        lines.push("Repositories: (none)".to_string());
    } else {
        lines.push("Repositories:".to_string());
        lines.extend(
            analysis
                .repositories
                .iter()
                .map(|repository| format!("  - {} ${}", repository.interface, repository.var_name)),
        );
    }
    lines.push(String::new());
    lines.push("Handler code:".to_string());
    lines.push(analysis.handler_code.clone());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_create() {
        let text = format_analysis(&CommandPatternAnalyzer::analyze("CreateUserCommand"));
        assert!(text.contains("Command:      CreateUserCommand\n"));
        assert!(text.contains("Pattern:      CREATE\n"));
        assert!(text.contains("Entities:     User\n"));
        assert!(text.contains("Loads entity: no\n"));
        assert!(text.contains("  - UserRepositoryInterface $userRepository\n"));
        assert!(text.contains("$this->userRepository->save($user);"));
    }

    #[test]
    fn test_format_custom() {
        let text = format_analysis(&CommandPatternAnalyzer::analyze("DoSomethingWeirdCommand"));
        assert!(text.contains("Pattern:      CUSTOM\n"));
        assert!(text.contains("Entities:     (none)\n"));
        assert!(text.contains("Repositories: (none)\n"));
        assert!(text.contains("Loads entity: no\n"));
        assert!(text.contains("// TODO"));
    }

    #[test]
    fn test_format_lookup_pattern() {
        let text = format_analysis(&CommandPatternAnalyzer::analyze("DeleteOrderCommand"));
        assert!(text.contains("Pattern:      DELETE\n"));
        assert!(text.contains("Loads entity: yes\n"));
        assert!(text.contains("  - OrderRepositoryInterface $orderRepository\n"));
        assert!(text.contains("\nHandler code:\n"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_parses_json_flag() {
        let args = AnalyzeArgs::try_parse_from(["analyze", "CreateUser", "--json"]).unwrap();
        assert_eq!(args.name, "CreateUser");
        assert!(args.json);
        assert!(AnalyzeArgs::try_parse_from(["analyze"]).is_err());
    }
}
