//! # Command Patterns
//!
//! File: cli/src/maker/pattern.rs
//!
//! The closed set of operation shapes the analyzer can recognize in a command
//! name. `Custom` is the fallback, so classification always lands on exactly
//! one variant.
//!
use serde::Serialize;
use std::fmt;

/// Operation shape inferred from a command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandPattern {
    Create,
    Update,
    Delete,
    CreateRelation,
    Activate,
    Deactivate,
    ChangeStatus,
    Custom,
}

impl CommandPattern {
    /// Every variant, in classification priority order.
    #[cfg(test)]
    pub const ALL: [CommandPattern; 8] = [
        CommandPattern::Create,
        CommandPattern::Update,
        CommandPattern::Delete,
        CommandPattern::CreateRelation,
        CommandPattern::Activate,
        CommandPattern::Deactivate,
        CommandPattern::ChangeStatus,
        CommandPattern::Custom,
    ];

    /// Name used in template variables and CLI output.
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandPattern::Create => "CREATE",
            CommandPattern::Update => "UPDATE",
            CommandPattern::Delete => "DELETE",
            CommandPattern::CreateRelation => "CREATE_RELATION",
            CommandPattern::Activate => "ACTIVATE",
            CommandPattern::Deactivate => "DEACTIVATE",
            CommandPattern::ChangeStatus => "CHANGE_STATUS",
            CommandPattern::Custom => "CUSTOM",
        }
    }

    /// Whether the generated handler starts by loading an existing entity.
    pub const fn is_lookup_based(self) -> bool {
        !matches!(self, CommandPattern::Create | CommandPattern::Custom)
    }
}

impl fmt::Display for CommandPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
