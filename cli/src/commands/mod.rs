//! # HexMaker Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the HexMaker CLI. Each one
//! defines its own clap arguments struct and a `handle_*` function that
//! `main.rs` routes to.
//!
//! ## Commands
//!
//! - `command`: Generates a command, its handler and optional factory / test
//! - `query`: Generates a query, its handler and its response
//! - `analyze`: Prints what the command pattern analyzer makes of a name
//!
//! `utils` holds what the two makers share (output flags, project context,
//! argument validation and the completion message).
//!

/// `hexmaker analyze`: command name analysis without generating anything.
pub mod analyze;
/// `hexmaker command`: command use case generation.
pub mod command;
/// `hexmaker query`: query use case generation.
pub mod query;
/// Helpers shared by the makers.
pub mod utils;
