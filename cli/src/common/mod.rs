//! # HexMaker Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers with no knowledge of commands or queries:
//!
//! - **`fs`**: Filesystem operations (directory creation, reading and writing files).
//! - **`namespace`**: `NamespacePath`, the module path a use case is generated in.
//! - **`naming`**: Case conversion and the PHP naming conventions derived from
//!   an entity name (repository variables, port interfaces, factories).
//!
//! ```rust
//! use crate::common::namespace::NamespacePath;
//! use crate::common::naming;
//!
//! let path = NamespacePath::new("user/account", "App");
//! assert_eq!(path.to_namespace("Domain\\Port"), "App\\User\\Account\\Domain\\Port");
//! assert_eq!(naming::repository_variable_name_for("OrderStatus"), "orderStatusRepository");
//! ```
//!

/// Utilities for filesystem operations.
pub mod fs;
/// Module paths and their namespace/directory forms.
pub mod namespace;
/// Naming conventions for generated PHP code.
pub mod naming;
