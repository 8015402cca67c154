//! # HexMaker Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the maker. Errors only
//! ever come from the edges of the pipeline: loading configuration, rendering
//! templates and writing files. The command pattern analyzer is total and never
//! produces one.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `MakerError`: A custom error enum using `thiserror` for the specific failures
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if target.exists() && !force {
//!     return Err(MakerError::FileExists { path: target.display().to_string() })?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read template: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the maker.
#[derive(Error, Debug)]
pub enum MakerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("File '{path}' already exists. Use --force to overwrite it.")]
    FileExists { path: String },

    #[error("Invalid property definition: {0}")]
    InvalidProperty(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
