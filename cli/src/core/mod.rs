//! # HexMaker Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure the makers run on:
//! - `config`: Loading, merging and validating `.hexmaker.toml`
//! - `error`: `MakerError` and the crate-wide `Result` alias
//! - `templating`: The `Generator` port and its Tera-backed implementation
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{MakerError, Result}; // For error handling
//! use crate::core::templating::{Generator, TeraGenerator}; // For rendering PHP files
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
