//! # HexMaker Makers
//!
//! File: cli/src/maker/mod.rs
//!
//! ## Overview
//!
//! The domain half of the tool. Given a command or query name, the makers
//! decide what PHP to produce:
//!
//! - `pattern`: The closed set of command intents (`CREATE`, `UPDATE`, ...)
//! - `analyzer`: Classifies a command name and emits handler scaffolding for it
//! - `property`: `name:type` descriptors for DTO constructor properties
//! - `cq_generator`: Assembles the template variables of a command or query use case
//!
//! Nothing in here touches the filesystem; `cq_generator` hands its output to a
//! `core::templating::Generator`.
//!
pub mod analyzer;
pub mod cq_generator;
pub mod pattern;
pub mod property;
