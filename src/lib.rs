//! dipgen - Dip registration generator for Swift
//!
//! dipgen reads Swift sources through SourceKit dumps, collects the
//! `@dip.*` annotations in their doc comments and generates the
//! `DependencyContainer` registrations for the Dip framework.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Generation engine (syntax ingestion, annotations, model, rendering)
//! - `diagnostics`: Skipped-declaration diagnostics and the `Report` trait

pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
