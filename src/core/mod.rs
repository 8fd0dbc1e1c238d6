//! Generation engine.
//!
//! A run goes through these stages, each usable on its own as a library:
//!
//! 1. **Syntax** (`syntax`): declaration trees and tokens from the syntax provider
//! 2. **Collect** (`collect`): doc comments paired with declarations, parsed into annotations
//! 3. **Resolve** (`resolve`): constructor selection and factory closures
//! 4. **Build** (`build`): per-file registrations, built in parallel
//! 5. **Merge** (`model`): one model across files
//! 6. **Render** (`render`): minijinja templates into Swift artifacts
//!
//! `context` wires the stages to configuration and the file scanner.

pub mod build;
pub mod collect;
pub mod context;
pub mod error;
pub mod file_scanner;
pub mod model;
pub mod render;
pub mod resolve;
pub mod syntax;

pub use context::{GenerateContext, ModelOutcome, build_model};
pub use error::DipgenError;
