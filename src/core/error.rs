//! Error taxonomy for a generation run.
//!
//! Only failures that abort work live here. Per-declaration policy outcomes
//! (ambiguous constructors, dropped runtime arguments) are recovered locally
//! and reported as [`crate::diagnostics::Diagnostic`]s instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DipgenError {
    /// The syntax provider could not produce a declaration tree for a file.
    /// Fatal for the whole run.
    #[error("failed to read the structure of {}: {reason}", path.display())]
    StructuralParseFailure { path: PathBuf, reason: String },

    /// A declared runtime argument has no matching constructor parameter
    /// and the strict argument policy is active.
    #[error(
        "runtime argument `{argument}` of {type_name} does not match any parameter of `{constructor}` ({}:{line})",
        path.display()
    )]
    UnmatchedRuntimeArgument {
        path: PathBuf,
        line: usize,
        type_name: String,
        constructor: String,
        argument: String,
    },

    /// Rendering a template failed, e.g. a filter received a value of the
    /// wrong shape. Fails the affected artifact only.
    #[error("failed to render template `{template}`: {source}")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
}

impl DipgenError {
    pub fn structural(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::StructuralParseFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
