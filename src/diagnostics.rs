//! Diagnostics for declarations the generator skipped or trimmed.
//!
//! None of these stop a run. They exist so `generate -v` can explain why a
//! type that looks registered is missing from the output.

use enum_dispatch::enum_dispatch;

use crate::core::syntax::{ParsedFile, SourceLocation};

// ============================================================
// Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    AmbiguousConstructor,
    MissingConstructor,
    UnmatchedArgument,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::AmbiguousConstructor => write!(f, "ambiguous-constructor"),
            Rule::MissingConstructor => write!(f, "missing-constructor"),
            Rule::UnmatchedArgument => write!(f, "unmatched-argument"),
        }
    }
}

// ============================================================
// Source Context
// ============================================================

/// Where a diagnostic points, with the line for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(file_path: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            file_path: file_path.into(),
            line: location.line,
            col: location.col,
            source_line: location.source_line,
        }
    }

    /// Context of the declaration at `offset` in `file`.
    pub fn at(file: &ParsedFile, offset: usize) -> Self {
        Self::new(file.path.clone(), file.location(offset))
    }
}

// ============================================================
// Diagnostic Types
// ============================================================

/// Several constructors and neither `@designated` nor `@constructor` picks one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousConstructorDiagnostic {
    pub context: SourceContext,
    pub type_name: String,
    pub candidates: Vec<String>,
}

/// The type should be registered but has nothing to construct it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingConstructorDiagnostic {
    pub context: SourceContext,
    pub type_name: String,
}

/// A runtime argument name that matches no constructor parameter; dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedArgumentDiagnostic {
    pub context: SourceContext,
    pub type_name: String,
    pub constructor: String,
    pub argument: String,
}

// ============================================================
// Diagnostic Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    AmbiguousConstructor(AmbiguousConstructorDiagnostic),
    MissingConstructor(MissingConstructorDiagnostic),
    UnmatchedArgument(UnmatchedArgumentDiagnostic),
}

impl Diagnostic {
    /// True when the whole declaration was left out of the model.
    pub fn skips_declaration(&self) -> bool {
        !matches!(self, Diagnostic::UnmatchedArgument(_))
    }
}

// ============================================================
// Report Trait
// ============================================================

/// Trait for types that can be reported to the CLI.
#[enum_dispatch]
pub trait Report {
    fn context(&self) -> &SourceContext;

    /// Primary message.
    fn message(&self) -> String;

    fn rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }
}

impl Report for AmbiguousConstructorDiagnostic {
    fn context(&self) -> &SourceContext {
        &self.context
    }

    fn message(&self) -> String {
        format!(
            "{} has {} constructors and none is designated: {}",
            self.type_name,
            self.candidates.len(),
            self.candidates.join(", ")
        )
    }

    fn rule(&self) -> Rule {
        Rule::AmbiguousConstructor
    }

    fn hint(&self) -> Option<String> {
        Some(
            "mark one constructor with `@dip.designated` or name it with `@dip.constructor`"
                .to_string(),
        )
    }
}

impl Report for MissingConstructorDiagnostic {
    fn context(&self) -> &SourceContext {
        &self.context
    }

    fn message(&self) -> String {
        format!("{} has no constructor to register", self.type_name)
    }

    fn rule(&self) -> Rule {
        Rule::MissingConstructor
    }

    fn hint(&self) -> Option<String> {
        Some("name the factory with `@dip.constructor`".to_string())
    }
}

impl Report for UnmatchedArgumentDiagnostic {
    fn context(&self) -> &SourceContext {
        &self.context
    }

    fn message(&self) -> String {
        format!(
            "runtime argument `{}` does not match any parameter of {}.{}",
            self.argument, self.type_name, self.constructor
        )
    }

    fn rule(&self) -> Rule {
        Rule::UnmatchedArgument
    }
}
