use std::path::PathBuf;

use crate::core::error::DipgenError;
use crate::core::model::Model;
use crate::diagnostics::Diagnostic;

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Inspect(InspectSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub is_check: bool,
    pub container_count: usize,
    pub registration_count: usize,
    /// Artifacts written to disk.
    pub written: Vec<PathBuf>,
    /// Artifacts whose file already had the rendered contents.
    pub unchanged: Vec<PathBuf>,
    /// `--check` only: artifacts whose file is missing or differs.
    pub stale: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct InspectSummary {
    pub model: Model,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a dipgen command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Declarations skipped or trimmed while building the model.
    pub diagnostics: Vec<Diagnostic>,
    /// Artifacts that failed to render; the others were still produced.
    pub render_failures: Vec<(PathBuf, DipgenError)>,
    /// Number of Swift source files that were read.
    pub source_files_checked: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            diagnostics: Vec::new(),
            render_failures: Vec::new(),
            source_files_checked: 0,
        }
    }
}
