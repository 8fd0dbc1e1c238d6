use crate::core::error::DipgenError;
use crate::core::model::PartialModel;
use crate::core::syntax::ParsedFile;
use crate::diagnostics::Diagnostic;

use super::registration::{BuildSettings, RegistrationBuilder};

/// Everything one file contributes to a run.
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub partial: PartialModel,
    pub diagnostics: Vec<Diagnostic>,
    pub imports: Vec<String>,
}

/// Build the registrations of one file.
///
/// Independent of every other file, so callers may run it in parallel and
/// merge the outcomes afterwards.
pub fn process_file(file: &ParsedFile, settings: &BuildSettings) -> Result<FileOutcome, DipgenError> {
    let (partial, diagnostics) = RegistrationBuilder::new(file, settings).run()?;
    Ok(FileOutcome {
        partial,
        diagnostics,
        imports: file.imports(),
    })
}
