//! The seam between the generator and whatever produced the declaration tree.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{
    ParsedFile,
    raw::{RawStructure, RawToken, into_tokens},
};
use crate::core::error::DipgenError;

/// Suffix of the `sourcekitten structure --file <source>` sidecar.
pub const STRUCTURE_SUFFIX: &str = "structure.json";

/// Suffix of the `sourcekitten syntax --file <source>` sidecar.
pub const SYNTAX_SUFFIX: &str = "syntax.json";

/// Supplies the parsed structure of a source file.
///
/// Implementations must be shareable across threads: files are parsed in
/// parallel and only the merge step is serialized.
pub trait SyntaxProvider: Sync {
    fn parse(&self, path: &Path) -> Result<ParsedFile, DipgenError>;
}

impl<F> SyntaxProvider for F
where
    F: Fn(&Path) -> Result<ParsedFile, DipgenError> + Sync,
{
    fn parse(&self, path: &Path) -> Result<ParsedFile, DipgenError> {
        self(path)
    }
}

/// Reads SourceKitten dumps stored next to each source file.
///
/// For `Sources/Foo.swift` it expects `Sources/Foo.swift.structure.json` and
/// `Sources/Foo.swift.syntax.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceKittenDumps;

impl SourceKittenDumps {
    pub fn sidecar_path(source: &Path, suffix: &str) -> PathBuf {
        let mut name = source.as_os_str().to_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    fn read(path: &Path, what: &str) -> Result<String, DipgenError> {
        fs::read_to_string(path).map_err(|e| {
            DipgenError::structural(path, format!("cannot read {}: {}", what, e))
        })
    }
}

impl SyntaxProvider for SourceKittenDumps {
    fn parse(&self, path: &Path) -> Result<ParsedFile, DipgenError> {
        let contents = Self::read(path, "source file")?;

        let structure_path = Self::sidecar_path(path, STRUCTURE_SUFFIX);
        let structure: RawStructure =
            serde_json::from_str(&Self::read(&structure_path, "structure dump")?).map_err(
                |e| DipgenError::structural(&structure_path, format!("invalid structure dump: {}", e)),
            )?;

        let syntax_path = Self::sidecar_path(path, SYNTAX_SUFFIX);
        let tokens: Vec<RawToken> = serde_json::from_str(&Self::read(&syntax_path, "syntax dump")?)
            .map_err(|e| {
                DipgenError::structural(&syntax_path, format!("invalid syntax dump: {}", e))
            })?;

        let declarations = structure
            .into_declarations()
            .map_err(|reason| DipgenError::structural(path, reason))?;
        let tokens = into_tokens(tokens).map_err(|reason| DipgenError::structural(path, reason))?;

        ParsedFile::new(path.to_string_lossy(), contents, declarations, tokens)
    }
}
