//! Serde mirror of SourceKit's JSON output.
//!
//! `sourcekitten structure` emits nested dictionaries keyed by `key.*`
//! strings and `sourcekitten syntax` emits a flat token array. Both are
//! deserialized loosely here and validated once into the typed
//! [`Declaration`] / [`SyntaxToken`] model.

use serde::Deserialize;

use super::{Declaration, DeclarationKind, SyntaxToken, TokenKind};

/// Root of a `sourcekitten structure` document.
#[derive(Debug, Deserialize)]
pub struct RawStructure {
    #[serde(rename = "key.substructure", default)]
    pub substructure: Vec<RawDeclaration>,
}

#[derive(Debug, Deserialize)]
pub struct RawDeclaration {
    #[serde(rename = "key.kind")]
    pub kind: Option<String>,
    #[serde(rename = "key.name")]
    pub name: Option<String>,
    #[serde(rename = "key.offset")]
    pub offset: Option<u64>,
    #[serde(rename = "key.typename")]
    pub type_name: Option<String>,
    #[serde(rename = "key.substructure", default)]
    pub substructure: Vec<RawDeclaration>,
}

/// One entry of a `sourcekitten syntax` document.
#[derive(Debug, Deserialize)]
pub struct RawToken {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: u64,
    pub length: u64,
}

impl RawStructure {
    /// Validate the whole tree. Errors carry a human-readable reason.
    pub fn into_declarations(self) -> Result<Vec<Declaration>, String> {
        convert_all(self.substructure)
    }
}

fn convert_all(raw: Vec<RawDeclaration>) -> Result<Vec<Declaration>, String> {
    let mut declarations = Vec::with_capacity(raw.len());
    for declaration in raw {
        if let Some(declaration) = declaration.validate()? {
            declarations.push(declaration);
        }
    }
    Ok(declarations)
}

impl RawDeclaration {
    /// `Ok(None)` drops a declaration the generator can ignore entirely.
    fn validate(self) -> Result<Option<Declaration>, String> {
        let kind = self
            .kind
            .as_deref()
            .map_or(DeclarationKind::Other, DeclarationKind::from_sourcekit);

        // Members of an ignored declaration are kept so their doc comments
        // are consumed in place.
        if kind == DeclarationKind::Other {
            let Some(offset) = self.offset else {
                return Ok(None);
            };
            return Ok(Some(Declaration {
                kind,
                name: self.name.unwrap_or_default(),
                offset: to_usize(offset)?,
                type_name: self.type_name,
                children: convert_all(self.substructure)?,
            }));
        }

        let name = self
            .name
            .ok_or_else(|| format!("{:?} declaration without `key.name`", kind))?;
        let offset = self
            .offset
            .ok_or_else(|| format!("declaration `{}` without `key.offset`", name))?;

        Ok(Some(Declaration {
            kind,
            offset: to_usize(offset)?,
            type_name: self.type_name,
            children: convert_all(self.substructure)?,
            name,
        }))
    }
}

impl RawToken {
    fn validate(self) -> Result<SyntaxToken, String> {
        let out_of_range = || format!("token {}+{} is out of range", self.offset, self.length);
        Ok(SyntaxToken {
            kind: TokenKind::from_sourcekit(&self.kind),
            offset: usize::try_from(self.offset).map_err(|_| out_of_range())?,
            length: usize::try_from(self.length).map_err(|_| out_of_range())?,
        })
    }
}

/// Convert raw tokens, failing on offsets that do not fit in memory.
pub fn into_tokens(raw: Vec<RawToken>) -> Result<Vec<SyntaxToken>, String> {
    raw.into_iter().map(RawToken::validate).collect()
}

fn to_usize(offset: u64) -> Result<usize, String> {
    usize::try_from(offset).map_err(|_| format!("offset {} is out of range", offset))
}
