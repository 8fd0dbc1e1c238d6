//! Test helpers that fake SourceKit output for inline Swift snippets.
//!
//! Tokens are recovered with a tiny scanner; declaration
//! offsets are looked up with [`at`] so fixtures stay readable.

use super::{Declaration, DeclarationKind, ParsedFile, SyntaxToken, TokenKind};

/// Byte offset of the first occurrence of `needle`.
pub(crate) fn at(source: &str, needle: &str) -> usize {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("`{}` not found in fixture", needle))
}

/// Byte offset of the `n`th (0-based) occurrence of `needle`.
pub(crate) fn at_nth(source: &str, needle: &str, n: usize) -> usize {
    source
        .match_indices(needle)
        .nth(n)
        .map(|(offset, _)| offset)
        .unwrap_or_else(|| panic!("occurrence {} of `{}` not found in fixture", n, needle))
}

pub(crate) fn class(source: &str, name: &str, children: Vec<Declaration>) -> Declaration {
    Declaration::new(
        DeclarationKind::Class,
        name,
        at(source, &format!("class {}", name)),
    )
    .with_children(children)
}

pub(crate) fn extension(source: &str, name: &str, children: Vec<Declaration>) -> Declaration {
    Declaration::new(
        DeclarationKind::Extension,
        name,
        at(source, &format!("extension {}", name)),
    )
    .with_children(children)
}

pub(crate) fn property(source: &str, name: &str, type_name: &str) -> Declaration {
    let offset = ["var ", "let "]
        .iter()
        .find_map(|keyword| source.find(&format!("{}{}", keyword, name)))
        .unwrap_or_else(|| panic!("property `{}` not found in fixture", name));
    Declaration::new(DeclarationKind::InstanceProperty, name, offset).with_type(type_name)
}

/// A method declared at `offset` with `(internal name, type)` parameters.
pub(crate) fn method(
    kind: DeclarationKind,
    name: &str,
    offset: usize,
    parameters: &[(&str, &str)],
) -> Declaration {
    let children = parameters
        .iter()
        .map(|(param, type_name)| {
            Declaration::new(DeclarationKind::Parameter, *param, offset).with_type(*type_name)
        })
        .collect();
    Declaration::new(kind, name, offset).with_children(children)
}

pub(crate) fn init(name: &str, offset: usize, parameters: &[(&str, &str)]) -> Declaration {
    method(DeclarationKind::InstanceMethod, name, offset, parameters)
}

pub(crate) fn parsed(source: &str, declarations: Vec<Declaration>) -> ParsedFile {
    parsed_at("Fixture.swift", source, declarations)
}

pub(crate) fn parsed_at(path: &str, source: &str, declarations: Vec<Declaration>) -> ParsedFile {
    ParsedFile::new(path, source, declarations, tokens(source)).expect("fixture tokens in bounds")
}

/// Comment tokens, `import` keywords, and one identifier token per other word.
pub(crate) fn tokens(source: &str) -> Vec<SyntaxToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        if rest.starts_with("/*") {
            let end = rest.find("*/").map_or(source.len(), |e| pos + e + 2);
            let kind = if rest.starts_with("/**") && !rest.starts_with("/**/") {
                TokenKind::DocComment
            } else {
                TokenKind::Comment
            };
            tokens.push(token(kind, pos, end));
            pos = end;
        } else if rest.starts_with("//") {
            let end = rest.find('\n').map_or(source.len(), |e| pos + e);
            let kind = if rest.starts_with("///") {
                TokenKind::DocComment
            } else {
                TokenKind::Comment
            };
            tokens.push(token(kind, pos, end));
            pos = end;
        } else if rest.starts_with("import ") && (pos == 0 || source[..pos].ends_with('\n')) {
            tokens.push(token(TokenKind::Keyword, pos, pos + 6));
            let module_start = pos + 7;
            let module_end = source[module_start..]
                .find(|c: char| !c.is_alphanumeric() && c != '_')
                .map_or(source.len(), |e| module_start + e);
            tokens.push(token(TokenKind::Identifier, module_start, module_end));
            pos = module_end;
        } else if rest.starts_with(char::is_whitespace) {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        } else {
            // Any other word becomes an identifier so doc comments separated
            // by code are never merged.
            let end = rest
                .char_indices()
                .find(|(i, c)| {
                    c.is_whitespace() || rest[*i..].starts_with("//") || rest[*i..].starts_with("/*")
                })
                .map_or(source.len(), |(i, _)| pos + i);
            tokens.push(token(TokenKind::Identifier, pos, end));
            pos = end;
        }
    }
    tokens
}

fn token(kind: TokenKind, start: usize, end: usize) -> SyntaxToken {
    SyntaxToken {
        kind,
        offset: start,
        length: end - start,
    }
}
