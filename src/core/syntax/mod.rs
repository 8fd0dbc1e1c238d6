//! Declaration trees and syntax tokens supplied by the syntax provider.
//!
//! The generator never tokenizes Swift itself. It consumes what SourceKit
//! reports for a file: a tree of declarations with byte offsets, and a flat
//! list of syntax tokens from which the doc comment spans are recovered.
//!
//! ## Module Structure
//!
//! - `raw`: serde mirror of the SourceKit JSON, validated into [`Declaration`]s
//! - `provider`: the [`SyntaxProvider`] seam and the SourceKitten sidecar reader

use std::ops::Range;

use crate::core::error::DipgenError;

pub mod provider;
pub mod raw;

#[cfg(test)]
pub(crate) mod fixture;

pub use provider::{SourceKittenDumps, SyntaxProvider};

/// Kind of a declaration, closed over everything the generator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Extension,
    InstanceMethod,
    StaticMethod,
    ClassMethod,
    InstanceProperty,
    Parameter,
    /// Anything else (structs, protocols, free functions...). Never registered,
    /// but still owns a doc comment that must not leak to the next declaration.
    Other,
}

impl DeclarationKind {
    /// Map a SourceKit `key.kind` string.
    pub fn from_sourcekit(kind: &str) -> Self {
        const DECL: &str = "source.lang.swift.decl.";
        let Some(rest) = kind.strip_prefix(DECL) else {
            return Self::Other;
        };
        match rest {
            "class" => Self::Class,
            "function.method.instance" => Self::InstanceMethod,
            "function.method.static" => Self::StaticMethod,
            "function.method.class" => Self::ClassMethod,
            "var.instance" => Self::InstanceProperty,
            "var.parameter" => Self::Parameter,
            _ if rest.starts_with("extension") => Self::Extension,
            _ => Self::Other,
        }
    }

    /// Types that can carry a registration.
    pub fn is_type(self) -> bool {
        matches!(self, Self::Class | Self::Extension)
    }

    pub fn is_method(self) -> bool {
        matches!(
            self,
            Self::InstanceMethod | Self::StaticMethod | Self::ClassMethod
        )
    }
}

/// One validated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// Byte offset of the declaration in the file contents.
    pub offset: usize,
    pub type_name: Option<String>,
    pub children: Vec<Declaration>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            offset,
            type_name: None,
            children: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Declaration>) -> Self {
        self.children = children;
        self
    }

    /// Parameter children in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Declaration> {
        self.children
            .iter()
            .filter(|child| child.kind == DeclarationKind::Parameter)
    }
}

/// Syntax token kinds reported by SourceKit that the generator distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    DocComment,
    DocCommentField,
    CommentUrl,
    Comment,
    CommentMark,
    Keyword,
    Identifier,
    Other,
}

impl TokenKind {
    /// Map a SourceKit `type` string.
    pub fn from_sourcekit(kind: &str) -> Self {
        match kind.strip_prefix("source.lang.swift.syntaxtype.") {
            Some("doccomment") => Self::DocComment,
            Some("doccomment.field") => Self::DocCommentField,
            Some("comment.url") => Self::CommentUrl,
            Some("comment") => Self::Comment,
            Some("comment.mark") => Self::CommentMark,
            Some("keyword") => Self::Keyword,
            Some("identifier") => Self::Identifier,
            _ => Self::Other,
        }
    }

    pub fn is_doc(self) -> bool {
        matches!(
            self,
            Self::DocComment | Self::DocCommentField | Self::CommentUrl
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub offset: usize,
    pub length: usize,
}

impl SyntaxToken {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// 1-based position of a byte offset, with the line it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub col: usize,
    pub source_line: String,
}

/// Everything the provider knows about one source file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: String,
    pub contents: String,
    pub declarations: Vec<Declaration>,
    tokens: Vec<SyntaxToken>,
}

impl ParsedFile {
    /// Assemble a parsed file, rejecting tokens that point outside `contents`.
    pub fn new(
        path: impl Into<String>,
        contents: impl Into<String>,
        declarations: Vec<Declaration>,
        mut tokens: Vec<SyntaxToken>,
    ) -> Result<Self, DipgenError> {
        let path = path.into();
        let contents = contents.into();

        if let Some(token) = tokens
            .iter()
            .find(|token| contents.get(token.range()).is_none())
        {
            return Err(DipgenError::structural(
                &path,
                format!(
                    "syntax token {}..{} is outside the file contents ({} bytes)",
                    token.offset,
                    token.offset + token.length,
                    contents.len()
                ),
            ));
        }
        tokens.sort_by_key(|token| token.offset);

        Ok(Self {
            path,
            contents,
            declarations,
            tokens,
        })
    }

    pub fn tokens(&self) -> &[SyntaxToken] {
        &self.tokens
    }

    pub fn text(&self, range: Range<usize>) -> Option<&str> {
        self.contents.get(range)
    }

    /// Doc comment spans, with consecutive doc tokens merged into one range.
    ///
    /// Two `/** */` blocks with nothing but whitespace between them produce
    /// adjacent doc tokens, so they form a single documentation body.
    pub fn doc_comment_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        let mut previous_was_doc = false;

        for token in &self.tokens {
            if !token.kind.is_doc() {
                previous_was_doc = false;
                continue;
            }
            match ranges.last_mut() {
                Some(last) if previous_was_doc => {
                    last.end = last.end.max(token.offset + token.length);
                }
                _ => ranges.push(token.range()),
            }
            previous_was_doc = true;
        }
        ranges
    }

    /// Module names imported by the file (`import UIKit` yields `UIKit`).
    pub fn imports(&self) -> Vec<String> {
        self.tokens
            .windows(2)
            .filter(|pair| {
                pair[0].kind == TokenKind::Keyword && self.text(pair[0].range()) == Some("import")
            })
            .filter_map(|pair| self.text(pair[1].range()))
            .map(str::to_string)
            .collect()
    }

    /// Line/column of a byte offset. Offsets past the end clamp to the last line.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.contents.len());
        let before = self.contents.get(..offset).unwrap_or(&self.contents);
        let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
        let line = before.matches('\n').count() + 1;
        let col = before[line_start..].chars().count() + 1;
        let source_line = self.contents[line_start..]
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();

        SourceLocation {
            line,
            col,
            source_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, offset: usize, length: usize) -> SyntaxToken {
        SyntaxToken {
            kind,
            offset,
            length,
        }
    }

    #[test]
    fn test_declaration_kind_from_sourcekit() {
        assert_eq!(
            DeclarationKind::from_sourcekit("source.lang.swift.decl.class"),
            DeclarationKind::Class
        );
        assert_eq!(
            DeclarationKind::from_sourcekit("source.lang.swift.decl.extension.class"),
            DeclarationKind::Extension
        );
        assert_eq!(
            DeclarationKind::from_sourcekit("source.lang.swift.decl.function.method.static"),
            DeclarationKind::StaticMethod
        );
        assert_eq!(
            DeclarationKind::from_sourcekit("source.lang.swift.decl.var.parameter"),
            DeclarationKind::Parameter
        );
        assert_eq!(
            DeclarationKind::from_sourcekit("source.lang.swift.decl.struct"),
            DeclarationKind::Other
        );
        assert_eq!(
            DeclarationKind::from_sourcekit("not.a.kind"),
            DeclarationKind::Other
        );
    }

    #[test]
    fn test_token_kind_doc_classification() {
        assert!(TokenKind::from_sourcekit("source.lang.swift.syntaxtype.doccomment").is_doc());
        assert!(
            TokenKind::from_sourcekit("source.lang.swift.syntaxtype.doccomment.field").is_doc()
        );
        assert!(!TokenKind::from_sourcekit("source.lang.swift.syntaxtype.comment").is_doc());
        assert!(!TokenKind::from_sourcekit("source.lang.swift.syntaxtype.keyword").is_doc());
    }

    #[test]
    fn test_new_rejects_out_of_bounds_tokens() {
        let result = ParsedFile::new(
            "Foo.swift",
            "class Foo {}",
            Vec::new(),
            vec![token(TokenKind::Keyword, 10, 20)],
        );
        let err = result.unwrap_err();
        assert!(matches!(err, DipgenError::StructuralParseFailure { .. }));
        assert!(err.to_string().contains("Foo.swift"));
    }

    #[test]
    fn test_doc_comment_ranges_merge_consecutive_doc_tokens() {
        let contents = "/** a */\n/** b */\n// plain\n/** c */\nclass Foo {}";
        let file = ParsedFile::new(
            "Foo.swift",
            contents,
            Vec::new(),
            vec![
                token(TokenKind::DocComment, 27, 8),
                token(TokenKind::DocComment, 0, 8),
                token(TokenKind::Comment, 18, 8),
                token(TokenKind::DocComment, 9, 8),
            ],
        )
        .unwrap();

        assert_eq!(file.doc_comment_ranges(), vec![0..17, 27..35]);
    }

    #[test]
    fn test_imports_follow_import_keyword() {
        let contents = "import UIKit\nimport Dip\nclass Foo {}";
        let file = ParsedFile::new(
            "Foo.swift",
            contents,
            Vec::new(),
            vec![
                token(TokenKind::Keyword, 0, 6),
                token(TokenKind::Identifier, 7, 5),
                token(TokenKind::Keyword, 13, 6),
                token(TokenKind::Identifier, 20, 3),
                token(TokenKind::Keyword, 24, 5),
                token(TokenKind::Identifier, 30, 3),
            ],
        )
        .unwrap();

        assert_eq!(file.imports(), vec!["UIKit", "Dip"]);
    }

    #[test]
    fn test_location_is_one_based() {
        let file = ParsedFile::new("Foo.swift", "import UIKit\n  class Foo {}\n", Vec::new(), Vec::new())
            .unwrap();

        let loc = file.location(15);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.col, 3);
        assert_eq!(loc.source_line, "  class Foo {}");

        let first = file.location(0);
        assert_eq!((first.line, first.col), (1, 1));
    }
}
