//! Doc comment association and annotation parsing.
//!
//! Each declaration of a file is paired with at most one doc comment by the
//! [`DocCursor`]; the comment body is then folded into [`Annotations`].

pub mod annotations;
pub mod doc_cursor;

pub use annotations::{
    AnnotationKind, Annotations, ImplementsEntry, TagMatch, parse_annotation, parse_line,
};
pub use doc_cursor::{DocCursor, clean_doc_body};
