//! Associates declarations with the doc comment written above them.
//!
//! A file is scanned declaration by declaration in ascending offset order.
//! For each declaration the nearest doc comment ending at or before it is a
//! candidate, but a comment is handed out at most once: if the nearest one
//! was already consumed by an earlier declaration, the declaration has no
//! documentation.
//!
//! ```swift
//! /** @register */
//! class Foo {
//!     let bar: Bar   // <- nearest comment is Foo's, already consumed: no docs
//! }
//! ```

use std::ops::Range;

use crate::core::syntax::ParsedFile;

/// Owned scan state for one file.
#[derive(Debug)]
pub struct DocCursor<'a> {
    file: &'a ParsedFile,
    /// Merged doc comment ranges, sorted by offset.
    ranges: Vec<Range<usize>>,
    last_consumed: Option<Range<usize>>,
    last_offset: Option<usize>,
}

impl<'a> DocCursor<'a> {
    pub fn new(file: &'a ParsedFile) -> Self {
        Self {
            file,
            ranges: file.doc_comment_ranges(),
            last_consumed: None,
            last_offset: None,
        }
    }

    /// Range handed out most recently.
    pub fn last_consumed(&self) -> Option<&Range<usize>> {
        self.last_consumed.as_ref()
    }

    /// Cleaned doc comment body for the declaration at `offset`.
    ///
    /// Must be called once per declaration in ascending offset order.
    pub fn associate(&mut self, offset: usize) -> Option<String> {
        debug_assert!(
            self.last_offset.is_none_or(|last| offset >= last),
            "declarations must be visited in ascending offset order"
        );
        self.last_offset = Some(offset);

        // Ranges never overlap, so sorting by start also sorts by end.
        let candidates = self.ranges.partition_point(|range| range.end <= offset);
        let nearest = self.ranges.get(candidates.checked_sub(1)?)?;

        if let Some(last) = &self.last_consumed
            && nearest.start < last.end
        {
            return None;
        }

        let body = clean_doc_body(self.file.text(nearest.clone())?);
        self.last_consumed = Some(nearest.clone());
        Some(body)
    }
}

/// Strip comment delimiters and leading `*` decoration from a comment.
pub fn clean_doc_body(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(clean_doc_line).collect();

    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn clean_doc_line(line: &str) -> &str {
    let mut line = line.trim();
    if let Some(stripped) = line.strip_suffix("*/") {
        line = stripped.trim_end();
    }
    for opener in ["/**", "/*", "///", "//"] {
        if let Some(stripped) = line.strip_prefix(opener) {
            line = stripped;
            break;
        }
    }
    line.trim_start_matches('*').trim()
}
