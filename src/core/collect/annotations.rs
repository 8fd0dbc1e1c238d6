//! Annotation mini-language recognized inside doc comments.
//!
//! Supported tags (written `@dip.<tag>` or `@<tag>`):
//! - `register [Type]` - register the type, optionally as `Type`
//! - `factory Name` / `container Name` - container to register in
//! - `designated` - constructor to use as the factory
//! - `constructor Name` - explicit constructor when none can be resolved
//! - `arguments a, b` - constructor parameters supplied at resolution time
//! - `name Name` - definition name
//! - `tag "value"` - definition (or injected property) tag
//! - `implements A, B "tag"` - additional types resolvable by the definition
//! - `scope Scope` - component scope
//! - `inject [Type]` - property resolved after construction
//! - `storyboard-instantiatable` - type is instantiated from a storyboard
//!
//! Unknown tags are ignored.

use std::sync::LazyLock;

use regex::Regex;

/// Comment terminator; a tag after it on the same line does not count.
const COMMENT_END: &str = "*/";

// `@` must not follow a word character or `.`, so `mail@host.com` is not a tag.
// Capture group 1: tag name.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w.])@(?:dip\.)?([A-Za-z][A-Za-z0-9-]*)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Register,
    Container,
    Designated,
    Constructor,
    Arguments,
    Name,
    Tag,
    Implements,
    Scope,
    Inject,
    StoryboardInstantiatable,
}

impl AnnotationKind {
    /// Parse a tag name, including aliases.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "register" => Some(Self::Register),
            "factory" | "container" => Some(Self::Container),
            "designated" => Some(Self::Designated),
            "constructor" => Some(Self::Constructor),
            "arguments" => Some(Self::Arguments),
            "name" => Some(Self::Name),
            "tag" => Some(Self::Tag),
            "implements" => Some(Self::Implements),
            "scope" => Some(Self::Scope),
            "inject" => Some(Self::Inject),
            "storyboard-instantiatable" | "storyboardInstantiatable" => {
                Some(Self::StoryboardInstantiatable)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Container => "container",
            Self::Designated => "designated",
            Self::Constructor => "constructor",
            Self::Arguments => "arguments",
            Self::Name => "name",
            Self::Tag => "tag",
            Self::Implements => "implements",
            Self::Scope => "scope",
            Self::Inject => "inject",
            Self::StoryboardInstantiatable => "storyboard-instantiatable",
        }
    }
}

/// A tag found on a line. `value` is `None` when the tag carries no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub kind: AnnotationKind,
    pub value: Option<String>,
}

/// First recognized annotation on a line.
pub fn parse_annotation(line: &str) -> Option<TagMatch> {
    let terminator = line.find(COMMENT_END).unwrap_or(line.len());

    for captures in TAG_REGEX.captures_iter(line) {
        let Some(tag) = captures.get(1) else {
            continue;
        };
        if tag.start() > terminator {
            break;
        }
        let Some(kind) = AnnotationKind::parse(tag.as_str()) else {
            continue;
        };

        let value_end = terminator.max(tag.end());
        let value = line[tag.end()..value_end].trim();
        return Some(TagMatch {
            kind,
            value: (!value.is_empty()).then(|| value.to_string()),
        });
    }
    None
}

/// Match a single tag on a line.
///
/// Returns `None` when the tag is absent, and `Some` with an optional value
/// when it is present.
pub fn parse_line(line: &str, kind: AnnotationKind) -> Option<TagMatch> {
    parse_annotation(line).filter(|found| found.kind == kind)
}

/// A type listed by `implements`, with its optional per-type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementsEntry {
    pub type_name: String,
    pub tag: Option<String>,
}

impl ImplementsEntry {
    /// Parse `Type` or `Type "tag"`.
    fn parse(entry: &str) -> Option<Self> {
        let (type_name, tag) = match entry.split_once('"') {
            Some((type_name, tag)) => (type_name, trim_quotes(tag)),
            None => (entry, None),
        };
        let type_name = type_name.trim();
        (!type_name.is_empty()).then(|| Self {
            type_name: type_name.to_string(),
            tag,
        })
    }
}

/// Everything a single doc comment body says.
///
/// Later lines overwrite earlier ones; list-valued tags replace the
/// previous list entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Any recognized tag was present.
    pub matched: bool,
    pub register: bool,
    pub register_as: Option<String>,
    pub container: Option<String>,
    pub designated: bool,
    pub constructor: Option<String>,
    pub arguments: Option<Vec<String>>,
    pub name: Option<String>,
    pub tag: Option<String>,
    pub implements: Vec<ImplementsEntry>,
    pub scope: Option<String>,
    pub inject: bool,
    pub inject_as: Option<String>,
    pub storyboard_instantiatable: bool,
}

impl Annotations {
    /// Fold every line of a cleaned doc comment body.
    pub fn parse(body: &str) -> Self {
        let mut annotations = Self::default();
        for line in body.lines() {
            if let Some(found) = parse_annotation(line) {
                annotations.apply(found);
            }
        }
        annotations
    }

    /// Take the registration-level values of `other` that are unset here.
    pub fn fill_from(&mut self, other: &Annotations) {
        self.matched |= other.matched;
        self.register |= other.register;
        self.storyboard_instantiatable |= other.storyboard_instantiatable;
        fill(&mut self.register_as, &other.register_as);
        fill(&mut self.container, &other.container);
        fill(&mut self.name, &other.name);
        fill(&mut self.tag, &other.tag);
        fill(&mut self.scope, &other.scope);
        if self.implements.is_empty() {
            self.implements = other.implements.clone();
        }
    }

    fn apply(&mut self, TagMatch { kind, value }: TagMatch) {
        self.matched = true;
        match kind {
            AnnotationKind::Register => {
                self.register = true;
                self.register_as = value;
            }
            AnnotationKind::Container => {
                if value.is_some() {
                    self.container = value;
                }
            }
            AnnotationKind::Designated => self.designated = true,
            AnnotationKind::Constructor => self.constructor = value,
            AnnotationKind::Arguments => self.arguments = Some(split_list(value.as_deref())),
            AnnotationKind::Name => {
                if value.is_some() {
                    self.name = value;
                }
            }
            AnnotationKind::Tag => self.tag = value.as_deref().and_then(trim_quotes),
            AnnotationKind::Implements => {
                self.implements = split_list(value.as_deref())
                    .iter()
                    .filter_map(|entry| ImplementsEntry::parse(entry))
                    .collect();
            }
            AnnotationKind::Scope => {
                if value.is_some() {
                    self.scope = value;
                }
            }
            AnnotationKind::Inject => {
                self.inject = true;
                self.inject_as = value;
            }
            AnnotationKind::StoryboardInstantiatable => self.storyboard_instantiatable = true,
        }
    }
}

fn fill(slot: &mut Option<String>, fallback: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(fallback);
    }
}

/// Comma-separated, whitespace-trimmed list; empty entries are skipped.
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn trim_quotes(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_matches('"').trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
