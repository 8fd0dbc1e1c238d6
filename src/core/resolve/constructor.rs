//! Constructor selection among a type's methods.
//!
//! Candidates are instance methods named `init...`, plus static or class
//! factory methods that opt in with `@designated` or `@arguments`. The first
//! designated candidate wins outright; otherwise exactly one candidate must
//! remain.

use crate::core::collect::Annotations;
use crate::core::model::{Argument, Constructor};
use crate::core::syntax::{Declaration, DeclarationKind};

const CONSTRUCTOR_PREFIX: &str = "init";

/// A method together with the annotations of its doc comment.
#[derive(Debug, Clone)]
pub struct DocumentedMethod<'a> {
    pub declaration: &'a Declaration,
    pub annotations: Annotations,
}

impl<'a> DocumentedMethod<'a> {
    pub fn new(declaration: &'a Declaration, annotations: Annotations) -> Self {
        Self {
            declaration,
            annotations,
        }
    }

    fn is_candidate(&self) -> bool {
        match self.declaration.kind {
            DeclarationKind::InstanceMethod => self.declaration.name.starts_with(CONSTRUCTOR_PREFIX),
            DeclarationKind::StaticMethod | DeclarationKind::ClassMethod => {
                self.annotations.designated || self.annotations.arguments.is_some()
            }
            _ => false,
        }
    }

    pub fn to_constructor(&self) -> Constructor {
        constructor_from(self.declaration, &self.annotations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Constructor),
    /// Several candidates and none designated.
    Ambiguous(Vec<String>),
    NoCandidates,
}

impl Resolution {
    pub fn constructor(&self) -> Option<&Constructor> {
        match self {
            Self::Resolved(constructor) => Some(constructor),
            _ => None,
        }
    }
}

/// Pick the factory constructor among `methods`, visited in declaration order.
pub fn resolve(methods: &[DocumentedMethod<'_>]) -> Resolution {
    let mut candidates = Vec::new();
    for method in methods.iter().filter(|method| method.is_candidate()) {
        if method.annotations.designated {
            return Resolution::Resolved(method.to_constructor());
        }
        candidates.push(method);
    }

    match candidates.as_slice() {
        [] => Resolution::NoCandidates,
        [only] => Resolution::Resolved(only.to_constructor()),
        many => Resolution::Ambiguous(
            many.iter()
                .map(|method| method.declaration.name.clone())
                .collect(),
        ),
    }
}

/// Build a [`Constructor`] from a method declaration, aligning parameter
/// children to the external labels of its signature by position.
pub fn constructor_from(declaration: &Declaration, annotations: &Annotations) -> Constructor {
    let mut parameters = declaration.parameters();
    let arguments = parse_labels(&declaration.name)
        .into_iter()
        .map(|label| {
            let parameter = parameters.next();
            Argument {
                name: label,
                internal_name: parameter.map(|p| p.name.clone()),
                type_name: parameter.and_then(|p| p.type_name.clone()),
            }
        })
        .collect();

    Constructor {
        name: declaration.name.clone(),
        designated: annotations.designated,
        arguments,
        runtime_arguments: annotations.arguments.clone().unwrap_or_default(),
    }
}

/// Constructor known only by its signature, e.g. from a `@constructor` override
/// naming a method the syntax provider did not report.
pub fn constructor_from_signature(signature: &str) -> Constructor {
    Constructor {
        name: signature.to_string(),
        designated: false,
        arguments: parse_labels(signature)
            .into_iter()
            .map(Argument::new)
            .collect(),
        runtime_arguments: Vec::new(),
    }
}

/// External labels of a signature: `init(_:port:)` gives `["_", "port"]`.
pub fn parse_labels(signature: &str) -> Vec<String> {
    let Some(open) = signature.find('(') else {
        return Vec::new();
    };
    let Some(close) = signature[open..].find(')') else {
        return Vec::new();
    };

    signature[open + 1..open + close]
        .split(':')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}
