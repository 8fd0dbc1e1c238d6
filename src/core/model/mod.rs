//! The registration model shared by the builder and the renderer.
//!
//! ## Module Structure
//!
//! - `naming`: canonical container names
//! - `merge`: folding per-file results into one [`Model`]

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

pub mod merge;
pub mod naming;

pub use naming::{DEFAULT_CONTAINER, canonical_container_name};

/// Registrations of one file keyed by container name.
pub type PartialModel = BTreeMap<String, Vec<Registration>>;

/// A constructor parameter.
///
/// Equality is `(name, type)`: the internal name never takes part in
/// matching runtime arguments or in deduplication.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    /// External label, `_` when the parameter is unlabeled.
    pub name: String,
    pub internal_name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.type_name == other.type_name
    }
}

impl Argument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            internal_name: None,
            type_name: None,
        }
    }

    /// Name a runtime argument is matched against: the external label, or the
    /// internal name for unlabeled parameters.
    pub fn key(&self) -> &str {
        if self.is_unlabeled() {
            self.internal_name.as_deref().unwrap_or(&self.name)
        } else {
            &self.name
        }
    }

    pub fn is_unlabeled(&self) -> bool {
        self.name == "_"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    /// Signature as reported by the syntax provider, e.g. `init(url:port:)`.
    pub name: String,
    pub designated: bool,
    pub arguments: Vec<Argument>,
    /// Names listed in the constructor's own `arguments` annotation.
    pub runtime_arguments: Vec<String>,
}

impl Constructor {
    /// Method name without the parameter list.
    pub fn base_name(&self) -> &str {
        self.name
            .split_once('(')
            .map_or(self.name.as_str(), |(base, _)| base)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvingProperty {
    pub name: String,
    pub resolve_as: Option<String>,
    pub tag: Option<String>,
}

/// The rewritten constructor call used as the registration factory body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Closure {
    pub body: String,
    /// Set when any argument is resolved from the container.
    pub throws: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factory {
    #[serde(rename = "type")]
    pub type_name: String,
    pub constructor: String,
    /// Runtime-supplied arguments in declared order.
    pub arguments: Vec<Argument>,
    pub closure: Closure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementedType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Definition name, the type name unless overridden.
    pub name: String,
    pub scope: String,
    pub register_as: Option<String>,
    pub tag: Option<String>,
    pub factory: Factory,
    pub implements: Vec<ImplementedType>,
    pub resolving_properties: Vec<ResolvingProperty>,
    pub storyboard_instantiatable: bool,
}

impl Registration {
    pub fn type_name(&self) -> &str {
        &self.factory.type_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    pub is_ui_container: bool,
    pub registrations: Vec<Registration>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ui_container: false,
            registrations: Vec::new(),
        }
    }
}

/// Everything generated in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    pub containers: BTreeMap<String, Container>,
    /// Modules imported by the scanned sources.
    pub imports: BTreeSet<String>,
}

impl Model {
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn registration_count(&self) -> usize {
        self.containers
            .values()
            .map(|container| container.registrations.len())
            .sum()
    }

    pub fn has_ui_container(&self) -> bool {
        self.containers
            .values()
            .any(|container| container.is_ui_container)
    }
}
