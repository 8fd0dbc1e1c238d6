//! Template context built from the model.
//!
//! Mirrors the model in camelCase keys and precomputes the small Swift
//! fragments (`X.self` lists, `as T` casts, closure parameters) so templates
//! stay free of string fiddling. Everything is sorted, so the same model
//! always yields the same context.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::model::{Container, ImplementedType, Model, Registration};

pub const DIP_IMPORT: &str = "Dip";
pub const DIP_UI_IMPORT: &str = "DipUI";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactContext {
    pub imports: Vec<String>,
    pub containers: Vec<ContainerContext>,
    /// Property names of the UI containers, e.g. `listContainer`.
    pub ui_containers: Vec<String>,
    pub storyboard_instantiatables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerContext {
    pub name: String,
    pub is_ui_container: bool,
    pub registrations: Vec<RegistrationContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationContext {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// `let <name> = ` for explicitly named definitions, empty otherwise.
    pub binding: String,
    pub scope: String,
    pub register_as: Option<String>,
    pub tag: Option<String>,
    pub factory: FactoryContext,
    /// Untagged implemented types as `X.self`.
    pub implements: Vec<String>,
    pub tagged_implements: Vec<ImplementedType>,
    pub resolving_properties: Vec<PropertyContext>,
    pub storyboard_instantiatable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryContext {
    #[serde(rename = "type")]
    pub type_name: String,
    pub constructor: String,
    pub closure: ClosureContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureContext {
    pub body: String,
    pub throws: bool,
    /// Runtime arguments as closure parameters, e.g. `url: URL`.
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyContext {
    pub name: String,
    pub resolve_as: Option<String>,
    pub tag: Option<String>,
    /// ` as T` when the property resolves as another type.
    pub cast: String,
}

impl ArtifactContext {
    /// Everything in one artifact.
    pub fn combined(model: &Model) -> Self {
        Self::for_containers(model, model.containers.values(), true)
    }

    /// One container, with the source imports but without bootstrap data.
    pub fn container(model: &Model, container: &Container) -> Self {
        let mut context = Self::for_containers(model, [container], true);
        context.ui_containers.clear();
        context
    }

    /// The index artifact: every container name for `configureAll` and
    /// `bootstrapAll`, but no registrations.
    pub fn index(model: &Model) -> Self {
        let mut context = Self::for_containers(model, model.containers.values(), false);
        context.storyboard_instantiatables.clear();
        for container in &mut context.containers {
            container.registrations.clear();
        }
        context
    }

    fn for_containers<'a>(
        model: &Model,
        containers: impl IntoIterator<Item = &'a Container>,
        with_source_imports: bool,
    ) -> Self {
        let mut containers: Vec<&Container> = containers.into_iter().collect();
        containers.sort_by(|a, b| a.name.cmp(&b.name));

        let has_ui = containers.iter().any(|container| container.is_ui_container);
        let mut imports: BTreeSet<String> = BTreeSet::new();
        imports.insert(if has_ui { DIP_UI_IMPORT } else { DIP_IMPORT }.to_string());
        if with_source_imports {
            imports.extend(model.imports.iter().cloned());
        }

        let storyboard_instantiatables: BTreeSet<String> = containers
            .iter()
            .flat_map(|container| &container.registrations)
            .filter(|registration| registration.storyboard_instantiatable)
            .map(|registration| registration.type_name().to_string())
            .collect();

        Self {
            imports: imports.into_iter().collect(),
            ui_containers: containers
                .iter()
                .filter(|container| container.is_ui_container)
                .map(|container| format!("{}Container", container.name))
                .collect(),
            storyboard_instantiatables: storyboard_instantiatables.into_iter().collect(),
            containers: containers.into_iter().map(ContainerContext::from).collect(),
        }
    }
}

impl From<&Container> for ContainerContext {
    fn from(container: &Container) -> Self {
        let mut registrations: Vec<&Registration> = container.registrations.iter().collect();
        registrations.sort_by_key(|registration| sort_key(*registration));

        Self {
            name: container.name.clone(),
            is_ui_container: container.is_ui_container,
            registrations: registrations.into_iter().map(RegistrationContext::from).collect(),
        }
    }
}

/// Orders registrations independently of the order files were merged in.
fn sort_key(registration: &Registration) -> (&str, &str, Option<&str>, &str, Option<&str>, &str) {
    (
        &registration.name,
        registration.type_name(),
        registration.tag.as_deref(),
        &registration.scope,
        registration.register_as.as_deref(),
        &registration.factory.closure.body,
    )
}

impl From<&Registration> for RegistrationContext {
    fn from(registration: &Registration) -> Self {
        let (tagged, untagged): (Vec<&ImplementedType>, Vec<&ImplementedType>) = registration
            .implements
            .iter()
            .partition(|implemented| implemented.tag.is_some());

        let factory = &registration.factory;
        Self {
            name: registration.name.clone(),
            type_name: registration.type_name().to_string(),
            binding: if registration.name == registration.type_name() {
                String::new()
            } else {
                format!("let {} = ", registration.name)
            },
            scope: registration.scope.clone(),
            register_as: registration.register_as.clone(),
            tag: registration.tag.clone(),
            factory: FactoryContext {
                type_name: factory.type_name.clone(),
                constructor: factory.constructor.clone(),
                closure: ClosureContext {
                    body: factory.closure.body.clone(),
                    throws: factory.closure.throws,
                    parameters: factory
                        .arguments
                        .iter()
                        .map(|argument| match &argument.type_name {
                            Some(type_name) => format!("{}: {}", argument.key(), type_name),
                            None => argument.key().to_string(),
                        })
                        .collect(),
                },
            },
            implements: untagged
                .iter()
                .map(|implemented| format!("{}.self", implemented.type_name))
                .collect(),
            tagged_implements: tagged.into_iter().cloned().collect(),
            resolving_properties: registration
                .resolving_properties
                .iter()
                .map(|property| PropertyContext {
                    name: property.name.clone(),
                    resolve_as: property.resolve_as.clone(),
                    tag: property.tag.clone(),
                    cast: property
                        .resolve_as
                        .as_ref()
                        .map(|type_name| format!(" as {}", type_name))
                        .unwrap_or_default(),
                })
                .collect(),
            storyboard_instantiatable: registration.storyboard_instantiatable,
        }
    }
}
