//! Turns one documented type declaration into a registration.

use std::path::PathBuf;

use crate::core::collect::{Annotations, DocCursor};
use crate::core::error::DipgenError;
use crate::core::model::{
    ImplementedType, PartialModel, Registration, ResolvingProperty, canonical_container_name,
    naming::DEFAULT_CONTAINER,
};
use crate::core::resolve::{
    ArgumentPolicy, DocumentedMethod, Resolution, assemble_factory, constructor_from,
    constructor_from_signature, resolve,
};
use crate::core::syntax::{Declaration, DeclarationKind, ParsedFile};
use crate::diagnostics::{
    AmbiguousConstructorDiagnostic, Diagnostic, MissingConstructorDiagnostic, SourceContext,
    UnmatchedArgumentDiagnostic,
};

pub const DEFAULT_SCOPE: &str = "Shared";

/// Knobs that apply to every file of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub default_container: String,
    pub default_scope: String,
    pub argument_policy: ArgumentPolicy,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            default_container: DEFAULT_CONTAINER.to_string(),
            default_scope: DEFAULT_SCOPE.to_string(),
            argument_policy: ArgumentPolicy::default(),
        }
    }
}

/// Scan state for one file: the doc cursor plus everything built so far.
pub struct RegistrationBuilder<'a> {
    file: &'a ParsedFile,
    settings: &'a BuildSettings,
    cursor: DocCursor<'a>,
    partial: PartialModel,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RegistrationBuilder<'a> {
    pub fn new(file: &'a ParsedFile, settings: &'a BuildSettings) -> Self {
        Self {
            file,
            settings,
            cursor: DocCursor::new(file),
            partial: PartialModel::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Visit the file's top-level declarations in offset order.
    pub fn run(mut self) -> Result<(PartialModel, Vec<Diagnostic>), DipgenError> {
        let file = self.file;
        for declaration in by_offset(&file.declarations) {
            let docs = self.cursor.associate(declaration.offset);
            if declaration.kind.is_type() {
                self.visit_type(declaration, docs.as_deref())?;
            } else {
                self.visit_members(declaration)?;
            }
        }
        Ok((self.partial, self.diagnostics))
    }

    /// Consume the docs of a declaration that is never registered itself.
    /// Types nested inside it are still visited.
    fn visit_members(&mut self, declaration: &'a Declaration) -> Result<(), DipgenError> {
        for child in by_offset(&declaration.children) {
            let docs = self.cursor.associate(child.offset);
            if child.kind.is_type() {
                self.visit_type(child, docs.as_deref())?;
            } else {
                self.visit_members(child)?;
            }
        }
        Ok(())
    }

    fn visit_type(
        &mut self,
        declaration: &'a Declaration,
        docs: Option<&str>,
    ) -> Result<(), DipgenError> {
        let annotations = docs.map(Annotations::parse).unwrap_or_default();

        let mut properties = Vec::new();
        let mut methods = Vec::new();
        for child in by_offset(&declaration.children) {
            let docs = self.cursor.associate(child.offset);
            match child.kind {
                DeclarationKind::InstanceProperty => {
                    properties.extend(resolving_property(child, docs.as_deref()));
                }
                kind if kind.is_method() => {
                    let annotations = docs.as_deref().map(Annotations::parse).unwrap_or_default();
                    methods.push(DocumentedMethod::new(child, annotations));
                }
                kind if kind.is_type() => self.visit_type(child, docs.as_deref())?,
                _ => self.visit_members(child)?,
            }
        }

        if let Some((container, registration)) =
            self.build(declaration, annotations, properties, &methods)?
        {
            self.partial.entry(container).or_default().push(registration);
        }
        Ok(())
    }

    fn build(
        &mut self,
        declaration: &Declaration,
        mut annotations: Annotations,
        properties: Vec<ResolvingProperty>,
        methods: &[DocumentedMethod<'_>],
    ) -> Result<Option<(String, Registration)>, DipgenError> {
        let type_name = declaration.name.as_str();
        let resolution = resolve(methods);

        // `@register` on the chosen constructor registers the type, and its
        // tags fill in whatever the type's own doc leaves unset.
        if let Some(constructor) = resolution.constructor()
            && let Some(method) = methods
                .iter()
                .find(|method| method.declaration.name == constructor.name)
            && method.annotations.register
        {
            annotations.fill_from(&method.annotations);
        }

        let forced_by_constructor = resolution.constructor().is_some_and(|c| c.designated);
        let should_register =
            annotations.matched || !properties.is_empty() || forced_by_constructor;
        if !should_register {
            return Ok(None);
        }

        let constructor = match resolution {
            Resolution::Resolved(constructor) => constructor,
            resolution => match annotations.constructor.as_deref() {
                Some(name) => methods
                    .iter()
                    .find(|method| method.declaration.name == name)
                    .map(|method| constructor_from(method.declaration, &method.annotations))
                    .unwrap_or_else(|| constructor_from_signature(name)),
                None => {
                    self.skip(declaration, resolution);
                    return Ok(None);
                }
            },
        };

        let runtime_names = if constructor.runtime_arguments.is_empty() {
            annotations.arguments.clone().unwrap_or_default()
        } else {
            constructor.runtime_arguments.clone()
        };
        let plan = assemble_factory(type_name, &constructor, &runtime_names);
        if self.settings.argument_policy == ArgumentPolicy::Fail
            && let Some(argument) = plan.unmatched.first()
        {
            return Err(DipgenError::UnmatchedRuntimeArgument {
                path: PathBuf::from(&self.file.path),
                line: self.file.location(declaration.offset).line,
                type_name: type_name.to_string(),
                constructor: constructor.name.clone(),
                argument: argument.clone(),
            });
        }
        for argument in plan.unmatched {
            self.diagnostics.push(
                UnmatchedArgumentDiagnostic {
                    context: SourceContext::at(self.file, declaration.offset),
                    type_name: type_name.to_string(),
                    constructor: constructor.name.clone(),
                    argument,
                }
                .into(),
            );
        }

        let container = canonical_container_name(
            annotations.container.as_deref().unwrap_or_default(),
            &self.settings.default_container,
        );
        let registration = Registration {
            name: annotations.name.clone().unwrap_or_else(|| type_name.to_string()),
            scope: annotations
                .scope
                .clone()
                .unwrap_or_else(|| self.settings.default_scope.clone()),
            register_as: annotations.register_as.clone(),
            tag: annotations.tag.clone(),
            factory: plan.factory,
            implements: annotations
                .implements
                .iter()
                .map(|entry| ImplementedType {
                    type_name: entry.type_name.clone(),
                    tag: entry.tag.clone(),
                })
                .collect(),
            resolving_properties: properties,
            storyboard_instantiatable: annotations.storyboard_instantiatable,
        };
        Ok(Some((container, registration)))
    }

    fn skip(&mut self, declaration: &Declaration, resolution: Resolution) {
        let context = SourceContext::at(self.file, declaration.offset);
        let type_name = declaration.name.clone();
        let diagnostic = match resolution {
            Resolution::Ambiguous(candidates) => AmbiguousConstructorDiagnostic {
                context,
                type_name,
                candidates,
            }
            .into(),
            _ => MissingConstructorDiagnostic { context, type_name }.into(),
        };
        self.diagnostics.push(diagnostic);
    }
}

/// Property injected after construction, when its doc says `@inject`.
fn resolving_property(declaration: &Declaration, docs: Option<&str>) -> Option<ResolvingProperty> {
    let annotations = Annotations::parse(docs?);
    annotations.inject.then(|| ResolvingProperty {
        name: declaration.name.clone(),
        resolve_as: annotations.inject_as,
        tag: annotations.tag,
    })
}

/// Declarations that own doc comments, in ascending offset order.
fn by_offset(declarations: &[Declaration]) -> Vec<&Declaration> {
    let mut sorted: Vec<&Declaration> = declarations
        .iter()
        .filter(|declaration| declaration.kind != DeclarationKind::Parameter)
        .collect();
    sorted.sort_by_key(|declaration| declaration.offset);
    sorted
}
