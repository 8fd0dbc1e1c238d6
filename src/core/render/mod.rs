//! Rendering the model into generated Swift.
//!
//! Templates are minijinja templates embedded in the binary. A templates
//! directory can replace any of them by file name, e.g. a
//! `partials/registrations.swift` there overrides only the registration block.
//!
//! ## Module Structure
//!
//! - `context`: [`ArtifactContext`], the model as templates see it
//! - `filters`: `title_case`, `camel_case` and `comma_join`

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use minijinja::Environment;
use serde::{Deserialize, Serialize};

use crate::core::error::DipgenError;
use crate::core::model::Model;

pub mod context;
pub mod filters;

pub use context::ArtifactContext;

pub const COMBINED_TEMPLATE: &str = "combined.swift";
pub const CONTAINER_TEMPLATE: &str = "container.swift";
pub const INDEX_TEMPLATE: &str = "index.swift";

/// File name of the index artifact in per-container mode.
pub const INDEX_FILE_NAME: &str = "Dip.generated.swift";

const TEMPLATES: &[(&str, &str)] = &[
    (COMBINED_TEMPLATE, include_str!("templates/combined.swift")),
    (CONTAINER_TEMPLATE, include_str!("templates/container.swift")),
    (INDEX_TEMPLATE, include_str!("templates/index.swift")),
    (
        "partials/header.swift",
        include_str!("templates/partials/header.swift"),
    ),
    (
        "partials/registrations.swift",
        include_str!("templates/partials/registrations.swift"),
    ),
    (
        "partials/bootstrap.swift",
        include_str!("templates/partials/bootstrap.swift"),
    ),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// One file with every container.
    #[default]
    Combined,
    /// One file per container plus an index with `configureAll`/`bootstrapAll`.
    PerContainer,
}

/// A rendered file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Default)]
pub struct RenderOutcome {
    pub artifacts: Vec<Artifact>,
    /// Artifacts that failed to render. The others are still produced.
    pub failures: Vec<(PathBuf, DipgenError)>,
}

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Engine with the embedded templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(false);
        filters::register(&mut env);

        for &(name, source) in TEMPLATES {
            // Embedded templates are checked by the tests below.
            if let Err(e) = env.add_template(name, source) {
                debug_assert!(false, "embedded template {} is invalid: {}", name, e);
            }
        }
        Self { env }
    }

    /// Engine whose templates are overridden by same-named files in `dir`.
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        let mut engine = Self::new();
        for &(name, _) in TEMPLATES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template: {}", path.display()))?;
            engine
                .env
                .add_template_owned(name, source)
                .map_err(|source| DipgenError::Render {
                    template: path.display().to_string(),
                    source,
                })?;
        }
        Ok(engine)
    }

    pub fn render(&self, name: &str, context: &ArtifactContext) -> Result<String, DipgenError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|_| DipgenError::UnknownTemplate(name.to_string()))?;
        let mut rendered = template
            .render(context)
            .map_err(|source| DipgenError::Render {
                template: name.to_string(),
                source,
            })?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }

    /// Render every artifact of `mode`.
    ///
    /// In combined mode the artifact is written to `output`. In per-container
    /// mode `output` names the directory, or a `.swift` file whose directory
    /// is used.
    pub fn render_model(&self, model: &Model, mode: RenderMode, output: &Path) -> RenderOutcome {
        let jobs: Vec<(PathBuf, &str, ArtifactContext)> = match mode {
            RenderMode::Combined => vec![(
                output.to_path_buf(),
                COMBINED_TEMPLATE,
                ArtifactContext::combined(model),
            )],
            RenderMode::PerContainer => {
                let dir = output_dir(output);
                let mut jobs: Vec<_> = model
                    .containers
                    .values()
                    .map(|container| {
                        (
                            dir.join(container_file_name(&container.name)),
                            CONTAINER_TEMPLATE,
                            ArtifactContext::container(model, container),
                        )
                    })
                    .collect();
                jobs.push((
                    dir.join(INDEX_FILE_NAME),
                    INDEX_TEMPLATE,
                    ArtifactContext::index(model),
                ));
                jobs
            }
        };

        let mut outcome = RenderOutcome::default();
        for (path, template, context) in jobs {
            match self.render(template, &context) {
                Ok(contents) => outcome.artifacts.push(Artifact { path, contents }),
                Err(e) => outcome.failures.push((path, e)),
            }
        }
        outcome
    }
}

/// `listModule` -> `ListModuleContainer.generated.swift`.
pub fn container_file_name(container: &str) -> String {
    format!("{}Container.generated.swift", filters::title_case(container))
}

fn output_dir(output: &Path) -> PathBuf {
    if output.extension().is_some_and(|ext| ext == "swift") {
        output.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        output.to_path_buf()
    }
}
