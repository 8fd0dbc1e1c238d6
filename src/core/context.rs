//! The generation pipeline: configuration, scanning, per-file building and
//! the merge into one [`Model`].

use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        build::{BuildSettings, FileOutcome, process_file},
        error::DipgenError,
        file_scanner::scan_files,
        model::Model,
        render::{RenderOutcome, TemplateEngine},
        syntax::SyntaxProvider,
    },
    diagnostics::Diagnostic,
};

/// The merged model plus everything worth telling the user about it.
#[derive(Debug, Default)]
pub struct ModelOutcome {
    pub model: Model,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build and merge the registrations of `files`.
///
/// Files are parsed and built in parallel; the merge folds the results in
/// path order, so the first structural failure reported is deterministic.
pub fn build_model<P>(
    files: &BTreeSet<PathBuf>,
    provider: &P,
    settings: &BuildSettings,
) -> Result<ModelOutcome, DipgenError>
where
    P: SyntaxProvider + ?Sized,
{
    let files: Vec<&PathBuf> = files.iter().collect();
    let results: Vec<Result<FileOutcome, DipgenError>> = files
        .par_iter()
        .map(|path| process_file(&provider.parse(path)?, settings))
        .collect();

    let mut outcome = ModelOutcome::default();
    for result in results {
        let file = result?;
        outcome.model.merge(file.partial);
        outcome.model.add_imports(file.imports);
        outcome.diagnostics.extend(file.diagnostics);
    }
    Ok(outcome)
}

/// Settings and inputs of one `generate`/`inspect` run.
///
/// Configuration priority, highest first: CLI arguments, `.dipgenrc.json`,
/// built-in defaults.
pub struct GenerateContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory the source files were scanned from.
    pub source_root: PathBuf,

    /// Where artifacts go, see [`TemplateEngine::render_model`].
    pub output: PathBuf,

    pub templates_dir: Option<PathBuf>,

    /// Swift sources in path order.
    pub files: BTreeSet<PathBuf>,

    pub verbose: bool,
}

impl GenerateContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // The CLI source root decides where the config search starts.
        let start_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&start_dir)?;
        if verbose && !config_result.from_file() {
            eprintln!("Note: No .dipgenrc.json found, using default configuration");
        }
        let base_dir = config_result
            .base_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| start_dir.clone());
        let mut config = config_result.config;

        if let Some(mode) = common_args.mode {
            config.mode = mode;
        }
        if common_args.strict_arguments {
            config.strict_arguments = true;
        }

        let source_root = tidy(match &common_args.source_root {
            Some(root) => root.clone(),
            None => base_dir.join(&config.source_root),
        });
        let output = tidy(match &common_args.output {
            Some(output) => output.clone(),
            None => base_dir.join(&config.output),
        });
        let templates_dir = match &common_args.templates_dir {
            Some(dir) => Some(dir.clone()),
            None => config.templates_dir.as_ref().map(|dir| base_dir.join(dir)),
        }
        .map(tidy);

        let scan_result = scan_files(
            &source_root,
            &config.includes,
            &config.ignores,
            config.ignore_generated_files,
            verbose,
        );
        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            source_root,
            output,
            templates_dir,
            files: scan_result.files,
            verbose,
        })
    }

    pub fn build_settings(&self) -> BuildSettings {
        self.config.build_settings()
    }

    pub fn build_model<P>(&self, provider: &P) -> Result<ModelOutcome>
    where
        P: SyntaxProvider + ?Sized,
    {
        Ok(build_model(&self.files, provider, &self.build_settings())?)
    }

    pub fn template_engine(&self) -> Result<TemplateEngine> {
        match &self.templates_dir {
            Some(dir) => TemplateEngine::with_overrides(dir)
                .with_context(|| format!("Failed to load templates from {}", dir.display())),
            None => Ok(TemplateEngine::new()),
        }
    }

    pub fn render(&self, engine: &TemplateEngine, model: &Model) -> RenderOutcome {
        engine.render_model(model, self.config.mode, &self.output)
    }
}

/// Drop `.` components, so `./` roots do not leak into reported paths.
fn tidy(path: PathBuf) -> PathBuf {
    let tidied: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if tidied.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        tidied
    }
}
