use std::fs;

use anyhow::{Context, Result};

use super::super::args::GenerateCommand;
use super::{CommandResult, CommandSummary, GenerateSummary};
use crate::core::{
    context::{GenerateContext, ModelOutcome},
    render::Artifact,
    syntax::SourceKittenDumps,
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = GenerateContext::new(&args.common)?;
    let engine = ctx.template_engine()?;

    let ModelOutcome { model, diagnostics } = ctx.build_model(&SourceKittenDumps)?;
    let rendered = ctx.render(&engine, &model);

    let mut summary = GenerateSummary {
        is_check: args.check,
        container_count: model.containers.len(),
        registration_count: model.registration_count(),
        ..Default::default()
    };

    for artifact in rendered.artifacts {
        let path = artifact.path.clone();
        if is_up_to_date(&artifact) {
            summary.unchanged.push(path);
        } else if args.check {
            summary.stale.push(path);
        } else {
            write_artifact(&artifact)?;
            summary.written.push(path);
        }
    }

    Ok(CommandResult {
        summary: CommandSummary::Generate(summary),
        diagnostics,
        render_failures: rendered.failures,
        source_files_checked: ctx.files.len(),
    })
}

fn is_up_to_date(artifact: &Artifact) -> bool {
    fs::read_to_string(&artifact.path).is_ok_and(|current| current == artifact.contents)
}

fn write_artifact(artifact: &Artifact) -> Result<()> {
    if let Some(parent) = artifact.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&artifact.path, &artifact.contents)
        .with_context(|| format!("Failed to write file: {}", artifact.path.display()))
}
