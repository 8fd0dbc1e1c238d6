use anyhow::Result;

use super::super::args::InspectCommand;
use super::{CommandResult, CommandSummary, InspectSummary};
use crate::core::{
    context::{GenerateContext, ModelOutcome},
    syntax::SourceKittenDumps,
};

/// Build the merged model without rendering it.
pub fn inspect(cmd: InspectCommand) -> Result<CommandResult> {
    let ctx = GenerateContext::new(&cmd.args.common)?;
    let ModelOutcome { model, diagnostics } = ctx.build_model(&SourceKittenDumps)?;

    Ok(CommandResult {
        summary: CommandSummary::Inspect(InspectSummary { model }),
        diagnostics,
        render_failures: Vec::new(),
        source_files_checked: ctx.files.len(),
    })
}
