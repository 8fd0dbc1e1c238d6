use std::process::ExitCode;

use super::commands::{CommandResult, CommandSummary};

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, output is up to date
/// - `Failure` (1): `generate --check` found stale output
/// - `Error` (2): Command failed (structural failure, render failure, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

impl From<&CommandResult> for ExitStatus {
    fn from(result: &CommandResult) -> Self {
        if !result.render_failures.is_empty() {
            return ExitStatus::Error;
        }
        match &result.summary {
            CommandSummary::Generate(summary) if !summary.stale.is_empty() => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }
}
