use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, generate::generate, init::init, inspect::inspect},
};

/// Dispatch to the command handler.
///
/// Returns `Err` when a command cannot run at all (config error, structural
/// failure of a source file, strict argument mismatch).
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Inspect(cmd)) => inspect(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
