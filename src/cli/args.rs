//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Write (or `--check`) the generated Dip registrations
//! - `inspect`: Print the merged registration model as JSON
//! - `init`: Initialize a dipgen configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::render::RenderMode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Generate(cmd)) => cmd.args.common.verbose,
            Some(Command::Inspect(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `generate` and `inspect`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Swift source root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Output file, or directory in per-container mode (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output layout (overrides config file)
    #[arg(long, value_enum)]
    pub mode: Option<RenderMode>,

    /// Fail when a runtime argument matches no constructor parameter
    #[arg(long)]
    pub strict_arguments: bool,

    /// Directory with template overrides (overrides config file)
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Render without writing; fail if the files on disk are out of date
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

#[derive(Debug, Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InspectCommand {
    #[command(flatten)]
    pub args: InspectArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate Dip container registrations from annotated Swift sources
    Generate(GenerateCommand),
    /// Print the registration model as JSON
    Inspect(InspectCommand),
    /// Initialize a new .dipgenrc.json configuration file
    Init,
}
