//! Report formatting and printing utilities.
//!
//! Diagnostics go to stderr in cargo style so `inspect` can keep stdout for
//! JSON. Separate from core logic to allow dipgen to be used as a library.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, GenerateSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::error::DipgenError;
use crate::diagnostics::{Diagnostic, Report};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    let mut stderr = io::stderr().lock();
    print_diagnostics_to(&result.diagnostics, verbose, &mut stderr);
    print_render_failures_to(&result.render_failures, &mut stderr);

    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Generate(summary) => {
            print_generate_summary_to(summary, result.source_files_checked, &mut stdout);
        }
        CommandSummary::Inspect(summary) => {
            let json = serde_json::to_string_pretty(&summary.model)
                .context("Failed to serialize the registration model")?;
            let _ = writeln!(stdout, "{}", json);
        }
        CommandSummary::Init(summary) => {
            if summary.created {
                let _ = writeln!(
                    stdout,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!("Created {}", CONFIG_FILE_NAME).green()
                );
            }
        }
    }
    Ok(())
}

/// Print every diagnostic when verbose, otherwise a one-line count.
pub fn print_diagnostics_to<W: Write>(diagnostics: &[Diagnostic], verbose: bool, writer: &mut W) {
    if diagnostics.is_empty() {
        return;
    }

    if verbose {
        let mut sorted: Vec<&Diagnostic> = diagnostics.iter().collect();
        sorted.sort_by(|a, b| {
            let (a, b) = (a.context(), b.context());
            (&a.file_path, a.line, a.col).cmp(&(&b.file_path, b.line, b.col))
        });
        let max_line_width = sorted
            .iter()
            .map(|d| d.context().line.to_string().len())
            .max()
            .unwrap_or(1);
        for diagnostic in sorted {
            print_diagnostic(diagnostic, writer, max_line_width);
        }
        return;
    }

    let skipped = diagnostics.iter().filter(|d| d.skips_declaration()).count();
    let dropped = diagnostics.len() - skipped;
    if skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} declaration(s) skipped (use {} for details)",
            "warning:".bold().yellow(),
            skipped,
            "-v".cyan()
        );
    }
    if dropped > 0 {
        let _ = writeln!(
            writer,
            "{} {} runtime argument(s) dropped (use {} for details)",
            "warning:".bold().yellow(),
            dropped,
            "-v".cyan()
        );
    }
}

pub fn print_render_failures_to<W: Write>(failures: &[(PathBuf, DipgenError)], writer: &mut W) {
    for (path, error) in failures {
        let _ = writeln!(
            writer,
            "{}: {}\n  {} {}",
            "error".bold().red(),
            error,
            "-->".blue(),
            path.display()
        );
    }
}

pub fn print_generate_summary_to<W: Write>(
    summary: &GenerateSummary,
    source_files: usize,
    writer: &mut W,
) {
    if summary.is_check {
        for path in &summary.stale {
            let _ = writeln!(
                writer,
                "{} {} is out of date",
                FAILURE_MARK.red(),
                path.display()
            );
        }
        if summary.stale.is_empty() {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                "Generated code is up to date".green()
            );
        } else {
            let _ = writeln!(
                writer,
                "\n{} {} file(s) out of date (run {})",
                FAILURE_MARK.red(),
                summary.stale.len(),
                "dipgen generate".cyan()
            );
        }
        return;
    }

    for path in &summary.written {
        let _ = writeln!(writer, "{} Wrote {}", SUCCESS_MARK.green(), path.display());
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} {} in {} {} from {} source {}",
            summary.registration_count,
            plural(summary.registration_count, "registration", "registrations"),
            summary.container_count,
            plural(summary.container_count, "container", "containers"),
            source_files,
            plural(source_files, "file", "files"),
        )
        .green()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_diagnostic<W: Write>(diagnostic: &Diagnostic, writer: &mut W, max_line_width: usize) {
    let ctx = diagnostic.context();

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        "warning".bold().yellow(),
        diagnostic.message(),
        diagnostic.rule().to_string().dimmed().cyan()
    );
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        ctx.file_path,
        ctx.line,
        ctx.col
    );

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        ctx.line.to_string().blue(),
        "|".blue(),
        ctx.source_line,
        width = max_line_width
    );

    // col is 1-based
    let prefix: String = ctx
        .source_line
        .chars()
        .take(ctx.col.saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".yellow(),
        width = max_line_width,
        padding = caret_padding
    );

    if let Some(hint) = diagnostic.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

// ============================================================
// Tests
// ============================================================
