//! Breathing pattern commands.

use colored::Colorize;

use super::Context;
use crate::cli::args::{OutputFormat, PatternCommands};
use crate::error::SereneError;
use crate::features::breathing::{BreathingPattern, PatternId};
use crate::output::{format_pattern, format_patterns, PatternSummary};

/// Execute pattern subcommands.
///
/// # Errors
///
/// Returns an error for unknown pattern names, invalid custom timings, or
/// if state cannot be saved.
pub fn pattern(ctx: &mut Context, cmd: Option<PatternCommands>) -> Result<String, SereneError> {
    match cmd {
        None | Some(PatternCommands::List) => {
            format_patterns(&PatternSummary::all(ctx.store.settings()), ctx.format)
        }
        Some(PatternCommands::Show { pattern }) => {
            let id: PatternId = pattern.parse()?;
            format_pattern(&PatternSummary::new(id, ctx.store.settings()), ctx.format)
        }
        Some(PatternCommands::Select { pattern }) => {
            let id: PatternId = pattern.parse()?;
            ctx.store.select_pattern(id);
            ctx.save()?;
            confirm(ctx, id, "selected")
        }
        Some(PatternCommands::Custom {
            inhale,
            hold,
            exhale,
            hold_after,
            select,
        }) => {
            let timings = BreathingPattern::new(inhale, hold, exhale, hold_after)?;
            ctx.store.set_custom_pattern(timings);
            if select {
                ctx.store.select_pattern(PatternId::Custom);
            }
            ctx.save()?;
            confirm(ctx, PatternId::Custom, "saved")
        }
    }
}

fn confirm(ctx: &Context, id: PatternId, verb: &str) -> Result<String, SereneError> {
    let summary = PatternSummary::new(id, ctx.store.settings());
    match ctx.format {
        OutputFormat::Json => format_pattern(&summary, ctx.format),
        OutputFormat::Pretty => Ok(format!(
            "{} {} ({}) {verb}",
            "✓".green(),
            summary.name.bold(),
            summary.timings.label().cyan()
        )),
    }
}
