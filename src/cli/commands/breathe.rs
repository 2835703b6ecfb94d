//! Breathing session command.

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;

use super::{achievement_lines, Context};
use crate::cli::args::{BreatheArgs, OutputFormat};
use crate::error::SereneError;
use crate::features::breathing::{
    BreathEvent, BreathingPattern, PatternId, Phase, CYCLES_PER_SESSION,
};
use crate::features::stats::Achievement;
use crate::output::to_json;

/// Outcome of a breathing session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BreatheReport {
    completed: bool,
    pattern: PatternId,
    timings: BreathingPattern,
    cycles: u32,
    duration_seconds: u32,
    today_sessions: u32,
    breathing_sessions: u32,
    streak_days: u32,
    new_achievements: Vec<Achievement>,
}

/// Guide one breathing session with the selected (or given) pattern.
///
/// # Errors
///
/// Returns an error for an unknown pattern or if state cannot be saved.
pub fn breathe(ctx: &mut Context, args: BreatheArgs) -> Result<String, SereneError> {
    if let Some(name) = args.pattern.as_deref() {
        let id: PatternId = name.parse()?;
        ctx.store.select_pattern(id);
    }
    let interval = ctx.tick_interval(args.tick_ms);
    let live = ctx.format == OutputFormat::Pretty && std::io::stdout().is_terminal();

    ctx.store.start_breathing();
    let pattern_id = ctx.store.breathing().pattern_id();
    let timings = *ctx.store.breathing().pattern();
    if live {
        println!(
            "🌬️ {} ({})",
            pattern_id.display_name().bold(),
            timings.label().cyan()
        );
        print_phase(Phase::Inhale, timings.inhale(), 1);
    }

    let completed = loop {
        std::thread::sleep(interval);
        match ctx.store.tick_breathing() {
            BreathEvent::PhaseChanged { to, cycle_index, .. } => {
                if live {
                    let breathing = ctx.store.breathing();
                    print_phase(to, breathing.pattern().duration(to), cycle_index);
                }
            }
            BreathEvent::SessionCompleted { .. } => break true,
            BreathEvent::Idle => break false,
            BreathEvent::Continue => {}
        }
    };

    ctx.save()?;

    let today = ctx.store.today();
    let report = BreatheReport {
        completed,
        pattern: pattern_id,
        timings,
        cycles: CYCLES_PER_SESSION,
        duration_seconds: timings.cycle_seconds() * CYCLES_PER_SESSION,
        today_sessions: ctx
            .store
            .history()
            .get(today)
            .map_or(0, |r| r.breathing_sessions),
        breathing_sessions: ctx.store.breathing_session_count(),
        streak_days: ctx.store.streak_days(),
        new_achievements: ctx.store.take_new_achievements(),
    };

    match ctx.format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(render_report(&report)),
    }
}

fn print_phase(phase: Phase, seconds: u32, cycle_index: u32) {
    println!(
        "  {} {:<12} {}",
        format!("[{cycle_index}/{CYCLES_PER_SESSION}]").dimmed(),
        phase.instruction(),
        format!("{seconds}s").dimmed()
    );
}

fn render_report(report: &BreatheReport) -> String {
    let mut output = Vec::new();

    if report.completed {
        output.push(
            format!(
                "✅ Breathing session complete: {} ({})",
                report.pattern.display_name(),
                report.timings.label()
            )
            .green()
            .to_string(),
        );
    } else {
        output.push("⏹️ Breathing session stopped".to_string());
    }
    output.push(format!(
        "   Cycles:     {} ({}s)",
        report.cycles, report.duration_seconds
    ));
    output.push(format!(
        "   Today:      {} session{}",
        report.today_sessions,
        plural(report.today_sessions)
    ));
    output.push(format!(
        "   All time:   {} session{}",
        report.breathing_sessions,
        plural(report.breathing_sessions)
    ));
    output.push(format!(
        "   Streak:     {} day{}",
        report.streak_days,
        plural(report.streak_days)
    ));

    let unlocked = achievement_lines(&report.new_achievements);
    if !unlocked.is_empty() {
        output.push(String::new());
        output.extend(unlocked);
    }

    output.join("\n")
}

const fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report() {
        colored::control::set_override(false);
        let report = BreatheReport {
            completed: true,
            pattern: PatternId::Relax,
            timings: PatternId::Relax.builtin().unwrap(),
            cycles: CYCLES_PER_SESSION,
            duration_seconds: 95,
            today_sessions: 2,
            breathing_sessions: 11,
            streak_days: 1,
            new_achievements: vec![Achievement::Breaths10],
        };
        let output = render_report(&report);

        assert!(output.contains("complete: 4-7-8 Relaxing Breath (4-7-8)"));
        assert!(output.contains("Today:      2 sessions"));
        assert!(output.contains("Streak:     1 day\n"));
        assert!(output.contains("Steady Breather"));
    }
}
