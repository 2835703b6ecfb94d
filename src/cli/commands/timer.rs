//! Meditation timer command.

use std::io::{IsTerminal, Write};

use colored::Colorize;
use serde::Serialize;

use super::{achievement_lines, Context};
use crate::cli::args::{OutputFormat, TimerArgs};
use crate::error::SereneError;
use crate::features::stats::Achievement;
use crate::features::timer::{
    format_duration_mmss, format_seconds, parse_duration, render_progress_bar, SessionTimer,
    TickOutcome,
};
use crate::output::to_json;

/// Seconds between intermediate saves of a long session.
const CHECKPOINT_SECONDS: u32 = 60;

/// Outcome of a timer run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimerReport {
    completed: bool,
    duration_seconds: u32,
    elapsed_seconds: u32,
    today_seconds: u64,
    total_seconds: u64,
    session_count: u32,
    streak_days: u32,
    daily_goal_progress: f64,
    new_achievements: Vec<Achievement>,
}

/// Run a meditation session to completion or until `--stop-after`.
///
/// # Errors
///
/// Returns an error for an invalid duration or if state cannot be saved.
pub fn timer(ctx: &mut Context, args: TimerArgs) -> Result<String, SereneError> {
    let duration = match args.duration.as_deref() {
        Some(text) => parse_timer_duration(text)?,
        None => ctx.store.timer().duration_seconds(),
    };
    let interval = ctx.tick_interval(args.tick_ms);
    let live = ctx.format == OutputFormat::Pretty && std::io::stdout().is_terminal();

    ctx.store.start_timer(duration)?;
    tracing::debug!(duration, ?interval, "timer session running");

    let mut elapsed = 0u32;
    let completed = loop {
        if args.stop_after.is_some_and(|limit| elapsed >= limit) {
            ctx.store.reset_timer();
            break false;
        }

        std::thread::sleep(interval);
        let outcome = ctx.store.tick_timer();
        if live {
            draw_progress(ctx.store.timer())?;
        }

        match outcome {
            TickOutcome::Completed { .. } => {
                elapsed += 1;
                break true;
            }
            TickOutcome::Running => elapsed += 1,
            TickOutcome::Inactive => break false,
        }

        if elapsed % CHECKPOINT_SECONDS == 0 {
            ctx.store.pause_timer();
            ctx.save()?;
            ctx.store.resume_timer();
        }
    };
    if live {
        println!();
    }

    ctx.save()?;

    let report = TimerReport {
        completed,
        duration_seconds: duration,
        elapsed_seconds: elapsed,
        today_seconds: ctx.store.today_duration_seconds(),
        total_seconds: ctx.store.total_duration_seconds(),
        session_count: ctx.store.timer().completed_cycles(),
        streak_days: ctx.store.streak_days(),
        daily_goal_progress: ctx.store.daily_goal_progress(),
        new_achievements: ctx.store.take_new_achievements(),
    };

    match ctx.format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(render_report(&report, ctx.store.settings().daily_goal_minutes)),
    }
}

fn parse_timer_duration(text: &str) -> Result<u32, SereneError> {
    let invalid = || SereneError::InvalidInput(format!("invalid duration '{text}'"));
    let parsed = parse_duration(text).ok_or_else(invalid)?;
    u32::try_from(parsed.num_seconds()).map_err(|_| invalid())
}

fn draw_progress(timer: &SessionTimer) -> Result<(), SereneError> {
    let remaining = chrono::Duration::seconds(i64::from(timer.remaining_seconds()));
    let mut stdout = std::io::stdout().lock();
    write!(
        stdout,
        "\r🧘 {} {} ",
        format_duration_mmss(remaining).bold(),
        render_progress_bar(timer.progress(), 30).cyan()
    )?;
    stdout.flush()?;
    Ok(())
}

fn render_report(report: &TimerReport, daily_goal_minutes: u32) -> String {
    let mut output = Vec::new();

    if report.completed {
        output.push("✅ Session complete!".green().to_string());
    } else {
        output.push("⏹️ Session ended early".to_string());
    }
    output.push(format!(
        "   Meditated:  {}",
        format_seconds(u64::from(report.elapsed_seconds))
    ));
    output.push(format!("   Today:      {}", format_seconds(report.today_seconds)));
    output.push(format!(
        "   Streak:     {} day{}",
        report.streak_days,
        if report.streak_days == 1 { "" } else { "s" }
    ));
    if daily_goal_minutes > 0 {
        output.push(format!(
            "   Daily goal: {} {:.0}%",
            render_progress_bar(report.daily_goal_progress, 20),
            report.daily_goal_progress * 100.0
        ));
    }

    let unlocked = achievement_lines(&report.new_achievements);
    if !unlocked.is_empty() {
        output.push(String::new());
        output.extend(unlocked);
    }

    output.join("\n")
}
