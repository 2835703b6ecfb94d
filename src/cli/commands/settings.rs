//! Settings commands.

use super::Context;
use crate::cli::args::SettingsCommands;
use crate::error::SereneError;
use crate::features::audio::BackgroundSound;
use crate::output::format_settings;
use crate::store::Theme;

/// Execute settings subcommands. Every change prints the resulting
/// settings.
///
/// # Errors
///
/// Returns an error for unknown theme or sound names, or if state cannot be
/// saved.
pub fn settings(ctx: &mut Context, cmd: Option<SettingsCommands>) -> Result<String, SereneError> {
    match cmd {
        None | Some(SettingsCommands::Show) => {
            return format_settings(ctx.store.settings(), ctx.format);
        }
        Some(SettingsCommands::Goal { minutes }) => ctx.store.set_daily_goal(minutes),
        Some(SettingsCommands::Theme { theme }) => ctx.store.set_theme(Theme::parse(&theme)?),
        Some(SettingsCommands::Sound { sound, volume }) => {
            ctx.store.set_background_sound(BackgroundSound::parse(&sound)?);
            if let Some(volume) = volume {
                ctx.store.set_volume(volume);
            }
        }
    }

    ctx.save()?;
    format_settings(ctx.store.settings(), ctx.format)
}
