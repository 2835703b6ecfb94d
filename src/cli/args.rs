use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "serene")]
#[command(about = "A meditation timer and breathing practice tracker for the terminal")]
#[command(long_about = "serene - meditation timer and breathing practice

Runs timed meditation sessions and paced breathing exercises, and keeps
daily statistics, streaks and achievements between runs.

QUICK START:
  serene timer 10m          Meditate for ten minutes
  serene breathe            Five cycles of the selected breathing pattern
  serene breathe -p relax   Five cycles of 4-7-8 breathing
  serene stats              Today, streak and totals at a glance

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  serene <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to the config file's general.default_output.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and serene.db (default: ~/.serene)
    #[arg(long, global = true, env = "SERENE_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a meditation timer
    ///
    /// Counts down the given duration, one tick per second. Every elapsed
    /// second counts toward today's total, even if the session is cut short.
    ///
    /// # Examples
    ///
    ///   serene timer              Use the last duration (default 10 minutes)
    ///   serene timer 25m          Twenty-five minutes
    ///   serene timer 1h30m        An hour and a half
    ///   serene timer 20           Bare numbers are minutes
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// Run a paced breathing session
    ///
    /// Guides five cycles of inhale, hold, exhale and hold. Zero-length
    /// holds are skipped. Completing all five cycles records the session.
    ///
    /// # Examples
    ///
    ///   serene breathe            Use the selected pattern
    ///   serene breathe -p box     Box breathing (4-4-4-4)
    ///   serene b -p custom        Your own pattern
    #[command(alias = "b")]
    Breathe(BreatheArgs),

    /// List, inspect and select breathing patterns
    #[command(alias = "p")]
    Pattern(PatternArgs),

    /// Show practice statistics
    ///
    /// Today's time, streaks, weekly chart, activity heatmap and
    /// achievements. Defaults to the summary.
    #[command(alias = "s")]
    Stats(StatsArgs),

    /// View or change settings
    ///
    /// Defaults to showing current settings.
    Settings(SettingsArgs),

    /// Generate shell completions
    ///
    /// Outputs a completion script for the specified shell.
    ///
    /// Example: serene completions zsh > ~/.zsh/completions/_serene
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },

    /// Delete all saved practice data
    ///
    /// Removes statistics, achievements and settings. The config file is
    /// left alone. Requires --force.
    Reset {
        /// Confirm deletion
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Arguments for the meditation timer.
#[derive(Args, Debug)]
pub struct TimerArgs {
    /// Session length (e.g., 10m, 1h30m, 90s, 20)
    pub duration: Option<String>,

    /// Milliseconds per tick (default from config, 1000)
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// End the session early after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub stop_after: Option<u32>,
}

/// Arguments for a breathing session.
#[derive(Args, Debug)]
pub struct BreatheArgs {
    /// Pattern to use (box, relax, calm, coherent, energize, custom)
    ///
    /// The choice is remembered for later sessions.
    #[arg(long, short = 'p')]
    pub pattern: Option<String>,

    /// Milliseconds per tick (default from config, 1000)
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,
}

/// Arguments for breathing patterns.
#[derive(Args)]
pub struct PatternArgs {
    #[command(subcommand)]
    pub command: Option<PatternCommands>,
}

/// Breathing pattern subcommands.
#[derive(Subcommand)]
pub enum PatternCommands {
    /// List all patterns
    #[command(alias = "ls")]
    List,

    /// Show one pattern's timings
    Show {
        /// Pattern name
        pattern: String,
    },

    /// Select the pattern for future sessions
    Select {
        /// Pattern name
        pattern: String,
    },

    /// Define the custom pattern
    ///
    /// Inhale and exhale must be at least one second; holds may be zero.
    /// No phase may exceed 60 seconds.
    ///
    /// Example: serene pattern custom --inhale 4 --hold 4 --exhale 6
    Custom {
        /// Inhale seconds
        #[arg(long)]
        inhale: u32,

        /// Hold seconds after inhaling
        #[arg(long, default_value = "0")]
        hold: u32,

        /// Exhale seconds
        #[arg(long)]
        exhale: u32,

        /// Hold seconds after exhaling
        #[arg(long, default_value = "0")]
        hold_after: u32,

        /// Also select the custom pattern
        #[arg(long, short = 's')]
        select: bool,
    },
}

/// Arguments for statistics.
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Today, streak and all-time totals
    Summary,

    /// Meditation minutes for the last seven days
    Week,

    /// Twelve-week activity heatmap
    Heatmap,

    /// Earned and locked achievements
    Achievements,

    /// Breathing sessions by pattern
    Patterns,
}

/// Arguments for settings.
#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Set the daily meditation goal
    Goal {
        /// Minutes per day (0 turns the goal off)
        minutes: u32,
    },

    /// Set the color theme
    Theme {
        /// light, dark or system
        theme: String,
    },

    /// Set the background sound
    Sound {
        /// none, rain, ocean, forest or white-noise
        sound: String,

        /// Volume from 0.0 to 1.0
        #[arg(long)]
        volume: Option<f32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_timer_command() {
        let cli = Cli::try_parse_from(["serene", "timer", "25m"]).unwrap();
        match cli.command {
            Commands::Timer(args) => {
                assert_eq!(args.duration.as_deref(), Some("25m"));
                assert!(args.tick_ms.is_none());
            }
            _ => panic!("Expected Timer command"),
        }
    }

    #[test]
    fn test_cli_timer_alias_and_flags() {
        let cli =
            Cli::try_parse_from(["serene", "t", "--tick-ms", "0", "--stop-after", "30"]).unwrap();
        match cli.command {
            Commands::Timer(args) => {
                assert!(args.duration.is_none());
                assert_eq!(args.tick_ms, Some(0));
                assert_eq!(args.stop_after, Some(30));
            }
            _ => panic!("Expected Timer command"),
        }
    }

    #[test]
    fn test_cli_breathe_pattern() {
        let cli = Cli::try_parse_from(["serene", "breathe", "-p", "relax"]).unwrap();
        match cli.command {
            Commands::Breathe(args) => assert_eq!(args.pattern.as_deref(), Some("relax")),
            _ => panic!("Expected Breathe command"),
        }
    }

    #[test]
    fn test_cli_pattern_custom() {
        let cli = Cli::try_parse_from([
            "serene", "pattern", "custom", "--inhale", "4", "--exhale", "6", "--select",
        ])
        .unwrap();
        match cli.command {
            Commands::Pattern(PatternArgs {
                command:
                    Some(PatternCommands::Custom {
                        inhale,
                        hold,
                        exhale,
                        hold_after,
                        select,
                    }),
            }) => {
                assert_eq!((inhale, hold, exhale, hold_after), (4, 0, 6, 0));
                assert!(select);
            }
            _ => panic!("Expected Pattern Custom command"),
        }
    }

    #[test]
    fn test_cli_pattern_custom_requires_exhale() {
        let result = Cli::try_parse_from(["serene", "pattern", "custom", "--inhale", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_stats_defaults_to_none() {
        let cli = Cli::try_parse_from(["serene", "stats"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats(StatsArgs { command: None })));
    }

    #[test]
    fn test_cli_stats_heatmap() {
        let cli = Cli::try_parse_from(["serene", "s", "heatmap"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Stats(StatsArgs {
                command: Some(StatsCommands::Heatmap)
            })
        ));
    }

    #[test]
    fn test_cli_settings_sound_volume() {
        let cli = Cli::try_parse_from(["serene", "settings", "sound", "rain", "--volume", "0.3"])
            .unwrap();
        match cli.command {
            Commands::Settings(SettingsArgs {
                command: Some(SettingsCommands::Sound { sound, volume }),
            }) => {
                assert_eq!(sound, "rain");
                assert_eq!(volume, Some(0.3));
            }
            _ => panic!("Expected Settings Sound command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "serene",
            "stats",
            "--output",
            "json",
            "--data-dir",
            "/tmp/serene-test",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/serene-test")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_output_unset() {
        let cli = Cli::try_parse_from(["serene", "stats"]).unwrap();
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_reset_force() {
        let cli = Cli::try_parse_from(["serene", "reset", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Reset { force: true }));
    }

    #[test]
    fn test_cli_invalid_output_format() {
        let result = Cli::try_parse_from(["serene", "stats", "-o", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_unknown_command() {
        let result = Cli::try_parse_from(["serene", "levitate"]);
        assert!(result.is_err());
    }
}
