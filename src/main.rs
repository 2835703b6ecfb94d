use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use serene::cli::args::{Cli, Commands};
use serene::cli::commands::{self, Context};
use serene::config::{ColorSetting, Config, Paths};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("serene=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("serene=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    if let Commands::Completions { shell, install } = &cli.command {
        return Ok(commands::completions(shell, *install)?);
    }

    let paths = match cli.data_dir {
        Some(dir) => Paths::with_root(dir),
        None => Paths::new()?,
    };
    let config = Config::load(&paths)?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let mut ctx = Context::open(&paths, config, format)
        .with_context(|| format!("could not open data directory {}", paths.root.display()))?;
    tracing::debug!(root = %paths.root.display(), ?format, "serene starting");

    let output = match cli.command {
        Commands::Timer(args) => commands::timer(&mut ctx, args)?,
        Commands::Breathe(args) => commands::breathe(&mut ctx, args)?,
        Commands::Pattern(args) => commands::pattern(&mut ctx, args.command)?,
        Commands::Stats(args) => commands::stats(&ctx, args.command)?,
        Commands::Settings(args) => commands::settings(&mut ctx, args.command)?,
        Commands::Reset { force } => commands::reset(&ctx, force)?,
        Commands::Completions { .. } => String::new(),
    };

    Ok(output)
}
