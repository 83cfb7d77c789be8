pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use outfitter_core::config::{AppConfig, ConfigOverrides, LogFormat};

use commands::recommend::RecommendArgs;

#[derive(Debug, Parser)]
#[command(
    name = "outfitter",
    about = "Outfitter wardrobe recommendation CLI",
    long_about = "Rank outfit combinations from a wardrobe snapshot, inspect wardrobe coverage, and show effective configuration.",
    after_help = "Examples:\n  outfitter recommend --wardrobe wardrobe.json --occasion work --temperature 58\n  outfitter inspect --wardrobe wardrobe.json\n  outfitter config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Generate ranked outfit recommendations from a wardrobe JSON file")]
    Recommend(RecommendArgs),
    #[command(about = "Summarise wardrobe coverage per category and flag unusable items")]
    Inspect {
        #[arg(long, help = "Path to a JSON array of wardrobe items")]
        wardrobe: PathBuf,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => commands::config::run(),
        Command::Recommend(args) => {
            with_config("recommend", args.config_overrides(), |config| {
                commands::recommend::run(&args, config)
            })
        }
        Command::Inspect { wardrobe } => {
            with_config("inspect", ConfigOverrides::default(), |_config| {
                commands::inspect::run(&wardrobe)
            })
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn with_config(
    command: &str,
    overrides: ConfigOverrides,
    action: impl FnOnce(&AppConfig) -> commands::CommandResult,
) -> commands::CommandResult {
    let config = match commands::load_config(command, overrides) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    if let Err(error) = init_logging(&config) {
        eprintln!("{error:#}");
    }

    action(&config)
}

/// Logs go to stderr so stdout carries only the JSON payload.
fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let installed = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|error| anyhow!("failed to initialise logging: {error}"))
}
