mod commands;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crewcal", version)]
#[command(about = "Extract flight duties from an airline crew schedule and save them as iCalendar")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a crewcal JSON schedule file to an iCalendar file
    Convert {
        /// JSON schedule (".json" is tried if the path does not exist)
        json: PathBuf,

        /// iCalendar file to write (".ics" is added if there is no extension)
        ical: PathBuf,

        /// Overwrite the iCalendar file if it already exists
        #[arg(short, long)]
        overwrite: bool,
    },
    /// Extract a schedule from a crew schedule document
    Extract {
        /// Schedule document, usually a PDF
        source: PathBuf,

        /// iCalendar (or JSON with --to-json) file to write
        target: PathBuf,

        /// Save the extracted crewcal JSON instead of iCalendar
        #[arg(short = 'j', long)]
        to_json: bool,

        /// Overwrite the target file if it already exists
        #[arg(short, long)]
        overwrite: bool,

        /// Also write hotel vCards, to DIR or the configured hotel_dir
        #[arg(long, value_name = "DIR", num_args = 0..=1)]
        hotels: Option<Option<PathBuf>>,
    },
    /// Print a JSON schedule file and its duties
    Show {
        json: PathBuf,
    },
    /// Show the config file location, creating a template if missing
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Convert {
            json,
            ical,
            overwrite,
        } => commands::convert::run(&json, &ical, overwrite),
        Commands::Extract {
            source,
            target,
            to_json,
            overwrite,
            hotels,
        } => commands::extract::run(&source, &target, to_json, overwrite, hotels).await,
        Commands::Show { json } => commands::show::run(&json),
        Commands::Config => commands::config::run(),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("crewcal={level}").parse()?)
                .add_directive(format!("crewcal_core={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}
