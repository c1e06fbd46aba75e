use clap::Parser;
use clean_folder::cli::{RunOptions, run_cli};
use clean_folder::output::OutputFormatter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clean-folder")]
#[command(about = "Sort a folder into images, audio, documents, video, archives and other", long_about = None)]
#[command(version)]
struct Cli {
    /// Folder to organize
    path: PathBuf,

    /// Show what would happen without changing anything
    #[arg(long)]
    dry_run: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = RunOptions {
        dry_run: cli.dry_run,
        json: cli.json,
        config_path: cli.config,
    };

    match run_cli(&cli.path, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
