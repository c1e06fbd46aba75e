//! Command-line orchestration for clean-folder.
//!
//! This module ties the library phases to terminal output:
//! - Configuration loading
//! - Dry-run planning
//! - Progress reporting while files are moved
//! - Summary or JSON report

use crate::config::{Config, ConfigError};
use crate::error::OrganizeError;
use crate::organizer::Organizer;
use crate::output::OutputFormatter;
use crate::report::OrganizeReport;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by the command line.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Organize(#[from] OrganizeError),

    #[error("Failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for one invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Scan and print the plan without changing anything.
    pub dry_run: bool,
    /// Print the report as JSON instead of tables.
    pub json: bool,
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

/// Runs the CLI on `dir_path`.
///
/// # Examples
///
/// ```no_run
/// use clean_folder::cli::{run_cli, RunOptions};
/// use std::path::Path;
///
/// let options = RunOptions { dry_run: true, ..Default::default() };
/// if let Err(e) = run_cli(Path::new("/path/to/directory"), &options) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(dir_path: &Path, options: &RunOptions) -> Result<(), CliError> {
    let config = Config::load(options.config_path.as_deref())?;
    let organizer = Organizer::from_config(&config)?;

    if options.dry_run {
        dry_run(&organizer, dir_path, options.json)
    } else {
        organize_directory(&organizer, dir_path, options.json)
    }
}

fn organize_directory(organizer: &Organizer, base_path: &Path, json: bool) -> Result<(), CliError> {
    if !json {
        OutputFormatter::info(&format!("Organizing contents of: {}", base_path.display()));
    }

    let scan = organizer.scan(base_path)?;
    let report = if json {
        organizer.apply(&scan, |_| {})?
    } else {
        let pb = OutputFormatter::create_progress_bar(scan.total_files() as u64);
        let report = organizer.apply(&scan, |path| {
            if let Some(name) = path.file_name() {
                pb.set_message(name.to_string_lossy().into_owned());
            }
            pb.inc(1);
        });
        pb.finish_and_clear();
        report?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &OrganizeReport) {
    if report.total_files() == 0 {
        OutputFormatter::info("No files found to organize.");
    } else {
        OutputFormatter::summary_table(report);
    }
    OutputFormatter::issues(report);

    if report.is_clean() {
        OutputFormatter::success("Organization complete!");
    } else {
        OutputFormatter::warning(&format!(
            "Organization complete with {} issue(s). See above.",
            report.issues.len()
        ));
    }
}

fn dry_run(organizer: &Organizer, base_path: &Path, json: bool) -> Result<(), CliError> {
    let scan = organizer.scan(base_path)?;
    let plan = organizer.plan(&scan);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        OutputFormatter::info("No files found to organize.");
        return Ok(());
    }

    OutputFormatter::plan(&plan);
    println!("\nTotal files: {}", plan.len());
    if !scan.folders.is_empty() {
        println!("Folders that would be removed if emptied: {}", scan.folders.len());
    }
    OutputFormatter::success("Dry run complete. No files were modified.");
    Ok(())
}
