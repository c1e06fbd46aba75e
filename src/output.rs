//! Output formatting and styling module.
//!
//! Centralizes everything the command line prints: colored status lines, the
//! progress bar shown while files are moved, the dry-run plan and the final
//! summary table.

use crate::file_category::Category;
use crate::file_organizer::PlannedAction;
use crate::report::OrganizeReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeMap, BTreeSet};

/// Manages CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use clean_folder::output::OutputFormatter;
    /// OutputFormatter::error("Invalid root /tmp/missing: not a directory");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for `total` files.
    ///
    /// Returns a hidden bar when the template cannot be applied, so callers
    /// never have to handle a styling failure.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        match ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            Ok(style) => {
                pb.set_style(style.progress_chars("█▓░"));
                pb
            }
            Err(_) => ProgressBar::hidden(),
        }
    }

    /// Prints the per-category counts and the extension sets of a report.
    pub fn summary_table(report: &OrganizeReport) {
        Self::header("SUMMARY");
        Self::counts_table(&report.category_counts(), report.total_files());
        Self::extensions(&report.known_extensions, &report.unknown_extensions);

        if !report.removed_dirs.is_empty() {
            println!(
                "Removed {} empty {}",
                report.removed_dirs.len(),
                if report.removed_dirs.len() == 1 {
                    "folder"
                } else {
                    "folders"
                }
            );
        }
        if !report.excluded.is_empty() {
            println!("Left {} excluded file(s) in place", report.excluded.len());
        }
    }

    fn counts_table(counts: &BTreeMap<Category, usize>, total_files: usize) {
        let width = counts
            .keys()
            .map(|c| c.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (category, count) in counts {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                count.to_string().green(),
                file_word,
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            if total_files == 1 { "file" } else { "files" },
            width = width
        );
    }

    fn extensions(known: &BTreeSet<String>, unknown: &BTreeSet<String>) {
        let join = |set: &BTreeSet<String>| {
            if set.is_empty() {
                "-".to_string()
            } else {
                set.iter().cloned().collect::<Vec<_>>().join(", ")
            }
        };
        println!("Known extensions:   {}", join(known));
        println!("Unknown extensions: {}", join(unknown));
    }

    /// Prints the non-fatal issues of a run.
    pub fn issues(report: &OrganizeReport) {
        if report.issues.is_empty() {
            return;
        }
        Self::header("ISSUES");
        for issue in &report.issues {
            Self::warning(&issue.to_string());
        }
    }

    /// Prints a dry-run plan.
    pub fn plan(actions: &[PlannedAction]) {
        Self::dry_run_notice("Files would be organized as follows:");
        for action in actions {
            match action {
                PlannedAction::Move { from, to, .. } => {
                    println!(" - {}", from.display());
                    println!("   → {}", to.display());
                }
                PlannedAction::Extract { archive, folder } => {
                    println!(" - {}", archive.display());
                    println!("   ⇲ unpack into {}", folder.display());
                }
            }
        }
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
