//! Operator-facing rendering of the sweep plan and its outcome.

use colored::Colorize;
use humansize::{format_size, BINARY};
use std::path::PathBuf;

use crate::rules::DecisionLedger;
use crate::scan::path_size;

/// Print the deletion plan and skip summary, grouped by reason with paths in
/// sorted order. Sizes are measured here, before anything is removed.
pub fn print_plan(ledger: &DecisionLedger) {
    println!("{}", "Files to be deleted".bold());
    let mut total_bytes: u64 = 0;
    let mut any_delete = false;
    for (reason, paths) in ledger.deletes() {
        if paths.is_empty() {
            continue;
        }
        any_delete = true;
        let bucket_bytes: u64 = paths.iter().map(|p| path_size(p)).sum();
        total_bytes += bucket_bytes;
        println!(
            "\n{} ({}):",
            reason.label().bold(),
            format_size(bucket_bytes, BINARY)
        );
        for path in paths {
            println!("  {}", path.display());
        }
    }
    if !any_delete {
        println!("  (nothing)");
    }

    println!("\n{}", "Files skipped".bold());
    let mut any_skip = false;
    for (reason, paths) in ledger.skips() {
        if paths.is_empty() {
            continue;
        }
        any_skip = true;
        println!("\n{}:", reason.label().bold());
        for path in paths {
            println!("  {}", path.display());
        }
    }
    if !any_skip {
        println!("  (nothing)");
    }

    println!(
        "\nTotal reclaimable: {}",
        format_size(total_bytes, BINARY).green().bold()
    );
}

/// Print the post-deletion summary and any paths that could not be removed.
pub fn print_outcome(failures: &[PathBuf]) {
    if failures.is_empty() {
        println!("{}", "Deletion completed.".green());
        return;
    }
    println!("{}", "Deletion completed with errors.".red());
    println!("{}", "Files having errors in deletion:".bold());
    for path in failures {
        println!("  {}", path.display());
    }
}

pub fn print_dry_run_notice() {
    println!("{}", "Dry run: no files were deleted.".yellow());
}
