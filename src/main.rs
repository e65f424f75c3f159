use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;

use m2sweep::{
    classify, delete_marked, discover_files, parse_cutoff, prune_versions, report, DecisionLedger,
    PendingVersions, SweepConfig,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scan a local Maven repository and delete stale, duplicate, or unwanted artifacts",
    long_about = None
)]
struct Args {
    /// Path to the local Maven repository (defaults to ~/.m2/repository)
    #[arg(long, short)]
    path: Option<PathBuf>,

    /// Delete version directories downloaded on or before this date
    #[arg(long, value_name = "MM-DD-YYYY")]
    downloaded_before: Option<String>,

    /// Delete version directories downloaded on or after this date
    #[arg(long, value_name = "MM-DD-YYYY")]
    downloaded_after: Option<String>,

    /// Delete version directories last accessed on or before this date
    #[arg(long, value_name = "MM-DD-YYYY")]
    accessed_before: Option<String>,

    /// Delete version directories last accessed on or after this date
    #[arg(long, value_name = "MM-DD-YYYY")]
    accessed_after: Option<String>,

    /// Comma-separated groupId:artifactId entries exempt from every rule
    #[arg(long, value_delimiter = ',', value_name = "G:A,...")]
    ignore_artifacts: Vec<String>,

    /// Comma-separated groupIds exempt from every rule
    #[arg(long, value_delimiter = ',', value_name = "GROUP,...")]
    ignore_groups: Vec<String>,

    /// Comma-separated groupId:artifactId entries whose whole artifact
    /// directory is deleted
    #[arg(long, value_delimiter = ',', value_name = "G:A,...")]
    force_artifacts: Vec<String>,

    /// Comma-separated groupIds whose whole group directory is deleted
    #[arg(long, value_delimiter = ',', value_name = "GROUP,...")]
    force_groups: Vec<String>,

    /// Delete every snapshot version, even the latest
    #[arg(long)]
    delete_all_snapshots: bool,

    /// Delete -sources.jar files for all artifacts
    #[arg(long)]
    delete_source: bool,

    /// Delete -javadoc.jar files for all artifacts
    #[arg(long)]
    delete_javadoc: bool,

    /// Report the deletion plan without removing anything
    #[arg(long)]
    dry_run: bool,

    /// Keep old versions; apply only the explicitly configured rules
    #[arg(long)]
    retain_old: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;
    run(&config)
}

fn build_config(args: &Args) -> Result<SweepConfig> {
    let repo_root = match &args.path {
        Some(path) => path.clone(),
        None => dirs::home_dir()
            .context("Could not determine the home directory; pass --path explicitly")?
            .join(".m2")
            .join("repository"),
    };
    if !repo_root.is_dir() {
        bail!(
            "Valid Maven repository could not be found at {}. Please provide a valid --path.",
            repo_root.display()
        );
    }

    let mut config = SweepConfig::new(repo_root);
    if let Some(date) = &args.downloaded_before {
        config.downloaded_before = Some(parse_cutoff(date)?);
    }
    if let Some(date) = &args.downloaded_after {
        config.downloaded_after = Some(parse_cutoff(date)?);
    }
    if let Some(date) = &args.accessed_before {
        config.accessed_before = Some(parse_cutoff(date)?);
    }
    if let Some(date) = &args.accessed_after {
        config.accessed_after = Some(parse_cutoff(date)?);
    }
    config.ignore_artifacts = to_set(&args.ignore_artifacts);
    config.ignore_groups = to_set(&args.ignore_groups);
    config.force_artifacts = to_set(&args.force_artifacts);
    config.force_groups = to_set(&args.force_groups);
    config.delete_all_snapshots = args.delete_all_snapshots;
    config.delete_source = args.delete_source;
    config.delete_javadoc = args.delete_javadoc;
    config.dry_run = args.dry_run;
    config.retain_old = args.retain_old;
    Ok(config)
}

fn to_set(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn run(config: &SweepConfig) -> Result<()> {
    // Without source/javadoc targeting, classifying one .pom per version
    // directory is enough; directory-level deletions sweep the rest.
    let poms_only = !config.delete_source && !config.delete_javadoc;
    let files = discover_files(&config.repo_root, poms_only);

    let mut ledger = DecisionLedger::new();
    let mut pending = PendingVersions::new();
    for file in &files {
        classify(file, config, &mut ledger, &mut pending);
    }
    prune_versions(pending, &mut ledger);

    report::print_plan(&ledger);

    if config.dry_run {
        report::print_dry_run_notice();
    } else {
        let failures = delete_marked(&ledger);
        report::print_outcome(&failures);
    }

    Ok(())
}
