//! Classification rules: decide, per discovered file, delete / skip / defer.
//!
//! Each file gets exactly one outcome, assigned by the first rule that fires:
//! reserved bookkeeping files are always kept, ignore lists beat forced
//! deletions, forced deletions beat date filters, and anything left over is
//! deferred to the version-pruning pass.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::coords::{self, Coordinate};
use crate::time::epoch_millis;

/// Repository/index bookkeeping files that must never be deleted.
const RESERVED_FILES: &[&str] = &[
    "repository.xml",
    "_maven.repositories",
    "_remote.repositories",
    "m2e-lastUpdated.properties",
    "resolver-status.properties",
];

/// Filename fragments marking metadata and download-state files.
const RESERVED_FRAGMENTS: &[&str] = &["maven-metadata-", ".jar.lastUpdated", ".pom.lastUpdated"];

/// Why a path is marked for deletion. Declaration order is both the rule
/// priority order and the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeleteReason {
    ForcedSnapshot,
    ForcedSource,
    ForcedJavadoc,
    AccessDate,
    DownloadDate,
    NonLatest,
    ForcedArtifact,
    ForcedGroup,
}

impl DeleteReason {
    pub const ALL: [DeleteReason; 8] = [
        DeleteReason::ForcedSnapshot,
        DeleteReason::ForcedSource,
        DeleteReason::ForcedJavadoc,
        DeleteReason::AccessDate,
        DeleteReason::DownloadDate,
        DeleteReason::NonLatest,
        DeleteReason::ForcedArtifact,
        DeleteReason::ForcedGroup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeleteReason::ForcedSnapshot => "forced-snapshot",
            DeleteReason::ForcedSource => "forced-source",
            DeleteReason::ForcedJavadoc => "forced-javadoc",
            DeleteReason::AccessDate => "access-date",
            DeleteReason::DownloadDate => "download-date",
            DeleteReason::NonLatest => "non-latest",
            DeleteReason::ForcedArtifact => "forced-artifact",
            DeleteReason::ForcedGroup => "forced-group",
        }
    }
}

/// Why a path is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    Reserved,
    IgnoredArtifact,
    IgnoredGroup,
    RetainOld,
    Latest,
}

impl SkipReason {
    pub const ALL: [SkipReason; 5] = [
        SkipReason::Reserved,
        SkipReason::IgnoredArtifact,
        SkipReason::IgnoredGroup,
        SkipReason::RetainOld,
        SkipReason::Latest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkipReason::Reserved => "reserved",
            SkipReason::IgnoredArtifact => "ignored-artifact",
            SkipReason::IgnoredGroup => "ignored-group",
            SkipReason::RetainOld => "retain-old",
            SkipReason::Latest => "latest",
        }
    }
}

/// The run's fully-parsed configuration, as handed to the core by the CLI.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub repo_root: PathBuf,
    /// Epoch-millis cutoffs, inclusive; `None` leaves a filter off.
    pub downloaded_before: Option<i64>,
    pub downloaded_after: Option<i64>,
    pub accessed_before: Option<i64>,
    pub accessed_after: Option<i64>,
    /// `groupId:artifactId` entries exempt from every delete rule.
    pub ignore_artifacts: HashSet<String>,
    pub ignore_groups: HashSet<String>,
    /// `groupId:artifactId` entries whose whole artifact directory goes.
    pub force_artifacts: HashSet<String>,
    pub force_groups: HashSet<String>,
    pub delete_all_snapshots: bool,
    pub delete_source: bool,
    pub delete_javadoc: bool,
    pub dry_run: bool,
    pub retain_old: bool,
}

impl SweepConfig {
    pub fn new(repo_root: PathBuf) -> Self {
        SweepConfig {
            repo_root,
            downloaded_before: None,
            downloaded_after: None,
            accessed_before: None,
            accessed_after: None,
            ignore_artifacts: HashSet::new(),
            ignore_groups: HashSet::new(),
            force_artifacts: HashSet::new(),
            force_groups: HashSet::new(),
            delete_all_snapshots: false,
            delete_source: false,
            delete_javadoc: false,
            dry_run: false,
            retain_old: false,
        }
    }
}

/// The run's accumulated decisions: reason → sorted set of paths.
///
/// Every reason key exists from construction. A path lands under at most one
/// reason; `classify` returns as soon as a rule fires.
#[derive(Debug, PartialEq, Eq)]
pub struct DecisionLedger {
    deletes: BTreeMap<DeleteReason, BTreeSet<PathBuf>>,
    skips: BTreeMap<SkipReason, BTreeSet<PathBuf>>,
}

impl DecisionLedger {
    pub fn new() -> Self {
        DecisionLedger {
            deletes: DeleteReason::ALL
                .iter()
                .map(|&r| (r, BTreeSet::new()))
                .collect(),
            skips: SkipReason::ALL
                .iter()
                .map(|&r| (r, BTreeSet::new()))
                .collect(),
        }
    }

    pub fn mark_delete(&mut self, reason: DeleteReason, path: impl Into<PathBuf>) {
        self.deletes.entry(reason).or_default().insert(path.into());
    }

    pub fn mark_skip(&mut self, reason: SkipReason, path: impl Into<PathBuf>) {
        self.skips.entry(reason).or_default().insert(path.into());
    }

    pub fn deletes(&self) -> &BTreeMap<DeleteReason, BTreeSet<PathBuf>> {
        &self.deletes
    }

    pub fn skips(&self) -> &BTreeMap<SkipReason, BTreeSet<PathBuf>> {
        &self.skips
    }

    pub fn deletes_for(&self, reason: DeleteReason) -> &BTreeSet<PathBuf> {
        &self.deletes[&reason]
    }

    pub fn skips_for(&self, reason: SkipReason) -> &BTreeSet<PathBuf> {
        &self.skips[&reason]
    }

    /// All marked-for-deletion paths, in reason-priority then path order.
    pub fn delete_paths(&self) -> impl Iterator<Item = &Path> {
        self.deletes.values().flatten().map(PathBuf::as_path)
    }
}

impl Default for DecisionLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Version directories awaiting the pruning pass, keyed by
/// `groupId:artifactId`, one entry per distinct version.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PendingVersions {
    groups: BTreeMap<String, BTreeMap<String, PathBuf>>,
}

impl PendingVersions {
    pub fn new() -> Self {
        PendingVersions::default()
    }

    pub fn add(&mut self, coordinate: &Coordinate, version_dir: &Path) {
        self.groups
            .entry(coordinate.ga())
            .or_default()
            .entry(coordinate.version.clone())
            .or_insert_with(|| version_dir.to_path_buf());
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consume the map for the pruning pass.
    pub fn into_groups(self) -> BTreeMap<String, BTreeMap<String, PathBuf>> {
        self.groups
    }
}

/// Classify one discovered regular file. First matching rule wins; files
/// whose attributes cannot be read are warned about and left untouched.
pub fn classify(
    path: &Path,
    config: &SweepConfig,
    ledger: &mut DecisionLedger,
    pending: &mut PendingVersions,
) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Reserved metadata may sit anywhere, including places with no valid
    // coordinate, so this check runs before derivation.
    if is_reserved(&file_name) {
        ledger.mark_skip(SkipReason::Reserved, path);
        return;
    }

    let coordinate = match coords::coordinate_of(path, &config.repo_root) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("Warning: skipping {}: {}", path.display(), err);
            return;
        }
    };

    if config.ignore_artifacts.contains(&coordinate.ga()) {
        mark_skip_at(ledger, SkipReason::IgnoredArtifact, path, 2);
        return;
    }
    if config.ignore_groups.contains(&coordinate.group_id) {
        mark_skip_at(ledger, SkipReason::IgnoredGroup, path, 3);
        return;
    }

    if let Some(reason) = forced_delete_reason(&file_name, &coordinate, config) {
        let target = match reason {
            DeleteReason::ForcedArtifact => coords::ancestor(path, 2),
            DeleteReason::ForcedGroup => coords::ancestor(path, 3),
            _ => Some(path),
        };
        match target {
            Some(target) => ledger.mark_delete(reason, target),
            None => eprintln!(
                "Warning: {} has no ancestor directory for {}",
                path.display(),
                reason.label()
            ),
        }
        return;
    }

    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(err) => {
            eprintln!(
                "Warning: could not read attributes of {}: {}",
                path.display(),
                err
            );
            return;
        }
    };
    let Some(version_dir) = coords::ancestor(path, 1) else {
        eprintln!("Warning: {} has no parent directory", path.display());
        return;
    };

    // Date filters delete the whole version directory, not just this file
    let accessed = match metadata.accessed() {
        Ok(t) => epoch_millis(t),
        Err(err) => {
            eprintln!(
                "Warning: could not read access time of {}: {}",
                path.display(),
                err
            );
            return;
        }
    };
    if outside_cutoffs(accessed, config.accessed_before, config.accessed_after) {
        ledger.mark_delete(DeleteReason::AccessDate, version_dir);
        return;
    }

    let modified = match metadata.modified() {
        Ok(t) => epoch_millis(t),
        Err(err) => {
            eprintln!(
                "Warning: could not read modification time of {}: {}",
                path.display(),
                err
            );
            return;
        }
    };
    if outside_cutoffs(modified, config.downloaded_before, config.downloaded_after) {
        ledger.mark_delete(DeleteReason::DownloadDate, version_dir);
        return;
    }

    if config.retain_old {
        ledger.mark_skip(SkipReason::RetainOld, version_dir);
        return;
    }

    pending.add(&coordinate, version_dir);
}

/// Inclusive cutoff match; an unset cutoff never matches, so a run with no
/// date options configured deletes nothing on dates, whatever the timestamps.
fn outside_cutoffs(timestamp: i64, before: Option<i64>, after: Option<i64>) -> bool {
    before.is_some_and(|cutoff| timestamp <= cutoff)
        || after.is_some_and(|cutoff| timestamp >= cutoff)
}

fn mark_skip_at(ledger: &mut DecisionLedger, reason: SkipReason, path: &Path, levels: usize) {
    match coords::ancestor(path, levels) {
        Some(dir) => ledger.mark_skip(reason, dir),
        None => eprintln!(
            "Warning: {} has no ancestor directory for {}",
            path.display(),
            reason.label()
        ),
    }
}

fn forced_delete_reason(
    file_name: &str,
    coordinate: &Coordinate,
    config: &SweepConfig,
) -> Option<DeleteReason> {
    if config.delete_javadoc && file_name.contains(&format!("{}-javadoc.jar", coordinate.version)) {
        return Some(DeleteReason::ForcedJavadoc);
    }
    if config.delete_source && file_name.contains(&format!("{}-sources.jar", coordinate.version)) {
        return Some(DeleteReason::ForcedSource);
    }
    if config.delete_all_snapshots && coordinate.version.ends_with("-SNAPSHOT") {
        return Some(DeleteReason::ForcedSnapshot);
    }
    if config.force_artifacts.contains(&coordinate.ga()) {
        return Some(DeleteReason::ForcedArtifact);
    }
    if config.force_groups.contains(&coordinate.group_id) {
        return Some(DeleteReason::ForcedGroup);
    }
    None
}

fn is_reserved(file_name: &str) -> bool {
    RESERVED_FILES.contains(&file_name)
        || RESERVED_FRAGMENTS
            .iter()
            .any(|fragment| file_name.contains(fragment))
}
