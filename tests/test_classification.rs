use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tempfile::{tempdir, TempDir};

use m2sweep::{
    classify, discover_files, prune_versions, DecisionLedger, DeleteReason, PendingVersions,
    SkipReason, SweepConfig,
};

/// Create `<root>/<group path>/<artifact>/<version>/` with a pom and a jar,
/// returning the pom path.
fn add_artifact(root: &Path, group: &str, artifact: &str, version: &str) -> PathBuf {
    let dir = root
        .join(group.replace('.', "/"))
        .join(artifact)
        .join(version);
    fs::create_dir_all(&dir).unwrap();
    let pom = dir.join(format!("{}-{}.pom", artifact, version));
    fs::write(&pom, "<project/>").unwrap();
    fs::write(
        dir.join(format!("{}-{}.jar", artifact, version)),
        "jar bytes",
    )
    .unwrap();
    pom
}

fn version_dir(root: &Path, group: &str, artifact: &str, version: &str) -> PathBuf {
    root.join(group.replace('.', "/"))
        .join(artifact)
        .join(version)
}

fn repo() -> TempDir {
    tempdir().unwrap()
}

/// Run the classify + prune pipeline the way the binary does, without the
/// deletion pass.
fn sweep(config: &SweepConfig) -> DecisionLedger {
    let poms_only = !config.delete_source && !config.delete_javadoc;
    let files = discover_files(&config.repo_root, poms_only);
    let mut ledger = DecisionLedger::new();
    let mut pending = PendingVersions::new();
    for file in &files {
        classify(file, config, &mut ledger, &mut pending);
    }
    prune_versions(pending, &mut ledger);
    ledger
}

#[test]
fn latest_version_kept_older_pruned() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    add_artifact(repo.path(), "com.acme", "widget", "2.0.0");

    let ledger = sweep(&SweepConfig::new(repo.path().to_path_buf()));

    assert!(ledger
        .skips_for(SkipReason::Latest)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "2.0.0")));
    assert!(ledger
        .deletes_for(DeleteReason::NonLatest)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "1.0.0")));
    assert_eq!(ledger.skips_for(SkipReason::Latest).len(), 1);
    assert_eq!(ledger.deletes_for(DeleteReason::NonLatest).len(), 1);
}

#[test]
fn forced_group_short_circuits_pruning() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    add_artifact(repo.path(), "com.acme", "widget", "2.0.0");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.force_groups.insert("com.acme".to_string());
    let ledger = sweep(&config);

    // Both files resolve to the same group directory, three levels up
    let group_dir = repo.path().join("com/acme");
    assert!(ledger
        .deletes_for(DeleteReason::ForcedGroup)
        .contains(&group_dir));
    assert!(ledger.deletes_for(DeleteReason::NonLatest).is_empty());
    assert!(ledger.skips_for(SkipReason::Latest).is_empty());
}

#[test]
fn forced_artifact_targets_artifact_dir() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    add_artifact(repo.path(), "com.acme", "gadget", "1.0.0");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.force_artifacts.insert("com.acme:widget".to_string());
    let ledger = sweep(&config);

    assert!(ledger
        .deletes_for(DeleteReason::ForcedArtifact)
        .contains(&repo.path().join("com/acme/widget")));
    // The untouched sibling still goes through pruning
    assert!(ledger
        .skips_for(SkipReason::Latest)
        .contains(&version_dir(repo.path(), "com.acme", "gadget", "1.0.0")));
}

#[test]
fn ignored_artifact_overrides_forced_delete() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.ignore_artifacts.insert("com.acme:widget".to_string());
    config.force_artifacts.insert("com.acme:widget".to_string());
    let ledger = sweep(&config);

    assert!(ledger
        .skips_for(SkipReason::IgnoredArtifact)
        .contains(&repo.path().join("com/acme/widget")));
    assert!(ledger.deletes_for(DeleteReason::ForcedArtifact).is_empty());
    assert!(ledger.delete_paths().next().is_none());
}

#[test]
fn ignored_group_recorded_at_group_dir() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.ignore_groups.insert("com.acme".to_string());
    let ledger = sweep(&config);

    assert!(ledger
        .skips_for(SkipReason::IgnoredGroup)
        .contains(&repo.path().join("com/acme")));
    assert!(ledger.delete_paths().next().is_none());
}

#[test]
fn snapshot_flag_deletes_snapshots_even_when_latest() {
    let repo = repo();
    let snapshot_pom = add_artifact(repo.path(), "com.acme", "widget", "2.1-SNAPSHOT");
    add_artifact(repo.path(), "com.acme", "widget", "1.0");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.delete_all_snapshots = true;
    let ledger = sweep(&config);

    // The snapshot file itself is the delete target
    assert!(ledger
        .deletes_for(DeleteReason::ForcedSnapshot)
        .contains(&snapshot_pom));
    // The release, no longer contested, survives as latest
    assert!(ledger
        .skips_for(SkipReason::Latest)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "1.0")));
}

#[test]
fn forced_rule_beats_date_filter() {
    let repo = repo();
    let snapshot_pom = add_artifact(repo.path(), "com.acme", "widget", "1.0-SNAPSHOT");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.delete_all_snapshots = true;
    // A cutoff every file matches; the forced rule must still win
    config.accessed_before = Some(i64::MAX);
    let ledger = sweep(&config);

    assert!(ledger
        .deletes_for(DeleteReason::ForcedSnapshot)
        .contains(&snapshot_pom));
    assert!(ledger.deletes_for(DeleteReason::AccessDate).is_empty());
}

#[test]
fn reserved_metadata_beats_forced_delete() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0-SNAPSHOT");
    let metadata = repo
        .path()
        .join("com/acme/widget/1.0-SNAPSHOT/maven-metadata-local.xml");
    fs::write(&metadata, "<metadata/>").unwrap();

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.delete_all_snapshots = true;
    let mut ledger = DecisionLedger::new();
    let mut pending = PendingVersions::new();
    classify(&metadata, &config, &mut ledger, &mut pending);

    assert!(ledger.skips_for(SkipReason::Reserved).contains(&metadata));
    assert!(ledger.deletes_for(DeleteReason::ForcedSnapshot).is_empty());
}

#[test]
fn old_download_date_marks_version_dir() {
    let repo = repo();
    let pom = add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    // Pretend the pom was downloaded in 2017
    filetime::set_file_mtime(&pom, FileTime::from_unix_time(1_500_000_000, 0)).unwrap();

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.downloaded_before = Some(1_600_000_000_000); // 2020 cutoff, millis
    let ledger = sweep(&config);

    assert!(ledger
        .deletes_for(DeleteReason::DownloadDate)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "1.0.0")));
    assert!(ledger.skips_for(SkipReason::Latest).is_empty());
}

#[test]
fn access_filter_checked_before_download_filter() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    // Both filters match everything; the access filter runs first
    config.accessed_after = Some(0);
    config.downloaded_after = Some(0);
    let ledger = sweep(&config);

    assert!(ledger
        .deletes_for(DeleteReason::AccessDate)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "1.0.0")));
    assert!(ledger.deletes_for(DeleteReason::DownloadDate).is_empty());
}

#[test]
fn epoch_timestamps_survive_a_filterless_run() {
    let repo = repo();
    let pom = add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    // atime and mtime both at the epoch exactly
    filetime::set_file_times(
        &pom,
        FileTime::from_unix_time(0, 0),
        FileTime::from_unix_time(0, 0),
    )
    .unwrap();

    let ledger = sweep(&SweepConfig::new(repo.path().to_path_buf()));

    assert!(ledger.deletes_for(DeleteReason::AccessDate).is_empty());
    assert!(ledger.deletes_for(DeleteReason::DownloadDate).is_empty());
    assert!(ledger
        .skips_for(SkipReason::Latest)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "1.0.0")));
}

#[test]
fn variant_qualified_release_is_latest() {
    let repo = repo();
    add_artifact(repo.path(), "com.google.guava", "guava", "31.0");
    add_artifact(repo.path(), "com.google.guava", "guava", "31.0-jre");

    let ledger = sweep(&SweepConfig::new(repo.path().to_path_buf()));

    assert!(ledger
        .skips_for(SkipReason::Latest)
        .contains(&version_dir(repo.path(), "com.google.guava", "guava", "31.0-jre")));
    assert!(ledger
        .deletes_for(DeleteReason::NonLatest)
        .contains(&version_dir(repo.path(), "com.google.guava", "guava", "31.0")));
}

#[test]
fn retain_old_skips_version_pruning() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    add_artifact(repo.path(), "com.acme", "widget", "2.0.0");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.retain_old = true;
    let ledger = sweep(&config);

    assert!(ledger.deletes_for(DeleteReason::NonLatest).is_empty());
    assert!(ledger
        .skips_for(SkipReason::RetainOld)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "1.0.0")));
    assert!(ledger
        .skips_for(SkipReason::RetainOld)
        .contains(&version_dir(repo.path(), "com.acme", "widget", "2.0.0")));
}

#[test]
fn classification_is_idempotent() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    add_artifact(repo.path(), "com.acme", "widget", "2.0.0");
    add_artifact(repo.path(), "org.example", "lib", "0.3-SNAPSHOT");

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.delete_all_snapshots = true;

    let first = sweep(&config);
    let second = sweep(&config);
    assert_eq!(first, second);
}

#[test]
fn classification_does_not_touch_the_filesystem() {
    let repo = repo();
    let pom = add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    add_artifact(repo.path(), "com.acme", "widget", "2.0.0");

    let ledger = sweep(&SweepConfig::new(repo.path().to_path_buf()));

    assert!(!ledger.deletes_for(DeleteReason::NonLatest).is_empty());
    assert!(pom.exists());
    assert!(version_dir(repo.path(), "com.acme", "widget", "1.0.0").exists());
}

#[test]
fn pom_only_walk_excludes_jars() {
    let repo = repo();
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");

    let poms = discover_files(repo.path(), true);
    assert_eq!(poms.len(), 1);
    assert!(poms[0].extension().unwrap() == "pom");

    let all = discover_files(repo.path(), false);
    assert_eq!(all.len(), 2);
}

#[test]
fn javadoc_and_source_flags_target_the_files() {
    let repo = repo();
    let dir = version_dir(repo.path(), "com.acme", "widget", "1.0.0");
    add_artifact(repo.path(), "com.acme", "widget", "1.0.0");
    let javadoc = dir.join("widget-1.0.0-javadoc.jar");
    let sources = dir.join("widget-1.0.0-sources.jar");
    fs::write(&javadoc, "javadoc").unwrap();
    fs::write(&sources, "sources").unwrap();

    let mut config = SweepConfig::new(repo.path().to_path_buf());
    config.delete_javadoc = true;
    config.delete_source = true;
    let ledger = sweep(&config);

    assert!(ledger
        .deletes_for(DeleteReason::ForcedJavadoc)
        .contains(&javadoc));
    assert!(ledger
        .deletes_for(DeleteReason::ForcedSource)
        .contains(&sources));
    // The plain pom and jar still flow into pruning and survive as latest
    assert!(ledger.skips_for(SkipReason::Latest).contains(&dir));
}
