//! Filesystem removal of everything the ledger marked for deletion.

use std::fs;
use std::path::PathBuf;

use crate::rules::DecisionLedger;

/// Delete every marked path, recursively for directories. Paths that are
/// already gone or cannot be removed land in the returned failure list; a
/// failure never aborts the rest of the pass, and nothing already deleted is
/// rolled back.
pub fn delete_marked(ledger: &DecisionLedger) -> Vec<PathBuf> {
    let mut failures = Vec::new();

    for path in ledger.delete_paths() {
        let result = match fs::symlink_metadata(path) {
            Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
            Ok(_) => fs::remove_file(path),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            eprintln!("Warning: could not remove {}: {}", path.display(), err);
            failures.push(path.to_path_buf());
        }
    }

    failures
}
