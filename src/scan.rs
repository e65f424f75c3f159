//! Repository walking and size accounting.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Enumerate regular files below the repository root, in walk order.
///
/// With `poms_only` set the walk narrows to `.pom` files. The date, snapshot,
/// and force rules then see one file per version directory, and the
/// directory-level deletions they emit still sweep co-located jars; it only
/// trims the classification workload.
pub fn discover_files(root: &Path, poms_only: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Warning: failed to access entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if poms_only && entry.path().extension().and_then(|e| e.to_str()) != Some("pom") {
            continue;
        }
        files.push(entry.into_path());
    }
    files
}

/// Total size of a file or directory tree, without following symlinks.
pub fn path_size(path: &Path) -> u64 {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return 0;
    };
    if metadata.is_symlink() {
        return 0;
    }
    if metadata.is_file() {
        return metadata.len();
    }

    let mut total = 0;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            total += path_size(&entry.path());
        }
    }
    total
}
