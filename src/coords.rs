//! Deriving artifact coordinates from repository paths.
//!
//! A local Maven repository lays artifacts out as
//! `<root>/<group segments...>/<artifactId>/<version>/<file>`. The
//! repository root is passed in explicitly rather than recovered by
//! string-matching a `repository` path segment, so renamed or relocated
//! repositories derive correct group ids.

use anyhow::{bail, Context, Result};
use std::path::{Component, Path};

/// The (groupId, artifactId, version) triple identifying an artifact release.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinate {
    /// The `groupId:artifactId` key used by ignore/force lists and the
    /// pending-version map.
    pub fn ga(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// Derive a file's coordinate from its position below the repository root.
///
/// Pure path arithmetic, no I/O. Fails when the file sits too shallow to
/// carry a group, artifact, and version directory.
pub fn coordinate_of(path: &Path, repo_root: &Path) -> Result<Coordinate> {
    let rel = path.strip_prefix(repo_root).with_context(|| {
        format!(
            "{} is not below the repository root {}",
            path.display(),
            repo_root.display()
        )
    })?;

    let segments: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    // group (>= 1 segment) + artifactId + version + filename
    if segments.len() < 4 {
        bail!(
            "{} is too shallow to carry groupId/artifactId/version",
            path.display()
        );
    }

    let version = segments[segments.len() - 2].clone();
    let artifact_id = segments[segments.len() - 3].clone();
    let group_id = segments[..segments.len() - 3].join(".");

    Ok(Coordinate {
        group_id,
        artifact_id,
        version,
    })
}

/// The ancestor directory `levels` steps up: 1 = version directory, 2 =
/// artifact directory, 3 = group directory. `None` when the path runs out of
/// parents first.
pub fn ancestor(path: &Path, levels: usize) -> Option<&Path> {
    let mut current = path;
    for _ in 0..levels {
        current = current.parent()?;
    }
    Some(current)
}
