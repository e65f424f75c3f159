//! m2sweep - Maven local repository cleaner
//!
//! m2sweep scans a local Maven repository (`~/.m2/repository` by default),
//! classifies every artifact file against a layered rule set, and deletes the
//! losers. Unlike a blanket `rm -rf ~/.m2`, it is selective: reserved
//! repository bookkeeping files are always kept, ignore lists beat forced
//! deletions (snapshots, sources, javadocs, named artifacts/groups), forced
//! deletions beat the download/access date filters, and whatever survives
//! enters a per-artifact pruning pass that keeps only the latest version.
//!
//! ## Architecture
//!
//! A single-threaded batch pipeline: walk ([`scan`]) → classify each file
//! ([`rules`], using [`coords`]) → prune non-latest versions ([`prune`],
//! using [`version`]) → delete ([`executor`], skipped on dry-run) → report
//! ([`report`]). The pruning pass only starts once classification has seen
//! every file.

pub mod coords;
pub mod executor;
pub mod prune;
pub mod report;
pub mod rules;
pub mod scan;
pub mod time;
pub mod version;

// Re-export commonly used items
pub use coords::{ancestor, coordinate_of, Coordinate};
pub use executor::delete_marked;
pub use prune::prune_versions;
pub use rules::{classify, DecisionLedger, DeleteReason, PendingVersions, SkipReason, SweepConfig};
pub use scan::{discover_files, path_size};
pub use time::{epoch_millis, parse_cutoff};
pub use version::{latest, MavenVersion};
