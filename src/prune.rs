//! Second pass: keep the latest version of each artifact, mark the rest.

use crate::rules::{DecisionLedger, DeleteReason, PendingVersions, SkipReason};
use crate::version;

/// Consume the pending map, emptying every group into the ledger: the
/// greatest version's directory is kept as latest, every other version's
/// directory is marked for deletion. Runs only after classification has seen
/// every file.
pub fn prune_versions(pending: PendingVersions, ledger: &mut DecisionLedger) {
    for (_ga, members) in pending.into_groups() {
        // Groups are only ever created with at least one member
        let Some(latest) = version::latest(members.keys().map(String::as_str)) else {
            continue;
        };
        for (version, dir) in members {
            if version == latest {
                ledger.mark_skip(SkipReason::Latest, dir);
            } else {
                ledger.mark_delete(DeleteReason::NonLatest, dir);
            }
        }
    }
}
