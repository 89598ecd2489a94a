//! Reload rules applied after each mutation.

use super::view_store::Slice;
use crate::domain::ports::MutationKind;

/// Reload rule for one mutation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRule {
    /// Mutation the rule applies to.
    pub kind: MutationKind,
    /// Slice reloaded when the API accepted the mutation.
    pub on_success: Option<Slice>,
    /// Slice reloaded when it did not, or when no response arrived.
    pub on_failure: Option<Slice>,
}

/// Synchronization table.
///
/// Creation reloads the catalog whatever the outcome.
pub const SYNC_RULES: [SyncRule; 4] = [
    SyncRule {
        kind: MutationKind::Create,
        on_success: Some(Slice::Catalog),
        on_failure: Some(Slice::Catalog),
    },
    SyncRule {
        kind: MutationKind::Delete,
        on_success: Some(Slice::Catalog),
        on_failure: None,
    },
    SyncRule {
        kind: MutationKind::Buy,
        on_success: Some(Slice::Companies),
        on_failure: None,
    },
    SyncRule {
        kind: MutationKind::Sell,
        on_success: Some(Slice::Companies),
        on_failure: None,
    },
];

/// Returns the slice to reload once a mutation has completed.
#[must_use]
pub fn reload_after(kind: MutationKind, succeeded: bool) -> Option<Slice> {
    SYNC_RULES
        .iter()
        .find(|rule| rule.kind == kind)
        .and_then(|rule| {
            if succeeded {
                rule.on_success
            } else {
                rule.on_failure
            }
        })
}
