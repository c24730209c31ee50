use crate::{ListingId, SeenSet};

/// What to do with a named listing outside dry-run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// New listing on a restored set: dispatch, then record.
    Notify,
    /// Bootstrap pass or already known: record only.
    Record,
}

/// Pure dedup policy shared by every page of a run.
pub fn decide(seen: &SeenSet, id: &ListingId) -> Decision {
    if seen.is_bootstrap() || seen.is_seen(id) {
        Decision::Record
    } else {
        Decision::Notify
    }
}
