use std::collections::BTreeSet;

use crate::ListingId;

/// Where a seen-set came from when the run started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeenOrigin {
    /// No persisted state existed: this run is the bootstrap pass.
    Fresh,
    /// Persisted state existed, even if it could not be read.
    Restored,
}

/// Identifiers of every listing ever observed. Only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenSet {
    ids: BTreeSet<ListingId>,
    origin: SeenOrigin,
}

impl SeenSet {
    pub fn fresh() -> Self {
        Self {
            ids: BTreeSet::new(),
            origin: SeenOrigin::Fresh,
        }
    }

    pub fn restored(ids: impl IntoIterator<Item = ListingId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            origin: SeenOrigin::Restored,
        }
    }

    pub fn origin(&self) -> SeenOrigin {
        self.origin
    }

    pub fn is_bootstrap(&self) -> bool {
        self.origin == SeenOrigin::Fresh
    }

    /// Returns `true` if the id was not present before.
    pub fn mark_seen(&mut self, id: ListingId) -> bool {
        self.ids.insert(id)
    }

    pub fn is_seen(&self, id: &ListingId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &ListingId> {
        self.ids.iter()
    }
}
