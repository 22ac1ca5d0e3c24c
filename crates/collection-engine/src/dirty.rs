//! Dirty Tracker
//!
//! Knows which entries differ from the last persisted state so a save only
//! sends what actually changed.

use std::collections::{BTreeSet, HashMap};

use crate::entry::{CollectionEntry, EntryId, ListVariant};

#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    /// Last values known to be persisted
    baseline: HashMap<EntryId, CollectionEntry>,
    pending: BTreeSet<EntryId>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// New baseline, nothing pending
    pub fn reset(&mut self, entries: &[CollectionEntry]) {
        self.baseline = entries.iter().map(|e| (e.id, e.clone())).collect();
        self.pending.clear();
    }

    pub fn mark_dirty(&mut self, id: EntryId) {
        self.pending.insert(id);
    }

    pub fn unmark(&mut self, id: EntryId) {
        self.pending.remove(&id);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_dirty(&self, id: EntryId) -> bool {
        self.pending.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.pending.iter().copied()
    }

    pub fn baseline(&self, id: EntryId) -> Option<&CollectionEntry> {
        self.baseline.get(&id)
    }

    /// Re-derive one entry's dirtiness against the baseline.
    ///
    /// Ranking compares position and annotation, tiering compares bucket and
    /// annotation. An entry with no baseline is always dirty.
    pub fn track(&mut self, variant: ListVariant, entry: &CollectionEntry) -> bool {
        let changed = match self.baseline.get(&entry.id) {
            Some(base) => differs(variant, base, entry),
            None => true,
        };
        if changed {
            self.mark_dirty(entry.id);
        } else {
            self.unmark(entry.id);
        }
        changed
    }

    /// Accept the given values as persisted, then re-track against `current`
    pub fn advance<'a>(
        &mut self,
        variant: ListVariant,
        saved: &[CollectionEntry],
        current: impl IntoIterator<Item = &'a CollectionEntry>,
    ) {
        for entry in saved {
            self.baseline.insert(entry.id, entry.clone());
        }
        for entry in current {
            self.track(variant, entry);
        }
    }

}

fn differs(variant: ListVariant, base: &CollectionEntry, current: &CollectionEntry) -> bool {
    if base.annotation != current.annotation {
        return true;
    }
    match variant {
        ListVariant::Ranking => base.position != current.position,
        ListVariant::Tiering => base.bucket != current.bucket,
    }
}
