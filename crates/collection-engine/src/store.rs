//! Local Item Store
//!
//! The in-memory, possibly unsaved, ordered list of collection entries.
//! Positions are always re-derived from array order (index + 1).

use crate::entry::{Bucket, CollectionEntry, EntryId, ListVariant};

/// Where a moved entry should end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Absolute index in the ranked order (ranking only, clamped)
    Index(usize),
    /// End of a tier's group (tiering only)
    Bucket(Bucket),
    /// The slot currently held by another entry; adopts its tier when tiering
    Slot(EntryId),
}

#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    variant: ListVariant,
    entries: Vec<CollectionEntry>,
}

impl EntryStore {
    pub fn new(variant: ListVariant) -> Self {
        Self {
            variant,
            entries: Vec::new(),
        }
    }

    /// Replace everything with a server-provided list, sorted for the variant
    pub fn initialize(&mut self, variant: ListVariant, mut entries: Vec<CollectionEntry>) {
        match variant {
            ListVariant::Ranking => entries.sort_by_key(|e| (e.position, e.id)),
            ListVariant::Tiering => entries.sort_by_key(|e| (e.bucket.index(), e.position, e.id)),
        }
        self.variant = variant;
        self.entries = entries;
        self.renumber();
    }

    pub fn variant(&self) -> ListVariant {
        self.variant
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&CollectionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn index_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Entries of one tier, in display order
    pub fn in_bucket(&self, bucket: Bucket) -> impl Iterator<Item = &CollectionEntry> + '_ {
        self.entries.iter().filter(move |e| e.bucket == bucket)
    }

    /// Relocate one entry. Returns false when nothing changed.
    pub fn move_entry(&mut self, id: EntryId, destination: Destination) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };

        let moved = match (self.variant, destination) {
            (ListVariant::Ranking, Destination::Index(to)) => self.shift(from, to),
            (_, Destination::Slot(other)) => self.move_to_slot(from, id, other),
            (ListVariant::Tiering, Destination::Bucket(bucket)) => self.move_to_bucket(from, bucket),
            // Destination does not apply to this variant
            _ => false,
        };

        if moved {
            self.renumber();
        }
        moved
    }

    /// Replace the annotation text. Returns false when unchanged or unknown.
    pub fn update_annotation(&mut self, id: EntryId, text: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.annotation != text => {
                entry.annotation = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Put one entry back at an index and tier, leaving the others' content alone
    pub(crate) fn place(&mut self, id: EntryId, index: usize, bucket: Bucket) {
        let Some(from) = self.index_of(id) else {
            return;
        };
        let mut entry = self.entries.remove(from);
        entry.bucket = bucket;
        let at = index.min(self.entries.len());
        self.entries.insert(at, entry);
        self.renumber();
    }

    fn shift(&mut self, from: usize, to: usize) -> bool {
        let to = to.min(self.entries.len().saturating_sub(1));
        if from == to {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    fn move_to_slot(&mut self, from: usize, id: EntryId, other: EntryId) -> bool {
        if other == id {
            return false;
        }
        let Some(to) = self.index_of(other) else {
            return false;
        };
        if self.variant == ListVariant::Tiering {
            let bucket = self.entries[to].bucket;
            let changed_bucket = self.entries[from].bucket != bucket;
            self.entries[from].bucket = bucket;
            // Cross-tier moves always count even if the index happens to match
            return self.shift(from, to) || changed_bucket;
        }
        self.shift(from, to)
    }

    fn move_to_bucket(&mut self, from: usize, bucket: Bucket) -> bool {
        if self.entries[from].bucket == bucket {
            return false;
        }
        let mut entry = self.entries.remove(from);
        entry.bucket = bucket;
        let at = self
            .entries
            .iter()
            .position(|e| e.bucket.index() > bucket.index())
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
        true
    }

    fn renumber(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.position = index as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: &[u32]) -> EntryStore {
        let mut store = EntryStore::new(ListVariant::Ranking);
        let entries = ids
            .iter()
            .enumerate()
            .map(|(i, id)| CollectionEntry::new(*id, id * 10, i as u32 + 1))
            .collect();
        store.initialize(ListVariant::Ranking, entries);
        store
    }

    fn ids(store: &EntryStore) -> Vec<u32> {
        store.entries().iter().map(|e| e.id).collect()
    }

    fn positions(store: &EntryStore) -> Vec<u32> {
        store.entries().iter().map(|e| e.position).collect()
    }

    #[test]
    fn test_initialize_sorts_ranking_by_position() {
        let mut store = EntryStore::new(ListVariant::Ranking);
        store.initialize(
            ListVariant::Ranking,
            vec![
                CollectionEntry::new(1, 10, 3),
                CollectionEntry::new(2, 20, 1),
                CollectionEntry::new(3, 30, 7),
            ],
        );
        assert_eq!(ids(&store), vec![2, 1, 3]);
        // Gaps from the server are closed
        assert_eq!(positions(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_initialize_groups_tiers() {
        let mut store = EntryStore::new(ListVariant::Tiering);
        store.initialize(
            ListVariant::Tiering,
            vec![
                CollectionEntry::new(1, 10, 1),
                CollectionEntry::new(2, 20, 2).with_bucket(Bucket::C),
                CollectionEntry::new(3, 30, 3).with_bucket(Bucket::S),
                CollectionEntry::new(4, 40, 4).with_bucket(Bucket::C),
            ],
        );
        assert_eq!(ids(&store), vec![3, 2, 4, 1]);
        assert_eq!(store.in_bucket(Bucket::C).count(), 2);
    }

    #[test]
    fn test_move_to_front_recomputes_positions() {
        let mut store = ranked(&[1, 2, 3]);
        assert!(store.move_entry(3, Destination::Index(0)));
        assert_eq!(ids(&store), vec![3, 1, 2]);
        assert_eq!(positions(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut store = ranked(&[1, 2, 3]);
        assert!(!store.move_entry(2, Destination::Index(1)));
        assert!(!store.move_entry(2, Destination::Slot(2)));
        assert!(!store.move_entry(99, Destination::Index(0)));
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_slot_move_down_takes_target_index() {
        let mut store = ranked(&[1, 2, 3, 4]);
        assert!(store.move_entry(1, Destination::Slot(3)));
        assert_eq!(ids(&store), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_index_is_clamped() {
        let mut store = ranked(&[1, 2, 3]);
        assert!(store.move_entry(1, Destination::Index(50)));
        assert_eq!(ids(&store), vec![2, 3, 1]);
    }

    #[test]
    fn test_positions_stay_contiguous() {
        let mut store = ranked(&[11, 12, 13, 14, 15, 16, 17]);
        let n = store.len() as u64;
        let mut seed = 7u64;
        for _ in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let from = (seed >> 33) % n;
            let to = (seed >> 13) % (n + 2);
            let id = store.entries()[from as usize].id;
            store.move_entry(id, Destination::Index(to as usize));

            let mut seen = positions(&store);
            seen.sort_unstable();
            assert_eq!(seen, (1..=n as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_bucket_move_appends_to_group() {
        let mut store = EntryStore::new(ListVariant::Tiering);
        store.initialize(
            ListVariant::Tiering,
            vec![
                CollectionEntry::new(1, 10, 1).with_bucket(Bucket::A),
                CollectionEntry::new(2, 20, 2).with_bucket(Bucket::A),
                CollectionEntry::new(3, 30, 3).with_bucket(Bucket::C),
            ],
        );
        assert!(store.move_entry(3, Destination::Bucket(Bucket::A)));
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.get(3).unwrap().bucket, Bucket::A);

        assert!(store.move_entry(1, Destination::Bucket(Bucket::B)));
        assert_eq!(ids(&store), vec![2, 3, 1]);
        assert!(!store.move_entry(1, Destination::Bucket(Bucket::B)));
    }

    #[test]
    fn test_slot_move_adopts_target_bucket() {
        let mut store = EntryStore::new(ListVariant::Tiering);
        store.initialize(
            ListVariant::Tiering,
            vec![
                CollectionEntry::new(1, 10, 1).with_bucket(Bucket::A),
                CollectionEntry::new(2, 20, 2).with_bucket(Bucket::B),
                CollectionEntry::new(3, 30, 3).with_bucket(Bucket::B),
            ],
        );
        assert!(store.move_entry(1, Destination::Slot(3)));
        assert_eq!(ids(&store), vec![2, 3, 1]);
        assert_eq!(store.get(1).unwrap().bucket, Bucket::B);
    }

    #[test]
    fn test_variant_mismatch_is_noop() {
        let mut store = ranked(&[1, 2]);
        assert!(!store.move_entry(1, Destination::Bucket(Bucket::S)));

        let mut tiers = EntryStore::new(ListVariant::Tiering);
        tiers.initialize(ListVariant::Tiering, vec![CollectionEntry::new(1, 10, 1), CollectionEntry::new(2, 20, 2)]);
        assert!(!tiers.move_entry(1, Destination::Index(1)));
    }

    #[test]
    fn test_place_puts_entry_back() {
        let mut store = EntryStore::new(ListVariant::Tiering);
        store.initialize(
            ListVariant::Tiering,
            vec![
                CollectionEntry::new(1, 10, 1).with_bucket(Bucket::S),
                CollectionEntry::new(2, 20, 2).with_bucket(Bucket::B),
            ],
        );
        store.move_entry(1, Destination::Bucket(Bucket::C));
        store.update_annotation(2, "kept");

        store.place(1, 0, Bucket::S);
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(positions(&store), vec![1, 2]);
        assert_eq!(store.get(1).unwrap().bucket, Bucket::S);
        assert_eq!(store.get(2).unwrap().annotation, "kept");
    }

    #[test]
    fn test_update_annotation() {
        let mut store = ranked(&[1, 2]);
        assert!(store.update_annotation(2, "replayed twice"));
        assert!(!store.update_annotation(2, "replayed twice"));
        assert!(!store.update_annotation(5, "nope"));
        assert_eq!(store.get(2).unwrap().annotation, "replayed twice");
    }
}
