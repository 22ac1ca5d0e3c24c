//! Reconciler
//!
//! Turns local dirty state into the smallest server write and owns the
//! save/discard transitions:
//!
//! ```text
//! Clean --mutation--> Dirty --begin_save--> Saving --ok--> Clean (or Dirty if
//!   ^                   |                     |            edited mid-flight)
//!   +-----discard-------+                     +--err--> Dirty
//! ```
//!
//! Saving is split in two halves (`begin_save` / `finish_save`) so the UI can
//! keep mutating the collection while the write is in flight.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::api::{CollectionApi, CollectionId, EntryPatch, RankedEntry};
use crate::dirty::DirtyTracker;
use crate::entry::{Bucket, CollectionEntry, EntryId, ListVariant};
use crate::error::{ApiResult, SaveError};
use crate::store::{Destination, EntryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Clean,
    Dirty,
    Saving,
}

/// What a save writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePayload {
    /// Ranking: every entry with its recomputed order, one bulk call
    Reorder(Vec<RankedEntry>),
    /// Tiering: one partial update per changed entry
    Patches(Vec<EntryPatch>),
}

/// A save that has been started but not finished
#[derive(Debug, Clone)]
pub struct SaveBatch {
    collection_id: CollectionId,
    generation: u64,
    payload: SavePayload,
    /// Entry values exactly as sent
    sent: Vec<CollectionEntry>,
}

impl SaveBatch {
    pub fn payload(&self) -> &SavePayload {
        &self.payload
    }

    pub fn len(&self) -> usize {
        match &self.payload {
            SavePayload::Reorder(rows) => rows.len(),
            SavePayload::Patches(patches) => patches.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issue the writes. Fails as a whole if any single write fails.
    pub async fn push<A: CollectionApi + ?Sized>(&self, api: &A) -> ApiResult<()> {
        match &self.payload {
            SavePayload::Reorder(rows) => api.reorder_entries(self.collection_id, rows).await,
            SavePayload::Patches(patches) => {
                let results = join_all(patches.iter().map(|patch| api.update_entry(patch))).await;
                let failed = results.iter().filter(|r| r.is_err()).count();
                if failed > 0 {
                    warn!(failed, total = results.len(), "entry updates rejected");
                }
                match results.into_iter().find_map(Result::err) {
                    Some(err) => Err(err),
                    None => Ok(()),
                }
            }
        }
    }
}

/// What the caller should do after a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveOutcome {
    /// Refetch the authoritative list (nothing local is pending)
    pub refresh: bool,
    /// Another save was requested while this one was in flight
    pub follow_up: bool,
}

#[derive(Debug, Clone)]
pub struct Reconciler {
    collection_id: CollectionId,
    store: EntryStore,
    dirty: DirtyTracker,
    /// Last authoritative state, normalized the way the store sorts it
    snapshot: Vec<CollectionEntry>,
    saving: bool,
    resave_requested: bool,
    /// Bumped on every reload so late save results can be recognized
    generation: u64,
}

impl Reconciler {
    pub fn new(collection_id: CollectionId, variant: ListVariant) -> Self {
        Self {
            collection_id,
            store: EntryStore::new(variant),
            dirty: DirtyTracker::new(),
            snapshot: Vec::new(),
            saving: false,
            resave_requested: false,
            generation: 0,
        }
    }

    /// Replace local state with a fresh server list, dropping unsaved edits
    pub fn initialize(&mut self, entries: Vec<CollectionEntry>) {
        let variant = self.store.variant();
        self.store.initialize(variant, entries);
        self.snapshot = self.store.entries().to_vec();
        self.dirty.reset(&self.snapshot);
        self.saving = false;
        self.resave_requested = false;
        self.generation += 1;
        debug!(
            collection = self.collection_id,
            entries = self.snapshot.len(),
            "collection initialized"
        );
    }

    pub fn collection_id(&self) -> CollectionId {
        self.collection_id
    }

    pub fn variant(&self) -> ListVariant {
        self.store.variant()
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        self.store.entries()
    }

    pub fn entry(&self, id: EntryId) -> Option<&CollectionEntry> {
        self.store.get(id)
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn snapshot(&self) -> &[CollectionEntry] {
        &self.snapshot
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_dirty(&self, id: EntryId) -> bool {
        self.dirty.is_dirty(id)
    }

    pub fn status(&self) -> SaveStatus {
        if self.saving {
            SaveStatus::Saving
        } else if self.dirty.is_empty() {
            SaveStatus::Clean
        } else {
            SaveStatus::Dirty
        }
    }

    pub fn move_entry(&mut self, id: EntryId, destination: Destination) -> bool {
        if !self.store.move_entry(id, destination) {
            return false;
        }
        match self.variant() {
            // Every later index shifted
            ListVariant::Ranking => self.retrack_all(),
            ListVariant::Tiering => self.retrack(id),
        }
        true
    }

    pub fn update_annotation(&mut self, id: EntryId, text: &str) -> bool {
        if !self.store.update_annotation(id, text) {
            return false;
        }
        self.retrack(id);
        true
    }

    /// Throw away unsaved moves and edits
    pub fn discard(&mut self) {
        let variant = self.variant();
        self.store.initialize(variant, self.snapshot.clone());
        self.dirty.reset(&self.snapshot);
        self.saving = false;
        self.resave_requested = false;
        self.generation += 1;
        debug!(collection = self.collection_id, "local edits discarded");
    }

    /// Start a save of everything currently dirty.
    ///
    /// Returns `None` when nothing is dirty, or when a save is already in
    /// flight, in which case a follow-up save is requested instead.
    pub fn begin_save(&mut self) -> Option<SaveBatch> {
        if self.saving {
            self.resave_requested = true;
            debug!(collection = self.collection_id, "save already in flight, queued follow-up");
            return None;
        }
        if self.dirty.is_empty() {
            return None;
        }

        let (payload, sent) = match self.variant() {
            ListVariant::Ranking => self.ranking_payload(),
            ListVariant::Tiering => self.tiering_payload(),
        };
        self.saving = true;

        let batch = SaveBatch {
            collection_id: self.collection_id,
            generation: self.generation,
            payload,
            sent,
        };
        debug!(collection = self.collection_id, writes = batch.len(), "save started");
        Some(batch)
    }

    /// Apply the result of a batch's writes
    pub fn finish_save(&mut self, batch: &SaveBatch, result: ApiResult<()>) -> Result<SaveOutcome, SaveError> {
        if batch.generation != self.generation {
            debug!(collection = self.collection_id, "ignoring stale save result");
            return Err(SaveError::Superseded);
        }
        self.saving = false;
        let follow_up = std::mem::take(&mut self.resave_requested);

        if let Err(err) = result {
            warn!(collection = self.collection_id, pending = self.dirty.len(), error = %err, "save failed");
            return Err(SaveError::Rejected(err));
        }

        let variant = self.variant();
        self.dirty.advance(variant, &batch.sent, self.store.entries());
        self.absorb_into_snapshot(&batch.sent);

        let pending = self.dirty.len();
        debug!(collection = self.collection_id, pending, "save committed");
        Ok(SaveOutcome {
            refresh: pending == 0,
            follow_up: follow_up && pending > 0,
        })
    }

    /// Drag rollback: return one entry to its pick-up placement, then
    /// re-derive dirtiness against the current baseline
    pub(crate) fn restore_placement(&mut self, id: EntryId, index: usize, bucket: Bucket) {
        self.store.place(id, index, bucket);
        self.retrack_all();
    }

    /// Provisional move that bypasses dirty tracking (drag preview)
    pub(crate) fn preview_move(&mut self, id: EntryId, destination: Destination) -> bool {
        self.store.move_entry(id, destination)
    }

    fn ranking_payload(&self) -> (SavePayload, Vec<CollectionEntry>) {
        let rows = self
            .store
            .entries()
            .iter()
            .map(|e| RankedEntry {
                id: e.id,
                order: e.position,
                description: e.annotation.clone(),
            })
            .collect();
        (SavePayload::Reorder(rows), self.store.entries().to_vec())
    }

    fn tiering_payload(&self) -> (SavePayload, Vec<CollectionEntry>) {
        let mut patches = Vec::new();
        let mut sent = Vec::new();
        for id in self.dirty.ids() {
            let Some(entry) = self.store.get(id) else {
                continue;
            };
            let base = self.dirty.baseline(id);
            let tier = (base.map(|b| b.bucket) != Some(entry.bucket)).then_some(entry.bucket);
            let description = (base.map(|b| b.annotation.as_str()) != Some(entry.annotation.as_str()))
                .then(|| entry.annotation.clone());
            if tier.is_none() && description.is_none() {
                continue;
            }
            patches.push(EntryPatch { id, tier, description });
            sent.push(entry.clone());
        }
        (SavePayload::Patches(patches), sent)
    }

    fn absorb_into_snapshot(&mut self, sent: &[CollectionEntry]) {
        let mut merged = std::mem::take(&mut self.snapshot);
        for entry in sent {
            match merged.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry.clone(),
                None => merged.push(entry.clone()),
            }
        }
        let mut normalized = EntryStore::new(self.variant());
        normalized.initialize(self.variant(), merged);
        self.snapshot = normalized.entries().to_vec();
    }

    fn retrack(&mut self, id: EntryId) {
        let variant = self.variant();
        if let Some(entry) = self.store.get(id) {
            self.dirty.track(variant, entry);
        }
    }

    fn retrack_all(&mut self) {
        let variant = self.variant();
        for entry in self.store.entries() {
            self.dirty.track(variant, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CollectionApi;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    /// In-memory persistence that records every call
    #[derive(Default)]
    struct FakeApi {
        reorders: RefCell<Vec<Vec<RankedEntry>>>,
        patches: RefCell<Vec<EntryPatch>>,
        reject: Cell<bool>,
        reject_id: Cell<Option<EntryId>>,
    }

    #[async_trait(?Send)]
    impl CollectionApi for FakeApi {
        async fn list_entries(&self, _collection_id: CollectionId) -> ApiResult<Vec<CollectionEntry>> {
            Ok(Vec::new())
        }

        async fn update_entry(&self, patch: &EntryPatch) -> ApiResult<CollectionEntry> {
            if self.reject.get() || self.reject_id.get() == Some(patch.id) {
                return Err(ApiError::Status { status: 500, message: "boom".into() });
            }
            self.patches.borrow_mut().push(patch.clone());
            Ok(CollectionEntry::new(patch.id, 0, 1))
        }

        async fn reorder_entries(&self, _collection_id: CollectionId, entries: &[RankedEntry]) -> ApiResult<()> {
            if self.reject.get() {
                return Err(ApiError::Network("offline".into()));
            }
            self.reorders.borrow_mut().push(entries.to_vec());
            Ok(())
        }
    }

    fn ranking() -> Reconciler {
        let mut rec = Reconciler::new(1, ListVariant::Ranking);
        rec.initialize(vec![
            CollectionEntry::new(1, 100, 1),
            CollectionEntry::new(2, 200, 2),
            CollectionEntry::new(3, 300, 3),
        ]);
        rec
    }

    fn tiering() -> Reconciler {
        let mut rec = Reconciler::new(2, ListVariant::Tiering);
        rec.initialize(vec![
            CollectionEntry::new(7, 700, 1).with_bucket(Bucket::B),
            CollectionEntry::new(8, 800, 2).with_bucket(Bucket::B),
            CollectionEntry::new(9, 900, 3),
        ]);
        rec
    }

    async fn save(rec: &mut Reconciler, api: &FakeApi) -> Result<SaveOutcome, SaveError> {
        let batch = rec.begin_save().expect("something to save");
        let result = batch.push(api).await;
        rec.finish_save(&batch, result)
    }

    #[test]
    fn test_ranking_move_to_front() {
        let mut rec = ranking();
        assert!(rec.move_entry(3, Destination::Index(0)));

        let order: Vec<_> = rec.entries().iter().map(|e| (e.id, e.position)).collect();
        assert_eq!(order, vec![(3, 1), (1, 2), (2, 3)]);
        assert!(rec.is_dirty(3));
        assert_eq!(rec.status(), SaveStatus::Dirty);

        let batch = rec.begin_save().unwrap();
        let SavePayload::Reorder(rows) = batch.payload() else {
            panic!("ranking saves reorder");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RankedEntry { id: 3, order: 1, description: String::new() });
    }

    #[test]
    fn test_ranking_move_back_is_clean() {
        let mut rec = ranking();
        rec.move_entry(3, Destination::Index(0));
        rec.move_entry(3, Destination::Index(2));
        assert_eq!(rec.dirty_count(), 0);
        assert!(rec.begin_save().is_none());
    }

    #[test]
    fn test_tier_roundtrip_leaves_payload_empty() {
        let mut rec = tiering();
        rec.move_entry(7, Destination::Bucket(Bucket::A));
        rec.move_entry(9, Destination::Bucket(Bucket::S));
        rec.move_entry(7, Destination::Bucket(Bucket::B));
        assert!(!rec.is_dirty(7));

        let batch = rec.begin_save().unwrap();
        let SavePayload::Patches(patches) = batch.payload() else {
            panic!("tiering saves patches");
        };
        assert_eq!(
            patches,
            &vec![EntryPatch { id: 9, tier: Some(Bucket::S), description: None }]
        );
    }

    #[test]
    fn test_annotation_patch_only_sends_description() {
        let mut rec = tiering();
        rec.update_annotation(8, "great soundtrack");
        let batch = rec.begin_save().unwrap();
        assert_eq!(
            batch.payload(),
            &SavePayload::Patches(vec![EntryPatch {
                id: 8,
                tier: None,
                description: Some("great soundtrack".into()),
            }])
        );
    }

    #[test]
    fn test_discard_restores_snapshot() {
        let mut rec = tiering();
        let original = rec.entries().to_vec();
        rec.move_entry(9, Destination::Slot(7));
        rec.update_annotation(8, "meh");
        rec.move_entry(7, Destination::Bucket(Bucket::D));

        rec.discard();
        assert_eq!(rec.entries(), original.as_slice());
        assert_eq!(rec.dirty_count(), 0);
        assert_eq!(rec.status(), SaveStatus::Clean);
    }

    #[tokio::test]
    async fn test_save_success_clears_dirty() {
        let api = FakeApi::default();
        let mut rec = ranking();
        rec.move_entry(3, Destination::Index(0));

        let outcome = save(&mut rec, &api).await.unwrap();
        assert_eq!(outcome, SaveOutcome { refresh: true, follow_up: false });
        assert_eq!(rec.dirty_count(), 0);
        assert_eq!(rec.status(), SaveStatus::Clean);
        assert_eq!(api.reorders.borrow().len(), 1);

        // Discard now goes back to the saved order, not the original
        rec.discard();
        assert_eq!(rec.entries()[0].id, 3);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_dirty_set() {
        let api = FakeApi::default();
        api.reject.set(true);
        let mut rec = ranking();
        rec.move_entry(1, Destination::Index(2));
        let before = rec.dirty_count();

        let err = save(&mut rec, &api).await.unwrap_err();
        assert!(matches!(err, SaveError::Rejected(ApiError::Network(_))));
        assert_eq!(rec.dirty_count(), before);
        assert_eq!(rec.status(), SaveStatus::Dirty);

        api.reject.set(false);
        assert!(save(&mut rec, &api).await.is_ok());
        assert_eq!(rec.dirty_count(), 0);
    }

    #[tokio::test]
    async fn test_partial_rejection_fails_whole_batch() {
        let api = FakeApi::default();
        api.reject_id.set(Some(8));
        let mut rec = tiering();
        rec.move_entry(7, Destination::Bucket(Bucket::S));
        rec.move_entry(8, Destination::Bucket(Bucket::S));

        assert!(save(&mut rec, &api).await.is_err());
        assert!(rec.is_dirty(7));
        assert!(rec.is_dirty(8));
        // The write for 7 did reach the server
        assert_eq!(api.patches.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_edits_during_save_stay_dirty() {
        let api = FakeApi::default();
        let mut rec = tiering();
        rec.move_entry(7, Destination::Bucket(Bucket::A));

        let batch = rec.begin_save().unwrap();
        assert_eq!(rec.status(), SaveStatus::Saving);
        rec.update_annotation(9, "queued");
        assert!(rec.begin_save().is_none());

        let result = batch.push(&api).await;
        let outcome = rec.finish_save(&batch, result).unwrap();
        assert_eq!(outcome, SaveOutcome { refresh: false, follow_up: true });
        assert!(!rec.is_dirty(7));
        assert!(rec.is_dirty(9));
        assert_eq!(rec.status(), SaveStatus::Dirty);
    }

    #[tokio::test]
    async fn test_result_after_reload_is_superseded() {
        let api = FakeApi::default();
        let mut rec = ranking();
        rec.move_entry(2, Destination::Index(0));

        let batch = rec.begin_save().unwrap();
        rec.discard();
        let result = batch.push(&api).await;
        assert_eq!(rec.finish_save(&batch, result), Err(SaveError::Superseded));
        assert_eq!(rec.status(), SaveStatus::Clean);
    }
}
