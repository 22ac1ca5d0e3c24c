//! Collection Editor
//!
//! Binds the collection engine to Leptos signals so components can read
//! entries, dirty count and drag state reactively, and routes UI events
//! (drag, drop, annotation edits, save, discard) into it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::DropTarget;

use collection_engine::{
    Bucket, CollectionApi, CollectionEntry, Destination, DragController, EntryId, ListVariant, Reconciler, SaveError,
    SaveStatus,
};

use crate::context::AppContext;
use crate::store::{store_push_toast, AppStore, ToastKind};

#[derive(Clone, Copy)]
pub struct CollectionEditor {
    reconciler: RwSignal<Reconciler>,
    drag: RwSignal<DragController>,
    owner_id: u32,
}

impl CollectionEditor {
    pub fn new(collection_id: u32, variant: ListVariant, owner_id: u32) -> Self {
        Self {
            reconciler: RwSignal::new(Reconciler::new(collection_id, variant)),
            drag: RwSignal::new(DragController::new()),
            owner_id,
        }
    }

    // ========================
    // Selectors
    // ========================

    pub fn entries(&self) -> Vec<CollectionEntry> {
        self.reconciler.with(|r| r.entries().to_vec())
    }

    pub fn bucket_entries(&self, bucket: Bucket) -> Vec<CollectionEntry> {
        self.reconciler.with(|r| r.store().in_bucket(bucket).cloned().collect())
    }

    pub fn variant(&self) -> ListVariant {
        self.reconciler.with_untracked(|r| r.variant())
    }

    pub fn dirty_count(&self) -> usize {
        self.reconciler.with(|r| r.dirty_count())
    }

    pub fn is_dirty(&self, id: EntryId) -> bool {
        self.reconciler.with(|r| r.is_dirty(id))
    }

    pub fn status(&self) -> SaveStatus {
        self.reconciler.with(|r| r.status())
    }

    pub fn active_entry(&self) -> Option<EntryId> {
        self.drag.with(|d| d.active_entry())
    }

    pub fn owner_id(&self) -> u32 {
        self.owner_id
    }

    // ========================
    // Mutations
    // ========================

    /// Replace local state with freshly fetched entries
    pub fn initialize(&self, entries: Vec<CollectionEntry>) {
        let reconciler = self.reconciler;
        self.drag.update(|d| reconciler.update(|r| d.cancel(r)));
        self.reconciler.update(|r| r.initialize(entries));
    }

    pub fn edit_annotation(&self, id: EntryId, text: &str) {
        self.reconciler.update(|r| {
            r.update_annotation(id, text);
        });
    }

    pub fn discard(&self) {
        self.cancel_drag();
        self.reconciler.update(|r| r.discard());
    }

    pub fn start_drag(&self, ctx: &AppContext, id: EntryId) {
        let capability = ctx.session.can_edit(self.owner_id);
        let reconciler = self.reconciler;
        self.drag.update(|d| {
            reconciler.with_untracked(|r| d.start(r, id, &capability));
        });
    }

    pub fn hover(&self, target: Option<DropTarget>) {
        let reconciler = self.reconciler;
        self.drag.update(|d| {
            let Some(active) = d.active_entry() else {
                return;
            };
            reconciler.update(|r| {
                let destination = target.and_then(|t| destination_for(r, active, t));
                d.update_target(r, destination);
            });
        });
    }

    /// Finish the gesture; `None` restores the pre-drag state
    pub fn drop_on(&self, target: Option<DropTarget>) {
        let reconciler = self.reconciler;
        self.drag.update(|d| {
            let Some(active) = d.active_entry() else {
                return;
            };
            reconciler.update(|r| {
                let destination = target.and_then(|t| destination_for(r, active, t));
                d.end(r, destination);
            });
        });
    }

    pub fn cancel_drag(&self) {
        let reconciler = self.reconciler;
        self.drag.update(|d| {
            if d.is_dragging() {
                reconciler.update(|r| d.cancel(r));
            }
        });
    }

    /// Push dirty entries to the API. Failures become a toast and leave the
    /// dirty markers in place.
    pub fn save(&self, ctx: AppContext, store: AppStore) {
        let Some(batch) = self.reconciler.try_update(|r| r.begin_save()).flatten() else {
            return;
        };
        let editor = *self;
        let api = ctx.api();
        spawn_local(async move {
            let result = batch.push(&api).await;
            let Some(outcome) = editor.reconciler.try_update(|r| r.finish_save(&batch, result)) else {
                return;
            };
            match outcome {
                Ok(outcome) => {
                    if outcome.refresh {
                        editor.refresh(&api, store).await;
                    }
                    if outcome.follow_up {
                        editor.save(ctx, store);
                    }
                }
                Err(SaveError::Superseded) => ctx.reload(),
                Err(err) => {
                    store_push_toast(&store, err.to_string(), ToastKind::Error);
                }
            }
        });
    }
}

impl CollectionEditor {
    /// Re-read the entries after a save. The collection header and games are
    /// unchanged by a save, so only the entry list is fetched. Skipped if the
    /// user started editing again while the request was out.
    async fn refresh(&self, api: &impl CollectionApi, store: AppStore) {
        let collection_id = self.reconciler.with_untracked(|r| r.collection_id());
        match api.list_entries(collection_id).await {
            Ok(entries) => {
                let idle = self.drag.with_untracked(|d| !d.is_dragging());
                if idle && self.reconciler.with_untracked(|r| r.status() == SaveStatus::Clean) {
                    self.initialize(entries);
                }
            }
            Err(err) => {
                tracing::warn!(collection_id, error = %err, "failed to refresh after save");
                store_push_toast(&store, format!("Saved, but could not refresh: {}", err), ToastKind::Info);
            }
        }
    }
}

/// Map a DOM drop target onto an engine destination for the active entry
fn destination_for(r: &Reconciler, active: EntryId, target: DropTarget) -> Option<Destination> {
    match (r.variant(), target) {
        (_, DropTarget::Item(id)) => Some(Destination::Slot(id)),
        (ListVariant::Ranking, DropTarget::Zone(gap)) => {
            let from = r.store().index_of(active)?;
            Some(Destination::Index(zone_to_index(from, gap)))
        }
        (ListVariant::Tiering, DropTarget::Container(index)) => Bucket::from_index(index).map(Destination::Bucket),
        _ => None,
    }
}

/// A zone sits before the entry at `gap`; once the dragged entry is lifted
/// out, every gap after it shifts up by one.
fn zone_to_index(from: usize, gap: usize) -> usize {
    if gap > from {
        gap - 1
    } else {
        gap
    }
}
