//! Drag Session Controller
//!
//! Ephemeral state of one drag gesture, from pick-up to drop or cancel.
//!
//! The dragged entry's index and tier are recorded at `start`. In tiering
//! the hovered tier is applied to the store right away so the card moves
//! live; that provisional move is always rolled back to the recorded
//! placement before the real move is committed (or not, on cancel).
//!
//! Only the dragged entry is put back. Annotation edits and saves that land
//! while the gesture is open are kept, and dirtiness is re-derived against
//! whatever baseline is current at rollback time.

use tracing::debug;

use crate::entry::{Bucket, EntryId, ListVariant};
use crate::reconciler::Reconciler;
use crate::store::Destination;

/// Whether the current user may rearrange a collection
pub trait EditCapability {
    fn can_edit(&self) -> bool;
}

impl EditCapability for bool {
    fn can_edit(&self) -> bool {
        *self
    }
}

/// State of the store relative to the snapshot taken at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speculation {
    /// Store matches the snapshot
    Committed,
    /// A provisional move is applied
    Speculative,
    /// A provisional move was reverted
    RolledBack,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    entry_id: EntryId,
    origin_index: usize,
    origin_bucket: Bucket,
    candidate: Option<Destination>,
    phase: Speculation,
}

impl DragSession {
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    pub fn origin_bucket(&self) -> Bucket {
        self.origin_bucket
    }

    pub fn candidate(&self) -> Option<Destination> {
        self.candidate
    }

    pub fn phase(&self) -> Speculation {
        self.phase
    }
}

#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_entry(&self) -> Option<EntryId> {
        self.session().map(DragSession::entry_id)
    }

    pub fn candidate(&self) -> Option<Destination> {
        self.session().and_then(DragSession::candidate)
    }

    pub fn phase(&self) -> Option<Speculation> {
        self.session().map(DragSession::phase)
    }

    fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Pick up an entry. Ignored without edit rights, for unknown entries,
    /// or while another drag is active.
    pub fn start(&mut self, rec: &Reconciler, id: EntryId, capability: &impl EditCapability) -> bool {
        if self.is_dragging() || !capability.can_edit() {
            return false;
        }
        let (Some(origin_index), Some(entry)) = (rec.store().index_of(id), rec.entry(id)) else {
            return false;
        };

        self.state = DragState::Dragging(DragSession {
            entry_id: id,
            origin_index,
            origin_bucket: entry.bucket,
            candidate: None,
            phase: Speculation::Committed,
        });
        debug!(entry = id, "drag started");
        true
    }

    /// Move the hover candidate. Tiering previews the move in the store.
    pub fn update_target(&mut self, rec: &mut Reconciler, target: Option<Destination>) {
        let variant = rec.variant();
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };
        if session.candidate == target {
            return;
        }
        session.candidate = target;

        if variant != ListVariant::Tiering {
            return;
        }
        if session.phase == Speculation::Speculative {
            rec.restore_placement(session.entry_id, session.origin_index, session.origin_bucket);
            session.phase = Speculation::RolledBack;
        }
        if let Some(destination) = target {
            if rec.preview_move(session.entry_id, destination) {
                session.phase = Speculation::Speculative;
            }
        }
    }

    /// Drop. `None` means the drop landed nowhere valid and nothing changes.
    /// Returns whether the collection changed.
    pub fn end(&mut self, rec: &mut Reconciler, target: Option<Destination>) -> bool {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return false;
        };
        let id = session.entry_id;
        if session.phase == Speculation::Speculative {
            rec.restore_placement(id, session.origin_index, session.origin_bucket);
        }

        let changed = match target {
            Some(destination) => rec.move_entry(id, destination),
            None => false,
        };
        debug!(entry = id, ?target, changed, "drag ended");
        changed
    }

    /// Abandon the gesture (Escape, focus loss)
    pub fn cancel(&mut self, rec: &mut Reconciler) {
        self.end(rec, None);
    }
}
