//! Collection Engine
//!
//! Client-side state core for reorderable game collections, in two flavors:
//! a free ranking (strict 1..N order) and a fixed set of tiers.
//!
//! Layers, leaves first:
//! - `store`: the in-memory ordered entries
//! - `dirty`: which entries differ from what the server has
//! - `reconciler`: save / discard and the minimal write payload
//! - `drag`: one drag gesture, with snapshot and rollback
//!
//! Nothing here touches the DOM or the network; persistence goes through
//! the `CollectionApi` trait.

mod api;
mod dirty;
mod drag;
mod entry;
mod error;
mod reconciler;
mod store;

pub use api::{CollectionApi, CollectionId, EntryPatch, RankedEntry};
pub use dirty::DirtyTracker;
pub use drag::{DragController, DragSession, DragState, EditCapability, Speculation};
pub use entry::{Bucket, CollectionEntry, EntryId, ItemId, ListVariant};
pub use error::{ApiError, ApiResult, SaveError};
pub use reconciler::{Reconciler, SaveBatch, SaveOutcome, SavePayload, SaveStatus};
pub use store::{Destination, EntryStore};
