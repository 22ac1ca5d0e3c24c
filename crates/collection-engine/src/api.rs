//! Persistence API Seam
//!
//! The remote endpoints the reconciler writes through. The frontend
//! implements this over HTTP; tests use an in-memory fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entry::{Bucket, CollectionEntry, EntryId};
use crate::error::ApiResult;

pub type CollectionId = u32;

/// One row of the bulk ranking write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub id: EntryId,
    pub order: u32,
    pub description: String,
}

/// Partial update of one entry; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(skip)]
    pub id: EntryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Bucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Remote persistence endpoints
///
/// `?Send` because the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait CollectionApi {
    /// Authoritative entry list for a collection
    async fn list_entries(&self, collection_id: CollectionId) -> ApiResult<Vec<CollectionEntry>>;

    /// Update some fields of one entry
    async fn update_entry(&self, patch: &EntryPatch) -> ApiResult<CollectionEntry>;

    /// Rewrite order and notes of a ranking collection in one call
    async fn reorder_entries(&self, collection_id: CollectionId, entries: &[RankedEntry]) -> ApiResult<()>;
}
