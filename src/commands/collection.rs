//! Collection Commands
//!
//! Collection header, entry listing and the two write paths used by saves.

use async_trait::async_trait;
use serde::Serialize;

use collection_engine::{ApiResult, CollectionApi, CollectionEntry, CollectionId, EntryPatch, RankedEntry};

use super::{send_empty, send_json, ApiClient};
use crate::models::{Collection, EntryDto};

#[derive(Serialize)]
struct ReorderBody<'a> {
    entries: &'a [RankedEntry],
}

impl ApiClient {
    pub async fn get_collection(&self, id: CollectionId) -> ApiResult<Collection> {
        send_json(self.get(&format!("collections/{}", id))).await
    }

    /// Entries together with their embedded game summaries
    pub async fn list_entry_details(&self, id: CollectionId) -> ApiResult<Vec<EntryDto>> {
        send_json(self.get(&format!("collections/{}/entries", id))).await
    }
}

#[async_trait(?Send)]
impl CollectionApi for ApiClient {
    async fn list_entries(&self, collection_id: CollectionId) -> ApiResult<Vec<CollectionEntry>> {
        let entries = self.list_entry_details(collection_id).await?;
        Ok(entries.into_iter().map(|dto| dto.into_parts().0).collect())
    }

    async fn update_entry(&self, patch: &EntryPatch) -> ApiResult<CollectionEntry> {
        let request = self.patch(&format!("collection-entries/{}", patch.id)).json(patch);
        let dto: EntryDto = send_json(request).await?;
        Ok(dto.into_parts().0)
    }

    async fn reorder_entries(&self, collection_id: CollectionId, entries: &[RankedEntry]) -> ApiResult<()> {
        let request = self
            .post(&format!("collections/{}/reorder", collection_id))
            .json(&ReorderBody { entries });
        send_empty(request).await
    }
}
