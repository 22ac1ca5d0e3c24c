//! Frontend Models
//!
//! Wire shapes of the REST API and their mapping onto engine types.

use serde::{Deserialize, Serialize};

use collection_engine::{Bucket, CollectionEntry, ListVariant};

/// Game as embedded in collection responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
}

/// Collection header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: u32,
    pub name: String,
    pub owner_id: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub variant: ListVariant,
}

/// Entry as the API returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    pub id: u32,
    pub game: GameSummary,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EntryDto {
    /// Split into the engine entry and the game it shows
    pub fn into_parts(self) -> (CollectionEntry, GameSummary) {
        let entry = CollectionEntry {
            id: self.id,
            referenced_item_id: self.game.id,
            // Unordered entries sort last
            position: self.order.unwrap_or(u32::MAX),
            bucket: self.tier.as_deref().map(Bucket::from_str).unwrap_or_default(),
            annotation: self.description.unwrap_or_default(),
        };
        (entry, self.game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_dto_nulls_map_to_defaults() {
        let json = r#"{
            "id": 12,
            "game": {"id": 400, "name": "Outer Wilds"},
            "order": null,
            "tier": null,
            "description": null
        }"#;
        let dto: EntryDto = serde_json::from_str(json).unwrap();
        let (entry, game) = dto.into_parts();
        assert_eq!(entry.referenced_item_id, 400);
        assert_eq!(entry.bucket, Bucket::Unclassified);
        assert_eq!(entry.position, u32::MAX);
        assert!(entry.annotation.is_empty());
        assert_eq!(game.name, "Outer Wilds");
    }

    #[test]
    fn test_entry_dto_tier_and_order() {
        let json = r#"{"id":1,"game":{"id":2,"name":"Hades","coverUrl":"c.png"},"order":3,"tier":"A","description":"run 40"}"#;
        let (entry, game) = serde_json::from_str::<EntryDto>(json).unwrap().into_parts();
        assert_eq!(entry.position, 3);
        assert_eq!(entry.bucket, Bucket::A);
        assert_eq!(entry.annotation, "run 40");
        assert_eq!(game.cover_url.as_deref(), Some("c.png"));
    }

    #[test]
    fn test_collection_variant() {
        let json = r#"{"id":5,"name":"Best of 2023","ownerId":8,"variant":"tiering"}"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.variant, ListVariant::Tiering);
        assert_eq!(collection.owner_id, 8);
    }
}
