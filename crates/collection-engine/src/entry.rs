//! Collection Entry
//!
//! One game's membership record within a ranking or tier collection.

use serde::{Deserialize, Serialize};

/// Server-assigned entry identifier
pub type EntryId = u32;

/// Identifier of the catalogued item (game) an entry points at
pub type ItemId = u32;

/// Tier a collection entry is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Bucket {
    S,
    A,
    B,
    C,
    D,
    /// Not yet placed in any tier
    #[default]
    #[serde(rename = "unclassified")]
    Unclassified,
}

impl Bucket {
    /// All buckets in display order (top tier first, unclassified last)
    pub const ALL: [Bucket; 6] = [
        Bucket::S,
        Bucket::A,
        Bucket::B,
        Bucket::C,
        Bucket::D,
        Bucket::Unclassified,
    ];

    /// Display rank, also used as the drop-container id
    pub fn index(&self) -> u32 {
        match self {
            Bucket::S => 0,
            Bucket::A => 1,
            Bucket::B => 2,
            Bucket::C => 3,
            Bucket::D => 4,
            Bucket::Unclassified => 5,
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::S => "S",
            Bucket::A => "A",
            Bucket::B => "B",
            Bucket::C => "C",
            Bucket::D => "D",
            Bucket::Unclassified => "unclassified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "S" => Bucket::S,
            "A" => Bucket::A,
            "B" => Bucket::B,
            "C" => Bucket::C,
            "D" => Bucket::D,
            _ => Bucket::Unclassified,
        }
    }
}

/// Which entry fields are authoritative for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListVariant {
    /// Free ranking: `position` is a strict 1-based order
    #[default]
    Ranking,
    /// Fixed tiers: `bucket` is authoritative, order inside a tier is cosmetic
    Tiering,
}

/// A collection entry as held in memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: EntryId,
    /// Immutable after creation
    pub referenced_item_id: ItemId,
    /// 1-based rank (ranking variant)
    pub position: u32,
    /// Tier (tiering variant)
    #[serde(default)]
    pub bucket: Bucket,
    /// Owner's free-text note, may be empty
    #[serde(default)]
    pub annotation: String,
}

impl CollectionEntry {
    pub fn new(id: EntryId, referenced_item_id: ItemId, position: u32) -> Self {
        Self {
            id,
            referenced_item_id,
            position,
            bucket: Bucket::Unclassified,
            annotation: String::new(),
        }
    }

    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = bucket;
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_index_roundtrip() {
        for bucket in Bucket::ALL {
            assert_eq!(Bucket::from_index(bucket.index()), Some(bucket));
        }
        assert_eq!(Bucket::from_index(6), None);
    }

    #[test]
    fn test_bucket_serialization() {
        assert_eq!(serde_json::to_string(&Bucket::A).unwrap(), "\"A\"");
        assert_eq!(
            serde_json::to_string(&Bucket::Unclassified).unwrap(),
            "\"unclassified\""
        );
        assert_eq!(Bucket::from_str("garbage"), Bucket::Unclassified);
    }

    #[test]
    fn test_entry_defaults_to_unclassified() {
        let json = r#"{"id":4,"referenced_item_id":90,"position":2}"#;
        let entry: CollectionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.bucket, Bucket::Unclassified);
        assert!(entry.annotation.is_empty());
    }
}
