//! Session Provider
//!
//! The signed-in user and their API token, behind one context value.
//! Persisted to LocalStorage; components subscribe through a signal instead
//! of reading storage themselves. Token refresh is the auth service's job.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use collection_engine::EditCapability;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user_id: u32,
    pub username: String,
}

#[derive(Clone, Copy)]
pub struct Session {
    current: RwSignal<Option<SessionData>>,
    key: StoredValue<String>,
}

impl Session {
    /// Restore whatever was persisted under `key`
    pub fn load(key: &str) -> Self {
        let restored = read_stored(key);
        tracing::debug!(signed_in = restored.is_some(), "session restored");
        Self {
            current: RwSignal::new(restored),
            key: StoredValue::new(key.to_string()),
        }
    }

    /// Tracked read; re-runs the caller when the session changes
    pub fn get(&self) -> Option<SessionData> {
        self.current.get()
    }

    /// Read-only subscription handle
    pub fn subscribe(&self) -> Signal<Option<SessionData>> {
        self.current.into()
    }

    pub fn set(&self, data: SessionData) {
        write_stored(&self.key.get_value(), &data);
        self.current.set(Some(data));
    }

    pub fn clear(&self) {
        delete_stored(&self.key.get_value());
        self.current.set(None);
    }

    /// Bearer token for outgoing requests
    pub fn token(&self) -> Option<String> {
        self.current.with_untracked(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn user_id(&self) -> Option<u32> {
        self.current.with(|s| s.as_ref().map(|s| s.user_id))
    }

    /// Whether the signed-in user owns a collection
    pub fn can_edit(&self, owner_id: u32) -> OwnerCapability {
        OwnerCapability {
            viewer: self.current.with_untracked(|s| s.as_ref().map(|s| s.user_id)),
            owner_id,
        }
    }
}

/// Edit rights of a viewer over one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerCapability {
    pub viewer: Option<u32>,
    pub owner_id: u32,
}

impl EditCapability for OwnerCapability {
    fn can_edit(&self) -> bool {
        self.viewer == Some(self.owner_id)
    }
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
fn read_stored(key: &str) -> Option<SessionData> {
    LocalStorage::get(key).ok()
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
fn write_stored(key: &str, data: &SessionData) {
    if let Err(e) = LocalStorage::set(key, data) {
        tracing::warn!(error = %e, "failed to persist session");
    }
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
fn delete_stored(key: &str) {
    LocalStorage::delete(key);
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
fn read_stored(_key: &str) -> Option<SessionData> {
    None
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
fn write_stored(_key: &str, _data: &SessionData) {}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
fn delete_stored(_key: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_can_edit() {
        let cap = OwnerCapability { viewer: Some(3), owner_id: 3 };
        assert!(cap.can_edit());
    }

    #[test]
    fn test_visitor_and_anonymous_cannot_edit() {
        assert!(!OwnerCapability { viewer: Some(4), owner_id: 3 }.can_edit());
        assert!(!OwnerCapability { viewer: None, owner_id: 3 }.can_edit());
    }
}
