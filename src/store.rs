//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::collections::HashMap;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Collection, GameSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Transient notification
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Header of the collection on screen
    pub collection: Option<Collection>,
    /// Games referenced by the current entries, by game id
    pub games: HashMap<u32, GameSummary>,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the game lookup for the current collection
pub fn store_set_games(store: &AppStore, games: impl IntoIterator<Item = GameSummary>) {
    *store.games().write() = games.into_iter().map(|g| (g.id, g)).collect();
}

/// Show a toast, returning its id
pub fn store_push_toast(store: &AppStore, message: impl Into<String>, kind: ToastKind) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast {
        id,
        message: message.into(),
        kind,
    });
    id
}

pub fn store_dismiss_toast(store: &AppStore, id: u32) {
    store.toasts().write().retain(|toast| toast.id != id);
}
