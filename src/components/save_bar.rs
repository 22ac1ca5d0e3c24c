//! Save Bar Component
//!
//! Unsaved-change counter with Save / Discard actions for the owner.

use leptos::prelude::*;

use collection_engine::SaveStatus;

use crate::context::use_app_context;
use crate::editor::CollectionEditor;
use crate::store::use_app_store;

#[component]
pub fn SaveBar(editor: CollectionEditor) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let status = move || editor.status();
    let summary = move || match (status(), editor.dirty_count()) {
        (SaveStatus::Saving, _) => "Saving...".to_string(),
        (_, 0) => "All changes saved".to_string(),
        (_, 1) => "1 unsaved change".to_string(),
        (_, n) => format!("{} unsaved changes", n),
    };

    view! {
        <div class="save-bar">
            <span class="save-summary">{summary}</span>
            <button
                class="discard-btn"
                disabled=move || editor.dirty_count() == 0
                on:click=move |_| editor.discard()
            >
                "Discard"
            </button>
            <button
                class="save-btn"
                // Clicking mid-save queues a follow-up save
                disabled=move || editor.dirty_count() == 0
                on:click=move |_| editor.save(ctx, store)
            >
                "Save"
            </button>
        </div>
    }
}
