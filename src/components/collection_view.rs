//! Collection View Component
//!
//! Loads one collection and shows it as a ranking or tier list. Every fetch
//! re-initializes the editor, dropping unsaved local edits.

use leptos::prelude::*;
use leptos::task::spawn_local;

use collection_engine::ListVariant;

use crate::components::{RankingList, SaveBar, TierList};
use crate::context::use_app_context;
use crate::editor::CollectionEditor;
use crate::models::EntryDto;
use crate::store::{store_push_toast, store_set_games, use_app_store, AppStateStoreFields, ToastKind};

#[component]
pub fn CollectionView(collection_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (editor, set_editor) = signal(None::<CollectionEditor>);

    // Load header and entries when the trigger changes
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        let api = ctx.api();
        tracing::debug!(collection_id, trigger, "loading collection");
        spawn_local(async move {
            let loaded = async {
                let header = api.get_collection(collection_id).await?;
                let details = api.list_entry_details(collection_id).await?;
                Ok::<_, collection_engine::ApiError>((header, details))
            }
            .await;

            let (header, details) = match loaded {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::warn!(collection_id, error = %e, "failed to load collection");
                    store_push_toast(&store, format!("Could not load collection: {}", e), ToastKind::Error);
                    return;
                }
            };

            let (entries, games): (Vec<_>, Vec<_>) = details.into_iter().map(EntryDto::into_parts).unzip();
            tracing::debug!(collection_id, entries = entries.len(), "collection loaded");

            let current = editor
                .get_untracked()
                .filter(|e| e.variant() == header.variant && e.owner_id() == header.owner_id);
            let active = current.unwrap_or_else(|| {
                let fresh = CollectionEditor::new(header.id, header.variant, header.owner_id);
                set_editor.set(Some(fresh));
                fresh
            });

            store_set_games(&store, games);
            store.collection().set(Some(header));
            active.initialize(entries);
        });
    });

    let editable = Signal::derive(move || {
        let owner = store.collection().with(|c| c.as_ref().map(|c| c.owner_id));
        owner.is_some() && ctx.session.user_id() == owner
    });

    let title = move || store.collection().with(|c| c.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let description = move || store.collection().with(|c| c.as_ref().and_then(|c| c.description.clone()));

    view! {
        <section class="collection-view">
            <h1>{title}</h1>
            {move || description().map(|d| view! { <p class="collection-description">{d}</p> })}
            {move || match editor.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(editor) => {
                    let list = match editor.variant() {
                        ListVariant::Ranking => view! { <RankingList editor=editor editable=editable /> }.into_any(),
                        ListVariant::Tiering => view! { <TierList editor=editor editable=editable /> }.into_any(),
                    };
                    view! {
                        <Show when=move || editable.get()>
                            <SaveBar editor=editor />
                        </Show>
                        {list}
                    }.into_any()
                }
            }}
        </section>
    }
}
