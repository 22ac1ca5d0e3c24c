//! Entry Card Component
//!
//! One game inside a ranking or tier list: cover, name, rank badge and the
//! owner's note.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use collection_engine::{CollectionEntry, ListVariant};

use crate::editor::CollectionEditor;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn EntryCard(
    entry: CollectionEntry,
    editor: CollectionEditor,
    /// Owner view: note is editable
    editable: bool,
) -> impl IntoView {
    let store = use_app_store();
    let id = entry.id;
    let game_id = entry.referenced_item_id;

    let game = move || store.games().with(|games| games.get(&game_id).cloned());
    let name = move || game().map(|g| g.name).unwrap_or_else(|| format!("Game #{}", game_id));
    let cover = move || game().and_then(|g| g.cover_url);

    let badge = match editor.variant() {
        ListVariant::Ranking => format!("#{}", entry.position),
        ListVariant::Tiering => String::new(),
    };

    let card_class = move || {
        let mut c = String::from("entry-card");
        if editor.is_dirty(id) { c.push_str(" dirty"); }
        if editor.active_entry() == Some(id) { c.push_str(" dragging"); }
        c
    };

    let annotation = entry.annotation.clone();

    view! {
        <div class=card_class>
            <span class="entry-badge">{badge}</span>
            {move || cover().map(|src| view! { <img class="entry-cover" src=src alt="" /> })}
            <span class="entry-name">{name}</span>
            {if editable {
                view! {
                    <textarea
                        class="entry-annotation"
                        placeholder="Add a note..."
                        prop:value=annotation
                        on:change=move |ev| {
                            let Some(area) = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
                            else {
                                return;
                            };
                            editor.edit_annotation(id, &area.value());
                        }
                    />
                }.into_any()
            } else if annotation.is_empty() {
                view! { <span></span> }.into_any()
            } else {
                view! { <p class="entry-annotation-text">{annotation}</p> }.into_any()
            }}
        </div>
    }
}
