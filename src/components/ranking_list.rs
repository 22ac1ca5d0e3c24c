//! Ranking List Component
//!
//! Free-order ranking with drag-and-drop. Drop zones sit between cards;
//! dropping on a card takes its place.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::{DropZone, EntryCard};
use crate::context::use_app_context;
use crate::editor::CollectionEditor;

#[component]
pub fn RankingList(
    editor: CollectionEditor,
    editable: Signal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = create_dnd_signals();

    // Picking up: the threshold in leptos-dragdrop decides when a press is a drag
    Effect::new(move |_| {
        if let Some(id) = dnd.dragging_id_read.get() {
            editor.start_drag(&ctx, id);
        }
    });

    // Hover only feeds visual feedback for rankings
    Effect::new(move |_| {
        let target = dnd.drop_target_read.get();
        editor.hover(target);
    });

    bind_global_mouseup(dnd, move |dragged_id, target| {
        tracing::debug!(dragged_id, ?target, "ranking drop");
        editor.drop_on(target);
    });

    view! {
        <div class="ranking-list">
            <DropZone dnd=dnd index=0 />
            <For
                each=move || editor.entries().into_iter().enumerate()
                key=|(_, entry)| (entry.id, entry.position, entry.annotation.clone())
                children=move |(index, entry)| {
                    let id = entry.id;
                    let on_mousedown = make_on_mousedown(dnd, id);
                    let on_mouseenter = make_on_item_mouseenter(dnd, id);
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let is_drop_target = move || {
                        matches!(dnd.drop_target_read.get(), Some(DropTarget::Item(tid)) if tid == id)
                    };
                    let wrapper_class = move || {
                        let mut c = String::from("entry-wrapper");
                        if is_drop_target() { c.push_str(" drop-target"); }
                        c
                    };

                    view! {
                        <div
                            class=wrapper_class
                            on:mousedown=move |ev| if editable.get_untracked() { on_mousedown(ev) }
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                        >
                            <EntryCard entry=entry editor=editor editable=editable.get_untracked() />
                        </div>
                        <DropZone dnd=dnd index=index + 1 />
                    }
                }
            />
        </div>
    }
}
