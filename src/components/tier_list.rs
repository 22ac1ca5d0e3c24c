//! Tier List Component
//!
//! One row per tier. The hovered tier is applied to the collection while
//! dragging so cards jump rows live; the drop target comes from the
//! collision chain rather than mouseenter, since rows and cards overlap.

use leptos::prelude::*;
use leptos_dragdrop::collision::CollisionChain;
use leptos_dragdrop::*;

use collection_engine::Bucket;

use crate::components::EntryCard;
use crate::context::use_app_context;
use crate::editor::CollectionEditor;

#[component]
pub fn TierList(
    editor: CollectionEditor,
    editable: Signal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = create_dnd_signals();

    Effect::new(move |_| {
        if let Some(id) = dnd.dragging_id_read.get() {
            editor.start_drag(&ctx, id);
        }
    });

    Effect::new(move |_| {
        let target = dnd.drop_target_read.get();
        editor.hover(target);
    });

    bind_collision_tracking(dnd, CollisionChain::default());
    bind_global_mouseup(dnd, move |dragged_id, target| {
        tracing::debug!(dragged_id, ?target, "tier drop");
        editor.drop_on(target);
    });

    view! {
        <div class="tier-list">
            {Bucket::ALL.into_iter().map(|bucket| view! {
                <TierRow bucket=bucket editor=editor editable=editable dnd=dnd />
            }).collect_view()}
        </div>
    }
}

#[component]
fn TierRow(
    bucket: Bucket,
    editor: CollectionEditor,
    editable: Signal<bool>,
    dnd: DndSignals,
) -> impl IntoView {
    let container_id = bucket.index();
    let label = match bucket {
        Bucket::Unclassified => "Unranked",
        other => other.as_str(),
    };

    let is_drop_target = move || {
        matches!(dnd.drop_target_read.get(), Some(DropTarget::Container(c)) if c == container_id)
    };
    let row_class = move || {
        let mut c = format!("tier-row tier-{}", bucket.as_str().to_lowercase());
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    view! {
        <div class=row_class>
            <div class="tier-label">{label}</div>
            <div class="tier-cards" data-drop-container=container_id.to_string()>
                <For
                    each=move || editor.bucket_entries(bucket)
                    key=|entry| (entry.id, entry.bucket, entry.annotation.clone())
                    children=move |entry| {
                        let id = entry.id;
                        let on_mousedown = make_on_mousedown(dnd, id);
                        view! {
                            <div
                                class="entry-wrapper"
                                data-drop-item=id.to_string()
                                on:mousedown=move |ev| if editable.get_untracked() { on_mousedown(ev) }
                            >
                                <EntryCard entry=entry editor=editor editable=editable.get_untracked() />
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
