//! Drop Zone Component
//!
//! A horizontal line drop zone between ranked entries.

use leptos::prelude::*;
use leptos_dragdrop::*;

/// Drop zone shown before the entry at `index` (or after the last one)
#[component]
pub fn DropZone(
    dnd: DndSignals,
    index: usize,
) -> impl IntoView {
    let on_mouseenter = make_on_zone_mouseenter(dnd, index);
    let on_mouseleave = make_on_mouseleave(dnd);

    // Is this zone the current drop target?
    let is_active = move || matches!(dnd.drop_target_read.get(), Some(DropTarget::Zone(i)) if i == index);

    // Only show when dragging
    let is_dragging = move || dnd.dragging_id_read.get().is_some();

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if !is_dragging() { c.push_str(" hidden"); }
        if is_active() { c.push_str(" active"); }
        c
    };

    view! {
        <div
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}
