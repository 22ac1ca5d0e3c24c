//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.

pub mod collision;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use collision::{Candidate, CollisionChain, Point, Probe, Rect};

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    /// Drop into a container (a tier row)
    Container(u32),
    /// Drop on an item (take its slot)
    Item(u32),
    /// Drop on a zone between items (insert index)
    Zone(usize),
}

/// Attribute marking an element as a droppable container
pub const CONTAINER_ATTR: &str = "data-drop-container";
/// Attribute marking an element as a droppable item
pub const ITEM_ATTR: &str = "data-drop-item";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is an editable field or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(item_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if pending.is_some() && dnd.dragging_id_read.get_untracked().is_none() {
            let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
            let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();

            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.dragging_id_write.set(pending);
            }
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for items (take the item's slot)
pub fn make_on_item_mouseenter(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != item_id {
                dnd.drop_target_write.set(Some(DropTarget::Item(item_id)));
            }
        }
    }
}

/// Create mouseenter handler for zones
pub fn make_on_zone_mouseenter(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Zone(index)));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` receives the dragged id and the target under the pointer, or
/// `None` when the drag was released outside every target, cancelled with
/// Escape, or the window lost focus.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, Option<DropTarget>) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let drop_cb = on_drop.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        dnd.pending_id_write.set(None);
        end_drag(&dnd);

        // Only report real drags; a click fires naturally on the element
        if let Some(dragged) = dragging_id {
            drop_cb(dragged, drop_target);
        }
    });

    let cancel_cb = on_drop;
    let on_cancel = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Some(key) = ev.dyn_ref::<web_sys::KeyboardEvent>() {
            if key.key() != "Escape" { return; }
        }
        if let Some(dragged) = dnd.dragging_id_read.get_untracked() {
            end_drag(&dnd);
            cancel_cb(dragged, None);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
            let _ = doc.add_event_listener_with_callback("keydown", on_cancel.as_ref().unchecked_ref());
        }
        let _ = win.add_event_listener_with_callback("blur", on_cancel.as_ref().unchecked_ref());
    }
    on_mouseup.forget();
    on_cancel.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

/// Resolve the drop target from element geometry on every mousemove.
///
/// Containers and items are found by their `data-drop-container` /
/// `data-drop-item` attributes, whose values are the target ids. Used by
/// layouts where hover events alone are ambiguous (tier rows full of cards).
pub fn bind_collision_tracking(dnd: DndSignals, chain: CollisionChain) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(dragged_id) = dnd.dragging_id_read.get_untracked() else {
            return;
        };
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let containers = measure(&doc, CONTAINER_ATTR, DropTarget::Container);
        let items = measure(&doc, ITEM_ATTR, DropTarget::Item);
        let footprint = items
            .iter()
            .find(|c| c.target == DropTarget::Item(dragged_id))
            .map(|c| c.rect)
            .unwrap_or_default();

        let pointer = Point::new(ev.client_x() as f64, ev.client_y() as f64);
        let probe = Probe {
            pointer,
            dragged: Rect::centered_at(pointer, footprint.width, footprint.height),
            dragged_id,
        };

        let hit = chain.detect(&probe, &containers, &items);
        if hit != dnd.drop_target_read.get_untracked() {
            dnd.drop_target_write.set(hit);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

fn measure(doc: &web_sys::Document, attr: &str, make: fn(u32) -> DropTarget) -> Vec<Candidate> {
    let Ok(nodes) = doc.query_selector_all(&format!("[{}]", attr)) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .filter_map(|el| {
            let id = el.get_attribute(attr)?.parse::<u32>().ok()?;
            let r = el.get_bounding_client_rect();
            Some(Candidate {
                target: make(id),
                rect: Rect::new(r.left(), r.top(), r.width(), r.height()),
            })
        })
        .collect()
}
