//! Toast Host Component
//!
//! Renders transient notifications and dismisses them after a delay.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::config::TOAST_MILLIS;
use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields, ToastKind};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    Timeout::new(TOAST_MILLIS, move || store_dismiss_toast(&store, id)).forget();
                    let class = match toast.kind {
                        ToastKind::Info => "toast",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
