//! Game List Frontend App
//!
//! Root component: wires config, session, API client and the store into
//! context, then shows the requested collection.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::ApiClient;
use crate::components::{CollectionView, ToastHost};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::session::Session;
use crate::store::AppState;

/// Collection shown when the URL does not name one
const DEFAULT_COLLECTION_ID: u32 = 1;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let session = Session::load(&config.session_key);
    let api = ApiClient::new(config.api_url.clone(), session);
    let reload_trigger = signal(0u32);

    provide_context(Store::new(AppState::default()));
    provide_context(AppContext::new(reload_trigger, session, api));

    let collection_id = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|query| collection_id_from_query(&query))
        .unwrap_or(DEFAULT_COLLECTION_ID);

    let signed_in_as = move || session.subscribe().get().map(|s| s.username);

    view! {
        <div class="app-layout">
            <header class="top-bar">
                <span class="brand">"Game List"</span>
                {move || match signed_in_as() {
                    Some(name) => view! {
                        <span class="user">{name}</span>
                        <button class="sign-out-btn" on:click=move |_| session.clear()>"Sign out"</button>
                    }.into_any(),
                    None => view! { <span class="user anonymous">"Browsing as guest"</span> }.into_any(),
                }}
            </header>

            <main class="main-content">
                <CollectionView collection_id=collection_id />
            </main>

            <ToastHost />
        </div>
    }
}

/// Read `collection=<id>` from a `?a=b&c=d` query string
fn collection_id_from_query(query: &str) -> Option<u32> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "collection")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_id_from_query() {
        assert_eq!(collection_id_from_query("?collection=42"), Some(42));
        assert_eq!(collection_id_from_query("?tab=top&collection=7"), Some(7));
        assert_eq!(collection_id_from_query("?collection=abc"), None);
        assert_eq!(collection_id_from_query(""), None);
    }
}
