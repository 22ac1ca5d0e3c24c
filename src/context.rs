//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::commands::ApiClient;
use crate::session::Session;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the collection from the API - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the collection from the API - write
    set_reload_trigger: WriteSignal<u32>,
    pub session: Session,
    api: StoredValue<ApiClient, LocalStorage>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), session: Session, api: ApiClient) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            session,
            api: StoredValue::new_local(api),
        }
    }

    /// Trigger a reload of the authoritative collection data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
