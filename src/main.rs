//! Game List Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod editor;
mod models;
mod session;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    init_tracing();
    mount_to_body(App);
}

/// Route `tracing` events to the browser console
fn init_tracing() {
    use tracing::subscriber::set_global_default;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}
