pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    let config = shared::config::config();
    _ = console_log::init_with_level(config.log_level());
    console_error_panic_hook::set_once();
    log::info!(
        "Punto Evento starting, api on port {}, quote approval {:?}",
        config.api.port,
        config.workflow.quote_approval
    );

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
