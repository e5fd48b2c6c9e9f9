mod app;
#[path = "lib/mod.rs"]
mod app_lib;
mod components;
mod features;
mod routes;

#[cfg(target_arch = "wasm32")]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::prelude::mount_to_body(crate::app::App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
