/// Tab Pilot - Chrome Extension popup for browsing and acting on tabs
/// Built with Rust + WASM + Yew

pub mod chrome;
pub mod config;
pub mod debounce;
pub mod domain;
pub mod error;
pub mod operations;
pub mod stats;
pub mod suggestion;
pub mod tab_data;
pub mod ui;
pub mod view_state;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export hostname labelling for JavaScript access
#[wasm_bindgen]
pub fn hostname_label(url: &str) -> String {
    domain::hostname_label(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
