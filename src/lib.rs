use log::{info, warn};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod form;
pub mod page;
pub mod reveal;
pub mod scroll;

use config::PageConfig;

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting landing page enhancements");
    let document = match page::document() {
        Ok(document) => document,
        Err(e) => {
            warn!("nothing to enhance: {}", e);
            return;
        }
    };

    let ready = document.clone();
    if let Err(e) = page::on_content_loaded(&document, move || {
        page::enhance(&ready, &PageConfig::default());
    }) {
        warn!("could not wait for page content: {}", e);
    }
}
