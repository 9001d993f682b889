//! CareChat App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the browser adapters and hands the engine to the page
//! through the [`CareChat`] facade.

mod facade;

#[cfg(test)]
mod tests;

pub use facade::{load_config, turn_ran, CareChat};

use wasm_bindgen::prelude::*;

/// Runs once when the module is instantiated
#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("CareChat WASM starting...");
}
