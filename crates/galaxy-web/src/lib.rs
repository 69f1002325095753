//! Galaxy Web - Skill galaxy front ends
//!
//! The wasm module binds the galaxy to the host page's canvas and reports
//! hover/selection back through DOM events. The same app also runs as a
//! desktop window through the `skill-galaxy` binary.

pub mod app;
pub mod bridge;
mod ui;

/// Entry point for WASM module
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build(),
    );

    match galaxy_core::GalaxyConfig::embedded() {
        Ok(config) => {
            app::run(config);
        }
        Err(e) => tracing::error!("Embedded galaxy configuration is invalid: {}", e),
    }
}
