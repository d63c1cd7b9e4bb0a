#![deny(unsafe_code)]
//! WASM bindings for the texquad demo.
//!
//! The browser [`Platform`](texquad_core::Platform) lives in `browser` and is
//! only compiled for `wasm32`; pixel conversion in [`decode`] is plain Rust so
//! it can be tested on the host.
//!
//! From JavaScript, after the module's `init()` resolves, call `start()` for
//! the stock demo or `startWithConfig(json)` to override ids and paths.

pub mod decode;

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserPlatform;

#[cfg(target_arch = "wasm32")]
mod entry {
    use super::browser::BrowserPlatform;
    use std::rc::Rc;
    use texquad_core::{DemoConfig, RenderError};
    use wasm_bindgen::prelude::*;

    fn to_js(e: RenderError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Installs the panic hook and console logger when the module loads.
    #[wasm_bindgen(start)]
    pub fn init() -> Result<(), JsValue> {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Runs the stock demo on `#gl-canvas`.
    #[wasm_bindgen]
    pub fn start() -> Result<(), JsValue> {
        run(&DemoConfig::default())
    }

    /// Runs the demo with a JSON config; missing keys keep their defaults.
    #[wasm_bindgen(js_name = startWithConfig)]
    pub fn start_with_config(json: &str) -> Result<(), JsValue> {
        let config = DemoConfig::from_json(json).map_err(to_js)?;
        run(&config)
    }

    fn run(config: &DemoConfig) -> Result<(), JsValue> {
        let platform = Rc::new(BrowserPlatform::new()?);
        // The loop state is owned by the pending callbacks; the handle is not needed.
        texquad_core::run(platform, config).map_err(to_js)?;
        Ok(())
    }
}
