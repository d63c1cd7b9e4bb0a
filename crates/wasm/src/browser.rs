//! The browser platform: DOM lookups, `HtmlImageElement` loading,
//! `requestAnimationFrame`, and `window.alert`.

use crate::decode::rgba_to_rgb;
use image::RgbImage;
use std::cell::RefCell;
use std::rc::Rc;
use texquad_core::{FrameCallback, ImageCallback, Platform, Surface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement,
    WebGl2RenderingContext, Window,
};

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

/// [`Platform`] backed by the page's `window` and `document`.
pub struct BrowserPlatform {
    window: Window,
    document: Document,
}

impl BrowserPlatform {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        Ok(Self { window, document })
    }

    fn canvas(&self, id: &str) -> Option<HtmlCanvasElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }
}

/// Reads decoded pixels back through an offscreen 2D canvas.
fn decode_image(document: &Document, image: &HtmlImageElement) -> Result<RgbImage, String> {
    let (width, height) = (image.natural_width(), image.natural_height());

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| "created element is not a canvas".to_string())?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or("2d context unavailable")?
        .dyn_into()
        .map_err(|_| "2d context has unexpected type".to_string())?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)
        .map_err(js_err)?;
    let pixels = ctx
        .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
        .map_err(js_err)?
        .data();

    rgba_to_rgb(width, height, &pixels.0)
        .ok_or_else(|| format!("unexpected pixel buffer size for {width}x{height} image"))
}

impl Platform for BrowserPlatform {
    type Gpu = glow::Context;

    fn acquire_context(&self, canvas_id: &str) -> Option<(glow::Context, Surface)> {
        let canvas = self.canvas(canvas_id)?;
        let gl = canvas
            .get_context("webgl2")
            .ok()??
            .dyn_into::<WebGl2RenderingContext>()
            .ok()?;
        let surface = Surface::new(canvas_id, canvas.width(), canvas.height());
        Some((glow::Context::from_webgl2_context(gl), surface))
    }

    fn shader_source(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }

    fn load_image(&self, path: &str, on_complete: ImageCallback) {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => return on_complete(Err(js_err(e))),
        };

        // Exactly one of onload / onerror takes the callback.
        let slot = Rc::new(RefCell::new(Some(on_complete)));

        let onload = {
            let slot = Rc::clone(&slot);
            let loaded = image.clone();
            let document = self.document.clone();
            Closure::once_into_js(move || {
                let callback = slot.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(decode_image(&document, &loaded));
                }
            })
        };
        let onerror = {
            let path = path.to_string();
            Closure::once_into_js(move || {
                let callback = slot.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(Err(format!("browser could not load '{path}'")));
                }
            })
        };

        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
        image.set_src(path);
    }

    // requestAnimationFrame is per-window; the surface only identifies the caller.
    fn request_animation_frame(&self, _surface: &Surface, frame: FrameCallback) {
        let callback = Closure::once_into_js(move || frame());
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {}", js_err(e));
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert failed ({}): {message}", js_err(e));
        }
    }
}
