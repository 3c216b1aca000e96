//! Web bindings for the particle field.
//!
//! This module provides JavaScript-friendly APIs via wasm-bindgen.

mod canvas;
mod console;
mod host;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{window, HtmlCanvasElement};

use crate::animation::AnimationLoop;
use crate::particles::FieldConfig;

pub use canvas::Canvas2dSurface;
pub use console::init as init_logging;
pub use host::WebFrameHost;

use host::CallbackSlot;

type WebLoop = AnimationLoop<WebFrameHost, Canvas2dSurface>;

/// Animated particle field mounted on a canvas.
///
/// Dropping the value (or calling `free()` from JavaScript) tears it down.
#[wasm_bindgen]
pub struct NeuralFieldCanvas {
    animation: Rc<RefCell<WebLoop>>,
    frame_callback: CallbackSlot,
    resize_callback: CallbackSlot,
}

#[wasm_bindgen]
impl NeuralFieldCanvas {
    /// Mount on the canvas with the given element id.
    ///
    /// `config_json` is an optional JSON `FieldConfig`; missing keys take
    /// defaults. A canvas without a 2D context yields an inert instance.
    #[wasm_bindgen]
    pub fn mount(canvas_id: &str, config_json: Option<String>) -> Result<NeuralFieldCanvas, JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

        Self::mount_on(canvas, config_json)
    }

    /// Mount on a canvas element directly.
    #[wasm_bindgen(js_name = mountOn)]
    pub fn mount_on(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<NeuralFieldCanvas, JsValue> {
        let config = match config_json {
            Some(json) => FieldConfig::from_json_str(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => FieldConfig::default(),
        };
        let window = window().ok_or_else(|| JsValue::from_str("No window object"))?;

        let frame_callback: CallbackSlot = Rc::new(RefCell::new(None));
        let resize_callback: CallbackSlot = Rc::new(RefCell::new(None));
        let host = WebFrameHost::new(window, frame_callback.clone(), resize_callback.clone());
        let surface = Canvas2dSurface::from_canvas(canvas);

        let animation = Rc::new(RefCell::new(AnimationLoop::new(host, surface, config)));

        // Callbacks hold weak references so a late callback after teardown
        // finds nothing to drive.
        let weak: Weak<RefCell<WebLoop>> = Rc::downgrade(&animation);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(animation) = weak.upgrade() {
                animation.borrow_mut().on_frame();
            }
        }) as Box<dyn FnMut()>));

        let weak: Weak<RefCell<WebLoop>> = Rc::downgrade(&animation);
        *resize_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(animation) = weak.upgrade() {
                animation.borrow_mut().on_resize();
            }
        }) as Box<dyn FnMut()>));

        animation.borrow_mut().start();

        Ok(NeuralFieldCanvas {
            animation,
            frame_callback,
            resize_callback,
        })
    }

    /// Stop animating, cancel the pending frame and remove the resize listener.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.animation.borrow_mut().unmount();
        self.frame_callback.borrow_mut().take();
        self.resize_callback.borrow_mut().take();
    }

    /// Whether frames are being drawn.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation.borrow().is_running()
    }

    /// Frames painted so far.
    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> u64 {
        self.animation.borrow().frame_count()
    }

    /// Number of particles in the field, 0 when inert or unmounted.
    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.animation
            .borrow()
            .renderer()
            .map(|r| r.field().len())
            .unwrap_or(0)
    }
}

impl Drop for NeuralFieldCanvas {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Set the console log level: "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level
        .parse::<log::LevelFilter>()
        .map_err(|_| JsValue::from_str(&format!("Unknown log level '{}'", level)))?;
    init_logging(filter);
    Ok(())
}
