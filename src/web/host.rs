//! `FrameHost` backed by `requestAnimationFrame` and the window resize event.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::core::{FrameHost, FrameId, Viewport};

/// Slot holding a JS callback. Filled after the loop it calls into exists.
pub(crate) type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser frame host.
pub struct WebFrameHost {
    window: Window,
    frame_callback: CallbackSlot,
    resize_callback: CallbackSlot,
}

impl WebFrameHost {
    pub(crate) fn new(window: Window, frame_callback: CallbackSlot, resize_callback: CallbackSlot) -> Self {
        Self {
            window,
            frame_callback,
            resize_callback,
        }
    }

    fn window_dimension(value: Result<JsValue, JsValue>) -> u32 {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    }
}

impl FrameHost for WebFrameHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            Self::window_dimension(self.window.inner_width()),
            Self::window_dimension(self.window.inner_height()),
        )
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        let slot = self.frame_callback.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(FrameId(handle)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", id, e);
        }
    }

    fn watch_resize(&mut self) {
        if let Some(callback) = self.resize_callback.borrow().as_ref() {
            if let Err(e) = self
                .window
                .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            {
                log::warn!("Failed to add resize listener: {:?}", e);
            }
        }
    }

    fn unwatch_resize(&mut self) {
        if let Some(callback) = self.resize_callback.borrow().as_ref() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove resize listener: {:?}", e);
            }
        }
    }
}
