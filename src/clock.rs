use std::{cell::RefCell, rc::Rc};

use shared::FrameClock;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::Window;

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` behind [`FrameClock`]. Every request reuses the same callback.
pub struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrames {
    pub fn new(window: Window, callback: FrameCallback) -> AnimationFrames {
        AnimationFrames { window, callback }
    }
}

impl FrameClock for AnimationFrames {
    type Handle = i32;
    type Error = JsValue;

    fn request(&mut self) -> Result<i32, JsValue> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| JsValue::from_str("frame callback was released"))?;

        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
    }

    fn cancel(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log::warn!("failed to cancel animation frame {handle}: {err:?}");
        }
    }
}
