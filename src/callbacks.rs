use std::{cell::RefCell, rc::Rc};

use shared::Renderer;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::clock::AnimationFrames;

pub type SharedRenderer = Rc<RefCell<Renderer<AnimationFrames>>>;

/// Matches the canvas backing store to its displayed size and returns the new pixel dimensions.
pub fn sync_canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let bound = canvas.get_bounding_client_rect();

    canvas.set_width(bound.width() as u32);
    canvas.set_height(bound.height() as u32);

    (canvas.width() as f64, canvas.height() as f64)
}

pub fn on_resize(canvas: &HtmlCanvasElement, renderer: &SharedRenderer) {
    let (width, height) = sync_canvas_size(canvas);

    renderer.borrow_mut().resized(width, height);
}

pub fn on_mouse_move(canvas: &HtmlCanvasElement, renderer: &SharedRenderer, event: MouseEvent) {
    let bound = canvas.get_bounding_client_rect();

    let x = event.client_x() as f64 - bound.left();
    let y = event.client_y() as f64 - bound.top();

    renderer
        .borrow_mut()
        .pointer_moved(x, y, js_sys::Date::now());
}
