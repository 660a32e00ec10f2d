use std::f64::consts::TAU;

use shared::{Rgb, Surface};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

#[derive(Clone)]
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> CanvasSurface {
        CanvasSurface { context }
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, width, height);

        Ok(())
    }

    fn stroke_trail(
        &mut self,
        head: (f64, f64),
        tail: (f64, f64),
        line_width: f64,
        color: Rgb,
        opacity: f64,
    ) -> Result<(), JsValue> {
        let gradient = self
            .context
            .create_linear_gradient(head.0, head.1, tail.0, tail.1);

        gradient.add_color_stop(0.0, &color.rgba(opacity))?;
        gradient.add_color_stop(1.0, &color.rgba(0.0))?;

        self.context.begin_path();
        self.context.move_to(head.0, head.1);
        self.context.line_to(tail.0, tail.1);
        self.context.set_stroke_style_canvas_gradient(&gradient);
        self.context.set_line_width(line_width);
        self.context.stroke();

        Ok(())
    }

    fn fill_head(
        &mut self,
        center: (f64, f64),
        radius: f64,
        color: Rgb,
        opacity: f64,
    ) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(center.0, center.1, radius, 0.0, TAU)?;
        self.context.set_fill_style_str(&color.rgba(opacity));
        self.context.fill();

        Ok(())
    }
}
