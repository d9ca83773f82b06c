// Canvas 2D implementations of the host seams: the renderer draws through the
// canvas' 2d context, the viewport reads the size of the canvas' parent element.

use crate::color::Color;
use crate::surface::{Surface, Viewport};
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    // Grabs the 2d context from the canvas, None when the browser can't provide one
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let context = match canvas.get_context("2d")? {
            Some(context) => context.dyn_into::<CanvasRenderingContext2d>()?,
            None => return Ok(None),
        };
        Ok(Some(CanvasRenderer { canvas, context }))
    }
}

impl Surface for CanvasRenderer {
    type Error = JsValue;

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    ) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        width: f64,
    ) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.set_line_width(width);
        self.context.stroke();
        Ok(())
    }
}

pub struct ParentViewport {
    pub canvas: HtmlCanvasElement,
}

impl Viewport for ParentViewport {
    // Falls back to the canvas' own pixel size when it has been detached
    fn client_size(&self) -> (u32, u32) {
        match self.canvas.parent_element() {
            Some(parent) => (
                parent.client_width().max(0) as u32,
                parent.client_height().max(0) as u32,
            ),
            None => (self.canvas.width(), self.canvas.height()),
        }
    }
}
